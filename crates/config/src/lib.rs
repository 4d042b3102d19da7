//! Configuration.

#![deny(clippy::pedantic, missing_debug_implementations, missing_docs, rust_2018_idioms)]

pub mod file;

/// How type class constraints are written when displaying a type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStyle {
  /// Constraints are written at every occurrence of a variable, like `Num a -> Num a`.
  #[default]
  Inline,
  /// Constraints are collected into a context in front of the type, like `Num a => a -> a`.
  Context,
}
