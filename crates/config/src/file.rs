//! The schema of a catalog file.
//!
//! A catalog declares type classes and named functions with their signatures, like so:
//!
//! ```toml
//! version = 1
//!
//! [[class]]
//! name = "Ord"
//! supers = ["Eq"]
//! instances = ["Int", "Char", "[]"]
//!
//! [[class]]
//! name = "Functor"
//! unconstrained = ["[]", "Maybe", "Either"]
//!
//! [[function]]
//! name = "compare"
//! signature = "Ord a => a -> a -> Ordering"
//! category = "Ord"
//! documentation = "Compares two values."
//! ```

use serde::Deserialize;
use str_util::SmolStr;

/// The only supported catalog version.
pub const VERSION: u16 = 1;

/// The root of a catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalog {
  /// The version. Should be [`VERSION`].
  pub version: u16,
  /// The type classes, in dependency order: a class may only name earlier classes as supers.
  #[serde(default, rename = "class")]
  pub classes: Vec<Class>,
  /// The functions.
  #[serde(default, rename = "function")]
  pub functions: Vec<Function>,
}

/// A type class declaration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Class {
  /// The name, like `Num`.
  pub name: SmolStr,
  /// The direct super classes.
  #[serde(default)]
  pub supers: Vec<SmolStr>,
  /// The names of the type constructors that are instances, if their arguments are too, like
  /// `instance Eq a => Eq [a]`.
  #[serde(default)]
  pub instances: Vec<SmolStr>,
  /// The names of the type constructors that are instances whatever their arguments are, like
  /// `instance Monoid [a]` or `instance Functor (Either e)`.
  #[serde(default)]
  pub unconstrained: Vec<SmolStr>,
}

/// A function declaration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Function {
  /// The name, like `map` or `(+)`.
  pub name: SmolStr,
  /// The type signature, in Haskell syntax.
  pub signature: SmolStr,
  /// The category, used to group functions in menus.
  #[serde(default)]
  pub category: SmolStr,
  /// Human-readable documentation.
  #[serde(default)]
  pub documentation: SmolStr,
}
