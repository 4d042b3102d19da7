//! Types, type classes, and unification.
//!
//! Type variables live in a [`ty::Tys`] arena and are solved in place, union-find style. Each
//! unsolved variable carries the set of type classes it must be an instance of, and unification
//! merges those sets, as in the classic presentation of [Hindley-Milner with type classes][1].
//!
//! [1]: https://web.cecs.pdx.edu/~mpj/thih/

#![allow(clippy::too_many_lines, clippy::single_match_else)]

pub mod class;
pub mod display;
pub mod parse;
pub mod scope;
pub mod ty;
pub mod unify;

mod names;

/// The overall mutable state when inferring types.
///
/// Contains the classes, which are only added to between inference passes, and the tys, which are
/// solved destructively during unification.
#[derive(Debug, Default, Clone)]
pub struct St {
  /// The classes.
  pub classes: class::Classes,
  /// The tys.
  pub tys: ty::Tys,
}

impl St {
  /// Unifies the two types. See [`unify::unify`].
  ///
  /// # Errors
  ///
  /// If the types couldn't be unified.
  pub fn unify(&mut self, want: &ty::Ty, got: &ty::Ty) -> Result<(), unify::Error> {
    unify::unify(&mut self.tys, &self.classes, want, got)
  }
}
