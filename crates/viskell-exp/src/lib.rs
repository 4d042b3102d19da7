//! Expressions, and inferring their types.
//!
//! Expressions live in an [`Exps`] arena. To infer types, borrow the arena with a [`Typed`] view,
//! which caches the type of each expression it has inferred. The arena can't be changed while a
//! view borrows it, so a cached type is never stale with respect to the tree.

#![allow(clippy::module_name_repetitions)]

mod haskell;
mod typed;

pub use typed::Typed;

use la_arena::Arena;
use std::fmt;
use str_util::{Name, SmolStr};
use viskell_env::{Env, FunVar};
use viskell_types::{St, ty::Ty, unify};

/// An expression.
#[derive(Debug)]
pub enum Exp {
  /// A literal, with a fixed type and the text to use when rendering it.
  Value {
    /// The type.
    ty: Ty,
    /// The text, like `42` or `"hi"`.
    text: SmolStr,
  },
  /// A use of a binder of an enclosing lambda or let.
  LocalVar(BinderIdx),
  /// A use of a function in the environment.
  FunVar(FunVar),
  /// A placeholder for an expression that is not there yet. Each hole has its own type.
  Hole,
  /// A function applied to an argument.
  Apply(ExpIdx, ExpIdx),
  /// A function of the binders, in order, returning the body.
  Lambda(Vec<BinderIdx>, ExpIdx),
  /// Bindings, in order, in scope in the body. Bindings are not generalized.
  Let(Vec<(BinderIdx, ExpIdx)>, ExpIdx),
  /// An expression with a type annotation.
  Annotated(ExpIdx, Ty),
}

/// An index of an expression.
pub type ExpIdx = la_arena::Idx<Exp>;

/// Something that binds a name to a type, like a lambda parameter.
#[derive(Debug)]
pub struct Binder {
  /// The name.
  pub name: Name,
  /// An optional type the binder must have.
  pub annotation: Option<Ty>,
}

/// An index of a binder.
pub type BinderIdx = la_arena::Idx<Binder>;

/// Storage for expressions and binders.
#[derive(Debug, Default)]
pub struct Exps {
  /// The expressions.
  pub exp: Arena<Exp>,
  /// The binders.
  pub binder: Arena<Binder>,
}

impl Exps {
  /// Returns a new literal.
  pub fn value(&mut self, ty: Ty, text: &str) -> ExpIdx {
    self.exp.alloc(Exp::Value { ty, text: SmolStr::from(text) })
  }

  /// Returns a new use of the binder.
  pub fn local_var(&mut self, binder: BinderIdx) -> ExpIdx {
    self.exp.alloc(Exp::LocalVar(binder))
  }

  /// Returns a new use of the function in `env` with this name.
  ///
  /// # Errors
  ///
  /// If there is no such function.
  pub fn fun_var(&mut self, env: &Env, name: &str) -> Result<ExpIdx, viskell_env::Error> {
    let fv = env.use_fn(name)?;
    Ok(self.exp.alloc(Exp::FunVar(fv)))
  }

  /// Returns a new hole.
  pub fn hole(&mut self) -> ExpIdx {
    self.exp.alloc(Exp::Hole)
  }

  /// Returns a new application.
  pub fn apply(&mut self, func: ExpIdx, arg: ExpIdx) -> ExpIdx {
    self.exp.alloc(Exp::Apply(func, arg))
  }

  /// Returns `func` applied to each of the args in turn.
  pub fn apply_many<I>(&mut self, func: ExpIdx, args: I) -> ExpIdx
  where
    I: IntoIterator<Item = ExpIdx>,
  {
    args.into_iter().fold(func, |func, arg| self.apply(func, arg))
  }

  /// Returns a new lambda.
  pub fn lambda(&mut self, binders: Vec<BinderIdx>, body: ExpIdx) -> ExpIdx {
    self.exp.alloc(Exp::Lambda(binders, body))
  }

  /// Returns a new let.
  pub fn let_in(&mut self, bindings: Vec<(BinderIdx, ExpIdx)>, body: ExpIdx) -> ExpIdx {
    self.exp.alloc(Exp::Let(bindings, body))
  }

  /// Returns a new annotated expression.
  pub fn annotated(&mut self, exp: ExpIdx, ty: Ty) -> ExpIdx {
    self.exp.alloc(Exp::Annotated(exp, ty))
  }

  /// Returns a new binder with no annotation.
  pub fn binder(&mut self, name: Name) -> BinderIdx {
    self.binder.alloc(Binder { name, annotation: None })
  }

  /// Returns a new binder that must have the type.
  pub fn annotated_binder(&mut self, name: Name, ty: Ty) -> BinderIdx {
    self.binder.alloc(Binder { name, annotation: Some(ty) })
  }
}

/// An error when inferring the type of an expression.
#[derive(Debug)]
pub struct Error {
  /// The expression whose typing rule failed.
  pub exp: ExpIdx,
  /// What went wrong.
  pub kind: ErrorKind,
}

/// A kind of error.
#[derive(Debug)]
pub enum ErrorKind {
  /// Types couldn't be unified.
  Unify(unify::Error),
  /// A binder was used outside of the lambda or let that binds it. The tree was built wrong.
  UnboundBinder(BinderIdx),
}

impl Error {
  /// Returns a value that displays this.
  #[must_use]
  pub fn display<'a>(&'a self, st: &'a St, exps: &'a Exps) -> impl fmt::Display + 'a {
    ErrorDisplay { err: self, st, exps }
  }
}

struct ErrorDisplay<'a> {
  err: &'a Error,
  st: &'a St,
  exps: &'a Exps,
}

impl fmt::Display for ErrorDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.err.kind {
      ErrorKind::Unify(e) => {
        let exp = self.exps.to_haskell(self.st, self.err.exp);
        write!(f, "{} in `{exp}`", e.display(self.st))
      }
      ErrorKind::UnboundBinder(b) => {
        let name = &self.exps.binder[*b].name;
        write!(f, "`{name}` is used outside of its binder")
      }
    }
  }
}
