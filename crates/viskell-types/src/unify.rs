//! Unification: given two types, figuring out whether they can be made equal, and if so, making
//! them so by solving type variables.

use crate::class::{Class, Classes};
use crate::ty::{Ty, TyVar, Tys};
use str_util::Name;

/// An error when unifying.
#[derive(Debug, Clone)]
pub struct Error {
  /// What went wrong.
  pub kind: ErrorKind,
  /// Where it went wrong, as argument positions, outermost first.
  ///
  /// For instance `[1, 0]` means "in argument 0 of argument 1 of the types being unified". The
  /// arguments of a function type `a -> b` are `a` at 0 and `b` at 1.
  pub path: Vec<usize>,
}

impl Error {
  fn within(mut self, pos: usize) -> Self {
    self.path.insert(0, pos);
    self
  }
}

impl From<ErrorKind> for Error {
  fn from(kind: ErrorKind) -> Self {
    Self { kind, path: Vec::new() }
  }
}

/// A reason why unification failed.
#[derive(Debug, Clone)]
pub enum ErrorKind {
  /// The types have incompatible shapes or constructors. Contains the wanted then the gotten type.
  Mismatch(Ty, Ty),
  /// A constrained variable would be solved to a type that is not an instance of the class.
  Constraint(Constraint),
  /// Merging class sets led to a set no type can satisfy.
  Unsatisfiable(Class, Class),
  /// A variable would be solved to a type containing itself.
  Circularity(Circularity),
}

/// A type was not an instance of a class a variable required.
#[derive(Debug, Clone)]
pub struct Constraint {
  /// The variable with the constraint.
  pub var: TyVar,
  /// The class.
  pub class: Class,
  /// The type that is not an instance.
  pub ty: Ty,
}

/// A type was circular.
#[derive(Debug, Clone)]
pub struct Circularity {
  /// This var appears in `ty`.
  pub var: TyVar,
  /// Contains `var`, but is not `var`.
  pub ty: Ty,
}

/// Unifies two types, updating `tys` to record how.
///
/// `want` is what the context expects and `got` is what was provided. This only matters for error
/// messages and for which of two variables is solved to the other.
///
/// # Errors
///
/// If the types couldn't be unified. Some variables may have been solved or constrained before
/// the error was found.
pub fn unify(tys: &mut Tys, classes: &Classes, want: &Ty, got: &Ty) -> Result<(), Error> {
  let want = tys.prune(want);
  let got = tys.prune(got);
  match (want, got) {
    (Ty::Var(want), Ty::Var(got)) => {
      if want == got {
        return Ok(());
      }
      unify_vars(tys, classes, want, got)
    }
    (Ty::Var(var), ty) | (ty, Ty::Var(var)) => unify_var(tys, classes, var, ty),
    (Ty::Con(want), Ty::Con(got)) => {
      if want == got {
        Ok(())
      } else {
        Err(ErrorKind::Mismatch(Ty::Con(want), Ty::Con(got)).into())
      }
    }
    (want @ Ty::App(..), got @ Ty::App(..)) => unify_app(tys, classes, want, got),
    (want, got) => Err(ErrorKind::Mismatch(want, got).into()),
  }
}

/// Both are unsolved and distinct. Solves `want` to `got`, which takes the merged classes.
fn unify_vars(tys: &mut Tys, classes: &Classes, want: TyVar, got: TyVar) -> Result<(), Error> {
  let merged = tys.unsolved_classes(want).union(tys.unsolved_classes(got), classes);
  if let Some((a, b)) = classes.conflict(&merged) {
    return Err(ErrorKind::Unsatisfiable(a, b).into());
  }
  log::debug!("solve {} to {}", tys.var_name(want), tys.var_name(got));
  tys.set_classes(got, merged);
  tys.solve(want, Ty::Var(got));
  Ok(())
}

/// `var` is unsolved and `ty` is pruned and not a variable.
fn unify_var(tys: &mut Tys, classes: &Classes, var: TyVar, ty: Ty) -> Result<(), Error> {
  if tys.occurs(var, &ty) {
    return Err(ErrorKind::Circularity(Circularity { var, ty }).into());
  }
  let required = tys.unsolved_classes(var).clone();
  for class in required.iter() {
    check_instance(tys, classes, var, class, &ty)?;
  }
  log::debug!("solve {}", tys.var_name(var));
  tys.solve(var, ty);
  Ok(())
}

/// Checks `ty`, which is not a variable, is an instance of `class`, which `var` requires.
///
/// The args of `ty` must also be instances of `class`. Variables among them get the class added to
/// their constraints.
fn check_instance(
  tys: &mut Tys,
  classes: &Classes,
  var: TyVar,
  class: Class,
  ty: &Ty,
) -> Result<(), Error> {
  let (head, args) = tys.spine(ty);
  let con = match &head {
    Ty::Con(con) if classes.has_instance(class, con.as_str()) => con,
    Ty::Con(_) | Ty::Var(_) | Ty::App(..) => {
      return Err(ErrorKind::Constraint(Constraint { var, class, ty: tys.zonk(ty) }).into());
    }
  };
  let arg_classes = classes.arg_classes(class, con.as_str());
  for arg in &args {
    for arg_class in arg_classes.iter() {
      require(tys, classes, var, arg_class, arg)?;
    }
  }
  Ok(())
}

fn require(
  tys: &mut Tys,
  classes: &Classes,
  var: TyVar,
  class: Class,
  ty: &Ty,
) -> Result<(), Error> {
  match tys.prune(ty) {
    Ty::Var(other) => {
      let mut set = tys.unsolved_classes(other).clone();
      if set.insert(classes, class) {
        if let Some((a, b)) = classes.conflict(&set) {
          return Err(ErrorKind::Unsatisfiable(a, b).into());
        }
        log::trace!("{} now needs {}", tys.var_name(other), classes.name(class));
        tys.set_classes(other, set);
      }
      Ok(())
    }
    ty => check_instance(tys, classes, var, class, &ty),
  }
}

/// Both are applications.
fn unify_app(tys: &mut Tys, classes: &Classes, want: Ty, got: Ty) -> Result<(), Error> {
  // report the whole types, not some inner piece, when the heads already differ.
  if let (Some(w), Some(g)) = (con_head(tys, &want), con_head(tys, &got)) {
    if w != g {
      return Err(ErrorKind::Mismatch(tys.zonk(&want), tys.zonk(&got)).into());
    }
  }
  let (Ty::App(want_func, want_arg), Ty::App(got_func, got_arg)) = (want, got) else {
    unreachable!("both should be applications")
  };
  unify(tys, classes, &want_func, &got_func)?;
  let pos = tys.spine(&want_func).1.len();
  unify(tys, classes, &want_arg, &got_arg).map_err(|e| e.within(pos))
}

/// Returns the constructor at the head of the spine and how many args it is applied to, if the
/// head is a constructor.
fn con_head(tys: &Tys, ty: &Ty) -> Option<(Name, usize)> {
  match tys.spine(ty) {
    (Ty::Con(name), args) => Some((name, args.len())),
    _ => None,
  }
}
