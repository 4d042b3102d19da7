//! Displaying types and unification errors.
//!
//! Variables are named `a`, `b`, ... in order of first appearance in whatever is being displayed,
//! so the same type always looks the same no matter how many variables were made before it.

use crate::St;
use crate::names::VarName;
use crate::ty::{self, Ty, TyVar};
use crate::unify::{self, ErrorKind};
use config::DisplayStyle;
use fmt_util::comma_seq;
use std::fmt;

impl Ty {
  /// Returns a value that displays this.
  #[must_use]
  pub fn display<'a>(&'a self, st: &'a St, style: DisplayStyle) -> impl fmt::Display + 'a {
    TopDisplay { st, ty: self, style }
  }
}

/// The display names of the variables in one message, in order of first appearance.
#[derive(Debug, Default)]
struct VarNames(Vec<TyVar>);

impl VarNames {
  fn extend(&mut self, st: &St, ty: &Ty) {
    for var in st.tys.free_vars(ty) {
      if !self.0.contains(&var) {
        self.0.push(var);
      }
    }
  }

  fn get(&self, var: TyVar) -> Option<VarName> {
    self.0.iter().position(|&v| v == var).map(VarName)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TyPrec {
  Arrow,
  App,
  Atom,
}

struct TopDisplay<'a> {
  st: &'a St,
  ty: &'a Ty,
  style: DisplayStyle,
}

impl fmt::Display for TopDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut names = VarNames::default();
    names.extend(self.st, self.ty);
    let inline = match self.style {
      DisplayStyle::Inline => true,
      DisplayStyle::Context => {
        write_context(f, self.st, &names)?;
        false
      }
    };
    let cx = TyDisplayCx { st: self.st, names: &names, inline };
    cx.ty(self.ty, TyPrec::Arrow).fmt(f)
  }
}

/// Writes the constraints of the variables, like `(Eq a, Show b) => `, if there are any.
fn write_context(f: &mut fmt::Formatter<'_>, st: &St, names: &VarNames) -> fmt::Result {
  let mut constraints = Vec::<(&str, VarName)>::new();
  for (idx, &var) in names.0.iter().enumerate() {
    let Some(set) = st.tys.classes(var) else { continue };
    for name in set.names(&st.classes) {
      constraints.push((name.as_str(), VarName(idx)));
    }
  }
  let iter = constraints.iter().map(|(class, var)| ConstraintDisplay { class, var });
  match constraints.len() {
    0 => return Ok(()),
    1 => comma_seq(f, iter)?,
    _ => {
      f.write_str("(")?;
      comma_seq(f, iter)?;
      f.write_str(")")?;
    }
  }
  f.write_str(" => ")
}

struct ConstraintDisplay<'a> {
  class: &'a str,
  var: &'a VarName,
}

impl fmt::Display for ConstraintDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.class, self.var)
  }
}

#[derive(Clone, Copy)]
struct TyDisplayCx<'a> {
  st: &'a St,
  names: &'a VarNames,
  /// Whether to write the classes of a variable next to it, like `Num a`.
  inline: bool,
}

impl<'a> TyDisplayCx<'a> {
  fn ty(self, ty: &'a Ty, prec: TyPrec) -> TyDisplay<'a> {
    TyDisplay { cx: self, ty, prec }
  }

  fn fmt_var(self, f: &mut fmt::Formatter<'_>, var: TyVar, prec: TyPrec) -> fmt::Result {
    let Some(name) = self.names.get(var) else {
      return f.write_str(&self.st.tys.var_name(var));
    };
    let classes = match self.st.tys.classes(var) {
      Some(set) if self.inline && !set.is_empty() => set.names(&self.st.classes),
      _ => return write!(f, "{name}"),
    };
    let needs_parens = prec == TyPrec::Atom;
    if needs_parens {
      f.write_str("(")?;
    }
    match classes.as_slice() {
      [class] => write!(f, "{class} {name}")?,
      _ => {
        f.write_str("(")?;
        comma_seq(f, classes.iter())?;
        write!(f, ") {name}")?;
      }
    }
    if needs_parens {
      f.write_str(")")?;
    }
    Ok(())
  }
}

struct TyDisplay<'a> {
  cx: TyDisplayCx<'a>,
  ty: &'a Ty,
  prec: TyPrec,
}

impl fmt::Display for TyDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let (head, args) = self.cx.st.tys.spine(self.ty);
    match (&head, args.as_slice()) {
      (Ty::Var(var), []) => self.cx.fmt_var(f, *var, self.prec),
      (Ty::Con(name), []) => {
        if name.as_str() == Ty::ARROW {
          f.write_str("(->)")
        } else {
          f.write_str(name.as_str())
        }
      }
      (Ty::Con(name), [param, res]) if name.as_str() == Ty::ARROW => {
        let needs_parens = self.prec > TyPrec::Arrow;
        if needs_parens {
          f.write_str("(")?;
        }
        self.cx.ty(param, TyPrec::App).fmt(f)?;
        f.write_str(" -> ")?;
        self.cx.ty(res, TyPrec::Arrow).fmt(f)?;
        if needs_parens {
          f.write_str(")")?;
        }
        Ok(())
      }
      (Ty::Con(name), [elem]) if name.as_str() == Ty::LIST => {
        f.write_str("[")?;
        self.cx.ty(elem, TyPrec::Arrow).fmt(f)?;
        f.write_str("]")
      }
      (Ty::Con(name), elems) if ty::tuple_arity(name.as_str()) == Some(elems.len()) => {
        f.write_str("(")?;
        comma_seq(f, elems.iter().map(|elem| self.cx.ty(elem, TyPrec::Arrow)))?;
        f.write_str(")")
      }
      (_, args) => {
        let needs_parens = self.prec == TyPrec::Atom;
        if needs_parens {
          f.write_str("(")?;
        }
        self.cx.ty(&head, TyPrec::Atom).fmt(f)?;
        for arg in args {
          f.write_str(" ")?;
          self.cx.ty(arg, TyPrec::Atom).fmt(f)?;
        }
        if needs_parens {
          f.write_str(")")?;
        }
        Ok(())
      }
    }
  }
}

impl unify::Error {
  /// Returns a value that displays this.
  #[must_use]
  pub fn display<'a>(&'a self, st: &'a St) -> impl fmt::Display + 'a {
    ErrorDisplay { err: self, st }
  }
}

struct ErrorDisplay<'a> {
  err: &'a unify::Error,
  st: &'a St,
}

impl<'a> ErrorDisplay<'a> {
  fn cx<'b>(&self, names: &'b VarNames) -> TyDisplayCx<'b>
  where
    'a: 'b,
  {
    TyDisplayCx { st: self.st, names, inline: true }
  }
}

impl fmt::Display for ErrorDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut names = VarNames::default();
    match &self.err.kind {
      ErrorKind::Mismatch(want, got) => {
        names.extend(self.st, want);
        names.extend(self.st, got);
        let cx = self.cx(&names);
        let want = cx.ty(want, TyPrec::Arrow);
        let got = cx.ty(got, TyPrec::Arrow);
        write!(f, "`{want}` and `{got}` are incompatible types")?;
      }
      ErrorKind::Constraint(c) => {
        names.extend(self.st, &c.ty);
        let class = self.st.classes.name(c.class);
        let ty = self.cx(&names).ty(&c.ty, TyPrec::Arrow);
        write!(f, "`{ty}` is not an instance of `{class}`")?;
      }
      ErrorKind::Unsatisfiable(a, b) => {
        let a = self.st.classes.name(*a);
        let b = self.st.classes.name(*b);
        write!(f, "no type is an instance of both `{a}` and `{b}`")?;
      }
      ErrorKind::Circularity(c) => {
        let var = Ty::Var(c.var);
        names.extend(self.st, &var);
        names.extend(self.st, &c.ty);
        let cx = self.cx(&names);
        let var = cx.ty(&var, TyPrec::Arrow);
        let ty = cx.ty(&c.ty, TyPrec::Arrow);
        write!(f, "circular type: `{var}` occurs in `{ty}`")?;
      }
    }
    let mut path = self.err.path.iter().rev();
    if let Some(innermost) = path.next() {
      write!(f, " (in argument {innermost}")?;
      for pos in path {
        write!(f, " of argument {pos}")?;
      }
      f.write_str(")")?;
    }
    Ok(())
  }
}
