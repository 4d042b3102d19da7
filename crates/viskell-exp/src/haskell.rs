//! Rendering expressions as Haskell source.

use crate::{Exp, ExpIdx, Exps};
use config::DisplayStyle;
use std::fmt;
use viskell_types::St;

impl Exps {
  /// Returns the expression as Haskell source, fully parenthesized.
  ///
  /// `st` is needed to render the types of annotations.
  #[must_use]
  pub fn to_haskell(&self, st: &St, exp: ExpIdx) -> String {
    HaskellDisplay { exps: self, st, exp }.to_string()
  }
}

struct HaskellDisplay<'a> {
  exps: &'a Exps,
  st: &'a St,
  exp: ExpIdx,
}

impl HaskellDisplay<'_> {
  fn with(&self, exp: ExpIdx) -> Self {
    Self { exp, ..*self }
  }
}

impl fmt::Display for HaskellDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.exps.exp[self.exp] {
      Exp::Value { text, .. } => write!(f, "({text})"),
      Exp::LocalVar(binder) => f.write_str(self.exps.binder[*binder].name.as_str()),
      Exp::FunVar(fv) => f.write_str(fv.name().as_str()),
      Exp::Hole => f.write_str("undefined"),
      Exp::Apply(func, arg) => write!(f, "({} {})", self.with(*func), self.with(*arg)),
      Exp::Lambda(binders, body) => {
        f.write_str("(\\")?;
        for (idx, binder) in binders.iter().enumerate() {
          if idx != 0 {
            f.write_str(" ")?;
          }
          f.write_str(self.exps.binder[*binder].name.as_str())?;
        }
        write!(f, " -> {})", self.with(*body))
      }
      Exp::Let(bindings, body) => {
        f.write_str("(let {")?;
        for (idx, (binder, bound)) in bindings.iter().enumerate() {
          if idx != 0 {
            f.write_str("; ")?;
          }
          let name = &self.exps.binder[*binder].name;
          write!(f, "{name} = {}", self.with(*bound))?;
        }
        write!(f, "}} in {})", self.with(*body))
      }
      Exp::Annotated(inner, ty) => {
        let ty = ty.display(self.st, DisplayStyle::Context);
        write!(f, "({} :: {ty})", self.with(*inner))
      }
    }
  }
}
