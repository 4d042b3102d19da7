//! Test helpers.

use config::DisplayStyle;
use viskell_env::{Env, FunctionInfo};
use viskell_exp::{ExpIdx, Exps, Typed};
use viskell_types::{St, parse, scope::TypeScope, ty::Ty};

/// A fresh inference session: the prelude classes, an environment, and an expression arena.
pub(crate) struct Session {
  pub(crate) st: St,
  pub(crate) env: Env,
  pub(crate) exps: Exps,
}

impl Session {
  /// The prelude classes and functions.
  pub(crate) fn new() -> Self {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut st = St::default();
    let env = Env::prelude(&mut st).expect("prelude should load");
    Self { st, env, exps: Exps::default() }
  }

  /// The prelude classes, but no functions.
  pub(crate) fn classes_only() -> Self {
    let mut ret = Self::new();
    ret.env = Env::default();
    ret
  }

  /// Parses the signature with its own scope.
  #[track_caller]
  pub(crate) fn ty(&mut self, sig: &str) -> Ty {
    match parse::get(&mut self.st, &mut TypeScope::new(), sig) {
      Ok(x) => x,
      Err(e) => panic!("couldn't parse `{sig}`: {e}"),
    }
  }

  /// Adds a function with the signature to the environment.
  #[track_caller]
  pub(crate) fn define(&mut self, name: &str, sig: &str) {
    let signature = self.ty(sig);
    let info = FunctionInfo::new(str_util::Name::new(name), signature);
    self.env.insert(info).expect("should not be a duplicate");
  }

  /// Returns a new use of the function.
  #[track_caller]
  pub(crate) fn fun(&mut self, name: &str) -> ExpIdx {
    match self.exps.fun_var(&self.env, name) {
      Ok(x) => x,
      Err(e) => panic!("{e}"),
    }
  }

  /// Returns a new literal with the type.
  #[track_caller]
  pub(crate) fn value(&mut self, sig: &str, text: &str) -> ExpIdx {
    let ty = self.ty(sig);
    self.exps.value(ty, text)
  }

  /// Displays the type inline, with canonical names.
  pub(crate) fn show(&self, ty: &Ty) -> String {
    ty.display(&self.st, DisplayStyle::Inline).to_string()
  }

  /// Infers the type of the expression in a fresh view, returning it displayed or the error
  /// displayed.
  pub(crate) fn infer(&mut self, exp: ExpIdx) -> Result<String, String> {
    let mut typed = Typed::new(&self.exps);
    match typed.infer(&mut self.st, exp) {
      Ok(ty) => Ok(self.show(&ty)),
      Err(e) => Err(e.display(&self.st, &self.exps).to_string()),
    }
  }

  /// Renders the expression as Haskell.
  pub(crate) fn haskell(&self, exp: ExpIdx) -> String {
    self.exps.to_haskell(&self.st, exp)
  }
}

/// Checks the expression infers to the type.
#[track_caller]
pub(crate) fn check(s: &mut Session, exp: ExpIdx, want: &str) {
  match s.infer(exp) {
    Ok(got) => pretty_assertions::assert_eq!(want, got),
    Err(e) => panic!("{}: {e}", s.haskell(exp)),
  }
}

/// Checks the expression fails to infer with the error message.
#[track_caller]
pub(crate) fn fail(s: &mut Session, exp: ExpIdx, want: &str) {
  match s.infer(exp) {
    Ok(got) => panic!("{}: unexpectedly inferred `{got}`", s.haskell(exp)),
    Err(e) => pretty_assertions::assert_eq!(want, e),
  }
}
