//! See [`TypeScope`].

use crate::ty::{Ty, TyVar, Tys};
use fast_hash::FxHashMap;
use str_util::SmolStr;

/// Hands out type variables for one use site.
///
/// A scope remembers two things:
///
/// - the variables it made for names, so that every `a` in one signature is the same variable.
/// - the variables it made when instantiating, so that every occurrence of one variable in the
///   instantiated types maps to the same fresh variable.
///
/// Use a new scope for each use site. Reusing one would share variables between the use sites.
#[derive(Debug, Default)]
pub struct TypeScope {
  named: FxHashMap<SmolStr, TyVar>,
  subst: FxHashMap<TyVar, TyVar>,
}

impl TypeScope {
  /// Returns a new, empty scope.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the variable for this name, making a fresh one the first time the name is asked for.
  pub fn var(&mut self, tys: &mut Tys, name: &str) -> TyVar {
    if let Some(&ret) = self.named.get(name) {
      return ret;
    }
    let ret = tys.fresh_var(name);
    self.named.insert(SmolStr::from(name), ret);
    ret
  }

  /// Returns a copy of `ty` where every unsolved variable is replaced by a fresh variable with the
  /// same classes. Within this scope, a given variable is always replaced by the same fresh one.
  ///
  /// Types without unsolved variables are returned as-is.
  pub fn instantiate(&mut self, tys: &mut Tys, ty: &Ty) -> Ty {
    if tys.free_vars(ty).is_empty() {
      log::trace!("nothing to instantiate");
      return ty.clone();
    }
    self.instantiate_go(tys, ty)
  }

  fn instantiate_go(&mut self, tys: &mut Tys, ty: &Ty) -> Ty {
    match tys.prune(ty) {
      Ty::Var(var) => {
        if let Some(&new) = self.subst.get(&var) {
          return Ty::Var(new);
        }
        let classes = tys.unsolved_classes(var).clone();
        let base = tys.var_base(var).clone();
        let new = tys.fresh_var_with_classes(&base, classes);
        self.subst.insert(var, new);
        Ty::Var(new)
      }
      ty @ Ty::Con(_) => ty,
      Ty::App(func, arg) => {
        let func = self.instantiate_go(tys, &func);
        let arg = self.instantiate_go(tys, &arg);
        Ty::app(func, arg)
      }
    }
  }
}
