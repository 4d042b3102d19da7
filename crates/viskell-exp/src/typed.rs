//! See [`Typed`].

use crate::{BinderIdx, Error, ErrorKind, Exp, ExpIdx, Exps};
use la_arena::ArenaMap;
use viskell_types::{St, scope::TypeScope, ty::Ty, unify};

/// A view of some expressions that infers and caches their types.
///
/// The cached type of an expression is what inference returned for it. Variables in it may be
/// solved later, by inferring the type of an enclosing expression. Use [`viskell_types::ty::Tys`]
/// to look through them.
#[derive(Debug)]
pub struct Typed<'a> {
  exps: &'a Exps,
  tys: ArenaMap<ExpIdx, Ty>,
  binders: ArenaMap<BinderIdx, Ty>,
}

impl<'a> Typed<'a> {
  /// Returns a new view with nothing cached.
  #[must_use]
  pub fn new(exps: &'a Exps) -> Self {
    Self { exps, tys: ArenaMap::default(), binders: ArenaMap::default() }
  }

  /// Returns the expressions this is a view of.
  #[must_use]
  pub fn exps(&self) -> &'a Exps {
    self.exps
  }

  /// Infers the type of the expression, returning it with all solved variables replaced.
  ///
  /// # Errors
  ///
  /// If the expression doesn't type check. Variables solved before the error stay solved.
  pub fn infer(&mut self, st: &mut St, exp: ExpIdx) -> Result<Ty, Error> {
    let ty = elapsed::log("Typed::infer", || self.find_type(st, exp))?;
    Ok(st.tys.zonk(&ty))
  }

  /// Returns the type of the expression, inferring it if it is not cached.
  ///
  /// # Errors
  ///
  /// If the expression doesn't type check.
  pub fn find_type(&mut self, st: &mut St, exp: ExpIdx) -> Result<Ty, Error> {
    if let Some(ty) = self.tys.get(exp) {
      return Ok(ty.clone());
    }
    let ret = self.get(st, exp)?;
    self.tys.insert(exp, ret.clone());
    Ok(ret)
  }

  /// Returns the cached type of the expression, if any.
  #[must_use]
  pub fn cached(&self, exp: ExpIdx) -> Option<&Ty> {
    self.tys.get(exp)
  }

  /// Returns the type of the binder, if an enclosing lambda or let has been inferred.
  #[must_use]
  pub fn binder_ty(&self, binder: BinderIdx) -> Option<&Ty> {
    self.binders.get(binder)
  }

  /// Forgets every cached type, so the expressions will be inferred again from scratch.
  pub fn reset(&mut self) {
    log::debug!("reset cached types");
    self.tys = ArenaMap::default();
    self.binders = ArenaMap::default();
  }

  fn get(&mut self, st: &mut St, exp: ExpIdx) -> Result<Ty, Error> {
    let exps = self.exps;
    match &exps.exp[exp] {
      Exp::Value { ty, .. } => Ok(ty.clone()),
      Exp::LocalVar(binder) => match self.binders.get(*binder) {
        Some(ty) => Ok(ty.clone()),
        None => Err(Error { exp, kind: ErrorKind::UnboundBinder(*binder) }),
      },
      Exp::FunVar(fv) => Ok(fv.ty(&mut st.tys)),
      Exp::Hole => Ok(Ty::Var(st.tys.fresh_var("hole"))),
      Exp::Apply(func, arg) => {
        let func_ty = self.find_type(st, *func)?;
        let arg_ty = self.find_type(st, *arg)?;
        let res = Ty::Var(st.tys.fresh_var("res"));
        log::trace!("apply at {exp:?}");
        st.unify(&func_ty, &Ty::fun(arg_ty, res.clone())).map_err(|e| unify_error(exp, e))?;
        Ok(res)
      }
      Exp::Lambda(binders, body) => {
        let mut scope = TypeScope::new();
        let params: Vec<_> = binders.iter().map(|&b| self.bind(st, &mut scope, b)).collect();
        let body = self.find_type(st, *body)?;
        Ok(Ty::fun_many(params, body))
      }
      Exp::Let(bindings, body) => {
        let mut scope = TypeScope::new();
        for &(binder, bound) in bindings {
          let got = self.find_type(st, bound)?;
          let want = self.bind(st, &mut scope, binder);
          st.unify(&want, &got).map_err(|e| unify_error(exp, e))?;
        }
        self.find_type(st, *body)
      }
      Exp::Annotated(inner, annotation) => {
        let got = self.find_type(st, *inner)?;
        let want = TypeScope::new().instantiate(&mut st.tys, annotation);
        st.unify(&want, &got).map_err(|e| unify_error(exp, e))?;
        Ok(got)
      }
    }
  }

  /// Gives the binder a type, from its annotation if it has one.
  fn bind(&mut self, st: &mut St, scope: &mut TypeScope, binder: BinderIdx) -> Ty {
    let data = &self.exps.binder[binder];
    let ty = match &data.annotation {
      Some(annotation) => scope.instantiate(&mut st.tys, annotation),
      None => Ty::Var(st.tys.fresh_var(data.name.as_str())),
    };
    self.binders.insert(binder, ty.clone());
    ty
  }
}

fn unify_error(exp: ExpIdx, e: unify::Error) -> Error {
  Error { exp, kind: ErrorKind::Unify(e) }
}
