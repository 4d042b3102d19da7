//! Semantic types and the storage of type variables.

#![allow(clippy::module_name_repetitions)]

use crate::{class::ClassSet, names};
use str_util::{Name, SmolStr};

/// A type.
///
/// Variables are handles into a [`Tys`], which knows whether they have been solved. Use
/// [`Tys::prune`] before inspecting the shape of a type that may contain solved variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
  /// A type variable.
  Var(TyVar),
  /// A type constructor, like `Int`, or the head of an application, like `[]` or `->`.
  Con(Name),
  /// A type applied to one argument. Constructors with many arguments are left-nested
  /// applications, so `a -> b` is `App(App(Con("->"), a), b)`.
  App(Box<Ty>, Box<Ty>),
}

impl Ty {
  /// The name of the function type constructor.
  pub const ARROW: &'static str = "->";
  /// The name of the list type constructor.
  pub const LIST: &'static str = "[]";
  /// The name of the unit type.
  pub const UNIT: &'static str = "()";
  /// The name of the character type.
  pub const CHAR: &'static str = "Char";
  /// The name of the synonym for a list of characters. It is never the name of a [`Ty::Con`].
  pub const STRING: &'static str = "String";

  /// Returns a type constructor with no arguments.
  ///
  /// # Panics
  ///
  /// If `name` is empty.
  #[must_use]
  pub fn con(name: &str) -> Ty {
    Ty::Con(Name::new(name))
  }

  /// Returns `func` applied to `arg`.
  #[must_use]
  pub fn app(func: Ty, arg: Ty) -> Ty {
    Ty::App(Box::new(func), Box::new(arg))
  }

  /// Returns the named constructor applied to the args, left to right.
  #[must_use]
  pub fn con_app<I>(name: &str, args: I) -> Ty
  where
    I: IntoIterator<Item = Ty>,
  {
    args.into_iter().fold(Ty::con(name), Ty::app)
  }

  /// Returns the function type `param -> res`.
  #[must_use]
  pub fn fun(param: Ty, res: Ty) -> Ty {
    Ty::con_app(Ty::ARROW, [param, res])
  }

  /// Returns the curried function type `p1 -> p2 -> ... -> res`.
  #[must_use]
  pub fn fun_many<I>(params: I, res: Ty) -> Ty
  where
    I: IntoIterator<Item = Ty>,
    I::IntoIter: DoubleEndedIterator,
  {
    params.into_iter().rev().fold(res, |acc, param| Ty::fun(param, acc))
  }

  /// Returns the list type `[elem]`.
  #[must_use]
  pub fn list(elem: Ty) -> Ty {
    Ty::con_app(Ty::LIST, [elem])
  }

  /// Returns the tuple type of the elements. The empty tuple is unit.
  ///
  /// # Panics
  ///
  /// If there is exactly one element, since there are no 1-tuples.
  #[must_use]
  pub fn tuple(elems: Vec<Ty>) -> Ty {
    assert_ne!(elems.len(), 1, "there are no 1-tuples");
    if elems.is_empty() {
      return Ty::con(Ty::UNIT);
    }
    let name = tuple_con_name(elems.len());
    Ty::con_app(name.as_str(), elems)
  }

  /// Returns the head and the arguments of this, without looking through variables.
  ///
  /// For `Either a b` that is `Either` and `[a, b]`. For anything that is not an application the
  /// arguments are empty.
  #[must_use]
  pub fn spine(&self) -> (&Ty, Vec<&Ty>) {
    let mut args = Vec::new();
    let mut cur = self;
    while let Ty::App(func, arg) = cur {
      args.push(arg.as_ref());
      cur = func.as_ref();
    }
    args.reverse();
    (cur, args)
  }
}

/// Returns the name of the tuple type constructor with the given arity, like `(,,)` for 3.
pub(crate) fn tuple_con_name(arity: usize) -> SmolStr {
  let mut ret = String::with_capacity(arity + 1);
  ret.push('(');
  for _ in 1..arity {
    ret.push(',');
  }
  ret.push(')');
  SmolStr::from(ret)
}

/// Returns the arity if this is the name of a tuple type constructor.
pub(crate) fn tuple_arity(name: &str) -> Option<usize> {
  let inner = name.strip_prefix('(')?.strip_suffix(')')?;
  (!inner.is_empty() && inner.bytes().all(|b| b == b',')).then_some(inner.len() + 1)
}

/// A type variable.
///
/// Two variables are the same variable iff they are `==`. The name is only for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TyVar(idx::Idx);

/// Storage of all the type variables for one inference session.
#[derive(Debug, Default, Clone)]
pub struct Tys {
  var_data: Vec<VarData>,
  /// The base names the variables were created with, for debugging.
  var_base: Vec<SmolStr>,
}

/// Data about a type variable.
#[derive(Debug, Clone)]
enum VarData {
  /// Solved to this type. Chains of variables solved to variables are shortened by
  /// [`Tys::prune`].
  Solved(Ty),
  /// Not solved, but must be an instance of all these classes.
  Unsolved(ClassSet),
}

impl Tys {
  /// Returns a fresh unsolved variable with no class constraints.
  pub fn fresh_var(&mut self, base: &str) -> TyVar {
    self.fresh_var_with_classes(base, ClassSet::default())
  }

  /// Returns a fresh unsolved variable that must be an instance of the classes.
  pub fn fresh_var_with_classes(&mut self, base: &str, classes: ClassSet) -> TyVar {
    let ret = TyVar(idx::Idx::new(self.var_data.len()));
    self.var_data.push(VarData::Unsolved(classes));
    self.var_base.push(SmolStr::from(base));
    ret
  }

  /// Returns the number of variables created so far.
  #[must_use]
  pub fn len(&self) -> usize {
    self.var_data.len()
  }

  /// Returns whether no variables have been created yet.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.var_data.is_empty()
  }

  /// Returns a debug name for this variable: its base name plus a number, or a greek letter if it
  /// had no base name.
  #[must_use]
  pub fn var_name(&self, var: TyVar) -> String {
    let idx = var.0.to_usize();
    names::debug_name(&self.var_base[idx], idx)
  }

  pub(crate) fn var_base(&self, var: TyVar) -> &SmolStr {
    &self.var_base[var.0.to_usize()]
  }

  /// Returns the variable at the end of the chain of variables solved to variables starting at
  /// `var`. The returned variable is either unsolved or solved to a non-variable type.
  #[must_use]
  pub fn find(&self, mut var: TyVar) -> TyVar {
    while let VarData::Solved(Ty::Var(next)) = &self.var_data[var.0.to_usize()] {
      var = *next;
    }
    var
  }

  /// Like [`Self::find`], but also rewrites every variable along the chain to point straight at
  /// the end of it.
  fn find_compress(&mut self, var: TyVar) -> TyVar {
    let root = self.find(var);
    let mut cur = var;
    while cur != root {
      let VarData::Solved(Ty::Var(next)) = self.var_data[cur.0.to_usize()] else {
        unreachable!("not in a chain of solved variables")
      };
      if next != root {
        log::trace!("compress {} to {}", self.var_name(cur), self.var_name(root));
        self.var_data[cur.0.to_usize()] = VarData::Solved(Ty::Var(root));
      }
      cur = next;
    }
    root
  }

  /// Returns the representative of this type: if it is a solved variable, what it is solved to,
  /// else the type itself. The result is never a solved variable, and pruning it again returns it
  /// unchanged.
  ///
  /// Only the outermost layer is pruned. Arguments of an application may still be solved
  /// variables.
  pub fn prune(&mut self, ty: &Ty) -> Ty {
    match ty {
      Ty::Var(var) => {
        let root = self.find_compress(*var);
        self.root_ty(root)
      }
      Ty::Con(_) | Ty::App(_, _) => ty.clone(),
    }
  }

  /// Like [`Self::prune`], but does not shorten chains.
  #[must_use]
  pub fn resolve(&self, ty: &Ty) -> Ty {
    match ty {
      Ty::Var(var) => self.root_ty(self.find(*var)),
      Ty::Con(_) | Ty::App(_, _) => ty.clone(),
    }
  }

  fn root_ty(&self, root: TyVar) -> Ty {
    match &self.var_data[root.0.to_usize()] {
      VarData::Solved(ty) => ty.clone(),
      VarData::Unsolved(_) => Ty::Var(root),
    }
  }

  /// Returns the type with every solved variable, at any depth, replaced by what it is solved to.
  #[must_use]
  pub fn zonk(&self, ty: &Ty) -> Ty {
    match self.resolve(ty) {
      ty @ (Ty::Var(_) | Ty::Con(_)) => ty,
      Ty::App(func, arg) => Ty::app(self.zonk(&func), self.zonk(&arg)),
    }
  }

  /// Like [`Ty::spine`], but looks through solved variables at every position along the spine.
  #[must_use]
  pub fn spine(&self, ty: &Ty) -> (Ty, Vec<Ty>) {
    let mut args = Vec::new();
    let mut cur = self.resolve(ty);
    while let Ty::App(func, arg) = cur {
      args.push(*arg);
      cur = self.resolve(&func);
    }
    args.reverse();
    (cur, args)
  }

  /// Returns whether the variable is unsolved.
  #[must_use]
  pub fn is_free(&self, var: TyVar) -> bool {
    matches!(self.var_data[var.0.to_usize()], VarData::Unsolved(_))
  }

  /// Returns the classes the representative of `var` must be an instance of, or `None` if `var`
  /// is solved to a non-variable type.
  #[must_use]
  pub fn classes(&self, var: TyVar) -> Option<&ClassSet> {
    match &self.var_data[self.find(var).0.to_usize()] {
      VarData::Unsolved(classes) => Some(classes),
      VarData::Solved(_) => None,
    }
  }

  /// Returns the classes of an unsolved variable.
  pub(crate) fn unsolved_classes(&self, var: TyVar) -> &ClassSet {
    match &self.var_data[var.0.to_usize()] {
      VarData::Unsolved(classes) => classes,
      VarData::Solved(_) => unreachable!("{} is solved", self.var_name(var)),
    }
  }

  /// Replaces the classes of an unsolved variable.
  pub(crate) fn set_classes(&mut self, var: TyVar, classes: ClassSet) {
    match &mut self.var_data[var.0.to_usize()] {
      VarData::Unsolved(old) => *old = classes,
      VarData::Solved(_) => unreachable!("{} is solved", self.var_name(var)),
    }
  }

  /// Solves an unsolved variable to the type.
  pub(crate) fn solve(&mut self, var: TyVar, ty: Ty) {
    let data = &mut self.var_data[var.0.to_usize()];
    assert!(matches!(data, VarData::Unsolved(_)), "solve a solved variable");
    *data = VarData::Solved(ty);
  }

  /// Returns whether the unsolved variable `var` occurs anywhere in `ty`.
  #[must_use]
  pub fn occurs(&self, var: TyVar, ty: &Ty) -> bool {
    match self.resolve(ty) {
      Ty::Var(other) => var == other,
      Ty::Con(_) => false,
      Ty::App(func, arg) => self.occurs(var, &func) || self.occurs(var, &arg),
    }
  }

  /// Returns the unsolved variables in `ty`, without duplicates, in order of first appearance.
  #[must_use]
  pub fn free_vars(&self, ty: &Ty) -> Vec<TyVar> {
    let mut ret = Vec::new();
    self.free_vars_go(ty, &mut ret);
    ret
  }

  fn free_vars_go(&self, ty: &Ty, ac: &mut Vec<TyVar>) {
    match self.resolve(ty) {
      Ty::Var(var) => {
        if !ac.contains(&var) {
          ac.push(var);
        }
      }
      Ty::Con(_) => {}
      Ty::App(func, arg) => {
        self.free_vars_go(&func, ac);
        self.free_vars_go(&arg, ac);
      }
    }
  }
}
