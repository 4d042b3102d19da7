use crate::check::Session;
use pretty_assertions::assert_eq;
use viskell_types::{parse, scope::TypeScope, ty::Ty};

#[test]
fn uses_are_independent() {
  let mut s = Session::new();
  let id = s.env.use_fn("id").unwrap();
  let t1 = id.ty(&mut s.st.tys);
  let t2 = id.ty(&mut s.st.tys);
  assert_ne!(t1, t2);
  let (_, args1) = t1.spine();
  let (_, args2) = t2.spine();
  s.st.unify(args1[0], &Ty::con("Int")).unwrap();
  s.st.unify(args2[0], &Ty::con("Bool")).unwrap();
  assert_eq!(s.show(&t1), "Int -> Int");
  assert_eq!(s.show(&t2), "Bool -> Bool");
  // the signature itself is untouched.
  let sig = s.env.lookup("id").unwrap().signature.clone();
  assert_eq!(s.show(&sig), "a -> a");
}

#[test]
fn instantiate_keeps_classes() {
  let mut s = Session::new();
  let sig = s.env.lookup("fromIntegral").unwrap().signature.clone();
  let got = TypeScope::new().instantiate(&mut s.st.tys, &sig);
  assert_ne!(got, sig);
  assert_eq!(s.show(&got), "Integral a -> Num b");
}

#[test]
fn instantiate_is_memoized() {
  let mut s = Session::new();
  let sig = s.ty("a -> b -> a");
  let mut scope = TypeScope::new();
  let t1 = scope.instantiate(&mut s.st.tys, &sig);
  let t2 = scope.instantiate(&mut s.st.tys, &sig);
  assert_eq!(t1, t2);
  let (_, args) = s.st.tys.spine(&t1);
  let (_, res_args) = s.st.tys.spine(&args[1]);
  assert_eq!(args[0], res_args[1]);
}

#[test]
fn instantiate_ground() {
  let mut s = Session::new();
  let sig = s.ty("[Int] -> Bool");
  let before = s.st.tys.len();
  let got = TypeScope::new().instantiate(&mut s.st.tys, &sig);
  assert_eq!(got, sig);
  assert_eq!(s.st.tys.len(), before);
}

#[test]
fn named_vars_per_scope() {
  let mut s = Session::new();
  let mut scope = TypeScope::new();
  let x = parse::get(&mut s.st, &mut scope, "a -> b").unwrap();
  let y = parse::get(&mut s.st, &mut scope, "b").unwrap();
  let (_, args) = x.spine();
  assert_eq!(args[1], &y);
  let z = parse::get(&mut s.st, &mut TypeScope::new(), "b").unwrap();
  assert_ne!(y, z);
}

#[test]
fn debug_names() {
  let mut s = Session::new();
  let start = s.st.tys.len();
  let a = s.st.tys.fresh_var("a");
  let anon = s.st.tys.fresh_var("");
  assert_eq!(s.st.tys.var_name(a), format!("a{start}"));
  assert!(!s.st.tys.var_name(anon).is_empty());
  // display ignores debug names.
  assert_eq!(s.show(&Ty::fun(Ty::Var(anon), Ty::Var(a))), "a -> b");
}
