use crate::check::Session;
use pretty_assertions::assert_eq;
use viskell_types::ty::Ty;
use viskell_types::unify::ErrorKind;

#[test]
fn prune_is_idempotent() {
  let mut s = Session::new();
  let a = Ty::Var(s.st.tys.fresh_var("a"));
  let b = Ty::Var(s.st.tys.fresh_var("b"));
  let list_int = s.ty("[Int]");
  s.st.unify(&a, &b).unwrap();
  s.st.unify(&b, &list_int).unwrap();
  for ty in [&a, &b, &list_int] {
    let once = s.st.tys.prune(ty);
    let twice = s.st.tys.prune(&once);
    assert_eq!(once, twice);
  }
  assert_eq!(s.show(&a), "[Int]");
}

#[test]
fn success_is_symmetric() {
  let pairs = [
    ("a", "Int"),
    ("a -> a", "Int -> Bool"),
    ("a -> a", "Int -> Int"),
    ("[a]", "a"),
    ("Num a => a", "String"),
    ("Num a => a", "Double"),
    ("Eq a => [a]", "[Int -> Int]"),
    ("(a, b)", "(Int, Bool)"),
    ("(a, b)", "(Int, Bool, Char)"),
    ("Maybe a", "Either a b"),
    ("Integral a => a", "Fractional b => b"),
    ("Ord a => a", "Eq b => b"),
  ];
  for (x, y) in pairs {
    let mut s = Session::new();
    let (x1, y1) = (s.ty(x), s.ty(y));
    let fwd = s.st.unify(&x1, &y1).is_ok();
    let mut s = Session::new();
    let (x2, y2) = (s.ty(x), s.ty(y));
    let bwd = s.st.unify(&y2, &x2).is_ok();
    assert_eq!(fwd, bwd, "{x} and {y}");
  }
}

#[test]
fn repeated_unify_is_idempotent() {
  let mut s = Session::new();
  let a = Ty::Var(s.st.tys.fresh_var("a"));
  let b = Ty::Var(s.st.tys.fresh_var("b"));
  s.st.unify(&a, &b).unwrap();
  let before = s.st.tys.len();
  s.st.unify(&a, &b).unwrap();
  s.st.unify(&b, &a).unwrap();
  assert_eq!(s.st.tys.len(), before);
  assert_eq!(s.st.tys.prune(&a), s.st.tys.prune(&b));
}

#[test]
fn ord_and_eq_reduce_to_ord() {
  let mut s = Session::new();
  let a = s.ty("Ord a => a");
  let b = s.ty("Eq a => a");
  s.st.unify(&a, &b).unwrap();
  assert_eq!(s.show(&a), "Ord a");
  assert_eq!(s.show(&b), "Ord a");
}

#[test]
fn integral_and_fractional_unsatisfiable() {
  let mut s = Session::new();
  let a = s.ty("Integral a => a");
  let b = s.ty("Fractional a => a");
  let err = s.st.unify(&a, &b).unwrap_err();
  let ErrorKind::Unsatisfiable(x, y) = err.kind else { panic!("wrong error: {:?}", err.kind) };
  let mut names = [s.st.classes.name(x).as_str(), s.st.classes.name(y).as_str()];
  names.sort_unstable();
  assert_eq!(names, ["Fractional", "Integral"]);
}

#[test]
fn constraint_violation() {
  let mut s = Session::new();
  let a = s.ty("Num a => a");
  let string = s.ty("String");
  let err = s.st.unify(&a, &string).unwrap_err();
  assert_eq!(err.display(&s.st).to_string(), "`[Char]` is not an instance of `Num`");
  let ErrorKind::Constraint(c) = err.kind else { panic!("wrong error") };
  assert_eq!(s.st.classes.name(c.class).as_str(), "Num");
}

#[test]
fn superclass_checked() {
  let mut s = Session::new();
  // a class with an instance its super class lacks.
  let show = s.st.classes.get("Show").unwrap();
  let pretty = s.st.classes.add(str_util::Name::new("Pretty"), vec![show]).unwrap();
  s.st.classes.add_instance(pretty, str_util::Name::new("Handle"));
  let a = s.ty("Pretty a => a");
  let handle = s.ty("Handle");
  let err = s.st.unify(&a, &handle).unwrap_err();
  assert!(matches!(err.kind, ErrorKind::Constraint(_)));
}

#[test]
fn occurs_check() {
  let mut s = Session::new();
  let a = s.ty("a");
  let list = Ty::list(a.clone());
  let err = s.st.unify(&a, &list).unwrap_err();
  assert!(matches!(err.kind, ErrorKind::Circularity(_)));
  assert_eq!(err.display(&s.st).to_string(), "circular type: `a` occurs in `[a]`");
}

#[test]
fn no_rollback() {
  let mut s = Session::new();
  let a = Ty::Var(s.st.tys.fresh_var("a"));
  let want = Ty::fun(a.clone(), Ty::con("Int"));
  let got = s.ty("Bool -> String");
  let err = s.st.unify(&want, &got).unwrap_err();
  assert_eq!(err.path, [1]);
  // the param was unified before the result failed.
  assert_eq!(s.show(&a), "Bool");
}

#[test]
fn arity_mismatch_reports_whole_types() {
  let mut s = Session::new();
  let want = s.ty("(Int, Bool)");
  let got = s.ty("(Int, Bool, Char)");
  let err = s.st.unify(&want, &got).unwrap_err();
  assert!(err.path.is_empty());
  assert_eq!(
    err.display(&s.st).to_string(),
    "`(Int, Bool)` and `(Int, Bool, Char)` are incompatible types"
  );
}

#[test]
fn nested_path() {
  let mut s = Session::new();
  let want = s.ty("(a -> Int) -> [b]");
  let got = s.ty("(Bool -> String) -> [c]");
  let err = s.st.unify(&want, &got).unwrap_err();
  assert_eq!(err.path, [0, 1]);
  assert_eq!(
    err.display(&s.st).to_string(),
    "`Int` and `[Char]` are incompatible types (in argument 1 of argument 0)"
  );
}
