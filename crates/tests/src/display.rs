use crate::check::Session;
use config::DisplayStyle;
use pretty_assertions::assert_eq;
use viskell_types::ty::Ty;

#[track_caller]
fn sig(s: &Session, name: &str, style: DisplayStyle) -> String {
  let info = s.env.lookup(name).unwrap_or_else(|| panic!("no function `{name}`"));
  info.signature.display(&s.st, style).to_string()
}

#[test]
fn prelude_context() {
  let s = Session::new();
  let ctx = DisplayStyle::Context;
  assert_eq!(sig(&s, "fromIntegral", ctx), "(Integral a, Num b) => a -> b");
  assert_eq!(sig(&s, "foldr", ctx), "(a -> b -> b) -> b -> [a] -> b");
  assert_eq!(sig(&s, "zip", ctx), "[a] -> [b] -> [(a, b)]");
  assert_eq!(sig(&s, "(.)", ctx), "(a -> b) -> (c -> a) -> c -> b");
  assert_eq!(sig(&s, "maxBound", ctx), "Bounded a => a");
  assert_eq!(sig(&s, "compare", ctx), "Ord a => a -> a -> Ordering");
}

#[test]
fn prelude_inline() {
  let s = Session::new();
  let inline = DisplayStyle::Inline;
  assert_eq!(sig(&s, "fromIntegral", inline), "Integral a -> Num b");
  assert_eq!(sig(&s, "(+)", inline), "Num a -> Num a -> Num a");
  assert_eq!(sig(&s, "maxBound", inline), "Bounded a");
  assert_eq!(sig(&s, "show", inline), "Show a -> [Char]");
}

#[test]
fn many_vars() {
  let mut s = Session::new();
  let vars: Vec<_> = (0..28).map(|_| Ty::Var(s.st.tys.fresh_var("v"))).collect();
  let ty = Ty::tuple(vars);
  let mut want: Vec<String> = ('a'..='z').map(String::from).collect();
  want.push("aa".to_owned());
  want.push("bb".to_owned());
  assert_eq!(s.show(&ty), format!("({})", want.join(", ")));
}

#[test]
fn through_solved_vars() {
  let mut s = Session::new();
  let a = s.ty("a");
  let b = s.ty("Show b => b");
  let list = Ty::list(b.clone());
  s.st.unify(&a, &list).unwrap();
  let ty = Ty::fun(a, b.clone());
  assert_eq!(s.show(&ty), "[Show a] -> Show a");
  assert_eq!(ty.display(&s.st, DisplayStyle::Context).to_string(), "Show a => [a] -> a");
  s.st.unify(&b, &Ty::con("Int")).unwrap();
  assert_eq!(s.show(&ty), "[Int] -> Int");
}

#[test]
fn constrained_arg_of_app() {
  let mut s = Session::new();
  let ty = s.ty("(Ord a, Show b) => Either a (Maybe b) -> (a, b)");
  assert_eq!(s.show(&ty), "Either (Ord a) (Maybe (Show b)) -> (Ord a, Show b)");
}

#[test]
fn function_args() {
  let mut s = Session::new();
  let ty = s.ty("((a -> b) -> c) -> [a -> b] -> Maybe (a -> b)");
  assert_eq!(s.show(&ty), "((a -> b) -> c) -> [a -> b] -> Maybe (a -> b)");
}

#[test]
fn names_are_per_display() {
  let mut s = Session::new();
  let a = s.ty("a");
  let b = s.ty("b");
  assert_eq!(s.show(&b), "a");
  assert_eq!(s.show(&Ty::fun(b.clone(), a.clone())), "a -> b");
  assert_eq!(s.show(&Ty::fun(a, b)), "a -> b");
}
