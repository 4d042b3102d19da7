use crate::check::{Session, check};
use pretty_assertions::assert_eq;
use viskell_env::{Env, Error};

const EXTRA: &str = r#"
version = 1

[[class]]
name = "Monoid"
instances = ["()"]
unconstrained = ["[]"]

[[function]]
name = "mempty"
signature = "Monoid a => a"
category = "Monoid"

[[function]]
name = "mappend"
signature = "Monoid a => a -> a -> a"
category = "Monoid"
documentation = "Combines two values."

[[function]]
name = "sum"
signature = "Num a => [a] -> a"
"#;

#[test]
fn extra_catalog() {
  let mut s = Session::new();
  let before = s.env.len();
  viskell_env::load(&mut s.st, &mut s.env, EXTRA).unwrap();
  assert_eq!(s.env.len(), before + 3);
  let info = s.env.lookup("mappend").unwrap();
  assert_eq!(info.category.as_str(), "Monoid");
  assert_eq!(info.documentation.as_str(), "Combines two values.");
  let info = s.env.lookup("sum").unwrap();
  assert!(info.category.is_empty());
  let sum = s.fun("sum");
  let list = s.value("[Double]", "[1.5]");
  let exp = s.exps.apply(sum, list);
  check(&mut s, exp, "Double");
  let mappend = s.fun("mappend");
  let a = s.value("String", "\"a\"");
  let exp = s.exps.apply(mappend, a);
  check(&mut s, exp, "[Char] -> [Char]");
}

#[test]
fn extra_class_checked() {
  let mut s = Session::new();
  viskell_env::load(&mut s.st, &mut s.env, EXTRA).unwrap();
  let mappend = s.fun("mappend");
  let a = s.value("Int", "1");
  let exp = s.exps.apply(mappend, a);
  let err = s.infer(exp).unwrap_err();
  assert_eq!(err, "`Int` is not an instance of `Monoid` (in argument 0) in `(mappend (1))`");
}

const FUNCTOR: &str = r#"
version = 1

[[class]]
name = "Functor"
unconstrained = ["[]", "Maybe", "Either"]

[[function]]
name = "fmap"
signature = "Functor f => (a -> b) -> f a -> f b"
"#;

#[test]
fn unconstrained_instances() {
  let mut s = Session::new();
  viskell_env::load(&mut s.st, &mut s.env, FUNCTOR).unwrap();
  let fmap = s.fun("fmap");
  let show = s.fun("show");
  let either = s.value("Either Bool Int", "Right 3");
  let exp = s.exps.apply_many(fmap, [show, either]);
  check(&mut s, exp, "Either Bool [Char]");
  let fmap = s.fun("fmap");
  let not = s.fun("not");
  let pair = s.value("(Int, Bool)", "(1, True)");
  let exp = s.exps.apply_many(fmap, [not, pair]);
  let err = s.infer(exp).unwrap_err();
  assert!(err.contains("is not an instance of `Functor`"), "{err}");
}

#[test]
fn prelude_twice() {
  let mut s = Session::new();
  let err = Env::prelude(&mut s.st).unwrap_err();
  assert_eq!(err.to_string(), "duplicate class: `Eq`");
}

#[test]
fn duplicate_function() {
  let mut s = Session::new();
  let contents = r#"
version = 1

[[function]]
name = "id"
signature = "a -> a"
"#;
  let err = viskell_env::load(&mut s.st, &mut s.env, contents).unwrap_err();
  assert!(matches!(err, Error::DuplicateFunction(_)));
  assert_eq!(err.to_string(), "duplicate function: `id`");
}

#[test]
fn empty_name() {
  let mut s = Session::new();
  let contents = r#"
version = 1

[[function]]
name = ""
signature = "a"
"#;
  let err = viskell_env::load(&mut s.st, &mut s.env, contents).unwrap_err();
  assert!(matches!(err, Error::EmptyName));
  assert!(matches!(s.env.use_fn(""), Err(Error::EmptyName)));
}

#[test]
fn unbound() {
  let mut s = Session::new();
  let err = s.exps.fun_var(&s.env, "frobnicate").unwrap_err();
  assert_eq!(err.to_string(), "not in scope: `frobnicate`");
  assert!(s.env.lookup("frobnicate").is_none());
}

#[test]
fn sorted() {
  let s = Session::new();
  let names: Vec<_> = s.env.sorted().into_iter().map(|info| info.name.as_str()).collect();
  let mut want = names.clone();
  want.sort_unstable();
  assert_eq!(names, want);
  assert!(names.contains(&"map"));
  assert!(!s.env.is_empty());
}

#[test]
fn categories() {
  let s = Session::new();
  for info in s.env.sorted() {
    assert!(!info.category.is_empty(), "{} has no category", info.name);
    assert!(!info.documentation.is_empty(), "{} has no documentation", info.name);
  }
  assert_eq!(s.env.lookup("map").unwrap().category.as_str(), "List");
}
