//! The environment: named functions and their polymorphic signatures.
//!
//! Every use of a function gets its own instantiation of the signature, so solving the variables
//! of one use never affects another.

#![allow(clippy::module_name_repetitions)]

mod catalog;

pub use catalog::load;

use fast_hash::FxHashMap;
use std::fmt;
use str_util::{Name, SmolStr};
use viskell_types::scope::TypeScope;
use viskell_types::ty::{Ty, Tys};
use viskell_types::{St, parse};

/// An error when building or using an environment.
#[derive(Debug)]
pub enum Error {
  /// The name is not in the environment.
  Unbound(Name),
  /// A function with this name was already in the environment.
  DuplicateFunction(Name),
  /// A class with this name already exists.
  DuplicateClass(Name),
  /// A class with this name does not exist.
  UnknownClass(Name),
  /// A name in a catalog was empty.
  EmptyName,
  /// The catalog was not valid TOML, or didn't match the schema.
  Catalog(toml::de::Error),
  /// The catalog had an unsupported version.
  Version(u16),
  /// The signature of the named function couldn't be parsed.
  Signature(Name, parse::Error),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::Unbound(name) => write!(f, "not in scope: `{name}`"),
      Error::DuplicateFunction(name) => write!(f, "duplicate function: `{name}`"),
      Error::DuplicateClass(name) => write!(f, "duplicate class: `{name}`"),
      Error::UnknownClass(name) => write!(f, "unknown class: `{name}`"),
      Error::EmptyName => f.write_str("empty name"),
      Error::Catalog(e) => write!(f, "couldn't parse catalog: {e}"),
      Error::Version(n) => {
        write!(f, "invalid catalog version: expected {}, found {n}", config::file::VERSION)
      }
      Error::Signature(name, e) => write!(f, "invalid signature for `{name}`: {e}"),
    }
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Error::Catalog(e) => Some(e),
      Error::Signature(_, e) => Some(e),
      _ => None,
    }
  }
}

/// Information about a named function.
#[derive(Debug, Clone)]
pub struct FunctionInfo {
  /// The name, like `map` or `(+)`.
  pub name: Name,
  /// The polymorphic signature. Never unify with this directly: instantiate it first.
  pub signature: Ty,
  /// The category, for grouping in menus.
  pub category: SmolStr,
  /// Documentation.
  pub documentation: SmolStr,
}

impl FunctionInfo {
  /// Returns a new function with no category or documentation.
  #[must_use]
  pub fn new(name: Name, signature: Ty) -> Self {
    Self { name, signature, category: SmolStr::default(), documentation: SmolStr::default() }
  }
}

/// A use of a named function.
///
/// Each call to [`FunVar::ty`] returns a fresh instantiation of the signature.
#[derive(Debug, Clone)]
pub struct FunVar {
  name: Name,
  signature: Ty,
}

impl FunVar {
  /// Returns the name of the function.
  #[must_use]
  pub fn name(&self) -> &Name {
    &self.name
  }

  /// Returns a fresh instantiation of the signature of the function.
  pub fn ty(&self, tys: &mut Tys) -> Ty {
    TypeScope::new().instantiate(tys, &self.signature)
  }
}

/// A mapping from names to functions.
#[derive(Debug, Default, Clone)]
pub struct Env {
  fns: FxHashMap<Name, FunctionInfo>,
}

impl Env {
  /// Returns the environment of the embedded prelude catalog, adding its classes to `st`.
  ///
  /// # Errors
  ///
  /// If a class in the prelude was already in `st`.
  pub fn prelude(st: &mut St) -> Result<Self, Error> {
    let mut ret = Self::default();
    elapsed::log("Env::prelude", || load(st, &mut ret, catalog::PRELUDE))?;
    Ok(ret)
  }

  /// Adds a function.
  ///
  /// # Errors
  ///
  /// If there was already a function with this name.
  pub fn insert(&mut self, info: FunctionInfo) -> Result<(), Error> {
    if self.fns.contains_key(&info.name) {
      return Err(Error::DuplicateFunction(info.name));
    }
    log::debug!("insert {}", info.name);
    self.fns.insert(info.name.clone(), info);
    Ok(())
  }

  /// Returns the function with this name.
  #[must_use]
  pub fn lookup(&self, name: &str) -> Option<&FunctionInfo> {
    self.fns.get(name)
  }

  /// Returns a use of the function with this name.
  ///
  /// # Errors
  ///
  /// If there is no such function.
  pub fn use_fn(&self, name: &str) -> Result<FunVar, Error> {
    if name.is_empty() {
      return Err(Error::EmptyName);
    }
    match self.lookup(name) {
      Some(info) => Ok(FunVar { name: info.name.clone(), signature: info.signature.clone() }),
      None => Err(Error::Unbound(Name::new(name))),
    }
  }

  /// Returns all the functions, sorted by name.
  #[must_use]
  pub fn sorted(&self) -> Vec<&FunctionInfo> {
    let mut ret: Vec<_> = self.fns.values().collect();
    ret.sort_unstable_by(|a, b| a.name.cmp(&b.name));
    ret
  }

  /// Returns the number of functions.
  #[must_use]
  pub fn len(&self) -> usize {
    self.fns.len()
  }

  /// Returns whether there are no functions.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.fns.is_empty()
  }
}
