//! Loading catalogs of classes and functions.

use crate::{Env, Error, FunctionInfo};
use str_util::{Name, SmolStr};
use viskell_types::{St, parse, scope::TypeScope};

pub(crate) const PRELUDE: &str = include_str!("prelude.toml");

/// Loads the catalog in `contents`, adding its classes to `st` and its functions to `env`.
///
/// Each signature is parsed with its own scope, so variables are never shared between signatures.
///
/// # Errors
///
/// If the catalog was malformed, or a class or function in it was already defined.
pub fn load(st: &mut St, env: &mut Env, contents: &str) -> Result<(), Error> {
  let catalog: config::file::Catalog = toml::from_str(contents).map_err(Error::Catalog)?;
  if catalog.version != config::file::VERSION {
    return Err(Error::Version(catalog.version));
  }
  for class in catalog.classes {
    let name = get_name(&class.name)?;
    let mut supers = Vec::with_capacity(class.supers.len());
    for s in &class.supers {
      match st.classes.get(s.as_str()) {
        Some(c) => supers.push(c),
        None => return Err(Error::UnknownClass(get_name(s)?)),
      }
    }
    let Some(c) = st.classes.add(name.clone(), supers) else {
      return Err(Error::DuplicateClass(name));
    };
    for instance in &class.instances {
      st.classes.add_instance(c, get_name(instance)?);
    }
    for instance in &class.unconstrained {
      st.classes.add_unconstrained_instance(c, get_name(instance)?);
    }
    log::debug!(
      "add class {name} with {} instances",
      class.instances.len() + class.unconstrained.len()
    );
  }
  for function in catalog.functions {
    let name = get_name(&function.name)?;
    let signature = match parse::get(st, &mut TypeScope::new(), function.signature.as_str()) {
      Ok(x) => x,
      Err(e) => return Err(Error::Signature(name, e)),
    };
    env.insert(FunctionInfo {
      name,
      signature,
      category: function.category,
      documentation: function.documentation,
    })?;
  }
  Ok(())
}

fn get_name(s: &SmolStr) -> Result<Name, Error> {
  if s.is_empty() { Err(Error::EmptyName) } else { Ok(Name::new(s.as_str())) }
}
