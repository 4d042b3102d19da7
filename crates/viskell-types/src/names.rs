//! Names for type variables.

use std::fmt;

const GREEK: [char; 24] = [
  'α', 'β', 'γ', 'δ', 'ε', 'ζ', 'η', 'θ', 'ι', 'κ', 'λ', 'μ', 'ν', 'ξ', 'ο', 'π', 'ρ', 'σ', 'τ',
  'υ', 'φ', 'χ', 'ψ', 'ω',
];

/// Returns the debug name of the variable with the given base name and index.
pub(crate) fn debug_name(base: &str, idx: usize) -> String {
  if !base.is_empty() {
    return format!("{base}{idx}");
  }
  let letter = GREEK[idx % GREEK.len()];
  match idx / GREEK.len() {
    0 => letter.to_string(),
    n => format!("{letter}{n}"),
  }
}

const ALPHA: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// A name for the type variable that is the `idx`th to appear in a displayed type: `a` through
/// `z`, then `aa`, `bb`, and so on.
#[derive(Debug)]
#[must_use]
pub(crate) struct VarName(pub(crate) usize);

impl fmt::Display for VarName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let quot = self.0 / ALPHA.len();
    let ch = char::from(ALPHA[self.0 % ALPHA.len()]);
    for _ in 0..=quot {
      write!(f, "{ch}")?;
    }
    Ok(())
  }
}
