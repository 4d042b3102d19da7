//! Parsing type signatures, like `Num a => a -> [a] -> a`.
//!
//! The grammar:
//!
//! `String` is the synonym for `[Char]`.
//!
//! ```text
//! sig        := [context "=>"] type
//! context    := constraint | "(" constraint ("," constraint)* ")"
//! constraint := ClassName varname
//! type       := btype ["->" type]
//! btype      := atype atype*
//! atype      := ConName | varname | "()" | "[]" | "(->)" | "(" ","+ ")"
//!             | "[" type "]" | "(" type ")" | "(" type ("," type)+ ")"
//! ```

use crate::St;
use crate::class::ClassSet;
use crate::scope::TypeScope;
use crate::ty::{self, Ty};
use crate::unify;
use std::fmt;
use str_util::Name;

/// An error when parsing a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
  /// The byte offset into the signature.
  pub pos: usize,
  /// What went wrong.
  pub kind: ErrorKind,
}

/// A kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
  /// A character that starts no token.
  UnexpectedChar(char),
  /// Something else was expected here.
  Expected(&'static str),
  /// A constraint named a class that doesn't exist.
  UnknownClass(Name),
  /// The part before `=>` was not a list of constraints.
  MalformedContext,
  /// The context required a variable to be in two classes no type is in.
  UnsatisfiableContext(Name, Name),
  /// The context required a variable, already solved in the shared scope, to be in a class its
  /// type is not an instance of.
  NotAnInstance(Name, Name),
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorKind::UnexpectedChar(c) => write!(f, "unexpected character: `{c}`"),
      ErrorKind::Expected(what) => write!(f, "expected {what}"),
      ErrorKind::UnknownClass(name) => write!(f, "unknown class: `{name}`"),
      ErrorKind::MalformedContext => {
        f.write_str("each constraint must be a class applied to a type variable")
      }
      ErrorKind::UnsatisfiableContext(a, b) => {
        write!(f, "no type is an instance of both `{a}` and `{b}`")
      }
      ErrorKind::NotAnInstance(var, class) => {
        write!(f, "`{var}` is not an instance of `{class}`")
      }
    }
  }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} (at byte {})", self.kind, self.pos)
  }
}

impl std::error::Error for Error {}

/// Parses the signature into a type.
///
/// Variables are looked up in, and added to, `scope`, so parsing two signatures with the same
/// scope shares their variables of the same name. Constraints in the context are added to the
/// classes of the variables.
///
/// # Errors
///
/// If the signature was malformed or its context could not be satisfied.
pub fn get(st: &mut St, scope: &mut TypeScope, s: &str) -> Result<Ty, Error> {
  let tokens = lex(s)?;
  let mut p = Parser { st, scope, tokens, idx: 0, end: s.len() };
  let ret = p.sig()?;
  if p.peek().is_some() {
    return Err(p.error(ErrorKind::Expected("end of signature")));
  }
  log::trace!("parsed signature: {s}");
  Ok(ret)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
  Var(&'a str),
  Con(&'a str),
  LRound,
  RRound,
  LSquare,
  RSquare,
  Comma,
  Arrow,
  FatArrow,
}

fn lex(s: &str) -> Result<Vec<(Token<'_>, usize)>, Error> {
  let bs = s.as_bytes();
  let mut ret = Vec::new();
  let mut i = 0usize;
  while let Some(&b) = bs.get(i) {
    if b.is_ascii_whitespace() {
      i += 1;
      continue;
    }
    let start = i;
    let next = bs.get(i + 1).copied();
    let tok = match b {
      b'(' => Token::LRound,
      b')' => Token::RRound,
      b'[' => Token::LSquare,
      b']' => Token::RSquare,
      b',' => Token::Comma,
      b'-' if next == Some(b'>') => {
        i += 1;
        Token::Arrow
      }
      b'=' if next == Some(b'>') => {
        i += 1;
        Token::FatArrow
      }
      b if b.is_ascii_alphabetic() || b == b'_' => {
        while bs.get(i + 1).copied().is_some_and(is_ident_continue) {
          i += 1;
        }
        let text = &s[start..=i];
        if b.is_ascii_uppercase() { Token::Con(text) } else { Token::Var(text) }
      }
      _ => {
        let c = s[start..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(Error { pos: start, kind: ErrorKind::UnexpectedChar(c) });
      }
    };
    i += 1;
    ret.push((tok, start));
  }
  Ok(ret)
}

fn is_ident_continue(b: u8) -> bool {
  b.is_ascii_alphanumeric() || matches!(b, b'_' | b'\'' | b'.')
}

struct Parser<'a, 's> {
  st: &'a mut St,
  scope: &'a mut TypeScope,
  tokens: Vec<(Token<'s>, usize)>,
  idx: usize,
  end: usize,
}

impl<'s> Parser<'_, 's> {
  fn peek(&self) -> Option<Token<'s>> {
    self.tokens.get(self.idx).map(|&(tok, _)| tok)
  }

  fn pos(&self) -> usize {
    self.tokens.get(self.idx).map_or(self.end, |&(_, pos)| pos)
  }

  fn error(&self, kind: ErrorKind) -> Error {
    Error { pos: self.pos(), kind }
  }

  fn bump(&mut self) -> Option<Token<'s>> {
    let ret = self.peek()?;
    self.idx += 1;
    Some(ret)
  }

  fn eat(&mut self, tok: Token<'s>) -> bool {
    let ret = self.peek() == Some(tok);
    if ret {
      self.idx += 1;
    }
    ret
  }

  fn expect(&mut self, tok: Token<'s>, desc: &'static str) -> Result<(), Error> {
    if self.eat(tok) { Ok(()) } else { Err(self.error(ErrorKind::Expected(desc))) }
  }

  fn sig(&mut self) -> Result<Ty, Error> {
    let start = self.pos();
    let ty = self.ty()?;
    if !self.eat(Token::FatArrow) {
      return Ok(ty);
    }
    self.context(start, &ty)?;
    self.ty()
  }

  /// Adds the constraints in `ctx`, which was parsed as a type, to its variables.
  fn context(&mut self, pos: usize, ctx: &Ty) -> Result<(), Error> {
    let (head, args) = ctx.spine();
    let constraints = match head {
      Ty::Con(name) if name.as_str() == Ty::UNIT => Vec::new(),
      Ty::Con(name) if ty::tuple_arity(name.as_str()) == Some(args.len()) => args,
      _ => vec![ctx],
    };
    for constraint in constraints {
      let (head, args) = constraint.spine();
      let (Ty::Con(class_name), [Ty::Var(var)]) = (head, args.as_slice()) else {
        return Err(Error { pos, kind: ErrorKind::MalformedContext });
      };
      let Some(class) = self.st.classes.get(class_name.as_str()) else {
        return Err(Error { pos, kind: ErrorKind::UnknownClass(class_name.clone()) });
      };
      // the variable may already be solved, or joined to another, by an earlier use of the scope.
      let set = ClassSet::of(&self.st.classes, [class]);
      let constrained = self.st.tys.fresh_var_with_classes("", set);
      if let Err(e) = self.st.unify(&Ty::Var(constrained), &Ty::Var(*var)) {
        let kind = match e.kind {
          unify::ErrorKind::Unsatisfiable(a, b) => {
            let a = self.st.classes.name(a).clone();
            let b = self.st.classes.name(b).clone();
            ErrorKind::UnsatisfiableContext(a, b)
          }
          unify::ErrorKind::Constraint(c) => {
            let var = Name::new(self.st.tys.var_base(*var).as_str());
            ErrorKind::NotAnInstance(var, self.st.classes.name(c.class).clone())
          }
          unify::ErrorKind::Mismatch(..) | unify::ErrorKind::Circularity(_) => {
            unreachable!("a fresh variable always unifies with a variable")
          }
        };
        return Err(Error { pos, kind });
      }
    }
    Ok(())
  }

  fn ty(&mut self) -> Result<Ty, Error> {
    let param = self.btype()?;
    if self.eat(Token::Arrow) {
      let res = self.ty()?;
      Ok(Ty::fun(param, res))
    } else {
      Ok(param)
    }
  }

  fn btype(&mut self) -> Result<Ty, Error> {
    let mut ret = self.atype()?;
    while matches!(
      self.peek(),
      Some(Token::Var(_) | Token::Con(_) | Token::LRound | Token::LSquare)
    ) {
      let arg = self.atype()?;
      ret = Ty::app(ret, arg);
    }
    Ok(ret)
  }

  fn atype(&mut self) -> Result<Ty, Error> {
    let pos = self.pos();
    let Some(tok) = self.bump() else {
      return Err(self.error(ErrorKind::Expected("a type")));
    };
    match tok {
      Token::Con(Ty::STRING) => Ok(Ty::list(Ty::con(Ty::CHAR))),
      Token::Con(name) => Ok(Ty::con(name)),
      Token::Var(name) => Ok(Ty::Var(self.scope.var(&mut self.st.tys, name))),
      Token::LSquare => {
        if self.eat(Token::RSquare) {
          return Ok(Ty::con(Ty::LIST));
        }
        let elem = self.ty()?;
        self.expect(Token::RSquare, "`]`")?;
        Ok(Ty::list(elem))
      }
      Token::LRound => {
        if self.eat(Token::RRound) {
          return Ok(Ty::tuple(Vec::new()));
        }
        if self.eat(Token::Arrow) {
          self.expect(Token::RRound, "`)`")?;
          return Ok(Ty::con(Ty::ARROW));
        }
        if self.peek() == Some(Token::Comma) {
          let mut arity = 1usize;
          while self.eat(Token::Comma) {
            arity += 1;
          }
          self.expect(Token::RRound, "`)`")?;
          return Ok(Ty::con(ty::tuple_con_name(arity).as_str()));
        }
        let mut elems = vec![self.ty()?];
        while self.eat(Token::Comma) {
          elems.push(self.ty()?);
        }
        self.expect(Token::RRound, "`)`")?;
        if elems.len() == 1 { Ok(elems.swap_remove(0)) } else { Ok(Ty::tuple(elems)) }
      }
      Token::RRound | Token::RSquare | Token::Comma | Token::Arrow | Token::FatArrow => {
        Err(Error { pos, kind: ErrorKind::Expected("a type") })
      }
    }
  }
}
