//! Type classes, and the sets of them that constrain type variables.

use fast_hash::FxHashMap;
use std::collections::BTreeSet;
use str_util::Name;

/// A type class, like `Num` or `Ord`.
///
/// Use a [`Classes`] to get information about this class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Class(idx::Idx);

/// Data about a class.
#[derive(Debug, Clone)]
pub struct ClassData {
  /// The name.
  pub name: Name,
  /// The direct super classes. An instance of this class must be an instance of these too.
  pub supers: Vec<Class>,
  /// The names of the type constructors that are instances.
  ///
  /// An instance for a constructor with arguments requires this class of each argument, like
  /// `instance Eq a => Eq [a]`, unless it is also in `unconstrained`.
  pub instances: BTreeSet<Name>,
  /// The instances that require nothing of their arguments, like `instance Monoid [a]` or
  /// `instance Functor (Either e)`. A subset of `instances`.
  pub unconstrained: BTreeSet<Name>,
}

/// Storage of all the classes.
#[derive(Debug, Default, Clone)]
pub struct Classes {
  data: Vec<ClassData>,
  by_name: FxHashMap<Name, Class>,
}

impl Classes {
  /// Adds a new class with no instances, returning `None` if there was already a class with this
  /// name.
  ///
  /// Because supers must already exist, the super class relation is acyclic.
  pub fn add(&mut self, name: Name, supers: Vec<Class>) -> Option<Class> {
    if self.by_name.contains_key(&name) {
      return None;
    }
    let ret = Class(idx::Idx::new(self.data.len()));
    self.by_name.insert(name.clone(), ret);
    self.data.push(ClassData {
      name,
      supers,
      instances: BTreeSet::new(),
      unconstrained: BTreeSet::new(),
    });
    Some(ret)
  }

  /// Makes the named type constructor an instance of the class, if its arguments are too.
  pub fn add_instance(&mut self, class: Class, con: Name) {
    self.data[class.0.to_usize()].instances.insert(con);
  }

  /// Makes the named type constructor an instance of the class, whatever its arguments are.
  pub fn add_unconstrained_instance(&mut self, class: Class, con: Name) {
    let data = &mut self.data[class.0.to_usize()];
    data.instances.insert(con.clone());
    data.unconstrained.insert(con);
  }

  /// Returns the class with this name.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<Class> {
    self.by_name.get(name).copied()
  }

  /// Returns the data for this class.
  #[must_use]
  pub fn data(&self, class: Class) -> &ClassData {
    &self.data[class.0.to_usize()]
  }

  /// Returns the name of this class.
  #[must_use]
  pub fn name(&self, class: Class) -> &Name {
    &self.data(class).name
  }

  /// Returns an iterator over all the classes, in the order they were added.
  pub fn iter(&self) -> impl Iterator<Item = Class> + '_ {
    (0..self.data.len()).map(|i| Class(idx::Idx::new(i)))
  }

  /// Returns the super classes of `class`, direct or transitive, not including `class` itself.
  #[must_use]
  pub fn ancestors(&self, class: Class) -> BTreeSet<Class> {
    let mut ret = BTreeSet::new();
    let mut stack = self.data(class).supers.clone();
    while let Some(cur) = stack.pop() {
      if ret.insert(cur) {
        stack.extend(self.data(cur).supers.iter().copied());
      }
    }
    ret
  }

  /// Returns whether `anc` is a super class of `class`, directly or transitively.
  #[must_use]
  pub fn is_ancestor(&self, anc: Class, class: Class) -> bool {
    self.ancestors(class).contains(&anc)
  }

  /// Returns whether the named constructor is an instance of `class` and all of its ancestors.
  #[must_use]
  pub fn has_instance(&self, class: Class, con: &str) -> bool {
    std::iter::once(class)
      .chain(self.ancestors(class))
      .all(|c| self.data(c).instances.contains(con))
  }

  /// Returns the classes the arguments of the named constructor must be instances of, for the
  /// constructor to be an instance of `class`. These are `class` and its ancestors, except those
  /// whose instance for the constructor is unconstrained.
  #[must_use]
  pub fn arg_classes(&self, class: Class, con: &str) -> ClassSet {
    let iter = std::iter::once(class)
      .chain(self.ancestors(class))
      .filter(|&c| !self.data(c).unconstrained.contains(con));
    ClassSet::of(self, iter)
  }

  /// Returns the constructors that are instances of `class` and all of its ancestors.
  #[must_use]
  pub fn candidates(&self, class: Class) -> BTreeSet<Name> {
    self
      .data(class)
      .instances
      .iter()
      .filter(|con| self.has_instance(class, con.as_str()))
      .cloned()
      .collect()
  }

  /// Returns two classes from `set` that no single type constructor is an instance of, if the set
  /// cannot be satisfied.
  ///
  /// A set with fewer than two classes is always considered satisfiable.
  #[must_use]
  pub fn conflict(&self, set: &ClassSet) -> Option<(Class, Class)> {
    let mut iter = set.iter();
    let fst = iter.next()?;
    let mut common = self.candidates(fst);
    let mut last = None::<Class>;
    for class in iter {
      let cands = self.candidates(class);
      common.retain(|con| cands.contains(con));
      last = Some(class);
    }
    if !common.is_empty() {
      return None;
    }
    let last = last?;
    // prefer reporting a pair that is disjoint on its own.
    let all: Vec<_> = set.iter().collect();
    for (i, &a) in all.iter().enumerate() {
      let a_cands = self.candidates(a);
      for &b in &all[i + 1..] {
        if self.candidates(b).is_disjoint(&a_cands) {
          return Some((a, b));
        }
      }
    }
    Some((fst, last))
  }
}

/// A set of classes a type variable must be an instance of.
///
/// The set is always reduced: it never contains a class together with one of that class's
/// ancestors, since being an instance of a class implies being an instance of its ancestors.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<Class>);

impl ClassSet {
  /// Returns the reduced set of these classes.
  #[must_use]
  pub fn of<I>(classes: &Classes, iter: I) -> Self
  where
    I: IntoIterator<Item = Class>,
  {
    let mut ret = Self::default();
    for class in iter {
      ret.insert(classes, class);
    }
    ret
  }

  /// Adds the class, keeping the set reduced. Returns whether the set changed.
  pub fn insert(&mut self, classes: &Classes, class: Class) -> bool {
    if self.0.iter().any(|&c| c == class || classes.is_ancestor(class, c)) {
      log::trace!("{} is implied", classes.name(class));
      return false;
    }
    self.0.retain(|&c| !classes.is_ancestor(c, class));
    self.0.insert(class);
    true
  }

  /// Returns the reduced union of the two sets.
  #[must_use]
  pub fn union(&self, other: &Self, classes: &Classes) -> Self {
    let mut ret = self.clone();
    for &class in &other.0 {
      ret.insert(classes, class);
    }
    ret
  }

  /// Returns whether the set is empty.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the number of classes in the set.
  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns whether the set contains exactly this class. Ancestors of classes in the set are
  /// implied, but not contained.
  #[must_use]
  pub fn contains(&self, class: Class) -> bool {
    self.0.contains(&class)
  }

  /// Returns an iterator over the classes.
  pub fn iter(&self) -> impl Iterator<Item = Class> + '_ {
    self.0.iter().copied()
  }

  /// Returns the names of the classes, sorted.
  #[must_use]
  pub fn names<'a>(&self, classes: &'a Classes) -> Vec<&'a Name> {
    let mut ret: Vec<_> = self.0.iter().map(|&c| classes.name(c)).collect();
    ret.sort_unstable();
    ret
  }
}
