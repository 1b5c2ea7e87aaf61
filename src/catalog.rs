//! Named, immutable collection of sequences.
//!
//! A [`CatalogBuilder`] collects sequences during start-up and turns into a
//! read-only [`Catalog`] once [`CatalogBuilder::build`] is called. There is no
//! way to register a sequence on a built catalog, so every player can share a
//! plain `&Catalog` without locking.

use crate::logging::debug;
use crate::sequence::Sequence;
use crate::time::TimeDuration;
use crate::types::{CatalogError, Frame};
use heapless::Vec;

/// Read-only collection of uniquely named sequences, in registration order.
///
/// # Type Parameters
/// * `D` - The duration type
/// * `C` - Number of output channels, shared by every frame
/// * `F` - Maximum number of frames per sequence
/// * `S` - Maximum number of sequences
#[derive(Debug, Clone)]
pub struct Catalog<D: TimeDuration, const C: usize, const F: usize, const S: usize> {
    sequences: Vec<Sequence<D, C, F>, S>,
}

impl<D: TimeDuration, const C: usize, const F: usize, const S: usize> Catalog<D, C, F, S> {
    /// Creates a new catalog builder.
    pub fn builder() -> CatalogBuilder<D, C, F, S> {
        CatalogBuilder::new()
    }

    /// Looks up a sequence by exact, case-sensitive name.
    ///
    /// # Errors
    /// * `NotFound` - No sequence has this name
    pub fn lookup(&self, name: &str) -> Result<&Sequence<D, C, F>, CatalogError> {
        self.sequences
            .iter()
            .find(|seq| seq.name() == name)
            .ok_or(CatalogError::NotFound)
    }

    /// Returns the registered names in registration order.
    ///
    /// The iterator borrows the catalog and can be cloned or recreated freely.
    pub fn names(&self) -> Names<'_, D, C, F> {
        Names {
            inner: self.sequences.iter(),
        }
    }

    /// Iterates over all sequences in registration order.
    pub fn iter(&self) -> core::slice::Iter<'_, Sequence<D, C, F>> {
        self.sequences.iter()
    }

    /// Returns the first registered sequence, if any.
    pub fn first(&self) -> Option<&Sequence<D, C, F>> {
        self.sequences.first()
    }

    /// Returns true if a sequence with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Returns the number of sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if the catalog holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Returns the channel width shared by every frame.
    pub const fn channel_count(&self) -> usize {
        C
    }
}

impl<'a, D: TimeDuration, const C: usize, const F: usize, const S: usize> IntoIterator
    for &'a Catalog<D, C, F, S>
{
    type Item = &'a Sequence<D, C, F>;
    type IntoIter = core::slice::Iter<'a, Sequence<D, C, F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over catalog names. See [`Catalog::names`].
#[derive(Debug, Clone)]
pub struct Names<'a, D: TimeDuration, const C: usize, const F: usize> {
    inner: core::slice::Iter<'a, Sequence<D, C, F>>,
}

impl<'a, D: TimeDuration, const C: usize, const F: usize> Iterator for Names<'a, D, C, F> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Sequence::name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<D: TimeDuration, const C: usize, const F: usize> ExactSizeIterator for Names<'_, D, C, F> {}

/// Registration phase of a [`Catalog`].
///
/// A failed registration leaves the builder untouched, but callers are
/// expected to abort start-up on any error rather than run with a partial
/// catalog.
#[derive(Debug)]
pub struct CatalogBuilder<D: TimeDuration, const C: usize, const F: usize, const S: usize> {
    sequences: Vec<Sequence<D, C, F>, S>,
}

impl<D: TimeDuration, const C: usize, const F: usize, const S: usize> CatalogBuilder<D, C, F, S> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            sequences: Vec::new(),
        }
    }

    /// Registers a named sequence.
    ///
    /// The name is checked before the frames, so re-registering a taken
    /// name reports `DuplicateName` even when `frames` is empty.
    ///
    /// # Errors
    /// * `DuplicateName` - The name is already registered
    /// * `EmptySequence` - No frames were given
    /// * `InvalidFrame` - A frame has zero hold time
    /// * `NameTooLong` - Name exceeds [`NAME_CAPACITY`](crate::types::NAME_CAPACITY)
    /// * `CapacityExceeded` - Too many frames, or the catalog is full
    pub fn register(&mut self, name: &str, frames: &[Frame<D, C>]) -> Result<(), CatalogError> {
        if self.contains(name) {
            return Err(CatalogError::DuplicateName);
        }
        let sequence = Sequence::new(name, frames)?;
        self.add(sequence)
    }

    /// Registers an already built sequence.
    ///
    /// # Errors
    /// * `DuplicateName` - The name is already registered
    /// * `CapacityExceeded` - The catalog is full
    pub fn add(&mut self, sequence: Sequence<D, C, F>) -> Result<(), CatalogError> {
        if self.contains(sequence.name()) {
            return Err(CatalogError::DuplicateName);
        }

        debug!(
            "registered sequence {} ({} frames)",
            sequence.name(),
            sequence.frame_count()
        );
        self.sequences
            .push(sequence)
            .map_err(|_| CatalogError::CapacityExceeded)
    }

    /// Chaining form of [`register`](Self::register).
    pub fn with(mut self, name: &str, frames: &[Frame<D, C>]) -> Result<Self, CatalogError> {
        self.register(name, frames)?;
        Ok(self)
    }

    /// Returns true if a sequence with this name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.iter().any(|seq| seq.name() == name)
    }

    /// Returns the number of registered sequences.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns true if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Finishes registration.
    pub fn build(self) -> Catalog<D, C, F, S> {
        Catalog {
            sequences: self.sequences,
        }
    }
}

impl<D: TimeDuration, const C: usize, const F: usize, const S: usize> Default
    for CatalogBuilder<D, C, F, S>
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Millis;

    type TestCatalog = Catalog<Millis, 3, 4, 3>;

    fn frame(pattern: &str, hold: u64) -> Frame<Millis, 3> {
        Frame::from_pattern(pattern, Millis(hold)).unwrap()
    }

    #[test]
    fn duplicate_registration_keeps_original() {
        let mut builder = TestCatalog::builder();
        builder.register("A", &[frame("100", 10)]).unwrap();

        let result = builder.register("A", &[frame("011", 20), frame("000", 5)]);
        assert_eq!(result, Err(CatalogError::DuplicateName));

        let catalog = builder.build();
        let seq = catalog.lookup("A").unwrap();
        assert_eq!(seq.frame_count(), 1);
        assert_eq!(seq.frames()[0], frame("100", 10));
    }

    #[test]
    fn full_catalog_reports_capacity() {
        let mut builder = Catalog::<Millis, 3, 4, 1>::builder();
        builder.register("A", &[frame("100", 10)]).unwrap();
        assert_eq!(
            builder.register("B", &[frame("100", 10)]),
            Err(CatalogError::CapacityExceeded)
        );
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let catalog = TestCatalog::builder()
            .with("CYLON", &[frame("010", 100)])
            .unwrap()
            .build();
        assert!(catalog.lookup("CYLON").is_ok());
        assert_eq!(catalog.lookup("cylon"), Err(CatalogError::NotFound));
    }

    #[test]
    fn names_are_restartable() {
        let catalog = TestCatalog::builder()
            .with("B", &[frame("010", 100)])
            .unwrap()
            .with("A", &[frame("001", 100)])
            .unwrap()
            .build();

        let names = catalog.names();
        assert_eq!(names.len(), 2);
        assert!(names.clone().eq(["B", "A"]));
        assert!(catalog.names().eq(["B", "A"]));
    }
}
