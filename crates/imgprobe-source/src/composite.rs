use std::path::PathBuf;

use crate::{Identifier, LineSource, ListSource, RandomSource, Source};

/// Ordered concatenation of sources.
///
/// Children are drained strictly left to right: a later child is never asked
/// for anything until every earlier child has reported exhaustion, and the
/// cursor never moves backward.
#[derive(Default)]
pub struct CompositeSource {
    children: Vec<Box<dyn Source>>,
    cursor:   usize,
}

impl CompositeSource {
    pub fn new() -> Self { Self::default() }

    pub fn push(mut self, source: impl Source + 'static) -> Self {
        self.children.push(Box::new(source));
        self
    }

    /// Build the default composition for a run.
    ///
    /// Explicit identifiers come first, then every file in order. When
    /// neither was given the composition falls back to a single endless
    /// random source of `random_length` characters.
    pub fn from_inputs(
        identifiers: Vec<Identifier>,
        files: Vec<PathBuf>,
        random_length: usize,
    ) -> Self {
        let mut composite = Self::new();

        if !identifiers.is_empty() {
            composite = composite.push(ListSource::new(identifiers));
        }
        for file in files {
            composite = composite.push(LineSource::new(file));
        }
        if composite.is_empty() {
            composite = composite.push(RandomSource::new().with_length(random_length));
        }

        composite
    }

    pub fn len(&self) -> usize { self.children.len() }

    pub fn is_empty(&self) -> bool { self.children.is_empty() }
}

impl Source for CompositeSource {
    fn has_more(&mut self) -> bool {
        while let Some(child) = self.children.get_mut(self.cursor) {
            if child.has_more() {
                return true;
            }
            if self.cursor + 1 == self.children.len() {
                break;
            }
            self.cursor += 1;
        }
        false
    }

    fn take_next(&mut self) -> Option<Identifier> {
        self.children.get_mut(self.cursor)?.take_next()
    }

    fn release(&mut self) {
        tracing::debug!(sources = self.children.len(), "releasing identifier sources");
        for child in &mut self.children {
            child.release();
        }
    }
}

impl std::fmt::Debug for CompositeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeSource")
            .field("children", &self.children.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}
