use crate::{Identifier, Source};

/// Fixed, ordered identifiers supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ListSource {
    values: Vec<Identifier>,
    index:  usize,
}

impl ListSource {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            index:  0,
        }
    }

    pub fn len(&self) -> usize { self.values.len() }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn remaining(&self) -> usize { self.values.len() - self.index }
}

impl Source for ListSource {
    fn has_more(&mut self) -> bool { self.index < self.values.len() }

    fn take_next(&mut self) -> Option<Identifier> {
        let value = self.values.get(self.index).cloned()?;
        self.index += 1;
        Some(value)
    }

    fn release(&mut self) {}
}
