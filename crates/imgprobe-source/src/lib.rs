//! Identifier sources for the probe pipeline.
//!
//! A [`Source`] hands out candidate identifiers one at a time, only when the
//! caller asks for them. Four implementations exist:
//!
//! - [`ListSource`] - a fixed list supplied by the caller
//! - [`LineSource`] - one identifier per line of a file, opened lazily
//! - [`RandomSource`] - endless random alphanumeric identifiers
//! - [`CompositeSource`] - strict left-to-right concatenation of other sources
//!
//! Sources never fail the pipeline. A file that cannot be read is logged and
//! treated as an empty origin.

mod composite;
mod error;
mod line;
mod list;
mod random;

pub use composite::CompositeSource;
pub use error::SourceError;
pub use line::LineSource;
pub use list::ListSource;
pub use random::{ALPHABET, DEFAULT_LENGTH, RandomSource};

/// Candidate lookup key probed against the remote service.
pub type Identifier = String;

/// Lazily produces identifiers.
///
/// Once `has_more` returns `false` it keeps returning `false`; asking twice
/// without consuming yields the same answer.
pub trait Source {
    /// Whether another identifier is available. May acquire the underlying
    /// resource on first call.
    fn has_more(&mut self) -> bool;

    /// Take the next identifier.
    ///
    /// Callers pair this with a successful [`has_more`](Source::has_more).
    /// [`LineSource`] and [`CompositeSource`] hand out only what that call
    /// confirmed and return `None` otherwise. [`ListSource`] returns its next
    /// item or `None` at the end, and [`RandomSource`] always yields, whether
    /// or not `has_more` was asked first.
    fn take_next(&mut self) -> Option<Identifier>;

    /// Release any held resource. Safe to call more than once.
    fn release(&mut self);
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn has_more(&mut self) -> bool { (**self).has_more() }

    fn take_next(&mut self) -> Option<Identifier> { (**self).take_next() }

    fn release(&mut self) { (**self).release() }
}
