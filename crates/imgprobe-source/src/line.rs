use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::{Identifier, Source, SourceError};

enum State {
    Unopened,
    Open(BufReader<File>),
    Exhausted,
}

/// One identifier per line of a file.
///
/// The file is opened on the first [`has_more`](Source::has_more) call and
/// closed by [`release`](Source::release) or on drop. Surrounding whitespace
/// is trimmed and blank lines are skipped.
pub struct LineSource {
    path:    PathBuf,
    state:   State,
    pending: Option<Identifier>,
    line_no: usize,
}

impl LineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:    path.into(),
            state:   State::Unopened,
            pending: None,
            line_no: 0,
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn is_open(&self) -> bool { matches!(self.state, State::Open(_)) }

    fn open(&mut self) {
        match File::open(&self.path) {
            Ok(file) => {
                tracing::debug!(path = %self.path.display(), "opened identifier file");
                self.state = State::Open(BufReader::new(file));
            }
            Err(source) => {
                let err = SourceError::Unavailable {
                    path: self.path.clone(),
                    source,
                };
                tracing::warn!("{err}; skipping");
                self.state = State::Exhausted;
            }
        }
    }

    fn scan(&mut self) -> Option<Identifier> {
        let State::Open(reader) = &mut self.state else {
            return None;
        };

        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    self.line_no += 1;
                    let Ok(line) = std::str::from_utf8(&buf) else {
                        let err = SourceError::InvalidLine {
                            path: self.path.clone(),
                            line: self.line_no,
                        };
                        tracing::warn!("{err}; skipping line");
                        continue;
                    };
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_owned());
                    }
                }
                Err(source) => {
                    let err = SourceError::Read {
                        path: self.path.clone(),
                        source,
                    };
                    tracing::warn!("{err}; stopping");
                    break;
                }
            }
        }

        self.state = State::Exhausted;
        None
    }
}

impl Source for LineSource {
    fn has_more(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        if matches!(self.state, State::Unopened) {
            self.open();
        }
        self.pending = self.scan();
        self.pending.is_some()
    }

    fn take_next(&mut self) -> Option<Identifier> { self.pending.take() }

    fn release(&mut self) {
        if self.is_open() {
            tracing::debug!(path = %self.path.display(), "closing identifier file");
        }
        self.state = State::Exhausted;
        self.pending = None;
    }
}

impl std::fmt::Debug for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSource")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .field("pending", &self.pending)
            .finish()
    }
}
