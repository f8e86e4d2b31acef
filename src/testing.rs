//! In-memory collaborators for unit tests

use crate::index::{Candidate, IndexError, IndexService, Kind, SearchRequest};
use crate::resolver::{OpenError, Opener};
use std::cell::RefCell;
use std::io;

/// Index over a fixed list of `(candidate, parent)` entries
///
/// Matches case-insensitive substrings of the label and ignores the
/// request limit, so truncation is left to the caller.
#[derive(Default)]
pub struct MemoryIndex {
    entries: Vec<(Candidate, Option<String>)>,
    fail: bool,
    pub requests: RefCell<Vec<SearchRequest>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An index whose every query fails
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, label: &str, kind: Kind, identifier: &str, parent: Option<&str>) -> Self {
        self.entries.push((
            Candidate::new(label, kind, identifier),
            parent.map(str::to_string),
        ));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl IndexService for MemoryIndex {
    fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, IndexError> {
        self.requests.borrow_mut().push(request.clone());

        if self.fail {
            return Err(IndexError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "index service unavailable",
            )));
        }

        let needle = request.text.trim().to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|(c, _)| c.label.to_lowercase().contains(&needle))
            .filter(|(_, parent)| match &request.scope {
                Some(scope) => parent.as_deref() == Some(scope.as_str()),
                None => true,
            })
            .map(|(c, _)| c.clone())
            .collect())
    }
}

/// Opener that records what it was asked to open
#[derive(Default)]
pub struct RecordingOpener {
    fail: bool,
    pub opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Opener for RecordingOpener {
    fn open(&self, identifier: &str) -> Result<(), OpenError> {
        self.opened.borrow_mut().push(identifier.to_string());
        if self.fail {
            return Err(OpenError::Fork(io::Error::other("no processes left")));
        }
        Ok(())
    }
}
