//!
//! Scoped request spans.
//!
//! A [`Span`] is created by whoever owns a unit of work (typically a request handler) and is passed
//! explicitly, as `Option<&Span>`, into the functions doing that work. Nested stages derive child spans.
//! Dropping a span reports its elapsed time.
//!

use std::time::{Duration, Instant};

/// Spans running longer than this (in milliseconds) are reported at warn level
pub const SPAN_THRESHOLD_MS: u64 = 1000;

pub struct Span {
    name: String,
    start: Instant,
}

impl Span {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), start: Instant::now() }
    }

    /// Opens a child span under an optional parent. Without a parent the child becomes a root span.
    pub fn enter(parent: Option<&Span>, name: &str) -> Self {
        match parent {
            Some(parent) => parent.child(name),
            None => Self::new(name),
        }
    }

    pub fn child(&self, name: &str) -> Span {
        Span::new(format!("{}/{}", self.name, name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        if elapsed > Duration::from_millis(SPAN_THRESHOLD_MS) {
            zkarchive_core::warn!("[{}] abnormal time: {:#?}", self.name, elapsed);
        } else {
            zkarchive_core::trace!("[{}] done in {:#?}", self.name, elapsed);
        }
    }
}
