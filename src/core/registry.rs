//! Per-buffer candidate gatherer registry.
//!
//! This module defines [`ActionRegistry`] which maps a buffer id to the
//! callback that resolves a cursor/selection line range into the domain
//! objects (commits, branches, files) an action should operate on.
//!
//! # Public API
//! - [`ActionRegistry`]: Mutex-guarded buffer-id → gatherer table
//! - [`Candidate`]: Typed domain object resolved from a buffer range
//! - [`LineRange`]: Inclusive 1-based line selection
//!
//! # Semantics
//! - At most one gatherer per buffer; the last registration wins
//! - `unregister` is wired to the host's buffer-unload event
//! - Gathering for a buffer with no registration is an explicit error
//!
//! The registry is an injected context object rather than ambient global
//! state; the mutex gives the same last-write-wins, read-your-writes
//! behavior a single-threaded host runtime provides implicitly.

use crate::core::error::{GinBuffersError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Host-assigned numeric buffer identifier.
pub type BufferId = u64;

/// An inclusive, 1-based line range inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Single-line range at the cursor.
    pub fn line(lnum: usize) -> Self {
        Self {
            start: lnum,
            end: lnum,
        }
    }
}

/// A domain object resolved from a buffer line range, used as the argument
/// to a user-triggered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Candidate {
    Commit { commit: String },
    Branch { branch: String },
    File { path: String },
}

type Gatherer = Arc<dyn Fn(LineRange) -> Result<Vec<Candidate>> + Send + Sync>;

/// Buffer-scoped gatherer table.
#[derive(Default)]
pub struct ActionRegistry {
    gatherers: Mutex<HashMap<BufferId, Gatherer>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the gatherer for a buffer, replacing any previous one.
    pub fn register<F>(&self, buffer: BufferId, gatherer: F)
    where
        F: Fn(LineRange) -> Result<Vec<Candidate>> + Send + Sync + 'static,
    {
        let mut gatherers = self.gatherers.lock().expect("registry mutex poisoned");
        if gatherers.insert(buffer, Arc::new(gatherer)).is_some() {
            log::debug!("replaced candidate gatherer for buffer {buffer}");
        }
    }

    /// Drop the gatherer for a buffer. Invoked from the host's
    /// buffer-unload event; unloading an unregistered buffer is a no-op.
    pub fn unregister(&self, buffer: BufferId) {
        let mut gatherers = self.gatherers.lock().expect("registry mutex poisoned");
        gatherers.remove(&buffer);
    }

    pub fn is_registered(&self, buffer: BufferId) -> bool {
        let gatherers = self.gatherers.lock().expect("registry mutex poisoned");
        gatherers.contains_key(&buffer)
    }

    /// Resolve a range in the current buffer to candidates.
    ///
    /// The gatherer runs outside the registry lock so it may itself call
    /// back into the registry.
    pub fn gather_candidates(
        &self,
        current_buffer: BufferId,
        range: LineRange,
    ) -> Result<Vec<Candidate>> {
        let gatherer = {
            let gatherers = self.gatherers.lock().expect("registry mutex poisoned");
            gatherers.get(&current_buffer).cloned()
        };
        match gatherer {
            Some(gatherer) => gatherer(range),
            None => Err(GinBuffersError::NoGathererRegistered {
                buffer: current_buffer,
            }),
        }
    }
}
