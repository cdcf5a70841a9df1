//! Front-end state as one record.
//!
//! Every user-visible fact (the set list, the selection, the reveal, the
//! loading indicator and the error banner) lives in [`Session`]. Actions
//! consume the current record and return the next; I/O happens elsewhere
//! and reports back through [`Session::finish_generation`] and friends.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{PackSimError, Result};
use crate::models::{CardSet, Pack};
use crate::reveal::{RevealState, Swipe};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    sets: Vec<CardSet>,
    selected: Option<CardSet>,
    reveal: RevealState,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Actions -----------------------------------------------------------

    /// Store a freshly fetched set list and select its first entry.
    pub fn with_sets(self, sets: Vec<CardSet>) -> Self {
        let selected = sets.first().cloned();
        Self {
            sets,
            selected,
            error: None,
            ..self
        }
    }

    /// Select a set from the loaded list by id.
    pub fn select(self, set_id: &str) -> Result<Self> {
        let set = self
            .sets
            .iter()
            .find(|s| s.id == set_id)
            .cloned()
            .ok_or_else(|| PackSimError::NotFound(format!("set '{}'", set_id)))?;
        Ok(Self {
            selected: Some(set),
            ..self
        })
    }

    /// Mark a generation as in flight.
    ///
    /// Rejected while another generation is outstanding, when no set is
    /// selected, or while a reveal is in progress. Returns the id of the set
    /// to open alongside the new record.
    pub fn begin_generation(self) -> Result<(Self, String)> {
        if self.loading {
            return Err(PackSimError::GenerationInProgress);
        }
        if !self.reveal.can_start() {
            return Err(PackSimError::InvalidState(
                "finish revealing the current pack first".into(),
            ));
        }
        let set_id = self
            .selected
            .as_ref()
            .map(|s| s.id.clone())
            .ok_or_else(|| PackSimError::InvalidState("no set selected".into()))?;
        Ok((
            Self {
                loading: true,
                ..self
            },
            set_id,
        ))
    }

    /// Commit the outcome of a generation.
    ///
    /// Success starts the reveal and clears the banner. Failure sets the
    /// banner and leaves the previous reveal untouched.
    pub fn finish_generation(self, outcome: &Result<Pack>) -> Self {
        let next = Self {
            loading: false,
            ..self
        };
        match outcome {
            Ok(pack) => Self {
                reveal: next.reveal.start(pack.clone()),
                error: None,
                ..next
            },
            Err(e) => next.with_error(e),
        }
    }

    /// Show `err` in the banner; nothing else changes.
    pub fn with_error(self, err: &PackSimError) -> Self {
        warn!("{}", err);
        Self {
            error: Some(err.user_message()),
            ..self
        }
    }

    pub fn clear_error(self) -> Self {
        Self {
            error: None,
            ..self
        }
    }

    pub fn advance(self) -> Self {
        Self {
            reveal: self.reveal.advance(),
            ..self
        }
    }

    pub fn swipe(self, swipe: Swipe) -> Self {
        Self {
            reveal: self.reveal.swipe(swipe),
            ..self
        }
    }

    /// Drop the current pack. The set list and selection stay.
    pub fn reset(self) -> Self {
        Self {
            reveal: self.reveal.reset(),
            ..self
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn sets(&self) -> &[CardSet] {
        &self.sets
    }

    pub fn selected(&self) -> Option<&CardSet> {
        self.selected.as_ref()
    }

    pub fn reveal(&self) -> &RevealState {
        &self.reveal
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
