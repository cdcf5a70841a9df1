//! Card-by-card reveal of an opened pack.
//!
//! `NoPack -> Revealing(0..n) -> Summary -> NoPack`. Transitions consume the
//! current state and return the next one; invalid transitions return the
//! state unchanged.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::SWIPE_THRESHOLD;
use crate::models::{Pack, PackCard};

/// Coarse phase of a [`RevealState`], for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    NoPack,
    Revealing,
    Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    NoPack,
    Revealing {
        pack: Pack,
        index: usize,
    },
    Summary {
        pack: Pack,
    },
}

impl RevealState {
    /// Whether a new pack may be started from this state.
    ///
    /// False only while a reveal is in progress.
    pub fn can_start(&self) -> bool {
        !matches!(self, RevealState::Revealing { .. })
    }

    /// Begin revealing `pack` at its first card.
    ///
    /// An empty pack goes straight to [`RevealState::Summary`]. Ignored while
    /// another reveal is in progress.
    pub fn start(self, pack: Pack) -> Self {
        if !self.can_start() {
            debug!("start ignored: reveal already in progress");
            return self;
        }
        if pack.is_empty() {
            RevealState::Summary { pack }
        } else {
            RevealState::Revealing { pack, index: 0 }
        }
    }

    /// Show the next card, or the summary after the last card.
    ///
    /// No-op outside [`RevealState::Revealing`].
    pub fn advance(self) -> Self {
        match self {
            RevealState::Revealing { pack, index } if index + 1 < pack.len() => {
                RevealState::Revealing {
                    pack,
                    index: index + 1,
                }
            }
            RevealState::Revealing { pack, .. } => RevealState::Summary { pack },
            other => other,
        }
    }

    /// Advance when `swipe` is a qualifying leftward swipe; otherwise no-op.
    pub fn swipe(self, swipe: Swipe) -> Self {
        if swipe.is_advance() {
            self.advance()
        } else {
            self
        }
    }

    /// Drop the pack, from any state.
    pub fn reset(self) -> Self {
        RevealState::NoPack
    }

    pub fn phase(&self) -> RevealPhase {
        match self {
            RevealState::NoPack => RevealPhase::NoPack,
            RevealState::Revealing { .. } => RevealPhase::Revealing,
            RevealState::Summary { .. } => RevealPhase::Summary,
        }
    }

    pub fn pack(&self) -> Option<&Pack> {
        match self {
            RevealState::NoPack => None,
            RevealState::Revealing { pack, .. } | RevealState::Summary { pack } => Some(pack),
        }
    }

    /// Index of the card on display.
    ///
    /// 0 without a pack; the last card's index once the summary is shown.
    pub fn current_index(&self) -> usize {
        match self {
            RevealState::NoPack => 0,
            RevealState::Revealing { index, .. } => *index,
            RevealState::Summary { pack } => pack.len().saturating_sub(1),
        }
    }

    /// The card on display while revealing.
    pub fn current_card(&self) -> Option<&PackCard> {
        match self {
            RevealState::Revealing { pack, index } => pack.get(*index),
            _ => None,
        }
    }

    /// True once every card has been revealed.
    pub fn is_complete(&self) -> bool {
        matches!(self, RevealState::Summary { .. })
    }
}

// ---------------------------------------------------------------------------
// Swipe
// ---------------------------------------------------------------------------

/// Horizontal positions at the start and end of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    pub start_x: f64,
    pub end_x: f64,
}

impl Swipe {
    pub fn new(start_x: f64, end_x: f64) -> Self {
        Self { start_x, end_x }
    }

    /// Leftward travel; negative for rightward swipes.
    pub fn displacement(&self) -> f64 {
        self.start_x - self.end_x
    }

    /// True when the swipe travels left by more than [`SWIPE_THRESHOLD`].
    pub fn is_advance(&self) -> bool {
        self.displacement() > SWIPE_THRESHOLD
    }
}
