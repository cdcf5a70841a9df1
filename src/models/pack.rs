use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::Card;

// ---------------------------------------------------------------------------
// PackSlot: How many cards of one rarity a pack holds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSlot {
    pub rarity: String,
    pub count: usize,
}

impl PackSlot {
    pub fn new(rarity: impl Into<String>, count: usize) -> Self {
        Self {
            rarity: rarity.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedSlot: What a slot actually produced
// ---------------------------------------------------------------------------

/// The outcome of filling one slot: the rarity that was queried (after the
/// band roll, for banded slots), how many cards were asked for and how many
/// the catalog could supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSlot {
    pub rarity: String,
    pub requested: usize,
    pub drawn: usize,
}

impl ResolvedSlot {
    pub fn is_short(&self) -> bool {
        self.drawn < self.requested
    }
}

// ---------------------------------------------------------------------------
// PackCard / Pack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackCard {
    /// Display identity only. Two copies of the same catalog card get
    /// different keys; never compare cards by this.
    pub key: String,
    /// Index into [`Pack::slots`] of the slot that produced this card.
    pub slot: usize,
    pub card: Card,
}

impl PackCard {
    pub fn new(card: Card, slot: usize) -> Self {
        let key = format!("{}-{}", card.id, Uuid::new_v4());
        Self { key, slot, card }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pack {
    pub set_id: String,
    pub cards: Vec<PackCard>,
    pub slots: Vec<ResolvedSlot>,
}

impl Pack {
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PackCard> {
        self.cards.get(index)
    }

    /// Cards produced by the slot at `slot`, in draw order.
    pub fn slot_cards(&self, slot: usize) -> impl Iterator<Item = &PackCard> {
        self.cards.iter().filter(move |c| c.slot == slot)
    }

    /// Total number of cards the layout asked for.
    pub fn requested(&self) -> usize {
        self.slots.iter().map(|s| s.requested).sum()
    }

    /// True when at least one slot came back short.
    pub fn is_short(&self) -> bool {
        self.slots.iter().any(ResolvedSlot::is_short)
    }
}
