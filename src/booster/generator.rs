//! Booster pack generator.
//!
//! Fills each slot of a [`PackLayout`] from the catalog, drawing cards
//! uniformly without replacement from the slot's candidate pool.

use log::{debug, info, warn};

use super::layout::{PackLayout, SlotSpec};
use super::random::RandomSource;
use crate::catalog::Catalog;
use crate::error::{PackSimError, Result};
use crate::models::{Card, Pack, PackCard, ResolvedSlot};

/// Opens packs for a set by querying a [`Catalog`] once per slot.
///
/// Borrows the catalog and layout; cheap to create per call.
pub struct PackGenerator<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    layout: &'a PackLayout,
}

impl<'a, C: Catalog + ?Sized> PackGenerator<'a, C> {
    /// Create a new `PackGenerator` bound to the given catalog and layout.
    pub fn new(catalog: &'a C, layout: &'a PackLayout) -> Self {
        Self { catalog, layout }
    }

    /// Open a single pack of `set_id`.
    ///
    /// Slots are filled in layout order with one catalog query each. A
    /// banded slot rolls its rarity just before its query. A slot whose
    /// pool runs dry yields fewer cards without failing.
    ///
    /// Any catalog failure aborts the whole pack with
    /// [`PackSimError::PackGenerationFailed`]; no partial pack is returned.
    pub fn open_pack<R: RandomSource + ?Sized>(&self, set_id: &str, rng: &mut R) -> Result<Pack> {
        if set_id.trim().is_empty() {
            return Err(PackSimError::InvalidArgument("set id is empty".into()));
        }

        let mut pack = Pack {
            set_id: set_id.to_string(),
            cards: Vec::with_capacity(self.layout.pack_size()),
            slots: Vec::with_capacity(self.layout.slots.len()),
        };

        for (slot_idx, spec) in self.layout.slots.iter().enumerate() {
            let (rarity, count) = match spec {
                SlotSpec::Fixed(slot) => (slot.rarity.clone(), slot.count),
                SlotSpec::Banded(bands) => {
                    let roll = rng.next_unit();
                    let rarity = bands.pick(roll);
                    debug!("slot {}: rolled {:.4} -> {}", slot_idx, roll, rarity);
                    (rarity.to_string(), bands.count())
                }
            };

            if count == 0 {
                pack.slots.push(ResolvedSlot {
                    rarity,
                    requested: 0,
                    drawn: 0,
                });
                continue;
            }

            let pool = self
                .catalog
                .find_cards_by_rarity(set_id, &rarity, self.layout.pool_size)
                .map_err(|e| {
                    warn!("{} pack aborted at slot {} ({}): {}", set_id, slot_idx, rarity, e);
                    PackSimError::PackGenerationFailed(Box::new(e))
                })?;

            let drawn = draw_without_replacement(pool, count, rng);
            if drawn.len() < count {
                warn!(
                    "{} slot {} ({}): only {} of {} cards available",
                    set_id,
                    slot_idx,
                    rarity,
                    drawn.len(),
                    count
                );
            }

            pack.slots.push(ResolvedSlot {
                rarity,
                requested: count,
                drawn: drawn.len(),
            });
            pack.cards
                .extend(drawn.into_iter().map(|card| PackCard::new(card, slot_idx)));
        }

        info!(
            "Opened {} pack: {} of {} cards",
            set_id,
            pack.len(),
            pack.requested()
        );
        Ok(pack)
    }

    /// Open a box containing `packs` booster packs.
    ///
    /// Fails as a whole if any pack fails.
    pub fn open_box<R: RandomSource + ?Sized>(
        &self,
        set_id: &str,
        packs: usize,
        rng: &mut R,
    ) -> Result<Vec<Pack>> {
        let mut box_contents = Vec::with_capacity(packs);
        for _ in 0..packs {
            box_contents.push(self.open_pack(set_id, rng)?);
        }
        Ok(box_contents)
    }

    pub fn layout(&self) -> &PackLayout {
        self.layout
    }
}

/// Draw up to `count` cards from `pool`, uniformly and without replacement.
///
/// Each draw picks an index into what remains of the pool and removes that
/// card, so no card is drawn twice. Returns fewer than `count` cards when
/// the pool runs out.
pub fn draw_without_replacement<R: RandomSource + ?Sized>(
    mut pool: Vec<Card>,
    count: usize,
    rng: &mut R,
) -> Vec<Card> {
    let mut drawn = Vec::with_capacity(count.min(pool.len()));
    while drawn.len() < count && !pool.is_empty() {
        let idx = rng.pick_index(pool.len());
        drawn.push(pool.remove(idx));
    }
    drawn
}
