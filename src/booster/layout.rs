//! Pack composition: which rarities a pack holds and in what order.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_POOL_SIZE;
use crate::error::{PackSimError, Result};
use crate::models::PackSlot;

// ---------------------------------------------------------------------------
// RarityBands
// ---------------------------------------------------------------------------

/// One band of a probabilistic slot: draws below `upper` pick `rarity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityBand {
    pub upper: f64,
    pub rarity: String,
}

/// A slot whose rarity is rolled at generation time.
///
/// Bands are checked lowest first; a draw `r` selects the first band with
/// `r < upper`, and falls through to `base` when none match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBands")]
pub struct RarityBands {
    bands: Vec<RarityBand>,
    base: String,
    count: usize,
}

/// Unchecked wire form of [`RarityBands`]; deserialization goes through
/// [`RarityBands::new`].
#[derive(Deserialize)]
struct RawBands {
    bands: Vec<RarityBand>,
    base: String,
    count: usize,
}

impl TryFrom<RawBands> for RarityBands {
    type Error = PackSimError;

    fn try_from(raw: RawBands) -> Result<Self> {
        let bands = raw.bands.into_iter().map(|b| (b.upper, b.rarity)).collect();
        RarityBands::new(bands, raw.base, raw.count)
    }
}

impl RarityBands {
    /// Build a banded slot.
    ///
    /// Upper bounds must be strictly increasing and lie in `(0, 1]`.
    pub fn new(bands: Vec<(f64, String)>, base: impl Into<String>, count: usize) -> Result<Self> {
        let mut prev = 0.0;
        for (upper, rarity) in &bands {
            if !(*upper > prev && *upper <= 1.0) {
                return Err(PackSimError::InvalidArgument(format!(
                    "band bound {} for '{}' must be in ({}, 1]",
                    upper, rarity, prev
                )));
            }
            prev = *upper;
        }
        Ok(Self {
            bands: bands
                .into_iter()
                .map(|(upper, rarity)| RarityBand { upper, rarity })
                .collect(),
            base: base.into(),
            count,
        })
    }

    /// The standard rare slot: 2% Secret Rare, 13% Rare Ultra, 85% Rare.
    pub fn standard_rare() -> Self {
        Self {
            bands: vec![
                RarityBand {
                    upper: 0.02,
                    rarity: "Secret Rare".into(),
                },
                RarityBand {
                    upper: 0.15,
                    rarity: "Rare Ultra".into(),
                },
            ],
            base: "Rare".into(),
            count: 1,
        }
    }

    /// Rarity selected by a draw in `[0, 1)`.
    pub fn pick(&self, roll: f64) -> &str {
        self.bands
            .iter()
            .find(|b| roll < b.upper)
            .map(|b| b.rarity.as_str())
            .unwrap_or(self.base.as_str())
    }

    pub fn bands(&self) -> &[RarityBand] {
        &self.bands
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

// ---------------------------------------------------------------------------
// SlotSpec / PackLayout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotSpec {
    Fixed(PackSlot),
    Banded(RarityBands),
}

impl SlotSpec {
    pub fn count(&self) -> usize {
        match self {
            SlotSpec::Fixed(slot) => slot.count,
            SlotSpec::Banded(bands) => bands.count(),
        }
    }
}

/// Ordered slot list plus the size of each slot's candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackLayout {
    pub slots: Vec<SlotSpec>,
    pub pool_size: usize,
}

impl Default for PackLayout {
    /// Six commons, three uncommons, one rolled rare.
    fn default() -> Self {
        Self {
            slots: vec![
                SlotSpec::Fixed(PackSlot::new("Common", 6)),
                SlotSpec::Fixed(PackSlot::new("Uncommon", 3)),
                SlotSpec::Banded(RarityBands::standard_rare()),
            ],
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl PackLayout {
    pub fn new(slots: Vec<SlotSpec>) -> Self {
        Self {
            slots,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Number of cards a pack holds when every slot fills.
    pub fn pack_size(&self) -> usize {
        self.slots.iter().map(SlotSpec::count).sum()
    }
}
