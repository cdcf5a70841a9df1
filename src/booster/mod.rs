//! Booster pack generation: layouts, random sources and the generator.

pub mod generator;
pub mod layout;
pub mod random;

pub use generator::{draw_without_replacement, PackGenerator};
pub use layout::{PackLayout, RarityBand, RarityBands, SlotSpec};
pub use random::{RandomSource, RngSource, ScriptedSource};
