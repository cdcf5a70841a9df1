//! Pokémon TCG booster pack simulator.
//!
//! Picks an expansion from the pokemontcg.io catalog, opens a randomized
//! booster pack by drawing cards of each slot's rarity, and reveals the pack
//! one card at a time before showing the full summary.
//!
//! # Quick start
//!
//! ```no_run
//! use ptcg_pack_sim::PackSimulator;
//!
//! // Reads POKEMON_TCG_API_KEY from the environment.
//! let mut sim = PackSimulator::builder().build().unwrap();
//!
//! sim.load_sets().unwrap();
//! sim.open_pack().unwrap();
//! while !sim.session().reveal().is_complete() {
//!     sim.advance();
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod booster;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod reveal;
pub mod session;
pub mod view;

#[cfg(feature = "async")]
pub use async_client::AsyncPackSimulator;
pub use booster::{PackGenerator, PackLayout, RandomSource, RngSource, ScriptedSource};
pub use catalog::{Catalog, CatalogClient};
pub use error::{PackSimError, Result};
pub use query::SearchQuery;
pub use reveal::{RevealPhase, RevealState, Swipe};
pub use session::Session;

use std::fmt;
use std::time::Duration;

use log::info;
use rand::rngs::StdRng;

use models::{CardSet, Pack};

// ---------------------------------------------------------------------------
// PackSimulatorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PackSimulator`] backed by
/// the live catalog.
///
/// Use [`PackSimulator::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PackSimulatorBuilder::build).
pub struct PackSimulatorBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Duration,
    layout: PackLayout,
    seed: Option<u64>,
}

impl Default for PackSimulatorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: Duration::from_secs(config::DEFAULT_TIMEOUT_SECS),
            layout: PackLayout::default(),
            seed: None,
        }
    }
}

impl PackSimulatorBuilder {
    /// Set the catalog API key.
    ///
    /// If not set, the key is read from `POKEMON_TCG_API_KEY` (or
    /// `REACT_APP_POKEMON_TCG_API_KEY`) at build time.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the simulator at a different catalog deployment.
    ///
    /// Defaults to `PTCG_API_BASE`, or `https://api.pokemontcg.io/v2`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the default six-common, three-uncommon, one-rare layout.
    pub fn layout(mut self, layout: PackLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Seed the random source for reproducible packs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the simulator.
    ///
    /// Fails with [`PackSimError::ConfigurationMissing`] when no API key is
    /// configured. No request is sent until [`PackSimulator::load_sets`].
    pub fn build(self) -> Result<PackSimulator> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => config::api_key_from_env()?,
        };
        let base_url = self.base_url.unwrap_or_else(config::api_base_from_env);
        let catalog = CatalogClient::new(base_url, api_key, self.timeout)?;
        let rng = match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        Ok(PackSimulator::with_catalog(catalog, rng).with_layout(self.layout))
    }
}

// ---------------------------------------------------------------------------
// PackSimulator
// ---------------------------------------------------------------------------

/// The main entry point: catalog, pack layout, random source and the
/// [`Session`] record the front-end renders.
///
/// Every action commits its outcome to the session (including failures,
/// which land in the error banner) and also returns it to the caller.
pub struct PackSimulator<C: Catalog = CatalogClient, R: RandomSource = RngSource<StdRng>> {
    catalog: C,
    layout: PackLayout,
    rng: R,
    session: Session,
}

impl PackSimulator {
    /// Create a new builder for the live catalog.
    pub fn builder() -> PackSimulatorBuilder {
        PackSimulatorBuilder::default()
    }
}

impl<C: Catalog, R: RandomSource> PackSimulator<C, R> {
    /// Assemble a simulator from any catalog and random source, with the
    /// default layout.
    pub fn with_catalog(catalog: C, rng: R) -> Self {
        Self {
            catalog,
            layout: PackLayout::default(),
            rng,
            session: Session::new(),
        }
    }

    pub fn with_layout(mut self, layout: PackLayout) -> Self {
        self.layout = layout;
        self
    }

    // -- Actions -----------------------------------------------------------

    /// Fetch the set list and select the newest set.
    pub fn load_sets(&mut self) -> Result<&[CardSet]> {
        let session = std::mem::take(&mut self.session).clear_error();
        match self.catalog.list_sets() {
            Ok(sets) => {
                info!("Loaded {} sets", sets.len());
                self.session = session.with_sets(sets);
                Ok(self.session.sets())
            }
            Err(e) => {
                self.session = session.with_error(&e);
                Err(e)
            }
        }
    }

    /// Select one of the loaded sets by id.
    pub fn select_set(&mut self, set_id: &str) -> Result<&CardSet> {
        let session = std::mem::take(&mut self.session);
        match session.clone().select(set_id) {
            Ok(next) => self.session = next,
            Err(e) => {
                self.session = session.with_error(&e);
                return Err(e);
            }
        }
        self.session
            .selected()
            .ok_or_else(|| PackSimError::NotFound(format!("set '{}'", set_id)))
    }

    /// Open a pack of the selected set and start revealing it.
    ///
    /// On failure the previous pack and reveal position stay as they were
    /// and the error banner is set.
    pub fn open_pack(&mut self) -> Result<&Pack> {
        self.open_pack_with(|_| {})
    }

    /// Like [`open_pack`](Self::open_pack), but hands the in-flight session
    /// (loading flag set) to `on_loading` before the catalog is queried.
    ///
    /// Front-ends use this to draw the loading indicator. `on_loading` is
    /// not called when the generation is rejected up front.
    pub fn open_pack_with<F: FnOnce(&Session)>(&mut self, on_loading: F) -> Result<&Pack> {
        let session = std::mem::take(&mut self.session);
        let (session, set_id) = match session.clone().begin_generation() {
            Ok(started) => started,
            Err(e) => {
                self.session = session.with_error(&e);
                return Err(e);
            }
        };
        on_loading(&session);

        let outcome = PackGenerator::new(&self.catalog, &self.layout).open_pack(&set_id, &mut self.rng);
        self.session = session.finish_generation(&outcome);
        outcome?;

        self.session
            .reveal()
            .pack()
            .ok_or_else(|| PackSimError::InvalidState("pack was not committed".into()))
    }

    /// Open `packs` packs of the selected set without touching the reveal.
    pub fn open_box(&mut self, packs: usize) -> Result<Vec<Pack>> {
        let set_id = self
            .session
            .selected()
            .map(|s| s.id.clone())
            .ok_or_else(|| PackSimError::InvalidState("no set selected".into()))?;
        let outcome = PackGenerator::new(&self.catalog, &self.layout).open_box(&set_id, packs, &mut self.rng);
        if let Err(e) = &outcome {
            self.session = std::mem::take(&mut self.session).with_error(e);
        }
        outcome
    }

    /// Reveal the next card (the click gesture).
    pub fn advance(&mut self) -> &RevealState {
        self.session = std::mem::take(&mut self.session).advance();
        self.session.reveal()
    }

    /// Apply a touch swipe between two horizontal positions.
    pub fn swipe(&mut self, start_x: f64, end_x: f64) -> &RevealState {
        self.session = std::mem::take(&mut self.session).swipe(Swipe::new(start_x, end_x));
        self.session.reveal()
    }

    /// Discard the current pack.
    pub fn reset(&mut self) {
        self.session = std::mem::take(&mut self.session).reset();
    }

    // -- Accessors ---------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Mutable access to the catalog, for reconfiguring it in place.
    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn layout(&self) -> &PackLayout {
        &self.layout
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<C: Catalog, R: RandomSource> fmt::Display for PackSimulator<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PackSimulator(sets={}, selected={}, phase={:?}, pack_size={})",
            self.session.sets().len(),
            self.session.selected().map(|s| s.id.as_str()).unwrap_or("-"),
            self.session.reveal().phase(),
            self.layout.pack_size()
        )
    }
}
