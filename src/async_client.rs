//! Async wrapper around [`PackSimulator`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all simulator operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! catalog requests are outstanding.
//!
//! # Example
//!
//! ```no_run
//! use ptcg_pack_sim::AsyncPackSimulator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sim = AsyncPackSimulator::builder().build().await.unwrap();
//!     sim.load_sets().await.unwrap();
//!     let pack = sim.open_pack().await.unwrap();
//!     println!("{} cards", pack.len());
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;

use crate::booster::{PackLayout, RandomSource, RngSource};
use crate::catalog::{Catalog, CatalogClient};
use crate::error::{PackSimError, Result};
use crate::models::{CardSet, Pack};
use crate::reveal::RevealState;
use crate::session::Session;
use crate::{PackSimulator, PackSimulatorBuilder};

// ---------------------------------------------------------------------------
// AsyncPackSimulatorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPackSimulator`].
#[derive(Default)]
pub struct AsyncPackSimulatorBuilder {
    inner: PackSimulatorBuilder,
}

impl AsyncPackSimulatorBuilder {
    /// Set the catalog API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.inner = self.inner.api_key(key);
        self
    }

    /// Point the simulator at a different catalog deployment.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Replace the default pack layout.
    pub fn layout(mut self, layout: PackLayout) -> Self {
        self.inner = self.inner.layout(layout);
        self
    }

    /// Seed the random source for reproducible packs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.seed(seed);
        self
    }

    /// Build the async simulator.
    ///
    /// The blocking HTTP client is created on the blocking thread pool, since
    /// it must not be constructed inside an async context.
    pub async fn build(self) -> Result<AsyncPackSimulator> {
        let builder = self.inner;
        let sim = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| PackSimError::InvalidState(format!("Task join error: {e}")))??;
        Ok(AsyncPackSimulator::new(sim))
    }
}

// ---------------------------------------------------------------------------
// AsyncPackSimulator
// ---------------------------------------------------------------------------

/// Async wrapper around [`PackSimulator`].
///
/// Operations are dispatched to a blocking thread pool. The simulator sits
/// behind a [`Mutex`]; [`open_pack`](Self::open_pack) additionally holds an
/// in-flight flag so a duplicate activation fails fast with
/// [`PackSimError::GenerationInProgress`] instead of queueing a second pack.
///
/// [`session`](Self::session) reads a snapshot published after every
/// operation (and once more when a generation starts), so it never waits on
/// an outstanding catalog request.
pub struct AsyncPackSimulator<C: Catalog = CatalogClient, R: RandomSource = RngSource<StdRng>> {
    inner: Arc<Mutex<PackSimulator<C, R>>>,
    snapshot: Arc<Mutex<Session>>,
    in_flight: Arc<AtomicBool>,
}

impl AsyncPackSimulator {
    /// Create a new builder for the live catalog.
    pub fn builder() -> AsyncPackSimulatorBuilder {
        AsyncPackSimulatorBuilder::default()
    }
}

impl<C, R> AsyncPackSimulator<C, R>
where
    C: Catalog + Send + 'static,
    R: RandomSource + Send + 'static,
{
    /// Wrap an already constructed simulator.
    pub fn new(sim: PackSimulator<C, R>) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(sim.session().clone())),
            inner: Arc::new(Mutex::new(sim)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run a sync simulator operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PackSimulator<C, R>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sim = self.inner.clone();
        let snapshot = self.snapshot.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sim
                .lock()
                .map_err(|_| PackSimError::InvalidState("simulator lock poisoned".into()))?;
            let out = f(&mut guard);
            publish(&snapshot, guard.session());
            out
        })
        .await
        .map_err(|e| PackSimError::InvalidState(format!("Task join error: {e}")))?
    }

    /// Fetch the set list and select the newest set.
    pub async fn load_sets(&self) -> Result<Vec<CardSet>> {
        self.run(|s| s.load_sets().map(|sets| sets.to_vec())).await
    }

    /// Select one of the loaded sets by id.
    pub async fn select_set(&self, set_id: &str) -> Result<CardSet> {
        let set_id = set_id.to_string();
        self.run(move |s| s.select_set(&set_id).cloned()).await
    }

    /// Open a pack of the selected set.
    ///
    /// Fails immediately with [`PackSimError::GenerationInProgress`] while
    /// another `open_pack` is outstanding.
    pub async fn open_pack(&self) -> Result<Pack> {
        let flag = InFlight::acquire(&self.in_flight)?;
        let snapshot = self.snapshot.clone();
        self.run(move |s| {
            let _flag = flag;
            s.open_pack_with(|loading| publish(&snapshot, loading))
                .cloned()
        })
        .await
    }

    pub async fn advance(&self) -> Result<RevealState> {
        self.run(|s| Ok(s.advance().clone())).await
    }

    pub async fn swipe(&self, start_x: f64, end_x: f64) -> Result<RevealState> {
        self.run(move |s| Ok(s.swipe(start_x, end_x).clone())).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.run(|s| {
            s.reset();
            Ok(())
        })
        .await
    }

    /// Snapshot of the current session.
    ///
    /// While a pack is being opened this is the in-flight session, with the
    /// loading flag set.
    pub async fn session(&self) -> Result<Session> {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .map_err(|_| PackSimError::InvalidState("session snapshot poisoned".into()))
    }

    /// True while an `open_pack` is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

fn publish(snapshot: &Mutex<Session>, session: &Session) {
    if let Ok(mut snap) = snapshot.lock() {
        *snap = session.clone();
    }
}

/// Holds the in-flight flag; cleared on drop.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            debug!("open_pack rejected: generation already in flight");
            return Err(PackSimError::GenerationInProgress);
        }
        Ok(Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
