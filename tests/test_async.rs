//! AsyncPackSimulator tests. Run with `--features async`.

#![cfg(feature = "async")]

mod common;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::FakeCatalog;
use ptcg_pack_sim::models::{Card, CardSet};
use ptcg_pack_sim::{view, AsyncPackSimulator, Catalog, PackSimError, PackSimulator, Result, RngSource};

/// Catalog whose card queries block until the test releases them.
struct GatedCatalog {
    inner: FakeCatalog,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl Catalog for GatedCatalog {
    fn list_sets(&self) -> Result<Vec<CardSet>> {
        self.inner.list_sets()
    }

    fn find_cards_by_rarity(&self, set_id: &str, rarity: &str, page_size: usize) -> Result<Vec<Card>> {
        let _ = self.entered.lock().unwrap().send(());
        // Returns once a release is sent or the sender is dropped.
        let _ = self.release.lock().unwrap().recv();
        self.inner.find_cards_by_rarity(set_id, rarity, page_size)
    }
}

fn wrap<C: Catalog + Send + 'static>(catalog: C) -> AsyncPackSimulator<C, RngSource<rand::rngs::StdRng>> {
    AsyncPackSimulator::new(PackSimulator::with_catalog(catalog, RngSource::seeded(8)))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_open_pack_is_rejected() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let catalog = GatedCatalog {
        inner: FakeCatalog::stocked(20),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };
    let sim = Arc::new(wrap(catalog));
    sim.load_sets().await.unwrap();

    let first = {
        let sim = sim.clone();
        tokio::spawn(async move { sim.open_pack().await })
    };

    // Wait until the first generation is blocked inside the catalog.
    tokio::task::spawn_blocking(move || entered_rx.recv().unwrap())
        .await
        .unwrap();
    assert!(sim.is_loading());

    let second = sim.open_pack().await;
    assert!(matches!(second, Err(PackSimError::GenerationInProgress)));

    drop(release_tx);
    let pack = first.await.unwrap().unwrap();
    assert_eq!(pack.len(), 10);
    assert!(!sim.is_loading());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn session_shows_loading_during_generation() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let catalog = GatedCatalog {
        inner: FakeCatalog::stocked(20),
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    };
    let sim = Arc::new(wrap(catalog));
    sim.load_sets().await.unwrap();

    let first = {
        let sim = sim.clone();
        tokio::spawn(async move { sim.open_pack().await })
    };
    tokio::task::spawn_blocking(move || entered_rx.recv().unwrap())
        .await
        .unwrap();

    // The catalog is still blocked; the snapshot must not wait for it.
    let during = tokio::time::timeout(Duration::from_millis(500), sim.session())
        .await
        .expect("session() waited on the generation")
        .unwrap();
    assert!(during.is_loading());
    assert!(view::render(&during).contains("Opening pack..."));

    drop(release_tx);
    first.await.unwrap().unwrap();

    let after = sim.session().await.unwrap();
    assert!(!after.is_loading());
    assert!(!view::render(&after).contains("Opening pack..."));
    assert_eq!(after.reveal().current_index(), 0);
    assert!(after.reveal().pack().is_some());
}

#[tokio::test]
async fn reveal_cycle_through_async_wrapper() {
    let sim = wrap(FakeCatalog::stocked(20));

    let sets = sim.load_sets().await.unwrap();
    assert_eq!(sets[0].id, "sv2");
    sim.select_set("sv1").await.unwrap();

    let pack = sim.open_pack().await.unwrap();
    assert_eq!(pack.set_id, "sv1");

    let mut state = sim.swipe(400.0, 100.0).await.unwrap();
    assert_eq!(state.current_index(), 1);
    while !state.is_complete() {
        state = sim.advance().await.unwrap();
    }

    sim.reset().await.unwrap();
    let session = sim.session().await.unwrap();
    assert!(session.reveal().pack().is_none());
    assert_eq!(session.selected().unwrap().id, "sv1");
}

#[tokio::test]
async fn failed_open_clears_in_flight_flag() {
    let sim = wrap(FakeCatalog::stocked(20).failing("Common"));
    sim.load_sets().await.unwrap();

    let err = sim.open_pack().await.unwrap_err();
    assert!(matches!(err, PackSimError::PackGenerationFailed(_)));
    assert!(!sim.is_loading());

    let session = sim.session().await.unwrap();
    assert_eq!(session.error(), Some("Rate limit exceeded"));
}

#[tokio::test]
async fn builder_talks_to_configured_catalog() {
    let sets = vec![common::set("sv1", "Scarlet & Violet", "2023/03/31")];
    let served = common::serve_once(200, &common::envelope(&sets));

    let sim = AsyncPackSimulator::builder()
        .api_key("async-key")
        .base_url(served.url.clone())
        .build()
        .await
        .unwrap();
    let loaded = sim.load_sets().await.unwrap();
    assert_eq!(loaded, sets);

    let head = served.request_head();
    assert!(head.to_lowercase().contains("x-api-key: async-key"));
}
