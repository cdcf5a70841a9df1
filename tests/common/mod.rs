//! Shared test fixtures for the pack simulator integration tests.
//!
//! Provides an in-memory [`FakeCatalog`], card/set builders, and
//! `serve_once()`, a one-request HTTP listener on localhost for exercising
//! the real `CatalogClient`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ptcg_pack_sim::models::{Card, CardImages, CardSet, SetImages};
use ptcg_pack_sim::{Catalog, PackSimError, Result};

pub const RARITIES: [&str; 5] = ["Common", "Uncommon", "Rare", "Rare Ultra", "Secret Rare"];

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn card(id: &str, name: &str, rarity: &str) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        rarity: rarity.to_string(),
        images: CardImages {
            small: format!("https://images.example/{}.png", id),
            large: format!("https://images.example/{}_hires.png", id),
        },
        supertype: Some("Pokémon".to_string()),
        subtypes: vec!["Basic".to_string()],
        number: None,
        artist: None,
    }
}

/// `n` distinct cards of one rarity: ids `<set>-<slug>-<i>`.
pub fn cards(set_id: &str, rarity: &str, n: usize) -> Vec<Card> {
    let slug = rarity.to_lowercase().replace(' ', "-");
    (0..n)
        .map(|i| {
            card(
                &format!("{}-{}-{}", set_id, slug, i),
                &format!("{} #{}", rarity, i),
                rarity,
            )
        })
        .collect()
}

pub fn set(id: &str, name: &str, release_date: &str) -> CardSet {
    CardSet {
        id: id.to_string(),
        name: name.to_string(),
        series: "Scarlet & Violet".to_string(),
        release_date: release_date.to_string(),
        images: SetImages {
            symbol: format!("https://images.example/{}/symbol.png", id),
            logo: format!("https://images.example/{}/logo.png", id),
        },
        printed_total: None,
        total: None,
        ptcgo_code: None,
        updated_at: None,
    }
}

// ---------------------------------------------------------------------------
// FakeCatalog
// ---------------------------------------------------------------------------

/// In-memory catalog with per-rarity card pools and injectable failures.
///
/// Cards are keyed by exact rarity label, like the service's filter.
#[derive(Default)]
pub struct FakeCatalog {
    pub sets: Vec<CardSet>,
    pub cards: HashMap<String, Vec<Card>>,
    pub failing_rarities: HashSet<String>,
    pub sets_error: Option<String>,
    pub calls: RefCell<Vec<(String, String, usize)>>,
}

impl FakeCatalog {
    /// Two sets and `per_rarity` cards of every known rarity.
    pub fn stocked(per_rarity: usize) -> Self {
        let mut catalog = FakeCatalog {
            sets: vec![set("sv2", "Paldea Evolved", "2023/06/09"), set("sv1", "Scarlet & Violet", "2023/03/31")],
            ..Default::default()
        };
        for rarity in RARITIES {
            catalog = catalog.with_cards(rarity, cards("sv2", rarity, per_rarity));
        }
        catalog
    }

    pub fn with_cards(mut self, rarity: &str, pool: Vec<Card>) -> Self {
        self.cards.insert(rarity.to_string(), pool);
        self
    }

    pub fn failing(mut self, rarity: &str) -> Self {
        self.failing_rarities.insert(rarity.to_string());
        self
    }

    pub fn queried_rarities(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, r, _)| r.clone()).collect()
    }
}

impl Catalog for FakeCatalog {
    fn list_sets(&self) -> Result<Vec<CardSet>> {
        if let Some(msg) = &self.sets_error {
            return Err(PackSimError::CatalogUnavailable(msg.clone()));
        }
        let mut sets = self.sets.clone();
        ptcg_pack_sim::models::sort_newest_first(&mut sets);
        Ok(sets)
    }

    fn find_cards_by_rarity(&self, set_id: &str, rarity: &str, page_size: usize) -> Result<Vec<Card>> {
        self.calls
            .borrow_mut()
            .push((set_id.to_string(), rarity.to_string(), page_size));
        if self.failing_rarities.contains(rarity) {
            return Err(PackSimError::CatalogUnavailable(
                "Rate limit exceeded".to_string(),
            ));
        }
        Ok(self
            .cards
            .get(rarity)
            .map(|pool| pool.iter().take(page_size).cloned().collect())
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// One-shot HTTP listener
// ---------------------------------------------------------------------------

/// A listener that answers exactly one request.
pub struct Served {
    pub url: String,
    handle: JoinHandle<String>,
}

impl Served {
    /// Wait for the request and return its request line and headers.
    pub fn request_head(self) -> String {
        self.handle.join().unwrap()
    }
}

/// Answer the next request on a fresh localhost port with `status` and `body`.
pub fn serve_once(status: u16, body: &str) -> Served {
    serve_once_after(status, body, Duration::ZERO)
}

/// Like `serve_once`, but wait `delay` before answering.
pub fn serve_once_after(status: u16, body: &str, delay: Duration) -> Served {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut head = String::new();
        loop {
            let mut line = String::new();
            let n = reader.read_line(&mut line).unwrap_or(0);
            if n == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }

        thread::sleep(delay);

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        head
    });

    Served {
        url: format!("http://{}", addr),
        handle,
    }
}

/// A localhost URL with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}

/// Serialize items into the catalog's `{"data": [...]}` envelope.
pub fn envelope<T: serde::Serialize>(items: &[T]) -> String {
    serde_json::json!({
        "data": items,
        "page": 1,
        "pageSize": items.len(),
        "count": items.len(),
        "totalCount": items.len(),
    })
    .to_string()
}
