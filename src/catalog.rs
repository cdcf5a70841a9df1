//! Card catalog access.
//!
//! [`Catalog`] is the seam between pack generation and the network:
//! [`CatalogClient`] talks to the pokemontcg.io REST API, while tests and
//! alternative front-ends can supply their own implementation.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config;
use crate::error::{PackSimError, Result};
use crate::models::{sort_newest_first, Card, CardSet};
use crate::query::SearchQuery;

/// Read access to a card catalog.
pub trait Catalog {
    /// All sets, newest release first.
    fn list_sets(&self) -> Result<Vec<CardSet>>;

    /// Up to `page_size` cards of `set_id` whose rarity matches `rarity`,
    /// in the order the catalog returns them.
    ///
    /// Zero matches is `Ok(vec![])`, not an error.
    fn find_cards_by_rarity(
        &self,
        set_id: &str,
        rarity: &str,
        page_size: usize,
    ) -> Result<Vec<Card>>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn list_sets(&self) -> Result<Vec<CardSet>> {
        (**self).list_sets()
    }

    fn find_cards_by_rarity(
        &self,
        set_id: &str,
        rarity: &str,
        page_size: usize,
    ) -> Result<Vec<Card>> {
        (**self).find_cards_by_rarity(set_id, rarity, page_size)
    }
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn list_sets(&self) -> Result<Vec<CardSet>> {
        (**self).list_sets()
    }

    fn find_cards_by_rarity(
        &self,
        set_id: &str,
        rarity: &str,
        page_size: usize,
    ) -> Result<Vec<Card>> {
        (**self).find_cards_by_rarity(set_id, rarity, page_size)
    }
}

/// Every list endpoint wraps its payload in `{"data": [...], ...}`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

// ---------------------------------------------------------------------------
// CatalogClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the pokemontcg.io v2 API.
///
/// Issues exactly one request per call. Nothing is cached or retried.
pub struct CatalogClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl CatalogClient {
    /// Create a client for `base_url` authenticating with `api_key`.
    ///
    /// Every request is bounded by `timeout`. A blank key is rejected with
    /// [`PackSimError::ConfigurationMissing`] rather than sending
    /// unauthenticated requests.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(PackSimError::ConfigurationMissing(
                "catalog API key is empty".into(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/{path}` and unwrap the `data` array.
    fn get_list<T: DeserializeOwned>(&self, path: &str, params: &[(String, String)]) -> Result<Vec<T>> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let resp = self
            .client
            .get(&url)
            .header(config::API_KEY_HEADER, &self.api_key)
            .query(params)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            let message = service_message(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            warn!("Catalog request to {} failed: {}", url, message);
            return Err(PackSimError::CatalogUnavailable(message));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        debug!("GET {} -> {} items", url, envelope.data.len());
        Ok(envelope.data)
    }
}

impl Catalog for CatalogClient {
    fn list_sets(&self) -> Result<Vec<CardSet>> {
        let mut sets: Vec<CardSet> = self.get_list("sets", &[])?;
        sort_newest_first(&mut sets);
        Ok(sets)
    }

    fn find_cards_by_rarity(
        &self,
        set_id: &str,
        rarity: &str,
        page_size: usize,
    ) -> Result<Vec<Card>> {
        let params = SearchQuery::new()
            .where_eq("set.id", set_id)
            .where_phrase("rarity", rarity)
            .page_size(page_size)
            .build();
        let mut cards: Vec<Card> = self.get_list("cards", &params)?;
        cards.truncate(page_size);
        Ok(cards)
    }
}

/// Pull a human-readable message out of an error body.
///
/// The service answers `{"error": {"message": ...}}`; proxies in front of it
/// sometimes answer `{"message": ...}` or `{"error": "..."}`.
fn service_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| {
            value
                .get("error")
                .and_then(|e| e.get("message").and_then(|m| m.as_str()).or_else(|| e.as_str()))
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
