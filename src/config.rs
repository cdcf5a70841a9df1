use std::env;

use crate::error::{PackSimError, Result};

pub const API_BASE: &str = "https://api.pokemontcg.io/v2";
pub const API_BASE_ENV: &str = "PTCG_API_BASE";

pub const API_KEY_ENV: &str = "POKEMON_TCG_API_KEY";
/// Name used by the React front-end build; still honored as a fallback.
pub const LEGACY_API_KEY_ENV: &str = "REACT_APP_POKEMON_TCG_API_KEY";
pub const API_KEY_HEADER: &str = "X-Api-Key";

pub const DEFAULT_POOL_SIZE: usize = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Minimum leftward travel, in display units, for a swipe to advance the reveal.
/// The travel must exceed this value; equal travel is ignored.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Resolve the catalog API key from the process environment.
///
/// Checks [`API_KEY_ENV`] first, then [`LEGACY_API_KEY_ENV`]. Blank values
/// count as missing.
pub fn api_key_from_env() -> Result<String> {
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .ok_or_else(|| {
            PackSimError::ConfigurationMissing(format!(
                "catalog API key not set; export {} (or {})",
                API_KEY_ENV, LEGACY_API_KEY_ENV
            ))
        })
}

/// Catalog base URL from [`API_BASE_ENV`], falling back to [`API_BASE`].
pub fn api_base_from_env() -> String {
    env::var(API_BASE_ENV)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| API_BASE.to_string())
}
