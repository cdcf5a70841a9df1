use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardSet: An expansion as listed by the catalog's /sets endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub images: SetImages,
    pub printed_total: Option<i64>,
    pub total: Option<i64>,
    pub ptcgo_code: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetImages {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub logo: String,
}

impl CardSet {
    /// Parse the catalog's release date.
    ///
    /// The catalog sends `YYYY/MM/DD`; ISO `YYYY-MM-DD` is accepted as well.
    /// Returns `None` for anything else.
    pub fn released_on(&self) -> Option<NaiveDate> {
        let raw = self.release_date.trim();
        NaiveDate::parse_from_str(raw, "%Y/%m/%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
            .ok()
    }
}

/// Order sets newest release first.
///
/// The sort is stable, so sets sharing a date keep the catalog's order.
/// Sets whose date cannot be parsed go last.
pub fn sort_newest_first(sets: &mut [CardSet]) {
    sets.sort_by(|a, b| b.released_on().cmp(&a.released_on()));
}
