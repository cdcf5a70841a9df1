//! Search expression builder for the catalog's `q` parameter.
//!
//! The catalog filters with a Lucene-like syntax: space-separated
//! `field:value` terms that must all match, with multi-word values quoted.
//! Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use ptcg_pack_sim::SearchQuery;
//! let params = SearchQuery::new()
//!     .where_eq("set.id", "sv3pt5")
//!     .where_phrase("rarity", "Rare Ultra")
//!     .page_size(100)
//!     .build();
//! assert_eq!(params[0], ("q".to_string(), "set.id:sv3pt5 rarity:\"Rare Ultra\"".to_string()));
//! ```

/// Builds the query parameters for a catalog card search.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    terms: Vec<String>,
    page_size: Option<usize>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact `field:value` term.
    ///
    /// Values containing whitespace or quotes are quoted automatically.
    pub fn where_eq(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() || value.contains(char::is_whitespace) || value.contains('"') {
            return self.where_phrase(field, value);
        }
        self.terms.push(format!("{}:{}", field, value));
        self
    }

    /// Add a quoted `field:"value"` term. Embedded quotes are escaped.
    pub fn where_phrase(&mut self, field: &str, value: &str) -> &mut Self {
        self.terms
            .push(format!("{}:\"{}\"", field, value.replace('"', "\\\"")));
        self
    }

    /// Set the maximum number of results the catalog should return.
    pub fn page_size(&mut self, n: usize) -> &mut Self {
        self.page_size = Some(n);
        self
    }

    /// The search expression alone, terms joined by spaces.
    pub fn expression(&self) -> String {
        self.terms.join(" ")
    }

    /// Build the `(name, value)` pairs to send as URL query parameters.
    ///
    /// `q` is omitted when no terms were added.
    pub fn build(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        if !self.terms.is_empty() {
            params.push(("q".to_string(), self.expression()));
        }
        if let Some(n) = self.page_size {
            params.push(("pageSize".to_string(), n.to_string()));
        }
        params
    }
}
