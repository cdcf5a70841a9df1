use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Card: A single printing returned by the catalog's /cards endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub images: CardImages,
    pub supertype: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    pub number: Option<String>,
    pub artist: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardImages {
    #[serde(default)]
    pub small: String,
    #[serde(default)]
    pub large: String,
}

impl Card {
    /// Case-insensitive comparison of this card's rarity against a tier label.
    pub fn has_rarity(&self, label: &str) -> bool {
        self.rarity.trim().eq_ignore_ascii_case(label.trim())
    }

    /// Lowercased, hyphenated rarity (`"Rare Ultra"` -> `"rare-ultra"`).
    pub fn rarity_slug(&self) -> String {
        self.rarity
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("-")
    }
}
