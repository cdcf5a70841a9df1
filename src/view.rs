//! Plain-text rendering of a [`Session`].
//!
//! Each block mirrors one region of the single-page view: error banner, set
//! selector, then either the closed pack, the current card or the summary
//! grid, and finally the loading indicator.

use std::fmt::Write;

use crate::models::{CardSet, Pack, PackCard};
use crate::reveal::RevealState;
use crate::session::Session;

const SUMMARY_COLUMNS: usize = 2;

/// Render the whole view.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    out.push_str("Pokémon Pack Simulator\n\n");

    if let Some(msg) = session.error() {
        out.push_str(&error_banner(msg));
        out.push('\n');
    }

    out.push_str(&set_selector(session.sets(), session.selected()));
    out.push('\n');

    match session.reveal() {
        RevealState::NoPack => out.push_str(&pack_display(session.selected())),
        RevealState::Revealing { pack, index } => {
            if let Some(card) = pack.get(*index) {
                out.push_str(&card_display(card, *index, pack.len()));
            }
        }
        RevealState::Summary { pack } => out.push_str(&summary(pack)),
    }

    if session.is_loading() {
        out.push('\n');
        out.push_str(loading());
    }
    out
}

pub fn error_banner(message: &str) -> String {
    format!("Error: {}\n", message)
}

/// Numbered set list with the selection marked.
pub fn set_selector(sets: &[CardSet], selected: Option<&CardSet>) -> String {
    if sets.is_empty() {
        return "Select a Pokémon Set: (no sets loaded)\n".to_string();
    }
    let mut out = String::from("Select a Pokémon Set:\n");
    for set in sets {
        let marker = if selected.map(|s| s.id == set.id).unwrap_or(false) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, " {} {:<12} {} ({})", marker, set.id, set.name, set.series);
    }
    out
}

/// The closed pack for the selected set.
pub fn pack_display(selected: Option<&CardSet>) -> String {
    match selected {
        Some(set) => format!(
            "[ {} | {} ]\n  logo: {}\n  type `open` to open a pack\n",
            set.name, set.series, set.images.logo
        ),
        None => "[ no set selected ]\n".to_string(),
    }
}

/// One card during the reveal.
pub fn card_display(card: &PackCard, index: usize, total: usize) -> String {
    format!(
        "Card {} of {}\n\n  {}\n  [{}] {}\n  {}\n\nPress enter or swipe left to reveal next card\n",
        index + 1,
        total,
        card.card.name,
        card.card.rarity_slug(),
        card.card.rarity,
        card.card.images.large
    )
}

/// The full pack as a grid, with the reset hint.
pub fn summary(pack: &Pack) -> String {
    let mut out = String::from("Your Complete Pack\n\n");
    if pack.is_empty() {
        out.push_str("  (no cards)\n");
    }
    for row in pack.cards.chunks(SUMMARY_COLUMNS) {
        let line = row
            .iter()
            .map(|c| format!("{:<28} {:<14}", truncate(&c.card.name, 28), c.card.rarity))
            .collect::<Vec<_>>()
            .join(" | ");
        let _ = writeln!(out, "  {}", line.trim_end());
    }
    if pack.is_short() {
        let _ = writeln!(out, "\n  ({} of {} cards available)", pack.len(), pack.requested());
    }
    out.push_str("\nType `reset` to open another pack\n");
    out
}

pub fn loading() -> &'static str {
    "Opening pack...\n"
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
