//! Card, hand, and table formatters for terminal display.
//!
//! This module provides pure functions for formatting table state (cards,
//! hands, the poker river, the catalog and the pay table) for terminal
//! output. It supports Unicode suit symbols with ASCII fallback for terminal
//! environments that don't support Unicode rendering.
//!
//! ## Unicode vs ASCII Fallback
//!
//! The module detects whether the terminal supports Unicode symbols by
//! checking environment variables on Windows (WT_SESSION, TERM_PROGRAM,
//! VSCODE_INJECTION) and assumes Unicode support on Unix-like systems.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use casino_engine::cards::{Card, Rank, Suit};
//! use casino_cli::formatters::format_card;
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! ```

use casino_engine::blackjack::HandValue;
use casino_engine::cards::{Card, Suit};
use casino_engine::catalog::{Catalog, Perspective};
use casino_engine::game::{CardView, Snapshot};
use casino_engine::poker::PayTable;

/// Shown in place of a face-down card.
pub const HIDDEN_CARD: &str = "??";

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as a string using Unicode symbols with ASCII fallback.
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Format a Card as a string combining rank and suit, e.g. "10♥" or "Qs".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.short_name(), format_suit(&card.suit))
}

/// Format a dealt card; face-down cards render as [`HIDDEN_CARD`].
pub fn format_card_view(view: &CardView) -> String {
    if view.revealed {
        format_card(&view.card())
    } else {
        HIDDEN_CARD.to_string()
    }
}

/// Format a hand in bracket notation, e.g. "[A♠ ??]" or "[]" if empty.
///
/// # Example
///
/// ```rust
/// use casino_engine::cards::{DealtCard, Rank, Suit, Card};
/// use casino_engine::game::CardView;
/// # use casino_cli::formatters::format_hand;
///
/// let up = CardView::from(&DealtCard::face_up(Card::new(Rank::King, Suit::Clubs)));
/// let down = CardView::from(&DealtCard::face_down(Card::new(Rank::Two, Suit::Clubs)));
/// let formatted = format_hand(&[up, down]);
/// assert!(formatted.starts_with("[K"));
/// assert!(formatted.ends_with(" ??]"));
/// ```
pub fn format_hand(cards: &[CardView]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card_view).collect();
    format!("[{}]", formatted.join(" "))
}

/// Format a hand value: "17", or "7/17" while a soft Ace leaves two readings.
pub fn format_value(value: &HandValue) -> String {
    if value.min == value.max || value.max > casino_engine::blackjack::BLACKJACK {
        value.min.to_string()
    } else {
        format!("{}/{}", value.min, value.max)
    }
}

/// Format the poker river with 1-based slot numbers and hold markers.
pub fn format_river(cards: &[CardView], held: &[bool]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mark = if held.get(i).copied().unwrap_or(false) {
                "*"
            } else {
                ""
            };
            format!("{}:{}{}", i + 1, format_card_view(c), mark)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Multi-line table rendering for the interactive loop.
pub fn format_table(snap: &Snapshot) -> String {
    let mut lines = Vec::new();
    if !snap.dealer.is_empty() {
        let value = snap
            .dealer_value
            .as_ref()
            .map(format_value)
            .unwrap_or_default();
        lines.push(format!("Dealer: {} {}", format_hand(&snap.dealer), value));
    }
    if !snap.player.is_empty() {
        let value = snap
            .player_value
            .as_ref()
            .map(format_value)
            .unwrap_or_default();
        lines.push(format!("Player: {} {}", format_hand(&snap.player), value));
    }
    if !snap.river.is_empty() {
        lines.push(format!("River:  {}", format_river(&snap.river, &snap.held)));
        if let Some(preview) = snap.preview {
            lines.push(format!("Holding: {}", preview.label()));
        }
    }
    if snap.wager > 0 {
        lines.push(format!(
            "Bet: {}  Wager: {}  Balance: {}",
            snap.bet, snap.wager, snap.balance
        ));
    } else {
        lines.push(format!("Bet: {}  Balance: {}", snap.bet, snap.balance));
    }
    lines.join("\n")
}

/// Catalog listing with both weights and the resulting draw chances.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = format!(
        "{:<6} {:>7} {:>8} {:>7} {:>8}\n",
        "card", "player", "chance", "dealer", "chance"
    );
    for e in catalog.entries() {
        out.push_str(&format!(
            "{:<6} {:>7} {:>7.2}% {:>7} {:>7.2}%\n",
            format_card(&e.card),
            e.player_weight,
            catalog.chance_to_draw(e.card, Perspective::Player) * 100.0,
            e.dealer_weight,
            catalog.chance_to_draw(e.card, Perspective::Dealer) * 100.0,
        ));
    }
    out
}

/// Pay table at the given wager, best hand first.
pub fn format_pay_table(pay_table: &PayTable, wager: u64) -> String {
    pay_table
        .rows(wager)
        .into_iter()
        .map(|(category, payout)| format!("{:<16} {:>6}", category.label(), payout))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use casino_engine::cards::{DealtCard, Rank};

    fn view(s: &str, revealed: bool) -> CardView {
        let card: Card = s.parse().unwrap();
        let dc = if revealed {
            DealtCard::face_up(card)
        } else {
            DealtCard::face_down(card)
        };
        CardView::from(&dc)
    }

    #[test]
    fn test_format_suit_unicode_or_ascii() {
        let hearts = format_suit(&Suit::Hearts);
        assert!(hearts == "♥" || hearts == "h");

        let spades = format_suit(&Suit::Spades);
        assert!(spades == "♠" || spades == "s");
    }

    #[test]
    fn test_format_card_ten() {
        let formatted = format_card(&Card::new(Rank::Ten, Suit::Hearts));
        assert!(formatted == "10♥" || formatted == "10h");
    }

    #[test]
    fn test_hidden_card_is_masked() {
        assert_eq!(format_card_view(&view("KS", false)), HIDDEN_CARD);
        assert_eq!(format_hand(&[]), "[]");
    }

    #[test]
    fn test_format_value_soft_and_hard() {
        assert_eq!(format_value(&HandValue::of(&[Rank::Ace, Rank::Six])), "7/17");
        assert_eq!(format_value(&HandValue::of(&[Rank::Ten, Rank::Six])), "16");
        assert_eq!(
            format_value(&HandValue::of(&[Rank::Ace, Rank::Six, Rank::Nine])),
            "16"
        );
    }

    #[test]
    fn test_format_river_marks_held_slots() {
        let river = vec![view("AS", true), view("2D", true)];
        let out = format_river(&river, &[true, false]);
        assert!(out.starts_with("1:A"));
        assert!(out.contains("*  2:2"));
        assert!(!out.ends_with('*'));
    }

    #[test]
    fn test_format_catalog_lists_every_card() {
        let out = format_catalog(&Catalog::standard());
        assert_eq!(out.lines().count(), 53);
        assert!(out.contains("1.92%"));
    }

    #[test]
    fn test_format_pay_table_best_first() {
        let out = format_pay_table(&PayTable::default(), 2);
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("ROYAL FLUSH"));
        assert!(first.ends_with("1600"));
    }
}
