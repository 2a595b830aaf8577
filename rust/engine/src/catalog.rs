use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card, Rank, Suit};
use crate::errors::GameError;

/// Whose weight applies to a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Player,
    Dealer,
}

/// Default draw weight for both perspectives (uniform draws).
pub const DEFAULT_WEIGHT: u32 = 1;

/// One reference card with its adjustable draw weights.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub card: Card,
    pub player_weight: u32,
    pub dealer_weight: u32,
    /// Opaque display-asset key, never interpreted by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

impl CatalogEntry {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            player_weight: DEFAULT_WEIGHT,
            dealer_weight: DEFAULT_WEIGHT,
            asset: None,
        }
    }

    pub fn weight(&self, perspective: Perspective) -> u32 {
        match perspective {
            Perspective::Player => self.player_weight,
            Perspective::Dealer => self.dealer_weight,
        }
    }
}

/// Listing row handed to configuration surfaces.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct CatalogRow {
    pub rank: Rank,
    pub suit: Suit,
    pub player_weight: u32,
    pub dealer_weight: u32,
}

/// The 52 reference cards, sorted by suit then rank, with no duplicates.
///
/// Weight edits apply in place and are picked up by the next virtual deck
/// built from this catalog.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Standard catalog with every weight at [`DEFAULT_WEIGHT`].
    pub fn standard() -> Self {
        Self {
            entries: full_deck().into_iter().map(CatalogEntry::new).collect(),
        }
    }

    /// Builds a catalog from entries in any order.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCatalog`] unless the entries are exactly the
    /// 52 distinct cards.
    pub fn from_entries(mut entries: Vec<CatalogEntry>) -> Result<Self, GameError> {
        if entries.len() != 52 {
            return Err(GameError::InvalidCatalog(format!(
                "expected 52 cards, got {}",
                entries.len()
            )));
        }
        entries.sort_by_key(|e| e.card);
        if let Some(pair) = entries.windows(2).find(|w| w[0].card == w[1].card) {
            return Err(GameError::InvalidCatalog(format!(
                "duplicate card {}",
                pair[0].card
            )));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, card: Card) -> Option<&CatalogEntry> {
        self.position(card).map(|i| &self.entries[i])
    }

    /// Draw weight of `card`; cards outside the catalog weigh nothing.
    pub fn weight(&self, card: Card, perspective: Perspective) -> u32 {
        self.get(card).map_or(0, |e| e.weight(perspective))
    }

    pub fn total_weight(&self, perspective: Perspective) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.weight(perspective)))
            .sum()
    }

    /// Probability of drawing `card` from a full deck, in `0.0..=1.0`.
    pub fn chance_to_draw(&self, card: Card, perspective: Perspective) -> f64 {
        let total = self.total_weight(perspective);
        if total == 0 {
            return 0.0;
        }
        f64::from(self.weight(card, perspective)) / total as f64
    }

    pub fn list(&self) -> Vec<CatalogRow> {
        self.entries
            .iter()
            .map(|e| CatalogRow {
                rank: e.card.rank,
                suit: e.card.suit,
                player_weight: e.player_weight,
                dealer_weight: e.dealer_weight,
            })
            .collect()
    }

    /// Replaces one weight of `card` in place.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidWeight`] when the card is not catalogued;
    /// the catalog is left untouched.
    pub fn set_weight(
        &mut self,
        card: Card,
        perspective: Perspective,
        weight: u32,
    ) -> Result<(), GameError> {
        let idx = self
            .position(card)
            .ok_or_else(|| GameError::InvalidWeight {
                target: card.to_string(),
            })?;
        let entry = &mut self.entries[idx];
        match perspective {
            Perspective::Player => entry.player_weight = weight,
            Perspective::Dealer => entry.dealer_weight = weight,
        }
        tracing::debug!(%card, ?perspective, weight, "catalog weight updated");
        Ok(())
    }

    /// Like [`Catalog::set_weight`], addressing the card by its short name
    /// (`"AS"`, `"10h"`). Unknown names are rejected as
    /// [`GameError::InvalidWeight`] without touching the catalog.
    pub fn set_weight_named(
        &mut self,
        name: &str,
        perspective: Perspective,
        weight: u32,
    ) -> Result<Card, GameError> {
        let card: Card = name.parse().map_err(|_| GameError::InvalidWeight {
            target: name.to_string(),
        })?;
        self.set_weight(card, perspective, weight)?;
        Ok(card)
    }

    /// Sets the same weight on every card for one perspective.
    pub fn set_all_weights(&mut self, perspective: Perspective, weight: u32) {
        for entry in &mut self.entries {
            match perspective {
                Perspective::Player => entry.player_weight = weight,
                Perspective::Dealer => entry.dealer_weight = weight,
            }
        }
    }

    pub fn set_asset(&mut self, card: Card, asset: impl Into<String>) -> Result<(), GameError> {
        let idx = self
            .position(card)
            .ok_or_else(|| GameError::InvalidWeight {
                target: card.to_string(),
            })?;
        self.entries[idx].asset = Some(asset.into());
        Ok(())
    }

    fn position(&self, card: Card) -> Option<usize> {
        self.entries.binary_search_by(|e| e.card.cmp(&card)).ok()
    }
}
