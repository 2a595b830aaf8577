use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::Card;
use crate::catalog::{Catalog, Perspective};
use crate::errors::GameError;

/// Per-round physical deck drawn through a weight-expanded virtual deck.
///
/// The physical deck holds one copy of every catalog card at round start and
/// shrinks by one per draw. The virtual deck is derived from the catalog's
/// current weights on every draw, so weight edits take effect on the next
/// draw only.
#[derive(Debug)]
pub struct WeightedDeck {
    physical: Vec<Card>,
    rng: ChaCha20Rng,
}

impl WeightedDeck {
    /// Creates an empty deck; call [`WeightedDeck::reset`] before drawing.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            physical: Vec::with_capacity(52),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Refills the physical deck with one copy of each catalog card.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.physical.clear();
        self.physical
            .extend(catalog.entries().iter().map(|e| e.card));
    }

    /// Card at `index` of the virtual deck, the physical deck with every
    /// card repeated `weight(perspective)` times. The virtual deck is never
    /// materialised; the index is resolved against cumulative weights.
    pub fn virtual_card(&self, catalog: &Catalog, perspective: Perspective, index: u64) -> Option<Card> {
        let mut start = 0u64;
        for &card in &self.physical {
            let end = start + u64::from(catalog.weight(card, perspective));
            if index < end {
                return Some(card);
            }
            start = end;
        }
        None
    }

    /// Total weight of the remaining physical cards for `perspective`,
    /// i.e. the size of the virtual deck.
    pub fn drawable_weight(&self, catalog: &Catalog, perspective: Perspective) -> u64 {
        self.physical
            .iter()
            .map(|&c| u64::from(catalog.weight(c, perspective)))
            .sum()
    }

    /// Draws one card, weighted by `perspective`, without replacement.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::EmptyDeck`] when no remaining card has a positive
    /// weight; the physical deck is left unchanged.
    pub fn draw(&mut self, catalog: &Catalog, perspective: Perspective) -> Result<Card, GameError> {
        let total = self.drawable_weight(catalog, perspective);
        if total == 0 {
            return Err(GameError::EmptyDeck { perspective });
        }
        let roll = self.rng.random_range(0..total);
        let picked = self
            .virtual_card(catalog, perspective, roll)
            .ok_or(GameError::EmptyDeck { perspective })?;
        // physical deck holds no duplicates, so the first match is the only one
        let idx = self
            .physical
            .iter()
            .position(|&c| c == picked)
            .ok_or(GameError::EmptyDeck { perspective })?;
        self.physical.remove(idx);
        tracing::trace!(card = %picked, ?perspective, remaining = self.physical.len(), "card drawn");
        Ok(picked)
    }

    pub fn remaining(&self) -> usize {
        self.physical.len()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.physical.contains(&card)
    }

    pub fn cards(&self) -> &[Card] {
        &self.physical
    }
}
