//! Five-card draw: hand classification, pay table and river state.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DealtCard, Rank};
use crate::catalog::Perspective;
use crate::errors::GameError;
use crate::game::{RoundContext, Seat};

pub const RIVER_SIZE: usize = 5;

/// Paying hand categories, best first. Declaration order is evaluation order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    JacksOrBetter,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::JacksOrBetter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::RoyalFlush => "ROYAL FLUSH",
            Category::StraightFlush => "STRAIGHT FLUSH",
            Category::FourOfAKind => "FOUR OF A KIND",
            Category::FullHouse => "FULL HOUSE",
            Category::Flush => "FLUSH",
            Category::Straight => "STRAIGHT",
            Category::ThreeOfAKind => "THREE OF A KIND",
            Category::TwoPair => "TWO PAIRS",
            Category::JacksOrBetter => "JACKS OR BETTER",
        }
    }
}

/// Payout multipliers per category, applied to the wager.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayTable {
    pub royal_flush: u32,
    pub straight_flush: u32,
    pub four_of_a_kind: u32,
    pub full_house: u32,
    pub flush: u32,
    pub straight: u32,
    pub three_of_a_kind: u32,
    pub two_pair: u32,
    pub jacks_or_better: u32,
}

impl Default for PayTable {
    fn default() -> Self {
        Self {
            royal_flush: 800,
            straight_flush: 50,
            four_of_a_kind: 25,
            full_house: 9,
            flush: 6,
            straight: 4,
            three_of_a_kind: 3,
            two_pair: 2,
            jacks_or_better: 1,
        }
    }
}

impl PayTable {
    pub fn multiplier(&self, category: Category) -> u32 {
        match category {
            Category::RoyalFlush => self.royal_flush,
            Category::StraightFlush => self.straight_flush,
            Category::FourOfAKind => self.four_of_a_kind,
            Category::FullHouse => self.full_house,
            Category::Flush => self.flush,
            Category::Straight => self.straight,
            Category::ThreeOfAKind => self.three_of_a_kind,
            Category::TwoPair => self.two_pair,
            Category::JacksOrBetter => self.jacks_or_better,
        }
    }

    /// Credits paid for `category` on `wager`; no category pays nothing.
    pub fn payout(&self, category: Option<Category>, wager: u64) -> u64 {
        category.map_or(0, |c| wager * u64::from(self.multiplier(c)))
    }

    /// Payout preview for every category at `wager`, best first.
    pub fn rows(&self, wager: u64) -> Vec<(Category, u64)> {
        Category::ALL
            .iter()
            .map(|&c| (c, wager * u64::from(self.multiplier(c))))
            .collect()
    }
}

/// Classifies a five-card hand. `None` means no paying hand.
///
/// # Examples
///
/// ```
/// use casino_engine::cards::Card;
/// use casino_engine::poker::{evaluate, Category};
///
/// let hand: Vec<Card> = ["AC", "2D", "3H", "4S", "5C"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// assert_eq!(evaluate(&hand.try_into().unwrap()), Some(Category::Straight));
/// ```
pub fn evaluate(cards: &[Card; RIVER_SIZE]) -> Option<Category> {
    let flush = is_flush(cards);
    let straight = is_straight(cards);
    if flush && straight {
        return Some(if is_broadway(cards) {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        });
    }

    let counts = rank_counts(cards);
    let max_kind = counts.iter().copied().max().unwrap_or(0);
    let pairs = counts.iter().filter(|&&c| c >= 2).count();

    if max_kind >= 4 {
        return Some(Category::FourOfAKind);
    }
    if max_kind >= 3 && pairs >= 2 {
        return Some(Category::FullHouse);
    }
    if flush {
        return Some(Category::Flush);
    }
    if straight {
        return Some(Category::Straight);
    }
    if max_kind >= 3 {
        return Some(Category::ThreeOfAKind);
    }
    if pairs >= 2 {
        return Some(Category::TwoPair);
    }
    let high_pair = [Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
        .iter()
        .any(|&r| counts[r.value() as usize] >= 2);
    if high_pair {
        return Some(Category::JacksOrBetter);
    }
    None
}

// index 1..=13 by rank value; slot 0 unused
fn rank_counts(cards: &[Card; RIVER_SIZE]) -> [u8; 14] {
    let mut counts = [0u8; 14];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

fn is_flush(cards: &[Card; RIVER_SIZE]) -> bool {
    cards.iter().all(|c| c.suit == cards[0].suit)
}

fn is_broadway(cards: &[Card; RIVER_SIZE]) -> bool {
    cards
        .iter()
        .all(|c| c.rank == Rank::Ace || c.rank >= Rank::Ten)
}

/// Five consecutive ranks with the Ace low. When both Ace and King are
/// present the ranks wrap around, so Q-K-A-2-3 also counts.
fn is_straight(cards: &[Card; RIVER_SIZE]) -> bool {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.dedup();
    if values.len() != RIVER_SIZE {
        return false;
    }
    if consecutive(&values) {
        return true;
    }
    let has_ace = values.contains(&Rank::Ace.value());
    let has_king = values.contains(&Rank::King.value());
    if !(has_ace && has_king) {
        return false;
    }
    // on the 13-rank circle a run leaves exactly one gap wider than one
    let wrap = values[0] + 13 - values[RIVER_SIZE - 1];
    let steps = values.windows(2).map(|w| w[1] - w[0]).chain(std::iter::once(wrap));
    steps.filter(|&d| d != 1).count() == 1
}

fn consecutive(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Round-scoped draw-poker state: five slots with hold flags.
#[derive(Debug, Clone, Default)]
pub struct PokerRound {
    river: [Option<DealtCard>; RIVER_SIZE],
    held: [bool; RIVER_SIZE],
    discards: Vec<Card>,
    pay_table: PayTable,
    preview: Option<Category>,
}

impl PokerRound {
    pub fn new(pay_table: PayTable) -> Self {
        Self {
            pay_table,
            ..Self::default()
        }
    }

    pub fn river(&self) -> &[Option<DealtCard>; RIVER_SIZE] {
        &self.river
    }

    pub fn held(&self) -> [bool; RIVER_SIZE] {
        self.held
    }

    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    pub fn pay_table(&self) -> &PayTable {
        &self.pay_table
    }

    /// Category of the river as first dealt, available during the player's turn.
    pub fn preview(&self) -> Option<Category> {
        self.preview
    }

    /// The five river cards once every slot is filled.
    pub fn hand(&self) -> Option<[Card; RIVER_SIZE]> {
        let mut out = [Card::new(Rank::Ace, crate::cards::Suit::Clubs); RIVER_SIZE];
        for (slot, dc) in out.iter_mut().zip(self.river.iter()) {
            *slot = dc.as_ref()?.card;
        }
        Some(out)
    }

    pub fn evaluate(&self) -> Option<Category> {
        self.hand().and_then(|h| evaluate(&h))
    }

    pub(crate) fn clear(&mut self) {
        self.river = [None; RIVER_SIZE];
        self.held = [false; RIVER_SIZE];
        self.discards.clear();
        self.preview = None;
    }

    pub(crate) fn dealt_count(&self) -> usize {
        self.river.iter().filter(|s| s.is_some()).count() + self.discards.len()
    }

    /// Dealer fills all five slots face up.
    pub(crate) fn fill_river(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        for slot in 0..RIVER_SIZE {
            let dealt = DealtCard::face_up(ctx.draw(Perspective::Dealer)?);
            ctx.placed(Seat::River, slot, dealt);
            self.river[slot] = Some(dealt);
        }
        Ok(())
    }

    pub(crate) fn refresh_preview(&mut self) {
        self.preview = self.evaluate();
    }

    /// Flips the hold flag of `slot` and returns the new value.
    pub(crate) fn toggle_hold(&mut self, slot: usize) -> Result<bool, GameError> {
        let flag = self
            .held
            .get_mut(slot)
            .ok_or(GameError::InvalidSlot { slot })?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Replaces every unheld slot with a card drawn for the player.
    pub(crate) fn draw_unheld(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        for slot in 0..RIVER_SIZE {
            if self.held[slot] {
                continue;
            }
            let card = ctx.draw(Perspective::Player)?;
            if let Some(old) = self.river[slot].take() {
                self.discards.push(old.card);
            }
            let dealt = DealtCard::face_up(card);
            ctx.placed(Seat::River, slot, dealt);
            self.river[slot] = Some(dealt);
        }
        Ok(())
    }
}
