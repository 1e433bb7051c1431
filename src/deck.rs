//! The 52-card deck and its lifecycle: shuffle, deal, return, reset.
//!
//! A deck keeps two partitions. `live` holds the undealt cards with the top
//! of the deck at the back; `discarded` holds dealt cards in deal order.
//! Together they always contain each of the 52 standard cards exactly once.

use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("count must be at least 1, got {count}")]
    InvalidArgument { count: i64 },
    #[error("cannot draw {requested} cards: only {remaining} remaining in deck")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// A standard 52-card deck with a live pile and a discard pile.
#[derive(Debug, Clone)]
pub struct Deck {
    live: VecDeque<Card>,
    discarded: VecDeque<Card>,
    rng: ChaCha8Rng,
}

fn canonical() -> VecDeque<Card> {
    let mut cards = VecDeque::with_capacity(DECK_SIZE);
    for &s in &Suit::ALL {
        for &r in &Rank::ALL {
            cards.push_back(Card::new(r, s));
        }
    }
    cards
}

impl Deck {
    /// A fresh deck in canonical order, shuffling with a randomly seeded RNG.
    ///
    /// ```
    /// use holdem_dealer::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.cards_remaining(), 52);
    /// assert_eq!(deck.cards_discarded(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// A fresh deck whose shuffles are reproducible for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            live: canonical(),
            discarded: VecDeque::with_capacity(DECK_SIZE),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Shuffle the live cards with the deck's own RNG. Discards are untouched.
    pub fn shuffle(&mut self) {
        self.live.make_contiguous().shuffle(&mut self.rng);
    }

    /// Shuffle the live cards using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.live.make_contiguous().shuffle(rng);
    }

    /// Draw `count` cards from the top of the deck.
    ///
    /// Dealt cards are appended to the discard pile in the order they are
    /// returned. Either all `count` cards are dealt or the deck is left as is.
    ///
    /// ```
    /// use holdem_dealer::deck::{Deck, DeckError};
    ///
    /// let mut deck = Deck::with_seed(7);
    /// deck.shuffle();
    /// let hand = deck.deal(2).unwrap();
    /// assert_eq!(hand.len(), 2);
    /// assert_eq!(deck.cards_remaining(), 50);
    /// assert!(matches!(deck.deal(0), Err(DeckError::InvalidArgument { .. })));
    /// ```
    pub fn deal(&mut self, count: i64) -> Result<Vec<Card>, DeckError> {
        if count < 1 {
            return Err(DeckError::InvalidArgument { count });
        }
        let remaining = self.live.len();
        let requested = usize::try_from(count).unwrap_or(usize::MAX);
        if requested > remaining {
            return Err(DeckError::InsufficientCards { requested, remaining });
        }

        let mut drawn = Vec::with_capacity(requested);
        for _ in 0..requested {
            let Some(card) = self.live.pop_back() else { break };
            drawn.push(card);
        }
        self.discarded.extend(drawn.iter().copied());
        Ok(drawn)
    }

    /// Draw the top card.
    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        let mut cards = self.deal(1)?;
        cards.pop().ok_or(DeckError::InsufficientCards { requested: 1, remaining: 0 })
    }

    /// Put every discarded card back under the live cards, in discard order.
    pub fn return_all_cards(&mut self) {
        while let Some(card) = self.discarded.pop_back() {
            self.live.push_front(card);
        }
    }

    pub fn cards_remaining(&self) -> usize {
        self.live.len()
    }

    pub fn cards_discarded(&self) -> usize {
        self.discarded.len()
    }

    /// Back to a full, unshuffled deck with an empty discard pile.
    pub fn reset(&mut self) {
        self.live = canonical();
        self.discarded.clear();
    }

    /// The next card `deal` would hand out.
    pub fn peek_top(&self) -> Option<Card> {
        self.live.back().copied()
    }

    /// Live cards from bottom to top.
    pub fn live(&self) -> impl Iterator<Item = &Card> + '_ {
        self.live.iter()
    }

    /// Discarded cards in the order they were dealt.
    pub fn discarded(&self) -> impl Iterator<Item = &Card> + '_ {
        self.discarded.iter()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fresh_deck_is_canonical() {
        let d = Deck::with_seed(1);
        let cards: Vec<Card> = d.live().copied().collect();
        assert_eq!(cards.len(), DECK_SIZE);
        assert_eq!(cards[0], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(cards[12], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(cards[13], Card::new(Rank::Two, Suit::Diamonds));
        assert_eq!(cards[51], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(d.peek_top(), Some(Card::new(Rank::Ace, Suit::Spades)));
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut d1 = Deck::with_seed(42);
        let mut d2 = Deck::with_seed(42);
        d1.shuffle();
        d2.shuffle();
        assert_eq!(d1.live, d2.live);
    }

    #[test]
    fn deal_takes_from_the_top() {
        let mut d = Deck::with_seed(3);
        let hand = d.deal(2).unwrap();
        assert_eq!(hand[0], Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(hand[1], Card::new(Rank::King, Suit::Spades));
        let discarded: Vec<Card> = d.discarded().copied().collect();
        assert_eq!(discarded, hand);
    }

    #[test]
    fn deal_one_moves_a_single_card() {
        let mut d = Deck::with_seed(5);
        let top = d.peek_top();
        assert_eq!(Some(d.deal_one().unwrap()), top);
        assert_eq!(d.cards_remaining(), 51);
        assert_eq!(d.cards_discarded(), 1);
    }

    #[test]
    fn shuffle_leaves_discards_alone() {
        let mut d = Deck::with_seed(9);
        let hand = d.deal(4).unwrap();
        d.shuffle();
        let discarded: Vec<Card> = d.discarded().copied().collect();
        assert_eq!(discarded, hand);
        assert_eq!(d.cards_remaining(), 48);
    }

    #[test]
    fn return_all_puts_discards_at_the_bottom() {
        let mut d = Deck::with_seed(11);
        let first = d.deal(3).unwrap();
        let second = d.deal(2).unwrap();
        d.return_all_cards();
        assert_eq!(d.cards_discarded(), 0);
        assert_eq!(d.cards_remaining(), DECK_SIZE);
        let bottom: Vec<Card> = d.live().take(5).copied().collect();
        let expected: Vec<Card> = first.into_iter().chain(second).collect();
        assert_eq!(bottom, expected);
    }

    #[test]
    fn failed_deal_changes_nothing() {
        let mut d = Deck::with_seed(13);
        d.deal(50).unwrap();
        let before: Vec<Card> = d.live().copied().collect();
        assert_eq!(
            d.deal(3),
            Err(DeckError::InsufficientCards { requested: 3, remaining: 2 })
        );
        assert_eq!(d.deal(i64::MIN), Err(DeckError::InvalidArgument { count: i64::MIN }));
        let after: Vec<Card> = d.live().copied().collect();
        assert_eq!(before, after);
        assert_eq!(d.cards_discarded(), 50);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut d = Deck::with_seed(17);
        d.shuffle();
        d.deal(10).unwrap();
        d.reset();
        let once: Vec<Card> = d.live().copied().collect();
        d.reset();
        let twice: Vec<Card> = d.live().copied().collect();
        assert_eq!(once, twice);
        assert_eq!(once, canonical().into_iter().collect::<Vec<_>>());
        assert_eq!(d.cards_discarded(), 0);
        let unique: HashSet<Card> = once.into_iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }
}
