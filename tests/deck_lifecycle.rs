use holdem_dealer::cards::Card;
use holdem_dealer::deck::{Deck, DeckError, DECK_SIZE};
use std::collections::HashSet;

fn all_cards(deck: &Deck) -> Vec<Card> {
    let mut xs: Vec<Card> = deck.live().chain(deck.discarded()).copied().collect();
    xs.sort();
    xs
}

#[test]
fn fresh_and_reset_decks_hold_52_distinct_cards() {
    let mut deck = Deck::with_seed(1);
    assert_eq!(deck.cards_remaining(), 52);
    assert_eq!(deck.cards_discarded(), 0);
    let unique: HashSet<Card> = deck.live().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);

    deck.shuffle();
    deck.deal(17).unwrap();
    deck.reset();
    assert_eq!(deck.cards_remaining(), 52);
    assert_eq!(deck.cards_discarded(), 0);
    let unique: HashSet<Card> = deck.live().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);
}

#[test]
fn shuffle_preserves_cards_and_discards() {
    let mut deck = Deck::with_seed(2);
    let dealt = deck.deal(5).unwrap();
    let mut before: Vec<Card> = deck.live().copied().collect();
    deck.shuffle();
    let mut after: Vec<Card> = deck.live().copied().collect();
    assert_eq!(deck.discarded().copied().collect::<Vec<_>>(), dealt);
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn repeated_shuffles_change_the_order() {
    let mut deck = Deck::with_seed(3);
    let original: Vec<Card> = deck.live().copied().collect();
    let changed = (0..5).any(|_| {
        deck.shuffle();
        deck.live().copied().collect::<Vec<_>>() != original
    });
    assert!(changed);
}

#[test]
fn deal_counts_follow_the_request() {
    let mut deck = Deck::with_seed(4);
    deck.deal(3).unwrap();
    let discarded_before = deck.cards_discarded();
    let hand = deck.deal(7).unwrap();
    assert_eq!(hand.len(), 7);
    assert_eq!(deck.cards_remaining(), 52 - 7 - discarded_before);
    assert_eq!(deck.cards_discarded(), discarded_before + 7);
}

#[test]
fn invalid_counts_are_rejected_without_side_effects() {
    let mut deck = Deck::with_seed(5);
    deck.deal(2).unwrap();
    for bad in [0, -1] {
        assert_eq!(deck.deal(bad), Err(DeckError::InvalidArgument { count: bad }));
        assert_eq!(deck.cards_remaining(), 50);
        assert_eq!(deck.cards_discarded(), 2);
    }
}

#[test]
fn overdraw_is_rejected_without_side_effects() {
    let mut deck = Deck::with_seed(6);
    assert_eq!(
        deck.deal(53),
        Err(DeckError::InsufficientCards { requested: 53, remaining: 52 })
    );
    assert_eq!(deck.cards_remaining(), 52);
    assert_eq!(deck.cards_discarded(), 0);
}

#[test]
fn deal_all_then_return_restores_the_full_deck() {
    let mut deck = Deck::with_seed(7);
    let original = all_cards(&deck);
    let dealt = deck.deal(52).unwrap();
    assert_eq!(deck.cards_remaining(), 0);
    deck.return_all_cards();
    assert_eq!(deck.cards_remaining(), 52);
    assert_eq!(deck.cards_discarded(), 0);
    assert_eq!(all_cards(&deck), original);
    // Bottom-to-top order is the deal order; no randomisation happens.
    let live: Vec<Card> = deck.live().copied().collect();
    assert_eq!(live, dealt);
}

#[test]
fn two_deals_of_five_are_disjoint() {
    let mut deck = Deck::with_seed(8);
    deck.shuffle();
    let first = deck.deal(5).unwrap();
    let first_set: HashSet<Card> = first.iter().copied().collect();
    assert_eq!(first_set.len(), 5);
    assert_eq!(deck.cards_remaining(), 47);
    assert_eq!(deck.cards_discarded(), 5);

    let second = deck.deal(5).unwrap();
    assert!(second.iter().all(|c| !first_set.contains(c)));
    assert_eq!(deck.cards_remaining(), 42);
    assert_eq!(deck.cards_discarded(), 10);
}

#[test]
fn shuffle_with_external_rng_is_reproducible() {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    let mut a = Deck::with_seed(0);
    let mut b = Deck::with_seed(99);
    a.shuffle_with(&mut ChaCha8Rng::seed_from_u64(5));
    b.shuffle_with(&mut ChaCha8Rng::seed_from_u64(5));
    assert_eq!(
        a.live().copied().collect::<Vec<_>>(),
        b.live().copied().collect::<Vec<_>>()
    );
}
