//! holdem-dealer: a Texas Hold'em dealer demo around a 52-card deck.
//!
//! Goals:
//! - A deck whose live and discarded piles always hold the 52 cards exactly once
//! - Seeded, reproducible shuffles
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: deal from a fresh deck
//! ```
//! use holdem_dealer::deck::Deck;
//!
//! let mut deck = Deck::with_seed(42);
//! deck.shuffle();
//! let flop = deck.deal(3).unwrap();
//! assert_eq!(flop.len(), 3);
//! assert_eq!(deck.cards_remaining(), 49);
//! assert_eq!(deck.cards_discarded(), 3);
//!
//! deck.return_all_cards();
//! assert_eq!(deck.cards_remaining(), 52);
//! ```
//!
//! ## TUI
//! Run the dealer console with:
//! ```sh
//! cargo run --bin holdem-dealer
//! ```

pub mod cards;
pub mod deck;
pub mod session;
pub mod table;
pub mod tools;
pub mod transcript;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
