//! A game session: one deck, one table, one transcript.
//!
//! The session owns its deck outright and hands out tool calls against it;
//! there is no shared global deck. Callers that share a session across
//! threads must serialize access themselves.

use crate::cards::{describe, Card};
use crate::deck::{Deck, DeckError};
use crate::table::{Table, TableError};
use crate::tools::{Actor, CommandParseError, ToolCall};
use crate::transcript::{EntryKind, Transcript};
use std::fmt;

/// Session configuration. Built with `Default` plus `with_*` overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct SessionConfig {
    pub num_players: usize,
    pub starting_balance: u64,
    pub shuffle_on_start: bool,
    /// Fixed RNG seed; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    pub transcript_capacity: usize,
}

impl SessionConfig {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 9;

    pub fn with_players(mut self, n: usize) -> Self {
        self.num_players = n;
        self
    }

    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    pub fn with_shuffle_on_start(mut self, shuffle: bool) -> Self {
        self.shuffle_on_start = shuffle;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_transcript_capacity(mut self, capacity: usize) -> Self {
        self.transcript_capacity = capacity;
        self
    }

    fn normalized(mut self) -> Self {
        self.num_players = self.num_players.clamp(Self::MIN_PLAYERS, Self::MAX_PLAYERS);
        self.transcript_capacity = self.transcript_capacity.max(1);
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_players: Table::DEFAULT_PLAYERS,
            starting_balance: Table::DEFAULT_BALANCE,
            shuffle_on_start: true,
            seed: None,
            transcript_capacity: Transcript::DEFAULT_CAPACITY,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ToolError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Command(#[from] CommandParseError),
    #[error("{actor} may not call {tool}")]
    NotPermitted { actor: String, tool: &'static str },
    #[error("could not serialize table: {0}")]
    Serialize(String),
}

/// What a tool hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ToolOutput {
    Shuffled,
    Cards(Vec<Card>),
    Returned { remaining: usize },
    Reset,
    DeckStatus { remaining: usize, discarded: usize },
    NewHand { dealer: String },
    PotAwarded { name: String, amount: u64 },
    BetPlaced { name: String, amount: u64, remaining: u64 },
    Checked { name: String },
    Folded { name: String },
    /// The table as a JSON object.
    Table(String),
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Shuffled => f.write_str("Shuffled the deck"),
            ToolOutput::Cards(cards) => f.write_str(&describe(cards)),
            ToolOutput::Returned { remaining } => {
                write!(f, "Returned all cards; {remaining} in the deck")
            }
            ToolOutput::Reset => f.write_str("Deck reset to 52 cards"),
            ToolOutput::DeckStatus { remaining, discarded } => {
                write!(f, "{remaining} cards remaining, {discarded} discarded")
            }
            ToolOutput::NewHand { dealer } => {
                write!(f, "New hand: cards collected and shuffled, button on {dealer}")
            }
            ToolOutput::PotAwarded { name, amount } => write!(f, "{name} wins ${amount}"),
            ToolOutput::BetPlaced { name, amount, remaining } => {
                write!(f, "{name} bet ${amount}. Remaining balance: ${remaining}")
            }
            ToolOutput::Checked { name } => write!(f, "{name} checks"),
            ToolOutput::Folded { name } => write!(f, "{name} folds"),
            ToolOutput::Table(json) => f.write_str(json),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    deck: Deck,
    table: Table,
    transcript: Transcript,
    active: Actor,
    last_dealt: Vec<Card>,
}

impl Session {
    /// Start a session from `config`.
    ///
    /// ```
    /// use holdem_dealer::session::{Session, SessionConfig, ToolOutput};
    /// use holdem_dealer::tools::{Actor, ToolCall};
    ///
    /// let mut session = Session::new(SessionConfig::default().with_seed(Some(7)));
    /// let out = session.invoke(&Actor::Dealer, ToolCall::GetCardsFromDeck { count: 2 }).unwrap();
    /// assert!(matches!(out, ToolOutput::Cards(ref cards) if cards.len() == 2));
    /// assert_eq!(session.deck().cards_remaining(), 50);
    /// ```
    pub fn new(config: SessionConfig) -> Self {
        let deck = match config.seed {
            Some(seed) => Deck::with_seed(seed),
            None => Deck::new(),
        };
        Self::with_deck(config, deck)
    }

    /// Start a session around an existing deck.
    pub fn with_deck(config: SessionConfig, mut deck: Deck) -> Self {
        let config = config.normalized();
        if config.shuffle_on_start {
            deck.shuffle();
        }
        let table = Table::new(config.num_players, config.starting_balance);
        let mut transcript = Transcript::with_capacity(config.transcript_capacity);
        transcript.record(
            EntryKind::Message,
            Actor::Dealer.name(),
            format!(
                "Table open: {} players, ${} each",
                config.num_players, config.starting_balance
            ),
        );
        Self { config, deck, table, transcript, active: Actor::Dealer, last_dealt: Vec::new() }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn active(&self) -> &Actor {
        &self.active
    }

    /// Cards handed out by the most recent successful draw.
    pub fn last_dealt(&self) -> &[Card] {
        &self.last_dealt
    }

    /// The dealer followed by every seated player, in seat order.
    pub fn actors(&self) -> Vec<Actor> {
        std::iter::once(Actor::Dealer)
            .chain(self.table.players.iter().map(|p| Actor::Player(p.name.clone())))
            .collect()
    }

    /// Hand control to another actor. Unknown players are ignored.
    pub fn set_active(&mut self, actor: Actor) -> bool {
        if let Actor::Player(name) = &actor {
            if self.table.player(name).is_none() {
                return false;
            }
        }
        if actor != self.active {
            self.transcript.record(
                EntryKind::Handoff,
                self.active.name(),
                format!("Name: {}", actor.name()),
            );
            self.transcript.record(EntryKind::AgentRunning, actor.name(), actor.name());
            self.active = actor;
        }
        true
    }

    /// Record free text from the active actor.
    pub fn say(&mut self, text: &str) {
        self.transcript.record(EntryKind::Message, self.active.name(), text);
    }

    /// Parse `input` as a command from the active actor and run it.
    pub fn run_command(&mut self, input: &str) -> Result<ToolOutput, ToolError> {
        let actor = self.active.clone();
        match ToolCall::parse_as(input, &actor) {
            Ok(call) => self.invoke(&actor, call),
            Err(err) => {
                self.transcript.record(EntryKind::ToolError, actor.name(), err.to_string());
                Err(err.into())
            }
        }
    }

    /// Run one tool call on behalf of `actor`, recording call and result.
    pub fn invoke(&mut self, actor: &Actor, call: ToolCall) -> Result<ToolOutput, ToolError> {
        self.transcript.record(
            EntryKind::ToolCall,
            actor.name(),
            format!("{actor} calls tool {call}"),
        );
        let result = if call.permitted_for(actor) {
            self.dispatch(call)
        } else {
            Err(ToolError::NotPermitted { actor: actor.name().to_string(), tool: call.name() })
        };
        match &result {
            Ok(out) => self.transcript.record(EntryKind::ToolOutput, actor.name(), out.to_string()),
            Err(err) => self.transcript.record(EntryKind::ToolError, actor.name(), err.to_string()),
        }
        result
    }

    fn dispatch(&mut self, call: ToolCall) -> Result<ToolOutput, ToolError> {
        let out = match call {
            ToolCall::ShuffleDeck => {
                self.deck.shuffle();
                ToolOutput::Shuffled
            }
            ToolCall::GetCardsFromDeck { count } => {
                let cards = self.deck.deal(count)?;
                self.last_dealt = cards.clone();
                ToolOutput::Cards(cards)
            }
            ToolCall::ReturnAllCards => {
                self.deck.return_all_cards();
                ToolOutput::Returned { remaining: self.deck.cards_remaining() }
            }
            ToolCall::ResetDeck => {
                self.deck.reset();
                self.last_dealt.clear();
                ToolOutput::Reset
            }
            ToolCall::DeckStatus => ToolOutput::DeckStatus {
                remaining: self.deck.cards_remaining(),
                discarded: self.deck.cards_discarded(),
            },
            ToolCall::NewHand => {
                self.deck.return_all_cards();
                self.deck.shuffle();
                self.last_dealt.clear();
                self.table.clear_bets();
                let dealer = self.table.dealer().map(|p| p.name.clone()).unwrap_or_default();
                ToolOutput::NewHand { dealer }
            }
            ToolCall::AwardPot { name } => {
                let amount = self.table.award_pot(&name)?;
                ToolOutput::PotAwarded { name, amount }
            }
            ToolCall::Bet { name, amount } => {
                let remaining = self.table.bet(&name, amount)?;
                ToolOutput::BetPlaced { name, amount, remaining }
            }
            ToolCall::Check { name } => {
                self.table.check(&name)?;
                ToolOutput::Checked { name }
            }
            ToolCall::Fold { name } => {
                self.table.fold(&name)?;
                ToolOutput::Folded { name }
            }
            ToolCall::GetTable => ToolOutput::Table(
                self.table.to_json().map_err(|e| ToolError::Serialize(e.to_string()))?,
            ),
        };
        Ok(out)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
