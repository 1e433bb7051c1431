//! Tools: the named operations a dealer and the players invoke against a
//! session, plus the console command syntax that produces them.
//!
//! Dealer tools drive the deck and the pot; player tools act for one seat.
//! Both sides may read the table.

use serde_json::json;
use std::fmt;

/// Who is invoking a tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Actor {
    Dealer,
    Player(String),
}

impl Actor {
    pub fn name(&self) -> &str {
        match self {
            Actor::Dealer => "Dealer",
            Actor::Player(name) => name,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ToolCall {
    ShuffleDeck,
    GetCardsFromDeck { count: i64 },
    ReturnAllCards,
    ResetDeck,
    DeckStatus,
    NewHand,
    AwardPot { name: String },
    Bet { name: String, amount: u64 },
    Check { name: String },
    Fold { name: String },
    GetTable,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),
    #[error("{command}: missing {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("{command}: unexpected argument '{extra}'")]
    TooManyArguments { command: &'static str, extra: String },
}

impl ToolCall {
    /// Tool name as exposed to the dealer and players.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ShuffleDeck => "shuffle_deck",
            ToolCall::GetCardsFromDeck { .. } => "get_cards_from_deck",
            ToolCall::ReturnAllCards => "return_all_cards",
            ToolCall::ResetDeck => "reset_deck",
            ToolCall::DeckStatus => "deck_status",
            ToolCall::NewHand => "new_hand",
            ToolCall::AwardPot { .. } => "award_pot",
            ToolCall::Bet { .. } => "bet",
            ToolCall::Check { .. } => "check",
            ToolCall::Fold { .. } => "fold",
            ToolCall::GetTable => "get_table",
        }
    }

    /// Arguments as a JSON object string, for the transcript.
    pub fn arguments(&self) -> String {
        let v = match self {
            ToolCall::GetCardsFromDeck { count } => json!({ "count": count }),
            ToolCall::Bet { name, amount } => json!({ "name": name, "amount": amount }),
            ToolCall::AwardPot { name } | ToolCall::Check { name } | ToolCall::Fold { name } => {
                json!({ "name": name })
            }
            _ => json!({}),
        };
        v.to_string()
    }

    pub fn is_dealer_tool(&self) -> bool {
        matches!(
            self,
            ToolCall::ShuffleDeck
                | ToolCall::GetCardsFromDeck { .. }
                | ToolCall::ReturnAllCards
                | ToolCall::ResetDeck
                | ToolCall::DeckStatus
                | ToolCall::NewHand
                | ToolCall::AwardPot { .. }
        )
    }

    /// Dealers run dealer tools, players run player tools for their own
    /// seat, anyone may read the table.
    pub fn permitted_for(&self, actor: &Actor) -> bool {
        match (self, actor) {
            (ToolCall::GetTable, _) => true,
            (call, Actor::Dealer) => call.is_dealer_tool(),
            (
                ToolCall::Bet { name, .. } | ToolCall::Check { name } | ToolCall::Fold { name },
                Actor::Player(me),
            ) => name.trim().eq_ignore_ascii_case(me.trim()),
            _ => false,
        }
    }

    /// Parse a console command with no implied seat.
    ///
    /// ```
    /// use holdem_dealer::tools::ToolCall;
    ///
    /// assert_eq!(ToolCall::parse("draw 2").unwrap(), ToolCall::GetCardsFromDeck { count: 2 });
    /// assert_eq!(
    ///     ToolCall::parse("bet Player 2 10").unwrap(),
    ///     ToolCall::Bet { name: "Player 2".into(), amount: 10 },
    /// );
    /// ```
    pub fn parse(input: &str) -> Result<ToolCall, CommandParseError> {
        Self::parse_as(input, &Actor::Dealer)
    }

    /// Parse a console command; player commands without a name act for
    /// `actor` when it is a player.
    pub fn parse_as(input: &str, actor: &Actor) -> Result<ToolCall, CommandParseError> {
        let mut words = input.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandParseError::Empty);
        };
        let rest: Vec<&str> = words.collect();
        let seat = match actor {
            Actor::Player(name) => Some(name.as_str()),
            Actor::Dealer => None,
        };
        let name_or_seat = |command: &'static str, parts: &[&str]| {
            if parts.is_empty() {
                seat.map(str::to_string)
                    .ok_or(CommandParseError::MissingArgument { command, argument: "player name" })
            } else {
                Ok(parts.join(" "))
            }
        };

        let call = match head.to_ascii_lowercase().as_str() {
            "shuffle" | "shuffle_deck" => no_arguments(ToolCall::ShuffleDeck, &rest)?,
            "draw" | "deal" | "get_card" | "get_cards_from_deck" => match rest.as_slice() {
                [] => ToolCall::GetCardsFromDeck { count: 1 },
                [n] => ToolCall::GetCardsFromDeck { count: parse_number(n)? },
                [_, extra, ..] => {
                    return Err(CommandParseError::TooManyArguments {
                        command: "get_cards_from_deck",
                        extra: extra.to_string(),
                    })
                }
            },
            "return" | "return_all_cards" => no_arguments(ToolCall::ReturnAllCards, &rest)?,
            "reset" | "reset_deck" => no_arguments(ToolCall::ResetDeck, &rest)?,
            "status" | "deck" | "deck_status" => no_arguments(ToolCall::DeckStatus, &rest)?,
            "table" | "get_table" => no_arguments(ToolCall::GetTable, &rest)?,
            "new_hand" => no_arguments(ToolCall::NewHand, &rest)?,
            "new" if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("hand")) => {
                no_arguments(ToolCall::NewHand, &rest[1..])?
            }
            "award" | "award_pot" => {
                ToolCall::AwardPot { name: name_or_seat("award_pot", &rest[..])? }
            }
            "bet" => {
                let Some((amount, name_parts)) = rest.split_last() else {
                    return Err(CommandParseError::MissingArgument {
                        command: "bet",
                        argument: "amount",
                    });
                };
                let amount = amount
                    .trim_start_matches('$')
                    .parse::<u64>()
                    .map_err(|_| CommandParseError::InvalidNumber(amount.to_string()))?;
                ToolCall::Bet { name: name_or_seat("bet", name_parts)?, amount }
            }
            "check" => ToolCall::Check { name: name_or_seat("check", &rest[..])? },
            "fold" => ToolCall::Fold { name: name_or_seat("fold", &rest[..])? },
            _ => return Err(CommandParseError::UnknownCommand(head.to_string())),
        };
        Ok(call)
    }
}

impl fmt::Display for ToolCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with arguments {}", self.name(), self.arguments())
    }
}

fn no_arguments(call: ToolCall, rest: &[&str]) -> Result<ToolCall, CommandParseError> {
    match rest.first() {
        None => Ok(call),
        Some(extra) => Err(CommandParseError::TooManyArguments {
            command: call.name(),
            extra: extra.to_string(),
        }),
    }
}

fn parse_number(s: &str) -> Result<i64, CommandParseError> {
    s.parse::<i64>().map_err(|_| CommandParseError::InvalidNumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_dealer_commands() {
        assert_eq!(ToolCall::parse("shuffle").unwrap(), ToolCall::ShuffleDeck);
        assert_eq!(ToolCall::parse("draw").unwrap(), ToolCall::GetCardsFromDeck { count: 1 });
        assert_eq!(ToolCall::parse("deal -1").unwrap(), ToolCall::GetCardsFromDeck { count: -1 });
        assert_eq!(ToolCall::parse("  RETURN ").unwrap(), ToolCall::ReturnAllCards);
        assert_eq!(ToolCall::parse("new hand").unwrap(), ToolCall::NewHand);
        assert_eq!(
            ToolCall::parse("award Player 3").unwrap(),
            ToolCall::AwardPot { name: "Player 3".into() }
        );
    }

    #[test]
    fn parse_errors_are_typed() {
        assert_eq!(ToolCall::parse("   "), Err(CommandParseError::Empty));
        assert_eq!(
            ToolCall::parse("raise 5"),
            Err(CommandParseError::UnknownCommand("raise".into()))
        );
        assert_eq!(
            ToolCall::parse("draw two"),
            Err(CommandParseError::InvalidNumber("two".into()))
        );
        assert_eq!(
            ToolCall::parse("draw 2 3"),
            Err(CommandParseError::TooManyArguments {
                command: "get_cards_from_deck",
                extra: "3".into()
            })
        );
        assert_eq!(
            ToolCall::parse("new hand extra"),
            Err(CommandParseError::TooManyArguments { command: "new_hand", extra: "extra".into() })
        );
        assert_eq!(
            ToolCall::parse("bet"),
            Err(CommandParseError::MissingArgument { command: "bet", argument: "amount" })
        );
        assert_eq!(
            ToolCall::parse("fold"),
            Err(CommandParseError::MissingArgument { command: "fold", argument: "player name" })
        );
    }

    #[test]
    fn player_commands_default_to_own_seat() {
        let me = Actor::Player("Player 2".into());
        assert_eq!(
            ToolCall::parse_as("bet $15", &me).unwrap(),
            ToolCall::Bet { name: "Player 2".into(), amount: 15 }
        );
        assert_eq!(
            ToolCall::parse_as("check", &me).unwrap(),
            ToolCall::Check { name: "Player 2".into() }
        );
    }

    #[test]
    fn permissions_split_dealer_and_players() {
        let dealer = Actor::Dealer;
        let p1 = Actor::Player("Player 1".into());
        assert!(ToolCall::ShuffleDeck.permitted_for(&dealer));
        assert!(!ToolCall::ShuffleDeck.permitted_for(&p1));
        assert!(ToolCall::GetTable.permitted_for(&p1));
        assert!(ToolCall::Fold { name: "player 1".into() }.permitted_for(&p1));
        assert!(!ToolCall::Fold { name: "Player 2".into() }.permitted_for(&p1));
        assert!(!ToolCall::Check { name: "Player 1".into() }.permitted_for(&dealer));
    }

    #[test]
    fn display_names_tool_and_arguments() {
        let call = ToolCall::GetCardsFromDeck { count: 2 };
        assert_eq!(call.to_string(), "get_cards_from_deck with arguments {\"count\":2}");
    }
}
