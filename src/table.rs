//! Seats, balances and the pot.
//!
//! This is bookkeeping only: it records bets, checks and folds against named
//! players but does not enforce turn order, betting rounds or hand strength.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Checked,
    Folded,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("player {0} not found")]
    PlayerNotFound(String),
    #[error("bet amount is zero")]
    ZeroBet,
    #[error("insufficient balance: {name} has ${balance} but tried to bet ${amount}")]
    InsufficientBalance { name: String, balance: u64, amount: u64 },
    #[error("{0} has already folded")]
    PlayerFolded(String),
    #[error("the pot is empty")]
    EmptyPot,
    #[error("chip count overflow")]
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Player {
    pub name: String,
    pub balance: u64,
    pub current_bet: u64,
    pub dealer_button: bool,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(name: impl Into<String>, balance: u64) -> Self {
        Self {
            name: name.into(),
            balance,
            current_bet: 0,
            dealer_button: false,
            status: PlayerStatus::Active,
        }
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Table {
    pub players: Vec<Player>,
    pub pot: u64,
}

impl Table {
    pub const DEFAULT_PLAYERS: usize = 4;
    pub const DEFAULT_BALANCE: u64 = 50;

    /// Seats `Player 1..=num_players`, each with `starting_balance`; the
    /// button starts with Player 1.
    ///
    /// ```
    /// use holdem_dealer::table::Table;
    ///
    /// let table = Table::new(4, 50);
    /// assert_eq!(table.players.len(), 4);
    /// assert!(table.players[0].dealer_button);
    /// assert_eq!(table.pot, 0);
    /// ```
    pub fn new(num_players: usize, starting_balance: u64) -> Self {
        let players = (0..num_players)
            .map(|i| {
                let mut p = Player::new(format!("Player {}", i + 1), starting_balance);
                p.dealer_button = i == 0;
                p
            })
            .collect();
        Self { players, pot: 0 }
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| names_match(&p.name, name))
    }

    fn player_mut(&mut self, name: &str) -> Result<&mut Player, TableError> {
        self.players
            .iter_mut()
            .find(|p| names_match(&p.name, name))
            .ok_or_else(|| TableError::PlayerNotFound(name.to_string()))
    }

    /// Move `amount` from a player's balance into the pot. Returns the
    /// player's remaining balance.
    pub fn bet(&mut self, name: &str, amount: u64) -> Result<u64, TableError> {
        if amount == 0 {
            return Err(TableError::ZeroBet);
        }
        let pot = self.pot.checked_add(amount).ok_or(TableError::Overflow);
        let player = self.player_mut(name)?;
        if player.is_folded() {
            return Err(TableError::PlayerFolded(player.name.clone()));
        }
        if player.balance < amount {
            return Err(TableError::InsufficientBalance {
                name: player.name.clone(),
                balance: player.balance,
                amount,
            });
        }
        let current_bet = player.current_bet.checked_add(amount).ok_or(TableError::Overflow)?;
        let pot = pot?;
        player.balance -= amount;
        player.current_bet = current_bet;
        player.status = PlayerStatus::Active;
        let remaining = player.balance;
        self.pot = pot;
        Ok(remaining)
    }

    pub fn check(&mut self, name: &str) -> Result<(), TableError> {
        let player = self.player_mut(name)?;
        if player.is_folded() {
            return Err(TableError::PlayerFolded(player.name.clone()));
        }
        player.status = PlayerStatus::Checked;
        Ok(())
    }

    pub fn fold(&mut self, name: &str) -> Result<(), TableError> {
        let player = self.player_mut(name)?;
        if player.is_folded() {
            return Err(TableError::PlayerFolded(player.name.clone()));
        }
        player.status = PlayerStatus::Folded;
        Ok(())
    }

    /// Pay the whole pot to one player. Returns the amount paid.
    pub fn award_pot(&mut self, name: &str) -> Result<u64, TableError> {
        let pot = self.pot;
        if pot == 0 {
            return Err(TableError::EmptyPot);
        }
        let player = self.player_mut(name)?;
        player.balance = player.balance.checked_add(pot).ok_or(TableError::Overflow)?;
        self.pot = 0;
        Ok(pot)
    }

    /// Clear per-hand state and pass the button to the next seat.
    pub fn clear_bets(&mut self) {
        for p in &mut self.players {
            p.current_bet = 0;
            p.status = PlayerStatus::Active;
        }
        let n = self.players.len();
        if n == 0 {
            return;
        }
        let button = self.players.iter().position(|p| p.dealer_button).unwrap_or(n - 1);
        for (i, p) in self.players.iter_mut().enumerate() {
            p.dealer_button = i == (button + 1) % n;
        }
    }

    pub fn dealer(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.dealer_button)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PLAYERS, Self::DEFAULT_BALANCE)
    }
}

fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bet_moves_chips_into_the_pot() {
        let mut t = Table::default();
        assert_eq!(t.bet("Player 2", 10), Ok(40));
        let p = t.player("player 2").unwrap();
        assert_eq!(p.balance, 40);
        assert_eq!(p.current_bet, 10);
        assert_eq!(t.pot, 10);
    }

    #[test]
    fn failed_bet_leaves_table_unchanged() {
        let mut t = Table::default();
        let before = t.clone();
        assert!(matches!(t.bet("Player 1", 51), Err(TableError::InsufficientBalance { .. })));
        assert_eq!(t.bet("Player 1", 0), Err(TableError::ZeroBet));
        assert_eq!(t.bet("Nobody", 5), Err(TableError::PlayerNotFound("Nobody".to_string())));
        assert_eq!(t, before);
    }

    #[test]
    fn overflowing_bet_or_award_is_rejected() {
        let mut t = Table::new(2, u64::MAX);
        assert_eq!(t.bet("Player 1", u64::MAX), Ok(0));
        let before = t.clone();
        assert_eq!(t.bet("Player 2", 1), Err(TableError::Overflow));
        assert_eq!(t, before);

        let mut t = Table::new(2, u64::MAX);
        t.bet("Player 1", 10).unwrap();
        let before = t.clone();
        assert_eq!(t.award_pot("Player 2"), Err(TableError::Overflow));
        assert_eq!(t, before);
    }

    #[test]
    fn folded_player_cannot_act() {
        let mut t = Table::default();
        t.fold("Player 3").unwrap();
        assert_eq!(t.check("Player 3"), Err(TableError::PlayerFolded("Player 3".to_string())));
        assert!(t.bet("Player 3", 1).is_err());
        assert_eq!(t.player("Player 3").unwrap().status, PlayerStatus::Folded);
    }

    #[test]
    fn award_and_clear_rotate_the_button() {
        let mut t = Table::new(3, 100);
        t.bet("Player 1", 20).unwrap();
        t.bet("Player 2", 20).unwrap();
        assert_eq!(t.award_pot("Player 2"), Ok(40));
        assert_eq!(t.pot, 0);
        assert_eq!(t.player("Player 2").unwrap().balance, 120);
        assert_eq!(t.award_pot("Player 2"), Err(TableError::EmptyPot));

        t.clear_bets();
        assert!(t.players.iter().all(|p| p.current_bet == 0));
        assert_eq!(t.dealer().map(|p| p.name.as_str()), Some("Player 2"));
    }

    #[test]
    fn table_serializes_to_json() {
        let t = Table::new(2, 50);
        let v: serde_json::Value = serde_json::from_str(&t.to_json().unwrap()).unwrap();
        assert_eq!(v["pot"], 0);
        assert_eq!(v["players"][0]["name"], "Player 1");
        assert_eq!(v["players"][1]["status"], "active");
    }
}
