use crate::session::{Session, SessionConfig};

use super::AppState;

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Players,
    StartingBalance,
    ShuffleOnStart,
    Seed,
}

const MENU_ITEMS: [MenuItem; 4] =
    [MenuItem::Players, MenuItem::StartingBalance, MenuItem::ShuffleOnStart, MenuItem::Seed];

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Players => format!("Players: {}", app.cfg_num_players),
            MenuItem::StartingBalance => format!("Starting Balance: ${}", app.cfg_starting_balance),
            MenuItem::ShuffleOnStart => {
                format!("Shuffle On Start: {}", if app.cfg_shuffle_on_start { "Yes" } else { "No" })
            }
            MenuItem::Seed => match app.cfg_seed {
                Some(seed) => format!("Seed: {seed}"),
                None => "Seed: Random".to_string(),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players < SessionConfig::MAX_PLAYERS {
                    app.cfg_num_players += 1;
                }
            }
            MenuItem::StartingBalance => {
                app.cfg_starting_balance = app.cfg_starting_balance.saturating_add(10);
            }
            MenuItem::ShuffleOnStart => app.cfg_shuffle_on_start = !app.cfg_shuffle_on_start,
            MenuItem::Seed => {
                app.cfg_seed = Some(app.cfg_seed.map_or(1, |s| s.saturating_add(1)));
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Players => {
                if app.cfg_num_players > SessionConfig::MIN_PLAYERS {
                    app.cfg_num_players -= 1;
                }
            }
            MenuItem::StartingBalance => {
                app.cfg_starting_balance = app.cfg_starting_balance.saturating_sub(10).max(10);
            }
            MenuItem::ShuffleOnStart => app.cfg_shuffle_on_start = !app.cfg_shuffle_on_start,
            MenuItem::Seed => {
                app.cfg_seed = match app.cfg_seed {
                    Some(s) if s > 1 => Some(s - 1),
                    _ => None,
                };
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            super::Scene::Menu => super::Scene::Table,
            _ => {
                self.open_menu();
                super::Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        let config = self.session.config();
        self.cfg_num_players = config.num_players;
        self.cfg_starting_balance = config.starting_balance;
        self.cfg_shuffle_on_start = config.shuffle_on_start;
        self.cfg_seed = config.seed;
        self.scene = super::Scene::Menu;
    }

    /// Start a fresh session from the edited configuration.
    pub fn apply_menu(&mut self) {
        let config = SessionConfig::default()
            .with_players(self.cfg_num_players)
            .with_starting_balance(self.cfg_starting_balance)
            .with_shuffle_on_start(self.cfg_shuffle_on_start)
            .with_seed(self.cfg_seed);
        self.session = Session::new(config);
        self.cfg_num_players = self.session.config().num_players;
        let _ = self.handle_input(super::InputAction::InputClear);
        self.scene = super::Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        self.scene = super::Scene::Table;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_steps_between_random_and_fixed() {
        let mut app = AppState::default();
        app.menu_index = 3;
        app.cfg_seed = None;
        app.menu_inc();
        assert_eq!(app.cfg_seed, Some(1));
        app.menu_inc();
        assert_eq!(app.cfg_seed, Some(2));
        app.menu_dec();
        app.menu_dec();
        assert_eq!(app.cfg_seed, None);
    }

    #[test]
    fn apply_builds_session_from_menu() {
        let mut app = AppState::default();
        app.cfg_num_players = 6;
        app.cfg_starting_balance = 200;
        app.cfg_seed = Some(5);
        app.apply_menu();
        assert_eq!(app.session.table().players.len(), 6);
        assert_eq!(app.session.table().players[5].balance, 200);
        assert_eq!(app.session.config().seed, Some(5));
    }
}
