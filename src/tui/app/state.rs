use crate::session::{Session, SessionConfig};
use crate::tools::Actor;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    ActorNext,
    ActorPrev,
    InputChar(char),
    InputBackspace,
    InputClear,
    RecallPrev,
    RecallNext,
    Submit,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    // Dealer session: deck, table and transcript
    pub session: Session,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_players: usize,
    pub cfg_starting_balance: u64,
    pub cfg_shuffle_on_start: bool,
    pub cfg_seed: Option<u64>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    input: String,
    recall: Vec<String>,
    recall_index: Option<usize>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = SessionConfig::default();
        Self {
            scene: Scene::Menu,
            menu_index: 0,
            cfg_num_players: config.num_players,
            cfg_starting_balance: config.starting_balance,
            cfg_shuffle_on_start: config.shuffle_on_start,
            cfg_seed: config.seed,
            session: Session::new(config),
            help_open: false,
            history_open: false,
            history_offset: 0,
            input: String::new(),
            recall: Vec::new(),
            recall_index: None,
            action_error: None,
            action_error_at: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);
    const INPUT_MAX: usize = 120;

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, err: String) {
        self.action_error = Some(err);
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub fn active_actor(&self) -> &Actor {
        self.session.active()
    }

    fn cycle_actor(&mut self, forward: bool) {
        let actors = self.session.actors();
        let n = actors.len();
        if n == 0 {
            return;
        }
        let pos = actors.iter().position(|a| a == self.session.active()).unwrap_or(0);
        let next = if forward { (pos + 1) % n } else { (pos + n - 1) % n };
        if let Some(actor) = actors.into_iter().nth(next) {
            self.session.set_active(actor);
        }
    }

    fn push_char(&mut self, c: char) {
        if self.input.chars().count() >= Self::INPUT_MAX {
            return;
        }
        self.input.push(c);
        self.recall_index = None;
    }

    fn recall_prev(&mut self) {
        if self.recall.is_empty() {
            return;
        }
        let idx = match self.recall_index {
            Some(i) => i.saturating_sub(1),
            None => self.recall.len() - 1,
        };
        self.recall_index = Some(idx);
        self.input = self.recall[idx].clone();
    }

    fn recall_next(&mut self) {
        let Some(i) = self.recall_index else {
            return;
        };
        if i + 1 < self.recall.len() {
            self.recall_index = Some(i + 1);
            self.input = self.recall[i + 1].clone();
        } else {
            self.recall_index = None;
            self.input.clear();
        }
    }

    /// Run the command line for the active actor. Returns true when the
    /// tool call succeeded.
    fn submit(&mut self) -> bool {
        let line = self.input.trim().to_string();
        if line.is_empty() {
            return false;
        }
        self.input.clear();
        self.recall_index = None;
        if self.recall.last() != Some(&line) {
            self.recall.push(line.clone());
        }
        self.history_offset = 0;
        match self.session.run_command(&line) {
            Ok(_) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err.to_string());
                false
            }
        }
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.session.transcript().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::ActorNext => {
                if self.scene == Scene::Table {
                    self.cycle_actor(true);
                }
                false
            }
            InputAction::ActorPrev => {
                if self.scene == Scene::Table {
                    self.cycle_actor(false);
                }
                false
            }
            InputAction::InputChar(c) => {
                if self.scene == Scene::Table {
                    self.push_char(c);
                }
                false
            }
            InputAction::InputBackspace => {
                self.input.pop();
                false
            }
            InputAction::InputClear => {
                self.input.clear();
                self.recall_index = None;
                false
            }
            InputAction::RecallPrev => {
                if self.scene == Scene::Table {
                    self.recall_prev();
                }
                false
            }
            InputAction::RecallNext => {
                if self.scene == Scene::Table {
                    self.recall_next();
                }
                false
            }
            InputAction::Submit => self.scene == Scene::Table && self.submit(),
        }
    }

    /// Periodic housekeeping: expire stale error messages.
    pub fn on_tick(&mut self) {
        if let Some(at) = self.action_error_at {
            if at.elapsed() >= Self::ACTION_ERROR_TTL {
                self.clear_action_error();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_is_ignored_on_the_menu() {
        let mut app = AppState::default();
        let _ = app.handle_input(InputAction::InputChar('x'));
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn recall_walks_previous_commands() {
        let mut app = AppState::default();
        app.apply_menu();
        for cmd in ["status", "table"] {
            for c in cmd.chars() {
                let _ = app.handle_input(InputAction::InputChar(c));
            }
            assert!(app.handle_input(InputAction::Submit));
        }
        let _ = app.handle_input(InputAction::RecallPrev);
        assert_eq!(app.input_text(), "table");
        let _ = app.handle_input(InputAction::RecallPrev);
        assert_eq!(app.input_text(), "status");
        let _ = app.handle_input(InputAction::RecallNext);
        assert_eq!(app.input_text(), "table");
        let _ = app.handle_input(InputAction::RecallNext);
        assert_eq!(app.input_text(), "");
    }

    #[test]
    fn action_error_expires_after_ttl() {
        let mut app = AppState::default();
        app.apply_menu();
        for c in "draw 0".chars() {
            let _ = app.handle_input(InputAction::InputChar(c));
        }
        assert!(!app.handle_input(InputAction::Submit));
        app.on_tick();
        assert!(app.action_error().is_some_and(|e| e.contains("at least 1")));

        app.action_error_at =
            Instant::now().checked_sub(AppState::ACTION_ERROR_TTL + Duration::from_millis(1));
        app.on_tick();
        assert_eq!(app.action_error(), None);
    }
}
