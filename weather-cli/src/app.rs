use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use weather_core::{Config, Preferences, RefreshController, RefreshCycle, RefreshTrigger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingCity(String),
}

/// Dashboard session: the refresh controller plus terminal-only UI state.
#[derive(Debug)]
pub struct App {
    pub controller: RefreshController,
    pub favorites: Vec<String>,
    pub input: InputMode,
    pub hint: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, prefs: Preferences) -> Self {
        Self {
            controller: RefreshController::new(prefs, config),
            favorites: config.favorite_cities.iter().take(9).cloned().collect(),
            input: InputMode::Normal,
            hint: None,
            should_quit: false,
        }
    }

    /// Returns the cycle to dispatch, if the key started one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<RefreshCycle> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.controller.view().modal.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.controller.dismiss_modal();
            }
            return None;
        }

        if let InputMode::EditingCity(buffer) = &mut self.input {
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Esc => {
                    self.input = InputMode::Normal;
                    self.hint = None;
                }
                KeyCode::Enter => {
                    let city = buffer.clone();
                    return self.submit_city(&city);
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('r') => self.controller.refresh(RefreshTrigger::Manual),
            KeyCode::Char('u') => self.controller.toggle_units(),
            KeyCode::Char('i') => {
                self.controller.show_info();
                None
            }
            KeyCode::Char('/') | KeyCode::Char('c') => {
                self.input = InputMode::EditingCity(String::new());
                self.hint = None;
                None
            }
            KeyCode::Char(d @ '1'..='9') => {
                let index = d as usize - '1' as usize;
                let city = self.favorites.get(index)?.clone();
                self.submit_city(&city)
            }
            _ => None,
        }
    }

    fn submit_city(&mut self, city: &str) -> Option<RefreshCycle> {
        match self.controller.set_city(city) {
            Ok(cycle) => {
                self.input = InputMode::Normal;
                self.hint = None;
                cycle
            }
            Err(err) => {
                tracing::debug!("city rejected: {err}");
                self.hint = Some(err.user_message().to_string());
                None
            }
        }
    }
}
