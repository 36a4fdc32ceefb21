use crate::config::Config;
use crate::loader::LoadReport;
use crate::types::Dataset;

/// Application state for one CLI session. It is passed explicitly through
/// the menu loop and only changes through `reduce`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub data: Option<Dataset>,
    pub last_load: Option<LoadReport>,
}

#[derive(Debug, Clone)]
pub enum Action {
    Loaded(Dataset, LoadReport),
    Cleared,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            data: None,
            last_load: None,
        }
    }

    pub fn reduce(self, action: Action) -> AppState {
        match action {
            Action::Loaded(data, report) => AppState {
                data: Some(data),
                last_load: Some(report),
                ..self
            },
            Action::Cleared => AppState {
                data: None,
                last_load: None,
                ..self
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_then_clear() {
        let state = AppState::new(Config::default());
        assert!(!state.is_loaded());

        let state = state.reduce(Action::Loaded(Dataset::default(), LoadReport::default()));
        assert!(state.is_loaded());
        assert_eq!(state.last_load, Some(LoadReport::default()));

        let state = state.reduce(Action::Cleared);
        assert!(!state.is_loaded());
        assert!(state.last_load.is_none());
        assert_eq!(state.config, Config::default());
    }
}
