// Generic per-screen load state
use crate::client::services::api_client::ApiError;

/// Lifecycle of one screen's data. `Loading` is the only non-terminal state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Restart from `Loading`, dropping whatever was shown before.
    pub fn begin(&mut self) {
        *self = LoadState::Loading;
    }

    pub fn finish(&mut self, result: Result<T, ApiError>) {
        *self = match result {
            Ok(data) => LoadState::Loaded(data),
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}
