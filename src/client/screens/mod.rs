// Headless screen models. Each screen owns a LoadState and knows how to fetch
// and render its rows; the GUI only draws what these produce.
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::client::models::load_state::LoadState;
use crate::client::services::api_client::ApiError;
use crate::client::services::session::Session;

pub mod booked_events;
pub mod events;
pub mod find_friends;
pub mod friend_events;
pub mod friend_requests;
pub mod friends;
pub mod group_details;
pub mod groups;
pub mod home;
pub mod login;
pub mod profile;

/// One rendered list entry: a heading plus detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub title: String,
    pub lines: Vec<String>,
}

impl Row {
    pub fn new(title: impl Into<String>) -> Self {
        Row { title: title.into(), lines: Vec::new() }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub body: Option<String>,
}

impl EmptyState {
    pub fn new(title: impl Into<String>) -> Self {
        EmptyState { title: title.into(), body: None }
    }

    pub fn with_body(title: impl Into<String>, body: impl Into<String>) -> Self {
        EmptyState { title: title.into(), body: Some(body.into()) }
    }
}

pub trait Screen {
    type Data: Clone + Send + 'static;

    fn title(&self) -> String;

    fn subtitle(&self) -> Option<String> {
        None
    }

    fn loading_text(&self) -> &'static str;

    fn empty_state(&self) -> EmptyState;

    fn error_lines(&self, error: &str) -> Vec<String> {
        vec!["Oops!".to_string(), error.to_string()]
    }

    fn state(&self) -> &LoadState<Self::Data>;

    fn state_mut(&mut self) -> &mut LoadState<Self::Data>;

    /// The owned future outlives any borrow of the screen, so a navigation
    /// away can drop the screen while the request is still in flight.
    fn fetch(&self, session: Arc<Session>) -> BoxFuture<'static, Result<Self::Data, ApiError>>;

    fn rows(&self, data: &Self::Data) -> Vec<Row>;

    /// Flattened text of the current state. Never contains the loading text
    /// once a terminal state is reached.
    fn render(&self) -> Vec<String> {
        let mut out = vec![self.title()];
        if let Some(subtitle) = self.subtitle() {
            out.push(subtitle);
        }
        match self.state() {
            LoadState::Loading => out.push(self.loading_text().to_string()),
            LoadState::Failed(e) => out.extend(self.error_lines(e)),
            LoadState::Loaded(data) => {
                let rows = self.rows(data);
                if rows.is_empty() {
                    let empty = self.empty_state();
                    out.push(empty.title);
                    out.extend(empty.body);
                }
                for row in rows {
                    out.push(row.title);
                    out.extend(row.lines);
                }
            }
        }
        out
    }
}

/// Resolves to `None` if `cancel` fires before `fut` completes; the
/// in-flight request is dropped with it.
pub async fn run_cancellable<F, T>(fut: F, cancel: CancellationToken) -> Option<T>
where
    F: Future<Output = T>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("[SCREEN] Load cancelled");
            None
        }
        out = fut => Some(out),
    }
}

/// Runs one fetch for `screen`. Returns `false` when the load was cancelled,
/// in which case the result is discarded.
pub async fn load_screen<S: Screen>(screen: &mut S, session: Arc<Session>, cancel: &CancellationToken) -> bool {
    screen.state_mut().begin();
    let fut = screen.fetch(session);
    match run_cancellable(fut, cancel.clone()).await {
        Some(result) => {
            if let Err(e) = &result {
                warn!("[SCREEN] {} failed to load: {}", screen.title(), e);
            }
            screen.state_mut().finish(result);
            true
        }
        None => false,
    }
}
