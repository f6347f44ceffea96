//! Page-level view models.
//!
//! # Responsibility
//! - Call the collection services the way each page does on mount or on
//!   user action.
//! - Turn outcomes into `LoadState`s and `Notice`s that a front end renders.
//!
//! # Invariants
//! - Any service failure becomes `LoadState::Failed` with the page's fixed
//!   message; error kinds are not distinguished.
//! - Failed loads are retried only by calling the load function again.

use log::warn;
use std::fmt::Display;
use std::future::Future;

pub mod account;
pub mod dashboard;
pub mod item_detail;
pub mod item_grid;
pub mod schedule;
pub mod storage_plans;

/// Lifecycle of data a page fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    /// Every failure can be retried by loading again.
    Failed { message: String },
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Failed { message } => LoadState::Failed { message },
            Self::Ready(value) => LoadState::Ready(f(value)),
        }
    }
}

/// Awaits `fetch` and folds any error into the page's failure message.
pub async fn load<T, E, F>(page: &'static str, failure_message: &str, fetch: F) -> LoadState<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match fetch.await {
        Ok(value) => LoadState::Ready(value),
        Err(err) => {
            warn!("event=page_load module=view page={page} status=error error={err}");
            LoadState::failed(failure_message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Transient user-facing message (a toast in the web front end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}
