//! # Command Layer
//!
//! This module contains the **business logic** of shelf. Each area lives in its
//! own submodule and implements plain Rust functions over a [`Shelf`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate and normalize input (scores, positions, ids)
//! - Apply the store operations
//! - Return structured [`CmdResult`] values with listed entries and messages
//!
//! Commands never print, prompt, or exit. Store-level persistence failures do
//! not surface as errors here either; they show up in `status`.
//!
//! ## Testing Strategy
//!
//! Command tests use [`crate::store::memory::InMemoryShelf`] so nothing touches
//! the filesystem.
//!
//! ## Command Modules
//!
//! - [`my_list`]: Watch-list membership
//! - [`progress`]: Continue-watching positions
//! - [`ratings`]: Own ratings and averages
//! - [`reviews`]: Reviews and their reactions
//! - [`social`]: Shares, recommendations and group watches
//! - [`status`]: Per-store health

use crate::model::{
    EntryId, GroupWatch, ProgressItem, Rating, Recommendation, Review, SharedContent, WatchItem,
};
use crate::shelf::StoreStatus;
use serde::Serialize;

pub mod my_list;
pub mod progress;
pub mod ratings;
pub mod reviews;
pub mod social;
pub mod status;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// An entry from any store, as returned to UI clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Listed {
    Watch(WatchItem),
    Progress(ProgressItem),
    Rating(Rating),
    Review(Review),
    Shared(SharedContent),
    Recommendation(Recommendation),
    GroupWatch(GroupWatch),
}

impl Listed {
    pub fn id(&self) -> &EntryId {
        match self {
            Listed::Watch(e) => &e.id,
            Listed::Progress(e) => &e.id,
            Listed::Rating(e) => &e.id,
            Listed::Review(e) => &e.id,
            Listed::Shared(e) => &e.id,
            Listed::Recommendation(e) => &e.id,
            Listed::GroupWatch(e) => &e.id,
        }
    }
}

/// Aggregate score for one piece of content.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub content_id: EntryId,
    /// None when nothing has been rated.
    pub average: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub listed: Vec<Listed>,
    pub messages: Vec<CmdMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<ScoreSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stores: Vec<StoreStatus>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed(mut self, listed: Vec<Listed>) -> Self {
        self.listed = listed;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }
}
