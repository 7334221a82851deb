//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for UI clients (the CLI today).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: user-typed ids (`"42"`, `"tt0111161"`) become
//!   [`EntryId`]s, lists of ids are deduplicated
//! - **Carries configuration** the commands need (limits, thresholds)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no I/O and no formatting.
//!
//! ## Generic Over StorageBackend
//!
//! `ShelfApi<B: StorageBackend>` works over any backing:
//! - Production: `ShelfApi<FsBackend>`
//! - Testing: `ShelfApi<MemBackend>`

use crate::commands::{self, my_list, progress, reviews, social, CmdResult};
use crate::config::ShelfConfig;
use crate::error::Result;
use crate::model::{EntryId, WatchItem};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;
use crate::store::list_store::ListQuery;

pub use commands::my_list::ListFilter;
pub use commands::progress::PlaybackUpdate;
pub use commands::reviews::{NewReview, Reaction};
pub use commands::social::{NewGroupWatch, NewRecommendation, NewShare};
pub use commands::{CmdMessage, Listed, MessageLevel, ScoreSummary};

/// The main API facade for shelf operations.
pub struct ShelfApi<B: StorageBackend> {
    shelf: Shelf<B>,
    config: ShelfConfig,
}

impl<B: StorageBackend> ShelfApi<B> {
    pub fn new(shelf: Shelf<B>, config: ShelfConfig) -> Self {
        Self { shelf, config }
    }

    pub fn shelf(&self) -> &Shelf<B> {
        &self.shelf
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    // --- My List ---

    pub fn add_to_list(&mut self, item: WatchItem) -> Result<CmdResult> {
        my_list::add(&mut self.shelf, item)
    }

    pub fn toggle_in_list(&mut self, item: WatchItem) -> Result<CmdResult> {
        my_list::toggle(&mut self.shelf, item)
    }

    pub fn remove_from_list<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        for id in parse_ids(ids)? {
            result
                .messages
                .extend(my_list::remove(&mut self.shelf, &id)?.messages);
        }
        Ok(result)
    }

    pub fn show_in_list(&self, id: &str) -> Result<CmdResult> {
        my_list::show(&self.shelf, &parse_id(id)?)
    }

    pub fn get_list(&self, query: &ListQuery, filter: &ListFilter) -> Result<CmdResult> {
        my_list::list(&self.shelf, query, filter)
    }

    // --- Continue Watching ---

    pub fn record_progress(&mut self, update: PlaybackUpdate) -> Result<CmdResult> {
        progress::record(&mut self.shelf, &self.config, update)
    }

    pub fn continue_watching(&self, limit: Option<usize>) -> Result<CmdResult> {
        progress::list(&self.shelf, &self.config, limit)
    }

    pub fn show_progress(&self, id: &str) -> Result<CmdResult> {
        progress::show(&self.shelf, &parse_id(id)?)
    }

    pub fn clear_progress<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        if ids.is_empty() {
            return progress::clear_all(&mut self.shelf);
        }
        let mut result = CmdResult::default();
        for id in parse_ids(ids)? {
            result
                .messages
                .extend(progress::clear(&mut self.shelf, &id)?.messages);
        }
        Ok(result)
    }

    // --- Ratings ---

    pub fn rate(&mut self, id: &str, score: i64) -> Result<CmdResult> {
        commands::ratings::rate(&mut self.shelf, parse_id(id)?, score)
    }

    pub fn unrate(&mut self, id: &str) -> Result<CmdResult> {
        commands::ratings::unrate(&mut self.shelf, &parse_id(id)?)
    }

    pub fn show_rating(&self, id: &str) -> Result<CmdResult> {
        commands::ratings::show(&self.shelf, &parse_id(id)?)
    }

    pub fn average_score(&self, id: &str) -> Result<CmdResult> {
        commands::ratings::average(&self.shelf, &parse_id(id)?)
    }

    pub fn list_ratings(&self, limit: Option<usize>) -> Result<CmdResult> {
        commands::ratings::list(&self.shelf, limit)
    }

    // --- Reviews ---

    pub fn post_review(&mut self, review: NewReview) -> Result<CmdResult> {
        reviews::post(&mut self.shelf, review)
    }

    pub fn react_to_review(&mut self, id: &str, reaction: Reaction) -> Result<CmdResult> {
        reviews::react(&mut self.shelf, &parse_id(id)?, reaction)
    }

    pub fn remove_review(&mut self, id: &str) -> Result<CmdResult> {
        reviews::remove(&mut self.shelf, &parse_id(id)?)
    }

    pub fn list_reviews(&self, content_id: Option<&str>) -> Result<CmdResult> {
        let content_id = content_id.map(parse_id).transpose()?;
        reviews::list(&self.shelf, content_id.as_ref())
    }

    // --- Social ---

    pub fn share(&mut self, share: NewShare) -> Result<CmdResult> {
        social::share(&mut self.shelf, share)
    }

    pub fn unshare(&mut self, id: &str) -> Result<CmdResult> {
        social::unshare(&mut self.shelf, &parse_id(id)?)
    }

    pub fn list_shared(&self) -> Result<CmdResult> {
        social::list_shared(&self.shelf)
    }

    pub fn recommend(&mut self, rec: NewRecommendation) -> Result<CmdResult> {
        social::recommend(&mut self.shelf, rec)
    }

    pub fn dismiss_recommendation(&mut self, id: &str) -> Result<CmdResult> {
        social::dismiss(&mut self.shelf, &parse_id(id)?)
    }

    pub fn list_recommendations(&self) -> Result<CmdResult> {
        social::list_recommendations(&self.shelf)
    }

    pub fn schedule_group_watch(&mut self, watch: NewGroupWatch) -> Result<CmdResult> {
        social::schedule(&mut self.shelf, watch)
    }

    pub fn join_group_watch(&mut self, id: &str, participant: &str) -> Result<CmdResult> {
        social::join(&mut self.shelf, &parse_id(id)?, participant)
    }

    pub fn cancel_group_watch(&mut self, id: &str) -> Result<CmdResult> {
        social::cancel(&mut self.shelf, &parse_id(id)?)
    }

    pub fn list_group_watches(&self) -> Result<CmdResult> {
        social::list_group_watches(&self.shelf)
    }

    // --- Status ---

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.shelf)
    }
}

pub fn parse_id(input: &str) -> Result<EntryId> {
    input.parse()
}

/// Parse every id, dropping repeats while preserving order.
pub fn parse_ids<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<EntryId>> {
    let mut ids = Vec::with_capacity(inputs.len());
    for input in inputs {
        let id = parse_id(input.as_ref())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
