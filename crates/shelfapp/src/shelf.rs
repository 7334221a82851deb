//! # The Shelf
//!
//! [`Shelf`] is the single application instance that owns every preference
//! store. It is constructed once at start-up over one [`StorageBackend`],
//! hydrates each store exactly once, and is then handed to consumers either
//! directly or through [`crate::context`].
//!
//! ## Stores and Merge Policies
//!
//! | Field | Key | Policy |
//! |-------|-----|--------|
//! | `my_list` | `myList` | insert-if-absent |
//! | `continue_watching` | `continueWatching` | replace |
//! | `ratings` | `userRatings` | replace |
//! | `reviews` | `userReviews` | insert-if-absent |
//! | `shared` | `sharedContent` | insert-if-absent |
//! | `recommendations` | `recommendations` | insert-if-absent |
//! | `group_watches` | `groupWatches` | replace |
//!
//! Re-adding a title to the watch-list keeps the original entry (and its
//! `added_at`). Progress, ratings and group watches are upserts: the newest
//! write is the truth. Reviews and social items get fresh ids on creation, so
//! their policy only matters for hand-built entries.
//!
//! Stores are independent. A rating for a title that is not on the
//! watch-list is fine.

use crate::error::Result;
use crate::model::{
    average, Entry, EntryId, GroupWatch, ProgressItem, Rating, Recommendation, Review,
    SharedContent, WatchItem,
};
use crate::store::backend::StorageBackend;
use crate::store::list_store::{ListStore, MergePolicy};
use crate::store::repository::JsonRepository;
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;

pub mod keys {
    pub const MY_LIST: &str = "myList";
    pub const CONTINUE_WATCHING: &str = "continueWatching";
    pub const RATINGS: &str = "userRatings";
    pub const REVIEWS: &str = "userReviews";
    pub const SHARED: &str = "sharedContent";
    pub const RECOMMENDATIONS: &str = "recommendations";
    pub const GROUP_WATCHES: &str = "groupWatches";

    pub const ALL: [&str; 7] = [
        MY_LIST,
        CONTINUE_WATCHING,
        RATINGS,
        REVIEWS,
        SHARED,
        RECOMMENDATIONS,
        GROUP_WATCHES,
    ];
}

pub type Store<B, T> = ListStore<T, JsonRepository<B, T>>;

/// Health of one store, for `status` reporting.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub key: String,
    pub policy: &'static str,
    pub entries: usize,
    pub hydration: String,
    pub hydration_failed: bool,
    pub persist_error: Option<String>,
    pub location: PathBuf,
}

pub struct Shelf<B: StorageBackend> {
    backend: Rc<B>,
    pub my_list: Store<B, WatchItem>,
    pub continue_watching: Store<B, ProgressItem>,
    pub ratings: Store<B, Rating>,
    pub reviews: Store<B, Review>,
    pub shared: Store<B, SharedContent>,
    pub recommendations: Store<B, Recommendation>,
    pub group_watches: Store<B, GroupWatch>,
}

impl<B: StorageBackend> Shelf<B> {
    /// Build every store over `backend` and hydrate each one.
    pub fn open(backend: B) -> Self {
        let backend = Rc::new(backend);
        let mut shelf = Self {
            my_list: store(&backend, keys::MY_LIST, MergePolicy::InsertIfAbsent),
            continue_watching: store(&backend, keys::CONTINUE_WATCHING, MergePolicy::Replace),
            ratings: store(&backend, keys::RATINGS, MergePolicy::Replace),
            reviews: store(&backend, keys::REVIEWS, MergePolicy::InsertIfAbsent),
            shared: store(&backend, keys::SHARED, MergePolicy::InsertIfAbsent),
            recommendations: store(&backend, keys::RECOMMENDATIONS, MergePolicy::InsertIfAbsent),
            group_watches: store(&backend, keys::GROUP_WATCHES, MergePolicy::Replace),
            backend,
        };
        shelf.hydrate_all();
        shelf
    }

    fn hydrate_all(&mut self) {
        self.my_list.hydrate();
        self.continue_watching.hydrate();
        self.ratings.hydrate();
        self.reviews.hydrate();
        self.shared.hydrate();
        self.recommendations.hydrate();
        self.group_watches.hydrate();
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mean over the viewer's own rating and every review of `content_id`.
    pub fn average_score(&self, content_id: &EntryId) -> Option<f64> {
        average(
            self.ratings
                .scores_for(content_id)
                .chain(self.reviews.scores_for(content_id)),
        )
    }

    /// Number of scores behind [`Shelf::average_score`].
    pub fn score_count(&self, content_id: &EntryId) -> usize {
        self.ratings.scores_for(content_id).count() + self.reviews.scores_for(content_id).count()
    }

    /// Keys in the backing that no store owns.
    pub fn foreign_keys(&self) -> Result<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter(|key| !keys::ALL.contains(&key.as_str()))
            .collect())
    }

    pub fn status(&self) -> Vec<StoreStatus> {
        vec![
            status_of(&self.my_list, self.backend()),
            status_of(&self.continue_watching, self.backend()),
            status_of(&self.ratings, self.backend()),
            status_of(&self.reviews, self.backend()),
            status_of(&self.shared, self.backend()),
            status_of(&self.recommendations, self.backend()),
            status_of(&self.group_watches, self.backend()),
        ]
    }
}

fn store<B: StorageBackend, T: Entry>(backend: &Rc<B>, key: &str, policy: MergePolicy) -> Store<B, T> {
    ListStore::new(JsonRepository::new(backend.clone(), key), policy)
}

fn status_of<B: StorageBackend, T: Entry>(store: &Store<B, T>, backend: &B) -> StoreStatus {
    let hydration = store.hydration();
    StoreStatus {
        key: store.key().to_string(),
        policy: match store.policy() {
            MergePolicy::InsertIfAbsent => "insert-if-absent",
            MergePolicy::Replace => "replace",
        },
        entries: store.len(),
        hydration: hydration
            .map(|h| h.to_string())
            .unwrap_or_else(|| "not hydrated".to_string()),
        hydration_failed: hydration.is_some_and(|h| h.is_failed()),
        persist_error: store.last_persist_error().map(str::to_string),
        location: backend.location(store.key()),
    }
}
