//! # Domain Model: Entries and Their Identity
//!
//! Every store holds a collection of one payload type. All payloads share a
//! single shape requirement: an [`EntryId`] that is unique within the store.
//! The [`Entry`] trait is how the generic store reads that id, plus two
//! optional hints used for ordering (`title` and `touched_at`).
//!
//! ## Identifiers
//!
//! Ids come from two places: the catalogue (numeric ids of movies and series)
//! and locally generated records (reviews, shares), which use UUID strings.
//! [`EntryId`] therefore accepts either, and serializes untagged so the JSON
//! form is a plain number or a plain string. `1` and `"1"` are different ids.
//!
//! ## Scores
//!
//! Ratings and reviews carry a [`Score`], an integer between 1 and 5. Values
//! outside the range are rejected at construction and when deserializing.
//!
//! ## Payloads
//!
//! | Type | Store | Touched at |
//! |------|-------|-----------|
//! | [`WatchItem`] | my list | `added_at` |
//! | [`ProgressItem`] | continue watching | `last_watched` |
//! | [`Rating`] | ratings | `rated_at` |
//! | [`Review`] | reviews | `created_at` |
//! | [`SharedContent`] | shared | `shared_at` |
//! | [`Recommendation`] | recommendations | `created_at` |
//! | [`GroupWatch`] | group watches | `created_at` |

use crate::error::{Result, ShelfError};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Text(String),
}

impl EntryId {
    /// A fresh random id for locally created records.
    pub fn generate() -> Self {
        EntryId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Int(n) => write!(f, "{}", n),
            EntryId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        EntryId::Int(n)
    }
}

impl From<i32> for EntryId {
    fn from(n: i32) -> Self {
        EntryId::Int(n as i64)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId::Text(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        EntryId::Text(s)
    }
}

/// Parses user input: anything that reads as an integer becomes `Int`,
/// everything else is kept as text.
impl FromStr for EntryId {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ShelfError::InvalidInput("id cannot be empty".to_string()));
        }
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => EntryId::Int(n),
            Err(_) => EntryId::Text(trimmed.to_string()),
        })
    }
}

/// A record that can live in a [`crate::store::list_store::ListStore`].
pub trait Entry: Clone + Serialize + DeserializeOwned {
    fn id(&self) -> &EntryId;

    /// Display title, used by title ordering.
    fn title(&self) -> Option<&str> {
        None
    }

    /// When the entry was last created or touched, used by recency ordering.
    fn touched_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// An entry that contributes a score to a piece of content.
pub trait Scored: Entry {
    fn content_id(&self) -> &EntryId;
    fn score(&self) -> Score;
}

/// A 1 to 5 star score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Score(value as u8))
        } else {
            Err(ShelfError::InvalidScore(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = ShelfError;

    fn try_from(value: i64) -> Result<Self> {
        Score::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arithmetic mean of a set of scores; `None` when there are no scores.
pub fn average<I: IntoIterator<Item = Score>>(scores: I) -> Option<f64> {
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), s| (sum + s.0 as u64, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl FromStr for MediaKind {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" | "film" => Ok(MediaKind::Movie),
            "series" | "show" | "tv" => Ok(MediaKind::Series),
            other => Err(ShelfError::InvalidInput(format!(
                "unknown media type '{}' (expected movie or series)",
                other
            ))),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
        }
    }
}

// --- My List ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchItem {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(rename = "type", default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl WatchItem {
    pub fn new(id: impl Into<EntryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            thumbnail: None,
            year: None,
            kind: MediaKind::Movie,
            genres: Vec::new(),
            added_at: Utc::now(),
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

impl Entry for WatchItem {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.added_at)
    }
}

// --- Continue Watching ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressItem {
    pub id: EntryId,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Percent watched, 0 to 100.
    pub progress: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub current_time: f64,
    pub last_watched: DateTime<Utc>,
}

impl ProgressItem {
    /// Builds a progress record from a playback position, deriving the percent.
    pub fn record(
        id: impl Into<EntryId>,
        title: impl Into<String>,
        current_time: f64,
        duration: f64,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ShelfError::InvalidInput(format!(
                "duration must be positive, got {}",
                duration
            )));
        }
        if !current_time.is_finite() || current_time < 0.0 {
            return Err(ShelfError::InvalidInput(format!(
                "position must not be negative, got {}",
                current_time
            )));
        }
        let current_time = current_time.min(duration);
        Ok(Self {
            id: id.into(),
            title: title.into(),
            thumbnail: None,
            progress: (current_time / duration * 100.0).clamp(0.0, 100.0),
            duration,
            current_time,
            last_watched: Utc::now(),
        })
    }

    pub fn remaining_secs(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }
}

impl Entry for ProgressItem {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.last_watched)
    }
}

// --- Ratings & Reviews ---

/// The viewer's own rating; keyed by the content it rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: EntryId,
    pub score: Score,
    pub rated_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(content_id: impl Into<EntryId>, score: Score) -> Self {
        Self {
            id: content_id.into(),
            score,
            rated_at: Utc::now(),
        }
    }
}

impl Entry for Rating {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.rated_at)
    }
}

impl Scored for Rating {
    fn content_id(&self) -> &EntryId {
        &self.id
    }

    fn score(&self) -> Score {
        self.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: EntryId,
    pub content_id: EntryId,
    pub author: String,
    pub score: Score,
    pub body: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        content_id: impl Into<EntryId>,
        author: impl Into<String>,
        score: Score,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            content_id: content_id.into(),
            author: author.into(),
            score,
            body: body.into(),
            likes: 0,
            dislikes: 0,
            created_at: Utc::now(),
        }
    }
}

impl Entry for Review {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Scored for Review {
    fn content_id(&self) -> &EntryId {
        &self.content_id
    }

    fn score(&self) -> Score {
        self.score
    }
}

// --- Social ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedContent {
    pub id: EntryId,
    pub content_id: EntryId,
    pub title: String,
    pub recipients: Vec<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub shared_at: DateTime<Utc>,
}

impl SharedContent {
    pub fn new(
        content_id: impl Into<EntryId>,
        title: impl Into<String>,
        recipients: Vec<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            content_id: content_id.into(),
            title: title.into(),
            recipients,
            message,
            shared_at: Utc::now(),
        }
    }
}

impl Entry for SharedContent {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.shared_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: EntryId,
    pub content_id: EntryId,
    pub title: String,
    pub from: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    pub fn new(
        content_id: impl Into<EntryId>,
        title: impl Into<String>,
        from: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            content_id: content_id.into(),
            title: title.into(),
            from: from.into(),
            reason,
            created_at: Utc::now(),
        }
    }
}

impl Entry for Recommendation {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWatch {
    pub id: EntryId,
    pub content_id: EntryId,
    pub title: String,
    pub host: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub scheduled_for: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl GroupWatch {
    /// The host is always the first participant.
    pub fn new(
        content_id: impl Into<EntryId>,
        title: impl Into<String>,
        host: impl Into<String>,
        scheduled_for: DateTime<Utc>,
    ) -> Self {
        let host = host.into();
        Self {
            id: EntryId::generate(),
            content_id: content_id.into(),
            title: title.into(),
            participants: vec![host.clone()],
            host,
            scheduled_for,
            created_at: Utc::now(),
        }
    }

    /// Adds a participant. Returns false if they had already joined.
    pub fn join(&mut self, participant: &str) -> bool {
        if self.participants.iter().any(|p| p == participant) {
            return false;
        }
        self.participants.push(participant.to_string());
        true
    }
}

impl Entry for GroupWatch {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn touched_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
