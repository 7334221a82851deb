use crate::commands::{CmdMessage, CmdResult, Listed};
use crate::error::{Result, ShelfError};
use crate::model::{EntryId, GroupWatch, Recommendation, SharedContent};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;
use crate::store::list_store::{ListQuery, Order};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct NewShare {
    pub content_id: EntryId,
    pub title: String,
    pub recipients: Vec<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub content_id: EntryId,
    pub title: String,
    pub from: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGroupWatch {
    pub content_id: EntryId,
    pub title: String,
    pub host: String,
    pub scheduled_for: DateTime<Utc>,
}

// --- Shares ---

pub fn share<B: StorageBackend>(shelf: &mut Shelf<B>, share: NewShare) -> Result<CmdResult> {
    let recipients = clean_names(&share.recipients);
    if recipients.is_empty() {
        return Err(ShelfError::InvalidInput(
            "share needs at least one recipient".to_string(),
        ));
    }
    let message = share.message.filter(|m| !m.trim().is_empty());
    let entry = SharedContent::new(share.content_id, share.title, recipients, message);
    shelf.shared.add(entry.clone());
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Shared {} with {}",
            entry.title,
            entry.recipients.join(", ")
        )))
        .with_listed(vec![Listed::Shared(entry)]))
}

pub fn unshare<B: StorageBackend>(shelf: &mut Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    Ok(removal(shelf.shared.remove(id).is_some(), "share", id))
}

pub fn list_shared<B: StorageBackend>(shelf: &Shelf<B>) -> Result<CmdResult> {
    let listed = shelf
        .shared
        .list(&ListQuery::new(Order::RecentFirst))
        .into_iter()
        .map(Listed::Shared)
        .collect();
    Ok(non_empty(listed, "Nothing shared yet."))
}

// --- Recommendations ---

pub fn recommend<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    rec: NewRecommendation,
) -> Result<CmdResult> {
    if rec.from.trim().is_empty() {
        return Err(ShelfError::InvalidInput(
            "recommendation needs a sender".to_string(),
        ));
    }
    let reason = rec.reason.filter(|r| !r.trim().is_empty());
    let entry = Recommendation::new(rec.content_id, rec.title, rec.from.trim(), reason);
    shelf.recommendations.add(entry.clone());
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Recommendation saved: {} (from {})",
            entry.title, entry.from
        )))
        .with_listed(vec![Listed::Recommendation(entry)]))
}

pub fn dismiss<B: StorageBackend>(shelf: &mut Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    Ok(removal(
        shelf.recommendations.remove(id).is_some(),
        "recommendation",
        id,
    ))
}

pub fn list_recommendations<B: StorageBackend>(shelf: &Shelf<B>) -> Result<CmdResult> {
    let listed = shelf
        .recommendations
        .list(&ListQuery::new(Order::RecentFirst))
        .into_iter()
        .map(Listed::Recommendation)
        .collect();
    Ok(non_empty(listed, "No recommendations."))
}

// --- Group watches ---

pub fn schedule<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    watch: NewGroupWatch,
) -> Result<CmdResult> {
    if watch.host.trim().is_empty() {
        return Err(ShelfError::InvalidInput("group watch needs a host".to_string()));
    }
    if watch.scheduled_for < Utc::now() {
        return Err(ShelfError::InvalidInput(
            "group watch must be scheduled in the future".to_string(),
        ));
    }
    let entry = GroupWatch::new(
        watch.content_id,
        watch.title,
        watch.host.trim(),
        watch.scheduled_for,
    );
    shelf.group_watches.add(entry.clone());
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Group watch scheduled: {} at {}",
            entry.title,
            entry.scheduled_for.format("%Y-%m-%d %H:%M UTC")
        )))
        .with_listed(vec![Listed::GroupWatch(entry)]))
}

/// Joining twice is a no-op.
pub fn join<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    id: &EntryId,
    participant: &str,
) -> Result<CmdResult> {
    let participant = participant.trim();
    if participant.is_empty() {
        return Err(ShelfError::InvalidInput("participant name is empty".to_string()));
    }
    let Some(mut watch) = shelf.group_watches.get(id).cloned() else {
        return Err(ShelfError::NotFound(id.clone()));
    };
    let message = if watch.join(participant) {
        shelf.group_watches.add(watch.clone());
        CmdMessage::success(format!("{} joined {}", participant, watch.title))
    } else {
        CmdMessage::info(format!("{} already in {}", participant, watch.title))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_listed(vec![Listed::GroupWatch(watch)]))
}

pub fn cancel<B: StorageBackend>(shelf: &mut Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    Ok(removal(
        shelf.group_watches.remove(id).is_some(),
        "group watch",
        id,
    ))
}

/// Soonest first.
pub fn list_group_watches<B: StorageBackend>(shelf: &Shelf<B>) -> Result<CmdResult> {
    let mut watches = shelf.group_watches.list(&ListQuery::default());
    watches.sort_by_key(|w| w.scheduled_for);
    let listed = watches.into_iter().map(Listed::GroupWatch).collect();
    Ok(non_empty(listed, "No group watches scheduled."))
}

fn clean_names(names: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !cleaned.iter().any(|c| c == name) {
            cleaned.push(name.to_string());
        }
    }
    cleaned
}

fn removal(removed: bool, what: &str, id: &EntryId) -> CmdResult {
    let message = if removed {
        CmdMessage::success(format!("Removed {} {}", what, id))
    } else {
        CmdMessage::info(format!("No {} {}", what, id))
    };
    CmdResult::default().with_message(message)
}

fn non_empty(listed: Vec<Listed>, empty_message: &str) -> CmdResult {
    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info(empty_message));
    }
    result
}
