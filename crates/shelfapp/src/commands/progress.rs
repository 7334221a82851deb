use crate::commands::{CmdMessage, CmdResult, Listed};
use crate::config::ShelfConfig;
use crate::error::Result;
use crate::model::{EntryId, ProgressItem};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;
use crate::store::list_store::{AddOutcome, ListQuery, Order};

/// A playback position report.
#[derive(Debug, Clone)]
pub struct PlaybackUpdate {
    pub id: EntryId,
    pub title: String,
    pub thumbnail: Option<String>,
    /// Seconds.
    pub current_time: f64,
    /// Seconds.
    pub duration: f64,
}

/// Store a playback position. Titles at or past the completion threshold
/// leave continue-watching instead of being stored.
pub fn record<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    config: &ShelfConfig,
    update: PlaybackUpdate,
) -> Result<CmdResult> {
    let mut item =
        ProgressItem::record(update.id, update.title, update.current_time, update.duration)?;
    item.thumbnail = update.thumbnail.or_else(|| {
        shelf
            .continue_watching
            .get(&item.id)
            .and_then(|existing| existing.thumbnail.clone())
    });

    if config.is_complete(item.progress) {
        shelf.continue_watching.remove(&item.id);
        return Ok(CmdResult::default()
            .with_message(CmdMessage::success(format!("Finished: {}", item.title))));
    }

    let message = format!("{} ({:.0}%)", item.title, item.progress);
    let message = match shelf.continue_watching.add(item.clone()) {
        AddOutcome::Inserted => CmdMessage::success(format!("Started: {}", message)),
        _ => CmdMessage::success(format!("Progress saved: {}", message)),
    };
    Ok(CmdResult::default()
        .with_listed(vec![Listed::Progress(item)])
        .with_message(message))
}

/// Most recently watched first, capped at `limit` or the configured default.
pub fn list<B: StorageBackend>(
    shelf: &Shelf<B>,
    config: &ShelfConfig,
    limit: Option<usize>,
) -> Result<CmdResult> {
    let query = ListQuery::new(Order::RecentFirst).limit(limit.unwrap_or(config.continue_watching_limit));
    let listed: Vec<Listed> = shelf
        .continue_watching
        .list(&query)
        .into_iter()
        .map(Listed::Progress)
        .collect();

    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("Nothing to continue watching."));
    }
    Ok(result)
}

pub fn show<B: StorageBackend>(shelf: &Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    match shelf.continue_watching.get(id) {
        Some(item) => Ok(CmdResult::default().with_listed(vec![Listed::Progress(item.clone())])),
        None => Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("No progress for {}", id)))),
    }
}

pub fn clear<B: StorageBackend>(shelf: &mut Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    let message = match shelf.continue_watching.remove(id) {
        Some(item) => CmdMessage::success(format!("Cleared progress: {}", item.title)),
        None => CmdMessage::info(format!("No progress for {}", id)),
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn clear_all<B: StorageBackend>(shelf: &mut Shelf<B>) -> Result<CmdResult> {
    let count = shelf.continue_watching.clear();
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Cleared {} progress entr{}",
        count,
        if count == 1 { "y" } else { "ies" }
    ))))
}
