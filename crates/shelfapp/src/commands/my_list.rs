use crate::commands::{CmdMessage, CmdResult, Listed};
use crate::error::{Result, ShelfError};
use crate::model::{EntryId, MediaKind, WatchItem};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;
use crate::store::list_store::{AddOutcome, ListQuery};

/// Narrows `list` output. Empty filter lists everything.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub kind: Option<MediaKind>,
    pub genre: Option<String>,
}

impl ListFilter {
    fn matches(&self, item: &WatchItem) -> bool {
        if let Some(kind) = self.kind {
            if item.kind != kind {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !item.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                return false;
            }
        }
        true
    }
}

pub fn add<B: StorageBackend>(shelf: &mut Shelf<B>, item: WatchItem) -> Result<CmdResult> {
    if item.title.trim().is_empty() {
        return Err(ShelfError::InvalidInput("title cannot be empty".to_string()));
    }
    let id = item.id.clone();
    let title = item.title.clone();
    let message = match shelf.my_list.add(item) {
        AddOutcome::Unchanged => CmdMessage::info(format!("Already in My List: {}", title)),
        _ => CmdMessage::success(format!("Added to My List: {}", title)),
    };
    Ok(CmdResult::default()
        .with_listed(stored(shelf, &id))
        .with_message(message))
}

/// Removing an id that is not on the list is not an error.
pub fn remove<B: StorageBackend>(shelf: &mut Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    let message = match shelf.my_list.remove(id) {
        Some(item) => CmdMessage::success(format!("Removed from My List: {}", item.title)),
        None => CmdMessage::info(format!("Not in My List: {}", id)),
    };
    Ok(CmdResult::default().with_message(message))
}

/// Add when absent, remove when present.
pub fn toggle<B: StorageBackend>(shelf: &mut Shelf<B>, item: WatchItem) -> Result<CmdResult> {
    if shelf.my_list.contains(&item.id) {
        remove(shelf, &item.id)
    } else {
        add(shelf, item)
    }
}

pub fn show<B: StorageBackend>(shelf: &Shelf<B>, id: &EntryId) -> Result<CmdResult> {
    let listed = stored(shelf, id);
    let message = if listed.is_empty() {
        CmdMessage::info(format!("Not in My List: {}", id))
    } else {
        CmdMessage::info(format!("In My List: {}", id))
    };
    Ok(CmdResult::default().with_listed(listed).with_message(message))
}

pub fn list<B: StorageBackend>(
    shelf: &Shelf<B>,
    query: &ListQuery,
    filter: &ListFilter,
) -> Result<CmdResult> {
    let unlimited = ListQuery {
        limit: None,
        ..*query
    };
    let mut items: Vec<WatchItem> = shelf
        .my_list
        .list(&unlimited)
        .into_iter()
        .filter(|item| filter.matches(item))
        .collect();
    if let Some(limit) = query.limit {
        items.truncate(limit);
    }

    let mut result = CmdResult::default().with_listed(items.into_iter().map(Listed::Watch).collect());
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("My List is empty."));
    }
    Ok(result)
}

fn stored<B: StorageBackend>(shelf: &Shelf<B>, id: &EntryId) -> Vec<Listed> {
    shelf
        .my_list
        .get(id)
        .cloned()
        .map(Listed::Watch)
        .into_iter()
        .collect()
}
