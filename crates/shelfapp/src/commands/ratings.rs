use crate::commands::{CmdMessage, CmdResult, Listed, ScoreSummary};
use crate::error::Result;
use crate::model::{EntryId, Rating, Score};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;
use crate::store::list_store::{AddOutcome, ListQuery, Order};

/// Set the viewer's rating for a title, replacing any earlier one.
pub fn rate<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    content_id: EntryId,
    score: i64,
) -> Result<CmdResult> {
    let score = Score::new(score)?;
    let rating = Rating::new(content_id.clone(), score);
    let verb = match shelf.ratings.add(rating.clone()) {
        AddOutcome::Updated => "Updated rating",
        _ => "Rated",
    };
    Ok(CmdResult::default()
        .with_listed(vec![Listed::Rating(rating)])
        .with_message(CmdMessage::success(format!(
            "{} {}: {}/{}",
            verb,
            content_id,
            score,
            Score::MAX
        ))))
}

pub fn unrate<B: StorageBackend>(shelf: &mut Shelf<B>, content_id: &EntryId) -> Result<CmdResult> {
    let message = match shelf.ratings.remove(content_id) {
        Some(_) => CmdMessage::success(format!("Removed rating for {}", content_id)),
        None => CmdMessage::info(format!("No rating for {}", content_id)),
    };
    Ok(CmdResult::default().with_message(message))
}

/// The viewer's own rating plus the aggregate for the title.
pub fn show<B: StorageBackend>(shelf: &Shelf<B>, content_id: &EntryId) -> Result<CmdResult> {
    let mut result = average(shelf, content_id)?;
    if let Some(rating) = shelf.ratings.get(content_id) {
        result.listed.push(Listed::Rating(rating.clone()));
    }
    Ok(result)
}

/// Mean over the own rating and all reviews of a title.
pub fn average<B: StorageBackend>(shelf: &Shelf<B>, content_id: &EntryId) -> Result<CmdResult> {
    let summary = ScoreSummary {
        content_id: content_id.clone(),
        average: shelf.average_score(content_id),
        count: shelf.score_count(content_id),
    };
    let mut result = CmdResult::default();
    if summary.average.is_none() {
        result.add_message(CmdMessage::info(format!("No ratings for {}", content_id)));
    }
    result.score = Some(summary);
    Ok(result)
}

pub fn list<B: StorageBackend>(shelf: &Shelf<B>, limit: Option<usize>) -> Result<CmdResult> {
    let mut query = ListQuery::new(Order::RecentFirst);
    query.limit = limit;
    let listed: Vec<Listed> = shelf
        .ratings
        .list(&query)
        .into_iter()
        .map(Listed::Rating)
        .collect();
    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No ratings yet."));
    }
    Ok(result)
}
