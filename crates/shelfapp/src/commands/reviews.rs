use crate::commands::{CmdMessage, CmdResult, Listed};
use crate::error::{Result, ShelfError};
use crate::model::{EntryId, Review, Score};
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub content_id: EntryId,
    pub author: String,
    pub score: i64,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

pub fn post<B: StorageBackend>(shelf: &mut Shelf<B>, review: NewReview) -> Result<CmdResult> {
    let score = Score::new(review.score)?;
    if review.body.trim().is_empty() {
        return Err(ShelfError::InvalidInput("review text cannot be empty".to_string()));
    }
    let author = if review.author.trim().is_empty() {
        "anonymous".to_string()
    } else {
        review.author.trim().to_string()
    };
    let entry = Review::new(review.content_id, author, score, review.body.trim());
    shelf.reviews.add(entry.clone());
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Review posted for {} ({})",
            entry.content_id, entry.id
        )))
        .with_listed(vec![Listed::Review(entry)]))
}

/// Bump the like or dislike counter of a review.
pub fn react<B: StorageBackend>(
    shelf: &mut Shelf<B>,
    review_id: &EntryId,
    reaction: Reaction,
) -> Result<CmdResult> {
    let found = shelf.reviews.update(review_id, |r| match reaction {
        Reaction::Like => r.likes = r.likes.saturating_add(1),
        Reaction::Dislike => r.dislikes = r.dislikes.saturating_add(1),
    });
    if !found {
        return Err(ShelfError::NotFound(review_id.clone()));
    }
    let listed = shelf
        .reviews
        .get(review_id)
        .cloned()
        .map(Listed::Review)
        .into_iter()
        .collect();
    Ok(CmdResult::default().with_listed(listed))
}

pub fn remove<B: StorageBackend>(shelf: &mut Shelf<B>, review_id: &EntryId) -> Result<CmdResult> {
    let message = match shelf.reviews.remove(review_id) {
        Some(_) => CmdMessage::success(format!("Removed review {}", review_id)),
        None => CmdMessage::info(format!("No review {}", review_id)),
    };
    Ok(CmdResult::default().with_message(message))
}

/// Reviews for one title, newest first. `None` lists every review.
pub fn list<B: StorageBackend>(
    shelf: &Shelf<B>,
    content_id: Option<&EntryId>,
) -> Result<CmdResult> {
    let mut reviews = shelf
        .reviews
        .filter(|r| content_id.map_or(true, |id| &r.content_id == id));
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let listed: Vec<Listed> = reviews.into_iter().map(Listed::Review).collect();
    let mut result = CmdResult::default().with_listed(listed);
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No reviews yet."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryShelf;

    fn new_review(content: i64, score: i64) -> NewReview {
        NewReview {
            content_id: EntryId::Int(content),
            author: "ana".into(),
            score,
            body: "Worth it".into(),
        }
    }

    fn posted_id(result: &CmdResult) -> EntryId {
        result.listed[0].id().clone()
    }

    #[test]
    fn post_assigns_unique_ids() {
        let mut shelf = InMemoryShelf::new();
        let a = posted_id(&post(&mut shelf, new_review(1, 4)).unwrap());
        let b = posted_id(&post(&mut shelf, new_review(1, 4)).unwrap());
        assert_ne!(a, b);
        assert_eq!(shelf.reviews.len(), 2);
    }

    #[test]
    fn post_validates_input() {
        let mut shelf = InMemoryShelf::new();
        assert!(post(&mut shelf, new_review(1, 9)).is_err());
        let mut blank = new_review(1, 3);
        blank.body = "   ".into();
        assert!(post(&mut shelf, blank).is_err());
        assert!(shelf.reviews.is_empty());
    }

    #[test]
    fn blank_author_becomes_anonymous() {
        let mut shelf = InMemoryShelf::new();
        let mut review = new_review(1, 3);
        review.author = "".into();
        post(&mut shelf, review).unwrap();
        assert_eq!(shelf.reviews.entries()[0].author, "anonymous");
    }

    #[test]
    fn reactions_count_up() {
        let mut shelf = InMemoryShelf::new();
        let id = posted_id(&post(&mut shelf, new_review(1, 4)).unwrap());
        react(&mut shelf, &id, Reaction::Like).unwrap();
        react(&mut shelf, &id, Reaction::Like).unwrap();
        react(&mut shelf, &id, Reaction::Dislike).unwrap();

        let review = shelf.reviews.get(&id).unwrap();
        assert_eq!((review.likes, review.dislikes), (2, 1));
    }

    #[test]
    fn react_on_missing_review_fails() {
        let mut shelf = InMemoryShelf::new();
        let err = react(&mut shelf, &EntryId::from("nope"), Reaction::Like).unwrap_err();
        assert!(matches!(err, ShelfError::NotFound(_)));
    }

    #[test]
    fn list_scopes_to_content() {
        let mut shelf = InMemoryShelf::new();
        post(&mut shelf, new_review(1, 4)).unwrap();
        post(&mut shelf, new_review(2, 2)).unwrap();
        post(&mut shelf, new_review(1, 5)).unwrap();

        assert_eq!(list(&shelf, Some(&EntryId::Int(1))).unwrap().listed.len(), 2);
        assert_eq!(list(&shelf, None).unwrap().listed.len(), 3);
    }

    #[test]
    fn remove_review() {
        let mut shelf = InMemoryShelf::new();
        let id = posted_id(&post(&mut shelf, new_review(1, 4)).unwrap());
        remove(&mut shelf, &id).unwrap();
        assert!(shelf.reviews.is_empty());
        remove(&mut shelf, &id).unwrap();
    }
}
