use super::mem_backend::MemBackend;
use crate::shelf::Shelf;

pub type InMemoryShelf = Shelf<MemBackend>;

impl Default for InMemoryShelf {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryShelf {
    pub fn new() -> Self {
        Shelf::open(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{MediaKind, ProgressItem, Rating, Review, Score, WatchItem};

    pub struct ShelfFixture {
        pub shelf: InMemoryShelf,
    }

    impl Default for ShelfFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ShelfFixture {
        pub fn new() -> Self {
            Self {
                shelf: InMemoryShelf::new(),
            }
        }

        pub fn with_titles(mut self, count: i64) -> Self {
            for i in 1..=count {
                let item = WatchItem::new(i, format!("Title {}", i));
                self.shelf.my_list.add(item);
            }
            self
        }

        pub fn with_series(mut self, id: i64, title: &str) -> Self {
            let item = WatchItem::new(id, title).with_kind(MediaKind::Series);
            self.shelf.my_list.add(item);
            self
        }

        pub fn with_progress(mut self, id: i64, title: &str, percent: f64) -> Self {
            let item = ProgressItem::record(id, title, percent * 60.0, 100.0 * 60.0)
                .expect("valid fixture progress");
            self.shelf.continue_watching.add(item);
            self
        }

        pub fn with_rating(mut self, id: i64, score: i64) -> Self {
            let score = Score::new(score).expect("valid fixture score");
            self.shelf.ratings.add(Rating::new(id, score));
            self
        }

        pub fn with_review(mut self, content_id: i64, author: &str, score: i64) -> Self {
            let score = Score::new(score).expect("valid fixture score");
            let review = Review::new(content_id, author, score, format!("Review by {}", author));
            self.shelf.reviews.add(review);
            self
        }
    }
}
