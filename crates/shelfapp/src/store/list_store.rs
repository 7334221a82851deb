use super::repository::{LoadOutcome, Repository};
use crate::model::{average, Entry, EntryId, Scored};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, warn};

/// What `add` does when an entry with the same id already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep the existing entry; the add is a no-op.
    InsertIfAbsent,
    /// Replace the existing entry in place, keeping its position.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Updated,
    Unchanged,
}

/// Result of the one-time load from the backing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    Loaded(usize),
    Empty,
    /// Load failed; the store started empty.
    Failed { reason: String },
}

impl Hydration {
    pub fn is_failed(&self) -> bool {
        matches!(self, Hydration::Failed { .. })
    }
}

impl fmt::Display for Hydration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hydration::Loaded(n) => write!(f, "loaded {}", n),
            Hydration::Empty => write!(f, "empty"),
            Hydration::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Insertion,
    /// Most recently touched first; entries without a timestamp go last.
    RecentFirst,
    /// Case-insensitive by title; untitled entries go last.
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub order: Order,
}

impl ListQuery {
    pub fn new(order: Order) -> Self {
        Self { limit: None, order }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A uniquely keyed collection mirrored to a repository.
///
/// The collection is loaded once (see [`ListStore::hydrate`]) and written back
/// whole after every mutation that changes it. Persistence failures never
/// reach the caller: they are logged, and the in-memory state stays
/// authoritative for the rest of the session.
pub struct ListStore<T: Entry, R: Repository<T>> {
    items: Vec<T>,
    repo: R,
    policy: MergePolicy,
    hydration: Option<Hydration>,
    last_persist_error: Option<String>,
}

impl<T: Entry, R: Repository<T>> ListStore<T, R> {
    pub fn new(repo: R, policy: MergePolicy) -> Self {
        Self {
            items: Vec::new(),
            repo,
            policy,
            hydration: None,
            last_persist_error: None,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn key(&self) -> &str {
        self.repo.key()
    }

    /// Load the persisted collection. Only the first call reads the backing;
    /// later calls return the recorded status.
    pub fn hydrate(&mut self) -> &Hydration {
        if self.hydration.is_none() {
            let status = self.load_once();
            self.hydration = Some(status);
        }
        self.hydration.get_or_insert(Hydration::Empty)
    }

    /// None until the store has been hydrated.
    pub fn hydration(&self) -> Option<&Hydration> {
        self.hydration.as_ref()
    }

    fn load_once(&mut self) -> Hydration {
        match self.repo.load() {
            LoadOutcome::Loaded(items) => {
                let total = items.len();
                for item in items {
                    if !self.items.iter().any(|e| e.id() == item.id()) {
                        self.items.push(item);
                    }
                }
                if self.items.len() < total {
                    warn!(
                        key = self.repo.key(),
                        dropped = total - self.items.len(),
                        "duplicate ids in persisted data; kept first occurrence"
                    );
                }
                debug!(key = self.repo.key(), count = self.items.len(), "hydrated");
                Hydration::Loaded(self.items.len())
            }
            LoadOutcome::Missing => {
                debug!(key = self.repo.key(), "nothing persisted yet");
                Hydration::Empty
            }
            LoadOutcome::Corrupt { reason } | LoadOutcome::Unavailable { reason } => {
                warn!(key = self.repo.key(), %reason, "failed to load; starting empty");
                Hydration::Failed { reason }
            }
        }
    }

    /// Insert or merge an entry according to the store's policy.
    pub fn add(&mut self, entry: T) -> AddOutcome {
        self.hydrate();
        let outcome = match self.position(entry.id()) {
            None => {
                self.items.push(entry);
                AddOutcome::Inserted
            }
            Some(idx) => match self.policy {
                MergePolicy::InsertIfAbsent => AddOutcome::Unchanged,
                MergePolicy::Replace => {
                    self.items[idx] = entry;
                    AddOutcome::Updated
                }
            },
        };
        if outcome != AddOutcome::Unchanged {
            self.persist();
        }
        outcome
    }

    /// Mutate an existing entry in place. Returns false if the id is absent.
    /// The closure must not change the entry's id.
    pub fn update<F: FnOnce(&mut T)>(&mut self, id: &EntryId, f: F) -> bool {
        self.hydrate();
        let Some(idx) = self.position(id) else {
            return false;
        };
        f(&mut self.items[idx]);
        debug_assert_eq!(self.items[idx].id(), id, "update changed the entry id");
        self.persist();
        true
    }

    /// Remove the entry with this id, if any.
    pub fn remove(&mut self, id: &EntryId) -> Option<T> {
        self.hydrate();
        let idx = self.position(id)?;
        let removed = self.items.remove(idx);
        self.persist();
        Some(removed)
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.hydrate();
        let count = self.items.len();
        if count > 0 {
            self.items.clear();
            self.persist();
        }
        count
    }

    pub fn get(&self, id: &EntryId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[T] {
        &self.items
    }

    /// A sorted, optionally truncated snapshot of the collection.
    pub fn list(&self, query: &ListQuery) -> Vec<T> {
        let mut items = self.items.clone();
        match query.order {
            Order::Insertion => {}
            Order::RecentFirst => items.sort_by(|a, b| b.touched_at().cmp(&a.touched_at())),
            Order::Title => items.sort_by(|a, b| compare_titles(a.title(), b.title())),
        }
        if let Some(limit) = query.limit {
            items.truncate(limit);
        }
        items
    }

    /// Snapshot of the entries matching a predicate, in insertion order.
    pub fn filter<P: Fn(&T) -> bool>(&self, pred: P) -> Vec<T> {
        self.items.iter().filter(|e| pred(e)).cloned().collect()
    }

    /// The error from the most recent failed write, cleared by the next
    /// successful one.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.items.iter().position(|e| e.id() == id)
    }

    fn persist(&mut self) {
        match self.repo.save(&self.items) {
            Ok(()) => {
                debug!(key = self.repo.key(), count = self.items.len(), "persisted");
                self.last_persist_error = None;
            }
            Err(e) => {
                warn!(key = self.repo.key(), error = %e, "failed to persist; keeping in-memory state");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

impl<T: Scored, R: Repository<T>> ListStore<T, R> {
    /// Mean score over every entry for `content_id`; `None` when unrated.
    pub fn average_score(&self, content_id: &EntryId) -> Option<f64> {
        average(self.scores_for(content_id))
    }

    pub fn scores_for<'a>(
        &'a self,
        content_id: &'a EntryId,
    ) -> impl Iterator<Item = crate::model::Score> + 'a {
        self.items
            .iter()
            .filter(move |e| e.content_id() == content_id)
            .map(|e| e.score())
    }
}

fn compare_titles(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rating, Review, Score, WatchItem};
    use crate::store::backend::StorageBackend;
    use crate::store::mem_backend::MemBackend;
    use crate::store::repository::JsonRepository;
    use chrono::{Duration, Utc};
    use std::rc::Rc;

    type MemStore<T> = ListStore<T, JsonRepository<MemBackend, T>>;

    fn store_on<T: Entry>(backend: Rc<MemBackend>, policy: MergePolicy) -> MemStore<T> {
        let mut store = ListStore::new(JsonRepository::new(backend, "test"), policy);
        store.hydrate();
        store
    }

    fn watch_store() -> (Rc<MemBackend>, MemStore<WatchItem>) {
        let backend = Rc::new(MemBackend::new());
        let store = store_on(backend.clone(), MergePolicy::InsertIfAbsent);
        (backend, store)
    }

    fn score(n: i64) -> Score {
        Score::new(n).unwrap()
    }

    // --- add / get / remove ---

    #[test]
    fn test_add_then_get_returns_entry() {
        let (_, mut store) = watch_store();
        let item = WatchItem::new(1, "A");
        assert_eq!(store.add(item.clone()), AddOutcome::Inserted);
        assert_eq!(store.get(&EntryId::Int(1)), Some(&item));
    }

    #[test]
    fn test_add_then_remove_clears_entry() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        assert!(store.remove(&EntryId::Int(1)).is_some());
        assert!(!store.contains(&EntryId::Int(1)));
        assert!(store.get(&EntryId::Int(1)).is_none());
    }

    #[test]
    fn test_remove_twice_same_as_once() {
        let (backend, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        store.add(WatchItem::new(2, "B"));
        store.remove(&EntryId::Int(1));
        let after_once = store.entries().to_vec();
        let writes = backend.write_count();

        assert!(store.remove(&EntryId::Int(1)).is_none());
        assert_eq!(store.entries(), after_once.as_slice());
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_insert_if_absent_keeps_original() {
        let (backend, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        let writes = backend.write_count();

        assert_eq!(store.add(WatchItem::new(1, "Changed")), AddOutcome::Unchanged);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&EntryId::Int(1)).unwrap().title, "A");
        assert_eq!(backend.write_count(), writes);
    }

    #[test]
    fn test_replace_updates_in_place() {
        let backend = Rc::new(MemBackend::new());
        let mut store: MemStore<Rating> = store_on(backend, MergePolicy::Replace);
        store.add(Rating::new(1, score(2)));
        store.add(Rating::new(2, score(3)));

        assert_eq!(store.add(Rating::new(1, score(5))), AddOutcome::Updated);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].id, EntryId::Int(1));
        assert_eq!(store.entries()[0].score, score(5));
    }

    #[test]
    fn test_int_and_text_ids_are_distinct() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "Int"));
        assert_eq!(store.add(WatchItem::new("1", "Text")), AddOutcome::Inserted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_mutates_existing() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        assert!(store.update(&EntryId::Int(1), |e| e.title = "A2".to_string()));
        assert_eq!(store.get(&EntryId::Int(1)).unwrap().title, "A2");
        assert!(!store.update(&EntryId::Int(9), |e| e.title = "X".to_string()));
    }

    #[test]
    fn test_clear() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        store.add(WatchItem::new(2, "B"));
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.clear(), 0);
    }

    // --- list ---

    #[test]
    fn test_watch_list_scenario() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        assert!(store.contains(&EntryId::Int(1)));
        store.add(WatchItem::new(2, "B"));

        let listed = store.list(&ListQuery::default());
        let ids: Vec<_> = listed.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![EntryId::Int(1), EntryId::Int(2)]);

        store.remove(&EntryId::Int(1));
        let listed = store.list(&ListQuery::default());
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, EntryId::Int(2));
    }

    #[test]
    fn test_list_recent_first_with_limit() {
        let (_, mut store) = watch_store();
        let now = Utc::now();
        for (id, mins) in [(1, 30), (2, 10), (3, 20)] {
            let mut item = WatchItem::new(id, format!("T{}", id));
            item.added_at = now - Duration::minutes(mins);
            store.add(item);
        }

        let listed = store.list(&ListQuery::new(Order::RecentFirst).limit(2));
        let ids: Vec<_> = listed.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![EntryId::Int(2), EntryId::Int(3)]);
    }

    #[test]
    fn test_list_by_title_ignores_case() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "zulu"));
        store.add(WatchItem::new(2, "Alpha"));
        store.add(WatchItem::new(3, "bravo"));

        let titles: Vec<_> = store
            .list(&ListQuery::new(Order::Title))
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "bravo", "zulu"]);
    }

    #[test]
    fn test_filter_keeps_insertion_order() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "Heat").with_year(1995));
        store.add(WatchItem::new(2, "Dark"));
        store.add(WatchItem::new(3, "Ronin").with_year(1998));

        let matched = store.filter(|item| item.year.is_some());
        let ids: Vec<_> = matched.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids, vec![EntryId::Int(1), EntryId::Int(3)]);
        assert!(store.filter(|_| false).is_empty());
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let (_, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        let snapshot = store.list(&ListQuery::default());
        store.add(WatchItem::new(2, "B"));
        assert_eq!(snapshot.len(), 1);
    }

    // --- hydration ---

    #[test]
    fn test_round_trip_through_backing() {
        let (backend, mut store) = watch_store();
        store.add(WatchItem::new(1, "A").with_year(1999));
        store.add(WatchItem::new("abc", "B"));

        let fresh: MemStore<WatchItem> = store_on(backend, MergePolicy::InsertIfAbsent);
        assert_eq!(fresh.hydration(), Some(&Hydration::Loaded(2)));
        assert_eq!(fresh.entries(), store.entries());
    }

    #[test]
    fn test_malformed_data_hydrates_empty() {
        let backend = Rc::new(MemBackend::new().with_raw("test", "{not json"));
        let mut store: MemStore<WatchItem> =
            ListStore::new(JsonRepository::new(backend, "test"), MergePolicy::InsertIfAbsent);

        let status = store.hydrate().clone();
        assert!(status.is_failed());
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_data_hydrates_empty_not_failed() {
        let backend = Rc::new(MemBackend::new());
        let mut store: MemStore<WatchItem> =
            ListStore::new(JsonRepository::new(backend, "test"), MergePolicy::InsertIfAbsent);
        assert_eq!(store.hydrate(), &Hydration::Empty);
    }

    #[test]
    fn test_hydrate_reads_only_once() {
        let backend = Rc::new(MemBackend::new());
        let mut store: MemStore<WatchItem> = ListStore::new(
            JsonRepository::new(backend.clone(), "test"),
            MergePolicy::InsertIfAbsent,
        );
        store.hydrate();

        // Data written behind the store's back is not picked up again.
        backend
            .write("test", r#"[{"id":1,"title":"A"}]"#)
            .unwrap();
        assert_eq!(store.hydrate(), &Hydration::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutation_before_hydrate_keeps_persisted_entries() {
        let backend = Rc::new(MemBackend::new().with_raw("test", r#"[{"id":1,"title":"A"}]"#));
        let mut store: MemStore<WatchItem> = ListStore::new(
            JsonRepository::new(backend, "test"),
            MergePolicy::InsertIfAbsent,
        );

        store.add(WatchItem::new(2, "B"));
        assert_eq!(store.len(), 2);
        assert_eq!(store.hydration(), Some(&Hydration::Loaded(1)));
    }

    #[test]
    fn test_duplicate_persisted_ids_keep_first() {
        let raw = r#"[{"id":1,"title":"A"},{"id":1,"title":"B"},{"id":2,"title":"C"}]"#;
        let backend = Rc::new(MemBackend::new().with_raw("test", raw));
        let store: MemStore<WatchItem> = store_on(backend, MergePolicy::InsertIfAbsent);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&EntryId::Int(1)).unwrap().title, "A");
    }

    // --- persistence failures ---

    #[test]
    fn test_write_failure_is_recorded_not_raised() {
        let (backend, mut store) = watch_store();
        backend.set_simulate_write_error(true);

        assert_eq!(store.add(WatchItem::new(1, "A")), AddOutcome::Inserted);
        assert!(store.contains(&EntryId::Int(1)));
        assert!(store.last_persist_error().is_some());

        backend.set_simulate_write_error(false);
        store.add(WatchItem::new(2, "B"));
        assert!(store.last_persist_error().is_none());
        assert!(backend.raw("test").unwrap().contains("\"A\""));
    }

    #[test]
    fn test_every_mutation_rewrites_full_collection() {
        let (backend, mut store) = watch_store();
        store.add(WatchItem::new(1, "A"));
        store.add(WatchItem::new(2, "B"));
        let stored: Vec<WatchItem> = serde_json::from_str(&backend.raw("test").unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(backend.write_count(), 2);
    }

    // --- aggregates ---

    #[test]
    fn test_average_score_over_reviews() {
        let backend = Rc::new(MemBackend::new());
        let mut store: MemStore<Review> = store_on(backend, MergePolicy::InsertIfAbsent);
        store.add(Review::new(7, "ana", score(4), "good"));
        store.add(Review::new(7, "bo", score(5), "great"));
        store.add(Review::new(8, "cy", score(1), "meh"));

        assert_eq!(store.average_score(&EntryId::Int(7)), Some(4.5));
        assert_eq!(store.average_score(&EntryId::Int(8)), Some(1.0));
    }

    #[test]
    fn test_average_score_without_entries_is_none() {
        let backend = Rc::new(MemBackend::new());
        let store: MemStore<Review> = store_on(backend, MergePolicy::InsertIfAbsent);
        assert_eq!(store.average_score(&EntryId::Int(7)), None);
    }
}
