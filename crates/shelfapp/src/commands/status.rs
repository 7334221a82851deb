use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::shelf::Shelf;
use crate::store::backend::StorageBackend;

/// Report entry counts, hydration results and write failures per store.
pub fn run<B: StorageBackend>(shelf: &Shelf<B>) -> Result<CmdResult> {
    let stores = shelf.status();
    let mut result = CmdResult::default();

    for store in &stores {
        if store.hydration_failed {
            result.add_message(CmdMessage::warning(format!(
                "{} could not be loaded ({}); it started empty and the next change will overwrite {}",
                store.key,
                store.hydration,
                store.location.display()
            )));
        }
        if let Some(err) = &store.persist_error {
            result.add_message(CmdMessage::error(format!(
                "{} failed to save: {}",
                store.key, err
            )));
        }
    }

    match shelf.foreign_keys() {
        Ok(foreign) => {
            for key in foreign {
                result.add_message(CmdMessage::info(format!(
                    "{} is not a shelf store and is ignored",
                    shelf.backend().location(&key).display()
                )));
            }
        }
        Err(e) => result.add_message(CmdMessage::warning(format!(
            "could not scan the data directory: {}",
            e
        ))),
    }

    result.stores = stores;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::{Rating, Score};
    use crate::shelf::keys;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn healthy_shelf_has_no_warnings() {
        let shelf = Shelf::open(MemBackend::new());
        let result = run(&shelf).unwrap();
        assert_eq!(result.stores.len(), 7);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn corrupt_store_is_reported() {
        let shelf = Shelf::open(MemBackend::new().with_raw(keys::REVIEWS, "{not json"));
        let result = run(&shelf).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains(keys::REVIEWS));
    }

    #[test]
    fn failed_write_is_an_error() {
        let mut shelf = Shelf::open(MemBackend::new());
        shelf.backend().set_simulate_write_error(true);
        shelf.ratings.add(Rating::new(1, Score::new(3).unwrap()));

        let result = run(&shelf).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(result.messages[0].content.contains(keys::RATINGS));
    }

    #[test]
    fn foreign_keys_are_mentioned() {
        let shelf = Shelf::open(MemBackend::new().with_raw("notes", "[]").with_raw(keys::MY_LIST, "[]"));
        assert_eq!(shelf.foreign_keys().unwrap(), vec!["notes"]);

        let result = run(&shelf).unwrap();
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
        assert!(result.messages[0].content.contains("memory://notes"));
    }
}
