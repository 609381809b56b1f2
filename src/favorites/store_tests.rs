//! Unit tests for the favorites store

#[cfg(test)]
mod tests {
    use crate::FavrError;
    use crate::events::{ChangeKind, listener};
    use crate::favorites::{FAVORITES_KEY, FavoriteKind, FavoritesRegistry, FavoritesStore};
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::testing::{TestSledStore, favorites_over, memory_favorites, recorder, test_time};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_empty_backend_yields_default() {
        let store = memory_favorites();
        assert_eq!(store.get_favorites(), FavoritesRegistry::default());
        // Reading does not create the key
        assert!(!store.storage().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = memory_favorites();
        assert!(store.add_suite("writing"));
        assert!(store.add_suite("video"));
        assert!(store.add_tool("thumbnails"));

        let registry = store.get_favorites();
        assert_eq!(registry.suites, vec!["writing", "video"]);
        assert_eq!(registry.tools, vec!["thumbnails"]);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let store = memory_favorites();
        assert!(store.add_suite("s1"));
        let before = store.get_favorites();

        assert!(!store.add_suite("s1"));
        assert_eq!(store.get_favorites(), before);
    }

    #[test]
    fn test_same_id_in_both_namespaces() {
        let store = memory_favorites();
        assert!(store.add_suite("shared"));
        assert!(store.add_tool("shared"));
        assert!(store.is_favorite("shared", FavoriteKind::Suite));
        assert!(store.is_favorite("shared", FavoriteKind::Tool));
    }

    #[test]
    fn test_capacity_scenario() {
        let store = memory_favorites();
        for i in 1..=8 {
            assert!(store.add_suite(&format!("s{i}")), "s{i} should fit");
        }

        assert!(!store.add_tool("x"));
        assert!(store.get_favorites().tools.is_empty());

        assert!(store.remove_suite("s1"));
        assert!(store.add_tool("x"));

        let registry = store.get_favorites();
        assert_eq!(registry.total(), 8);
        assert_eq!(registry.tools, vec!["x"]);
    }

    #[test]
    fn test_capacity_invariant_under_mixed_operations() {
        let store = memory_favorites();
        let ids = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"];

        for (step, id) in ids.iter().cycle().take(60).enumerate() {
            match step % 4 {
                0 | 1 => {
                    store.add_suite(id);
                }
                2 => {
                    store.add_tool(id);
                }
                _ => {
                    store.remove_suite(ids[step % ids.len()]);
                }
            }
            let registry = store.get_favorites();
            assert!(registry.total() <= registry.max_items);
        }
    }

    #[test]
    fn test_remove_missing_returns_false() {
        let store = memory_favorites();
        let (handle, events) = recorder();
        store.add_listener(handle);

        assert!(!store.remove_tool("ghost"));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let store = memory_favorites();
        for id in ["a", "b", "c"] {
            store.add_tool(id);
        }
        assert!(store.remove_tool("b"));
        assert_eq!(store.get_favorites().tools, vec!["a", "c"]);
    }

    #[test]
    fn test_toggle() {
        let store = memory_favorites();
        assert!(store.toggle_suite("s"));
        assert!(store.is_favorite("s", FavoriteKind::Suite));
        assert!(store.toggle_suite("s"));
        assert!(!store.is_favorite("s", FavoriteKind::Suite));
    }

    #[test]
    fn test_toggle_reports_rejected_add() {
        let store = favorites_over(MemoryStore::new());
        store.save_favorites(&FavoritesRegistry::with_capacity(1));
        assert!(store.toggle_tool("first"));
        assert!(!store.toggle_tool("second"));
    }

    #[test]
    fn test_events_for_each_mutation() {
        let store = memory_favorites();
        let (handle, events) = recorder();
        store.add_listener(handle);

        store.add_tool("t1");
        store.add_suite("s1");
        store.remove_tool("t1");
        store.remove_suite("s1");

        let kinds: Vec<ChangeKind> = events.borrow().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::ToolAdded,
                ChangeKind::SuiteAdded,
                ChangeKind::ToolRemoved,
                ChangeKind::SuiteRemoved,
            ]
        );
        assert!(events.borrow().iter().all(|e| e.timestamp == test_time()));
    }

    #[test]
    fn test_single_event_for_add_tool() {
        let store = memory_favorites();
        let (subscribed, events) = recorder();
        let (unsubscribed, missed) = recorder();

        store.add_listener(subscribed);
        store.add_listener(unsubscribed.clone());
        store.remove_listener(&unsubscribed);

        store.add_tool("t1");

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::ToolAdded);
        assert_eq!(events[0].id.as_deref(), Some("t1"));
        assert!(missed.borrow().is_empty());
    }

    #[test]
    fn test_rejected_add_publishes_nothing() {
        let store = memory_favorites();
        store.add_suite("s1");

        let (handle, events) = recorder();
        store.add_listener(handle);
        assert!(!store.add_suite("s1"));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_listener_sees_updated_registry() {
        let store = Rc::new(memory_favorites());
        let seen = Rc::new(Cell::new(0));

        let reader = {
            let store = Rc::downgrade(&store);
            let seen = Rc::clone(&seen);
            listener(move |_| {
                if let Some(store) = store.upgrade() {
                    seen.set(store.get_favorites().total());
                }
                Ok(())
            })
        };
        store.add_listener(reader);

        store.add_tool("t1");
        assert_eq!(seen.get(), 1);
        store.add_suite("s1");
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_clear_all_resets_and_publishes() {
        let store = memory_favorites();
        store.save_favorites(&FavoritesRegistry {
            suites: vec!["s".into()],
            tools: vec!["t".into()],
            max_items: 20,
        });

        let (handle, events) = recorder();
        store.add_listener(handle);
        store.clear_all();

        assert_eq!(store.get_favorites(), FavoritesRegistry::default());
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, ChangeKind::AllCleared);
        assert_eq!(events[0].id, None);
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let store = memory_favorites();
        let registry = FavoritesRegistry {
            suites: vec!["b".into(), "a".into()],
            tools: vec!["z".into()],
            max_items: 12,
        };
        store.save_favorites(&registry);
        assert_eq!(store.get_favorites(), registry);
    }

    #[test]
    fn test_save_refuses_zero_capacity() {
        let store = memory_favorites();
        store.add_tool("kept");

        let result = store.try_save_favorites(&FavoritesRegistry::with_capacity(0));
        assert!(matches!(result, Err(FavrError::Registry(_))));

        store.save_favorites(&FavoritesRegistry::with_capacity(0));
        assert_eq!(store.get_favorites().tools, vec!["kept"]);
    }

    #[test]
    fn test_corrupt_value_is_discarded() {
        let backend = MemoryStore::new();
        backend.set(FAVORITES_KEY, "{not json").unwrap();
        let store = favorites_over(backend);

        assert_eq!(store.get_favorites(), FavoritesRegistry::default());
        assert!(!store.storage().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_wrong_shape_is_discarded() {
        let backend = MemoryStore::new();
        backend
            .set(FAVORITES_KEY, r#"{"suites":"s1","tools":[],"maxItems":8}"#)
            .unwrap();
        let store = favorites_over(backend);

        assert_eq!(store.get_favorites(), FavoritesRegistry::default());
        assert!(!store.storage().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_non_positive_capacity_is_discarded() {
        let backend = MemoryStore::new();
        backend
            .set(FAVORITES_KEY, r#"{"suites":[],"tools":[],"maxItems":0}"#)
            .unwrap();
        let store = favorites_over(backend);

        assert_eq!(store.get_favorites().max_items, 8);
        assert!(!store.storage().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_whole_float_capacity_is_kept() {
        let backend = MemoryStore::new();
        backend
            .set(FAVORITES_KEY, r#"{"suites":["a"],"tools":[],"maxItems":8.0}"#)
            .unwrap();
        let store = favorites_over(backend);

        let registry = store.get_favorites();
        assert_eq!(registry.suites, vec!["a"]);
        assert_eq!(registry.max_items, 8);
        assert!(store.storage().contains(FAVORITES_KEY));
    }

    #[test]
    fn test_add_after_corruption_starts_fresh() {
        let backend = MemoryStore::new();
        backend.set(FAVORITES_KEY, "garbage").unwrap();
        let store = favorites_over(backend);

        assert!(store.add_tool("t1"));
        assert_eq!(store.get_favorites().tools, vec!["t1"]);
    }

    #[test]
    fn test_write_failure_still_reports_success() {
        let backend = MemoryStore::with_quota(0);
        let store = favorites_over(backend);
        let (handle, events) = recorder();
        store.add_listener(handle);

        assert!(store.add_tool("t1"));
        assert_eq!(events.borrow().len(), 1);
        // Nothing became durable
        assert!(store.get_favorites().tools.is_empty());
        assert!(matches!(
            store.try_save_favorites(&FavoritesRegistry::default()),
            Err(FavrError::Storage(_))
        ));
    }

    #[test]
    fn test_two_instances_last_writer_wins() {
        let backend = MemoryStore::new();
        let first = favorites_over(backend.clone());
        let second = favorites_over(backend);

        let stale = first.get_favorites();
        assert!(second.add_tool("from-second"));

        let mut overwrite = stale;
        overwrite.suites.push("from-first".into());
        first.save_favorites(&overwrite);

        let registry = second.get_favorites();
        assert_eq!(registry.suites, vec!["from-first"]);
        assert!(registry.tools.is_empty());
    }

    #[test]
    fn test_sled_backed_store_persists() {
        let test_store = TestSledStore::new();
        {
            let store = FavoritesStore::new(test_store.store());
            assert!(store.add_suite("writing"));
            assert!(store.add_tool("outline"));
        }

        let reopened = FavoritesStore::new(test_store.store());
        let registry = reopened.get_favorites();
        assert_eq!(registry.suites, vec!["writing"]);
        assert_eq!(registry.tools, vec!["outline"]);
    }
}
