//! Record store contract, run against every backend.

use super::support::{all_stores, definition, names};
use agent_factory::agent::{DirectoryAgentStore, SledAgentStore};
use agent_factory::{AgentRecordStore, AgentRole, StorageError};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn put_then_get_returns_identical_definition() {
    for fixture in all_stores() {
        let mut original = definition("crm_specialist", AgentRole::Assistant, 0);
        original.capabilities.insert("email".to_string());
        original
            .metadata
            .insert("owner".to_string(), "sales".to_string());
        original.generated_code = Some("line \"one\"\n\ttwo\\three\n".to_string());

        fixture.store.put(&original).unwrap();
        let loaded = fixture.store.get("crm_specialist").unwrap();
        assert_eq!(loaded, original, "backend {}", fixture.label);
    }
}

#[test]
fn duplicate_put_fails_and_keeps_first() {
    for fixture in all_stores() {
        let first = definition("dup", AgentRole::Coder, 0);
        let mut second = definition("dup", AgentRole::Researcher, 5);
        second.generated_code = Some("# replaced\n".to_string());

        fixture.store.put(&first).unwrap();
        let err = fixture.store.put(&second).unwrap_err();
        assert!(
            matches!(err, StorageError::DuplicateName(ref n) if n == "dup"),
            "backend {}: {:?}",
            fixture.label,
            err
        );
        assert_eq!(fixture.store.get("dup").unwrap(), first);
        assert_eq!(names(fixture.store.as_ref()), vec!["dup"]);
    }
}

#[test]
fn get_missing_is_not_found() {
    for fixture in all_stores() {
        assert!(
            matches!(fixture.store.get("ghost"), Err(StorageError::NotFound(_))),
            "backend {}",
            fixture.label
        );
    }
}

#[test]
fn list_follows_creation_order_and_restarts() {
    for fixture in all_stores() {
        let order = ["zeta", "alpha", "mid", "beta"];
        for (i, name) in order.iter().enumerate() {
            fixture
                .store
                .put(&definition(name, AgentRole::Assistant, i as i64))
                .unwrap();
        }

        assert_eq!(names(fixture.store.as_ref()), order, "backend {}", fixture.label);
        assert_eq!(names(fixture.store.as_ref()), order, "backend {}", fixture.label);

        let first_two: Vec<_> = fixture
            .store
            .list()
            .unwrap()
            .take(2)
            .map(|d| d.unwrap().name)
            .collect();
        assert_eq!(first_two, vec!["zeta", "alpha"]);
    }
}

#[test]
fn empty_store_lists_nothing() {
    for fixture in all_stores() {
        assert_eq!(fixture.store.list().unwrap().count(), 0, "backend {}", fixture.label);
    }
}

#[test]
fn concurrent_puts_of_one_name_admit_exactly_one() {
    const WRITERS: usize = 8;

    for fixture in all_stores() {
        let barrier = Arc::new(Barrier::new(WRITERS));
        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let store = fixture.store.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let mut candidate = definition("contested", AgentRole::Coder, i as i64);
                    candidate.system_message = format!("writer {}", i);
                    barrier.wait();
                    store.put(&candidate).map(|_| candidate.system_message)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(winners.len(), 1, "backend {}", fixture.label);
        for result in &results {
            if let Err(e) = result {
                assert!(matches!(e, StorageError::DuplicateName(_)), "backend {}", fixture.label);
            }
        }

        let stored = fixture.store.get("contested").unwrap();
        assert_eq!(&stored.system_message, winners[0]);
        assert_eq!(names(fixture.store.as_ref()), vec!["contested"]);
    }
}

#[test]
fn concurrent_distinct_names_all_succeed() {
    for fixture in all_stores() {
        let handles: Vec<_> = (0..6)
            .map(|i| {
                let store = fixture.store.clone();
                thread::spawn(move || {
                    store.put(&definition(&format!("worker_{}", i), AgentRole::Assistant, i))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(fixture.store.list().unwrap().count(), 6, "backend {}", fixture.label);
    }
}

#[test]
fn sled_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store");
    {
        let store = SledAgentStore::open(&path).unwrap();
        store.put(&definition("first", AgentRole::Coder, 0)).unwrap();
        store.put(&definition("second", AgentRole::Researcher, 1)).unwrap();
    }

    let store = SledAgentStore::open(&path).unwrap();
    assert_eq!(names(&store), vec!["first", "second"]);
    assert!(matches!(
        store.put(&definition("first", AgentRole::Assistant, 2)),
        Err(StorageError::DuplicateName(_))
    ));
    store.put(&definition("third", AgentRole::Assistant, 3)).unwrap();
    assert_eq!(names(&store), vec!["first", "second", "third"]);
}

#[test]
fn directory_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents");
    {
        let store = DirectoryAgentStore::open(&path).unwrap();
        store.put(&definition("first", AgentRole::Coder, 0)).unwrap();
    }

    let store = DirectoryAgentStore::open(&path).unwrap();
    assert_eq!(store.get("first").unwrap().role, AgentRole::Coder);
    assert!(store.path_for("first").unwrap().exists());
}
