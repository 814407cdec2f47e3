//! Behaviour every `ResumeStorage` must share, run against each backend.

use tempfile::TempDir;

use crate::errors::StorageError;
use crate::models::{ContactType, Resume};
use crate::storage::serializer::{DataStreamSerializer, JsonSerializer};
use crate::storage::{
    ArrayBackend, FileBackend, ListBackend, MapBackend, ResumeStorage, SortedArrayBackend, Storage,
};

const UUID_1: &str = "UUID_1";
const UUID_2: &str = "UUID_2";
const UUID_3: &str = "UUID_3";
const MISSING: &str = "UUID_NOT_THERE";

struct Fixture {
    storage: Box<dyn ResumeStorage>,
    // Keeps the directory of file-backed storage alive for the test.
    _dir: Option<TempDir>,
}

impl Fixture {
    fn in_memory(storage: impl ResumeStorage + 'static) -> Self {
        Fixture {
            storage: Box::new(storage),
            _dir: None,
        }
    }
}

fn r1() -> Resume {
    Resume::with_id(UUID_1, "Alice").with_contact(ContactType::Email, "alice@example.org")
}

fn r2() -> Resume {
    Resume::with_id(UUID_2, "Bob").with_contact(ContactType::PhoneNumber, "79009991122")
}

fn r3() -> Resume {
    Resume::with_id(UUID_3, "Carol")
}

/// Clears the store and saves R3, R2, R1 (reverse of their natural order).
fn seeded(fixture: Fixture) -> Fixture {
    let s = &fixture.storage;
    s.clear().unwrap();
    s.save(r3()).unwrap();
    s.save(r2()).unwrap();
    s.save(r1()).unwrap();
    fixture
}

fn ids(resumes: &[Resume]) -> Vec<&str> {
    resumes.iter().map(Resume::id).collect()
}

fn check_size(f: Fixture) {
    let f = seeded(f);
    assert_eq!(f.storage.size().unwrap(), 3);
}

fn check_clear(f: Fixture) {
    let f = seeded(f);
    f.storage.clear().unwrap();
    assert_eq!(f.storage.size().unwrap(), 0);
    assert!(f.storage.get_all_sorted().unwrap().is_empty());
}

fn check_save_then_get(f: Fixture) {
    let f = seeded(f);
    let r4 = Resume::with_id("UUID_4", "Dave").with_contact(ContactType::Skype, "dave.s");
    f.storage.save(r4.clone()).unwrap();
    assert_eq!(f.storage.size().unwrap(), 4);
    assert!(f.storage.get("UUID_4").unwrap().same_content(&r4));
}

fn check_save_existing(f: Fixture) {
    let f = seeded(f);
    let err = f
        .storage
        .save(Resume::with_id(UUID_1, "Impostor"))
        .unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists(id) if id == UUID_1));
    assert_eq!(f.storage.size().unwrap(), 3);
    assert!(f.storage.get(UUID_1).unwrap().same_content(&r1()));
}

fn check_get_missing(f: Fixture) {
    let f = seeded(f);
    let err = f.storage.get(MISSING).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(id) if id == MISSING));
    assert_eq!(f.storage.size().unwrap(), 3);
}

fn check_update_existing(f: Fixture) {
    let f = seeded(f);
    let replacement = Resume::with_id(UUID_3, "Carol Updated")
        .with_contact(ContactType::LinkedIn, "https://linkedin.com/in/carol");
    f.storage.update(replacement.clone()).unwrap();
    assert!(f.storage.get(UUID_3).unwrap().same_content(&replacement));
    assert_eq!(f.storage.size().unwrap(), 3);
}

fn check_update_missing(f: Fixture) {
    let f = seeded(f);
    let err = f
        .storage
        .update(Resume::with_id(MISSING, "Nobody"))
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
    assert_eq!(f.storage.size().unwrap(), 3);
    assert!(matches!(f.storage.get(MISSING), Err(StorageError::NotFound(_))));
}

fn check_delete_existing(f: Fixture) {
    let f = seeded(f);
    f.storage.delete(UUID_1).unwrap();
    assert!(matches!(f.storage.get(UUID_1), Err(StorageError::NotFound(_))));
    assert_eq!(f.storage.size().unwrap(), 2);
}

fn check_delete_missing(f: Fixture) {
    let f = seeded(f);
    let err = f.storage.delete(MISSING).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
    assert_eq!(f.storage.size().unwrap(), 3);
}

fn check_get_all_contains_each_once(f: Fixture) {
    let f = seeded(f);
    let mut all = ids(&f.storage.get_all().unwrap())
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    all.sort();
    assert_eq!(all, [UUID_1, UUID_2, UUID_3]);
}

fn check_sorted_by_name_then_id(f: Fixture) {
    let f = seeded(f);
    f.storage.save(Resume::with_id("UUID_0", "Bob")).unwrap();
    let sorted = f.storage.get_all_sorted().unwrap();
    assert_eq!(ids(&sorted), [UUID_1, "UUID_0", UUID_2, UUID_3]);
}

fn check_sorted_is_a_copy(f: Fixture) {
    let f = seeded(f);
    let mut sorted = f.storage.get_all_sorted().unwrap();
    sorted[0].set_full_name("Mallory");
    sorted.clear();
    assert_eq!(f.storage.size().unwrap(), 3);
    assert_eq!(f.storage.get(UUID_1).unwrap().full_name(), "Alice");
}

fn check_scenario(f: Fixture) {
    let s = &f.storage;
    s.clear().unwrap();
    let alice = Resume::with_id("U1", "Alice");
    let bob = Resume::with_id("U2", "Bob");
    s.save(alice).unwrap();
    s.save(bob.clone()).unwrap();
    assert_eq!(s.size().unwrap(), 2);
    assert_eq!(ids(&s.get_all_sorted().unwrap()), ["U1", "U2"]);

    s.delete("U1").unwrap();
    assert!(matches!(s.get("U1"), Err(StorageError::NotFound(_))));
    assert_eq!(s.size().unwrap(), 1);
    assert!(matches!(s.save(bob), Err(StorageError::AlreadyExists(_))));
}

/// Fills a bounded store built with `capacity` and checks the overflow path.
fn check_overflow(f: Fixture, capacity: usize) {
    let f = seeded(f);
    for i in f.storage.size().unwrap()..capacity {
        f.storage
            .save(Resume::new(format!("Filler {i}")))
            .unwrap_or_else(|e| panic!("overflow raised too early at {i}: {e}"));
    }
    let err = f
        .storage
        .save(Resume::with_id("UUID_TOO_MUCH", "Overflow"))
        .unwrap_err();
    assert!(matches!(err, StorageError::StorageFull { capacity: c } if c == capacity));
    assert_eq!(f.storage.size().unwrap(), capacity);

    // Uniqueness is still reported ahead of capacity.
    assert!(matches!(
        f.storage.save(r1()),
        Err(StorageError::AlreadyExists(_))
    ));
}

macro_rules! storage_contract_tests {
    ($name:ident, $make:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn test_size() {
                check_size($make);
            }

            #[test]
            fn test_clear() {
                check_clear($make);
            }

            #[test]
            fn test_save_then_get() {
                check_save_then_get($make);
            }

            #[test]
            fn test_save_existing() {
                check_save_existing($make);
            }

            #[test]
            fn test_get_missing() {
                check_get_missing($make);
            }

            #[test]
            fn test_update_existing() {
                check_update_existing($make);
            }

            #[test]
            fn test_update_missing() {
                check_update_missing($make);
            }

            #[test]
            fn test_delete_existing() {
                check_delete_existing($make);
            }

            #[test]
            fn test_delete_missing() {
                check_delete_missing($make);
            }

            #[test]
            fn test_get_all_contains_each_once() {
                check_get_all_contains_each_once($make);
            }

            #[test]
            fn test_sorted_by_name_then_id() {
                check_sorted_by_name_then_id($make);
            }

            #[test]
            fn test_sorted_is_a_copy() {
                check_sorted_is_a_copy($make);
            }

            #[test]
            fn test_scenario() {
                check_scenario($make);
            }
        }
    };
}

fn file_fixture<S: crate::storage::Serializer + 'static>(serializer: S) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileBackend::new(dir.path(), serializer).unwrap();
    Fixture {
        storage: Box::new(Storage::new(backend)),
        _dir: Some(dir),
    }
}

storage_contract_tests!(array, Fixture::in_memory(Storage::new(ArrayBackend::new())));
storage_contract_tests!(
    sorted_array,
    Fixture::in_memory(Storage::new(SortedArrayBackend::new()))
);
storage_contract_tests!(list, Fixture::in_memory(Storage::new(ListBackend::new())));
storage_contract_tests!(map, Fixture::in_memory(Storage::new(MapBackend::new())));
storage_contract_tests!(file_json, file_fixture(JsonSerializer));
storage_contract_tests!(file_data, file_fixture(DataStreamSerializer));

#[test]
fn test_array_overflow() {
    let capacity = 64;
    check_overflow(
        Fixture::in_memory(Storage::new(ArrayBackend::with_capacity(capacity))),
        capacity,
    );
}

#[test]
fn test_sorted_array_overflow() {
    let capacity = 64;
    check_overflow(
        Fixture::in_memory(Storage::new(SortedArrayBackend::with_capacity(capacity))),
        capacity,
    );
}

#[test]
fn test_array_overflow_at_max_size() {
    check_overflow(
        Fixture::in_memory(Storage::new(ArrayBackend::new())),
        crate::storage::MAX_SIZE,
    );
}
