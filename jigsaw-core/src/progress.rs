use std::cell::RefCell;

use serde::{Deserialize, Serialize};

/// Version of the persisted record. Bumped when the shape changes; records
/// with another version are treated as absent.
pub const RECORD_VERSION: u32 = 1;

fn record_version() -> u32 {
    RECORD_VERSION
}

/// The single persisted record: which level is in progress, the seed that
/// fixes its piece shapes, and the slots locked so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    #[serde(default = "record_version")]
    pub version: u32,
    pub level: u32,
    pub seed: u32,
    #[serde(default)]
    pub locked: Vec<usize>,
}

impl LevelProgress {
    /// Drops locked slots outside `0..total` and deduplicates the rest.
    /// A record written for a different grid shape then degrades to the
    /// valid subset instead of being rejected wholesale.
    pub fn validate(mut self, total: usize) -> Self {
        self.locked.sort_unstable();
        self.locked.dedup();
        self.locked.retain(|&slot| slot < total);
        self
    }
}

/// Durable single-key storage for the progress record. Writes are
/// best-effort and whole-record; a failing backend just loses persistence,
/// never gameplay.
pub trait ProgressStore {
    fn read(&self) -> Option<String>;
    fn write(&self, payload: &str);
    fn remove(&self);
}

/// In-memory store used by tests and as the degraded fallback when real
/// storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: RefCell<Option<String>>,
}

impl ProgressStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    fn write(&self, payload: &str) {
        *self.payload.borrow_mut() = Some(payload.to_string());
    }

    fn remove(&self) {
        *self.payload.borrow_mut() = None;
    }
}

/// Current record, or `None` when absent, corrupt, from another record
/// version, or carrying an invalid level. Corrupt payloads are never fatal.
pub fn load<S: ProgressStore>(store: &S) -> Option<LevelProgress> {
    let payload = store.read()?;
    let record: LevelProgress = serde_json::from_str(&payload).ok()?;
    if record.version != RECORD_VERSION || record.level == 0 {
        return None;
    }
    Some(record)
}

/// Overwrites the record with the current state. Called after every
/// successful lock; last write wins.
pub fn save<S: ProgressStore>(store: &S, level: u32, seed: u32, locked: &[usize]) {
    let record = LevelProgress {
        version: RECORD_VERSION,
        level,
        seed,
        locked: locked.to_vec(),
    };
    if let Ok(payload) = serde_json::to_string(&record) {
        store.write(&payload);
    }
}

/// Empties the locked set for `level` while keeping its seed, so a manual
/// reset reshuffles pieces but not shapes. No-op for other levels.
pub fn clear_locked_for_level<S: ProgressStore>(store: &S, level: u32) {
    if let Some(record) = load(store)
        && record.level == level
    {
        save(store, level, record.seed, &[]);
    }
}

/// Removes the record entirely (after the final level completes).
pub fn clear_all<S: ProgressStore>(store: &S) {
    store.remove();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_store() {
        let store = MemoryStore::default();
        save(&store, 2, 0xDEAD_BEEF, &[0, 5, 199]);
        let record = load(&store).unwrap();
        assert_eq!(record.level, 2);
        assert_eq!(record.seed, 0xDEAD_BEEF);
        assert_eq!(record.locked, vec![0, 5, 199]);
    }

    #[test]
    fn corrupt_payload_reads_as_absent() {
        let store = MemoryStore::default();
        store.write("not json at all");
        assert_eq!(load(&store), None);
        store.write(r#"{"version":1,"level":"three","seed":1,"locked":[]}"#);
        assert_eq!(load(&store), None);
        store.write(r#"{"version":1,"level":1,"seed":-4,"locked":[]}"#);
        assert_eq!(load(&store), None);
    }

    #[test]
    fn other_version_reads_as_absent() {
        let store = MemoryStore::default();
        store.write(r#"{"version":99,"level":1,"seed":1,"locked":[]}"#);
        assert_eq!(load(&store), None);
    }

    #[test]
    fn legacy_record_without_version_still_loads() {
        let store = MemoryStore::default();
        store.write(r#"{"level":4,"seed":77,"locked":[1,2]}"#);
        let record = load(&store).unwrap();
        assert_eq!(record.level, 4);
        assert_eq!(record.locked, vec![1, 2]);
    }

    #[test]
    fn validate_drops_out_of_range_slots() {
        let record = LevelProgress {
            version: RECORD_VERSION,
            level: 1,
            seed: 9,
            locked: vec![3, 600, 3, 0],
        };
        assert_eq!(record.validate(200).locked, vec![0, 3]);
    }

    #[test]
    fn reset_keeps_seed_and_clears_locked() {
        let store = MemoryStore::default();
        save(&store, 3, 42, &[1, 2, 3]);
        clear_locked_for_level(&store, 3);
        let record = load(&store).unwrap();
        assert_eq!(record.seed, 42);
        assert!(record.locked.is_empty());

        // Reset for a different level leaves the record alone.
        clear_locked_for_level(&store, 9);
        assert_eq!(load(&store).unwrap().level, 3);
    }

    #[test]
    fn clear_all_removes_the_record() {
        let store = MemoryStore::default();
        save(&store, 1, 1, &[]);
        clear_all(&store);
        assert_eq!(load(&store), None);
    }
}
