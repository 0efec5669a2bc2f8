use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use super::error::DataError;
use super::loader::{self, FileReader, TableReader};
use super::locator::Locator;
use super::model::Table;

/// Outcome of a load, shared by every caller that waited on it.
pub type LoadResult = Result<Arc<Table>, Arc<DataError>>;

#[derive(Default)]
struct SlotState {
    table: Option<Arc<Table>>,
    loading: bool,
    /// Finished load attempts; waiters watch it to see their attempt end.
    attempts: u64,
    /// Error of the last finished attempt, `None` if it panicked.
    last_error: Option<Arc<DataError>>,
}

#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
    finished: Condvar,
}

impl Slot {
    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, outcome: Option<&LoadResult>) {
        let mut state = self.lock();
        state.loading = false;
        state.attempts += 1;
        state.last_error = None;
        match outcome {
            Some(Ok(table)) => state.table = Some(Arc::clone(table)),
            Some(Err(err)) => state.last_error = Some(Arc::clone(err)),
            None => {}
        }
        self.finished.notify_all();
    }
}

/// Releases the waiters if the reader panics mid-load.
struct InFlight<'a>(&'a Slot);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.finish(None);
        }
    }
}

// ---------------------------------------------------------------------------
// Read-through dataset cache
// ---------------------------------------------------------------------------

/// Memoizes loaded tables per dataset key for the lifetime of the cache.
///
/// At most one load per key runs at a time. Callers that arrive while it is
/// in flight block until it ends and receive its outcome, table or error.
/// A failed load is not stored: the next caller to arrive starts a new one.
pub struct DatasetCache<R = FileReader> {
    locator: Locator,
    reader: R,
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl DatasetCache<FileReader> {
    pub fn new(locator: Locator) -> Self {
        Self::with_reader(locator, FileReader)
    }
}

impl<R: TableReader> DatasetCache<R> {
    pub fn with_reader(locator: Locator, reader: R) -> Self {
        DatasetCache {
            locator,
            reader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    fn slot(&self, key: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.to_string()).or_default())
    }

    /// Return the table for `key`, loading it on first use.
    pub fn load(&self, key: &str) -> LoadResult {
        self.locator.check_key(key).map_err(Arc::new)?;

        let slot = self.slot(key);
        let mut state = slot.lock();
        loop {
            if let Some(table) = &state.table {
                log::debug!("Cache hit for '{key}'");
                return Ok(Arc::clone(table));
            }
            if !state.loading {
                break;
            }
            let attempt = state.attempts;
            log::debug!("Waiting for in-flight load of '{key}'");
            state = slot
                .finished
                .wait_while(state, |s| s.loading && s.attempts == attempt)
                .unwrap_or_else(PoisonError::into_inner);
            if let (None, Some(err)) = (&state.table, &state.last_error) {
                return Err(Arc::clone(err));
            }
        }
        state.loading = true;
        drop(state);

        let guard = InFlight(&slot);
        let outcome = self.read(key).map(Arc::new).map_err(Arc::new);
        slot.finish(Some(&outcome));
        drop(guard);
        outcome
    }

    fn read(&self, key: &str) -> Result<Table, DataError> {
        let path = self.locator.resolve(key).inspect_err(|e| {
            log::warn!("Failed to locate '{key}': {e}");
        })?;
        let table = self
            .reader
            .read(&path)
            .map(loader::normalize)
            .inspect_err(|e| log::warn!("Failed to load '{key}': {e}"))?;

        log::info!(
            "Loaded '{key}' from {} ({} rows, columns {:?})",
            path.display(),
            table.len(),
            table.column_names()
        );
        Ok(table)
    }

    /// Whether `key` has been loaded successfully.
    pub fn is_cached(&self, key: &str) -> bool {
        let slot = {
            let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.get(key).cloned()
        };
        slot.is_some_and(|slot| slot.lock().table.is_some())
    }
}
