use super::error::IndexError;
use super::transaction::TransactionRecord;

/// Append-only ordered sequence of transaction records.
///
/// The ledger is the source of truth for all derived views. It stores
/// already-validated records in insertion order; keeping the balance sheet
/// in step with appends and removals is the facade's job.
#[derive(Debug, Default)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated record.
    pub(super) fn record(&mut self, record: TransactionRecord) {
        log::trace!("[ledger] append #{}: {record}", self.records.len());
        self.records.push(record);
    }

    /// Bounds-checked peek at the record at `index`.
    pub fn get(&self, index: usize) -> Option<&TransactionRecord> {
        self.records.get(index)
    }

    /// Remove and return the record at `index`.
    ///
    /// The caller must reverse the record's balance effect; the ledger does
    /// not track balances itself.
    pub(super) fn remove(&mut self, index: usize) -> Result<TransactionRecord, IndexError> {
        if index >= self.records.len() {
            return Err(IndexError {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        log::trace!("[ledger] remove #{index}: {removed}");
        Ok(removed)
    }

    /// Lazily iterate records matching `predicate`, in insertion order.
    ///
    /// Does not mutate the ledger; call again to restart the scan.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a TransactionRecord>
    where
        P: FnMut(&TransactionRecord) -> bool + 'a,
    {
        self.records.iter().filter(move |record| predicate(record))
    }

    /// Iterate all records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransactionRecord> {
        self.records.iter()
    }

    /// Returns the number of records in the ledger
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the ledger holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
