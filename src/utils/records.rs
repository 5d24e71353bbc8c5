//! Utilities concerning the iteration of records.

use num_format::Locale;
use num_format::ToFormattedString;
use tracing::debug;
use tracing::info;

//===================//
// Number of Records //
//===================//

/// Utility enum to designate whether we are reviewing all records in the file
/// or just some of them.
pub enum NumberOfRecords {
    /// Designates that we should review _all_ of the records in the file.
    All,

    /// Designates that we should review _some_ of the records in the file.
    /// The exact count of records is stored in the `usize`.
    Some(usize),
}

impl From<Option<usize>> for NumberOfRecords {
    fn from(num_records: Option<usize>) -> Self {
        match num_records {
            Some(n) => {
                debug!("Reading a maximum of {} records.", n);
                NumberOfRecords::Some(n)
            }
            None => {
                debug!("Reading all available records.");
                NumberOfRecords::All
            }
        }
    }
}

//================//
// Record Counter //
//================//

/// Utility struct used to uniformly count and report the number of records
/// processed.
pub struct RecordCounter {
    /// The number of records processed.
    count: usize,

    /// The number of records to log every.
    log_every: usize,
}

impl Default for RecordCounter {
    fn default() -> Self {
        RecordCounter {
            count: 0,
            log_every: 1_000_000,
        }
    }
}

impl RecordCounter {
    /// Gets the current number of records counted via a copy.
    pub fn get(&self) -> usize {
        self.count
    }

    /// Increments the counter and reports the number of records processed (if
    /// appropriate).
    pub fn inc(&mut self) {
        self.count += 1;

        if self.count % self.log_every == 0 {
            info!(
                "  [*] Processed {} records.",
                self.count.to_formatted_string(&Locale::en),
            );
        }
    }

    /// A utility method that indicates whether a loop should break based on
    /// if the counter is greater than or equal to some limit. This is
    /// especially useful if you have an `Option<usize>` that indicates the
    /// maximum number of records to process (if it exists, otherwise it loops
    /// forever).
    pub fn time_to_break(&self, limit: &NumberOfRecords) -> bool {
        match limit {
            NumberOfRecords::Some(v) => self.count >= *v,
            NumberOfRecords::All => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_to_break() {
        let mut counter = RecordCounter::default();
        assert!(!counter.time_to_break(&NumberOfRecords::All));
        assert!(!counter.time_to_break(&NumberOfRecords::Some(2)));

        counter.inc();
        counter.inc();
        assert_eq!(counter.get(), 2);
        assert!(!counter.time_to_break(&NumberOfRecords::All));
        assert!(counter.time_to_break(&NumberOfRecords::Some(2)));
    }
}
