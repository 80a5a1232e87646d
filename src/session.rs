use crate::error::{Error, Result};
use crate::metadata::VideoRecord;
use crate::transcript::TranscriptRecord;

/// All mutable state for one interactive session, passed explicitly into each
/// action — search results, the per-batch selection cap, and whatever
/// transcripts have been collected so far. Nothing outlives the process.
#[derive(Debug, Default)]
pub struct SessionState {
    pub records: Vec<VideoRecord>,
    pub select_cap: usize,
    pub transcripts: Vec<TranscriptRecord>,
}

impl SessionState {
    pub fn new(select_cap: usize) -> Self {
        SessionState {
            records: Vec::new(),
            select_cap,
            transcripts: Vec::new(),
        }
    }

    /// Replace the result set from a fresh search. Prior selection and
    /// collected transcripts go with it — re-searching never merges.
    pub fn set_results(&mut self, records: Vec<VideoRecord>) {
        self.records = records;
        self.transcripts.clear();
    }

    /// Mark the given 1-based rows as selected. Rejects empty input,
    /// out-of-range rows, duplicates, and anything over the cap — a too-large
    /// selection blocks collection outright rather than being truncated.
    pub fn select_rows(&mut self, rows: &[usize]) -> Result<()> {
        if rows.is_empty() {
            return Err(Error::InvalidSelection("no rows given".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for &row in rows {
            if row == 0 || row > self.records.len() {
                return Err(Error::InvalidSelection(format!(
                    "row {row} is out of range (1..={})",
                    self.records.len()
                )));
            }
            if !seen.insert(row) {
                return Err(Error::InvalidSelection(format!("row {row} given twice")));
            }
        }

        if rows.len() > self.select_cap {
            return Err(Error::SelectionCap {
                selected: rows.len(),
                cap: self.select_cap,
            });
        }

        for record in &mut self.records {
            record.selected = false;
        }
        for &row in rows {
            self.records[row - 1].selected = true;
        }
        Ok(())
    }

    pub fn selected(&self) -> Vec<VideoRecord> {
        self.records.iter().filter(|r| r.selected).cloned().collect()
    }
}
