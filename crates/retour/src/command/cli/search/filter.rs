//! Literal, case-insensitive substring filtering over a fixed set of records.
use retour_database::record::model::Record;

/// Holds the full record set for a session and the subset matching the
/// current filter text.
///
/// The subset is kept as indices into the full set, so narrowing never
/// clones a `Record` and the original (newest first) order is preserved.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    records: Vec<Record>,
    /// Lowercased `(command, arguments)` per record, computed once.
    haystacks: Vec<(String, String)>,
    filter: String,
    matches: Vec<usize>,
}

impl FilterEngine {
    pub fn new(records: Vec<Record>) -> Self {
        let haystacks = records
            .iter()
            .map(|r| (r.command.to_lowercase(), r.arguments.to_lowercase()))
            .collect();
        let matches = (0..records.len()).collect();
        Self {
            records,
            haystacks,
            filter: String::new(),
            matches,
        }
    }

    /// Replace the filter text and recompute the matching subset.
    ///
    /// A record matches when its command or its arguments contain `text`,
    /// ignoring case. An empty `text` matches everything.
    pub fn set_filter(&mut self, text: &str) {
        text.clone_into(&mut self.filter);

        if text.is_empty() {
            self.matches = (0..self.records.len()).collect();
            return;
        }

        let needle = text.to_lowercase();
        self.matches = self
            .haystacks
            .iter()
            .enumerate()
            .filter(|(_, (command, arguments))| {
                command.contains(&needle) || arguments.contains(&needle)
            })
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// The matching records, in the order they were supplied.
    pub fn filtered(&self) -> impl ExactSizeIterator<Item = &Record> + '_ {
        self.matches.iter().map(|&idx| &self.records[idx])
    }

    /// The `idx`th matching record.
    pub fn get(&self, idx: usize) -> Option<&Record> {
        self.matches.get(idx).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Size of the full, unfiltered set.
    pub fn total(&self) -> usize {
        self.records.len()
    }
}
