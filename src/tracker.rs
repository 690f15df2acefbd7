//! Case-insensitive purchase counts with stable display casing.
//!
//! Every item is identified by its lowercased name. The casing seen the first
//! time an item appears becomes its display name for the rest of the run.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{TrackerError, TrackerResult};

/// True when the trimmed name is non-empty and made only of ASCII letters.
pub fn is_valid_item_name(raw: &str) -> bool {
    let item = raw.trim();
    !item.is_empty() && item.chars().all(|c| c.is_ascii_alphabetic())
}

/// Answer to a single item query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found { name: &'a str, count: usize },
    /// Echoes the trimmed query exactly as the user typed it.
    NotFound(String),
    InvalidQuery,
}

/// One histogram line: an item and how many marks to draw for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramRow<'a> {
    pub name: &'a str,
    pub count: usize,
}

impl HistogramRow<'_> {
    pub fn bar(&self, marker: char) -> String {
        std::iter::repeat(marker).take(self.count).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyTracker {
    // display name -> count, ordered for listing
    counts: BTreeMap<String, usize>,
    // lowercase key -> display name, fixed on first sight
    canonical: HashMap<String, String>,
}

impl FrequencyTracker {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracker = Self::default();
        for token in tokens {
            tracker.record(token.as_ref());
        }
        tracker
    }

    /// Counts every whitespace-separated token of the source.
    /// Bytes that are not valid UTF-8 become U+FFFD instead of failing the load.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::from_tokens(text.split_whitespace()))
    }

    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let load_err = |source: io::Error| TrackerError::Load {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(load_err)?;
        let tracker = Self::from_reader(BufReader::new(file)).map_err(load_err)?;

        info!(
            "📦 Loaded {} items ({} distinct) from {}",
            tracker.total_items(),
            tracker.distinct_items(),
            path.display()
        );
        Ok(tracker)
    }

    fn record(&mut self, token: &str) {
        let key = token.to_ascii_lowercase();
        let display = self
            .canonical
            .entry(key)
            .or_insert_with(|| token.to_string());
        *self.counts.entry(display.clone()).or_insert(0) += 1;
    }

    pub fn lookup(&self, query: &str) -> Lookup<'_> {
        let trimmed = query.trim();
        if !is_valid_item_name(trimmed) {
            debug!("rejected query {:?}", query);
            return Lookup::InvalidQuery;
        }

        match self.canonical.get(&trimmed.to_ascii_lowercase()) {
            Some(name) => Lookup::Found {
                name: name.as_str(),
                count: self.counts.get(name).copied().unwrap_or(0),
            },
            None => Lookup::NotFound(trimmed.to_string()),
        }
    }

    /// `(display name, count)` pairs in ascending display-name order.
    pub fn frequencies(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    pub fn histogram(&self) -> impl Iterator<Item = HistogramRow<'_>> + '_ {
        self.frequencies()
            .map(|(name, count)| HistogramRow { name, count })
    }

    pub fn distinct_items(&self) -> usize {
        self.canonical.len()
    }

    pub fn total_items(&self) -> usize {
        self.counts.values().sum()
    }

    /// Writes one `name count` line per item, in listing order.
    pub fn write_to<W: Write>(&self, mut sink: W) -> io::Result<()> {
        for (name, count) in self.frequencies() {
            writeln!(sink, "{} {}", name, count)?;
        }
        sink.flush()
    }

    /// Exports to `path`, replacing any previous contents.
    pub fn save(&self, path: impl AsRef<Path>) -> TrackerResult<()> {
        let path = path.as_ref();
        let write_err = |source: io::Error| TrackerError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        self.write_to(BufWriter::new(file)).map_err(write_err)?;

        info!("💾 Saved {} items to {}", self.distinct_items(), path.display());
        Ok(())
    }
}

/// Parses export text back into `(display name, count)` pairs. Blank lines are skipped.
pub fn parse_dump(text: &str) -> TrackerResult<Vec<(String, usize)>> {
    let mut pairs = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || TrackerError::MalformedDump {
            line: idx + 1,
            content: line.to_string(),
        };

        let (name, count) = line.rsplit_once(' ').ok_or_else(malformed)?;
        if name.is_empty() {
            return Err(malformed());
        }
        let count = count.parse::<usize>().map_err(|_| malformed())?;
        pairs.push((name.to_string(), count));
    }

    Ok(pairs)
}

pub fn read_dump(path: impl AsRef<Path>) -> TrackerResult<Vec<(String, usize)>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TrackerError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dump(&text)
}
