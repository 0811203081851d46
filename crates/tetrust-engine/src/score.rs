//! High score persistence.
//!
//! [`ScoreManager`] keeps the ten best scores, highest first, and stores them
//! in a plain text file with one `name = score` line per slot:
//!
//! ```text
//! ALICE = 1700
//! BOB = 300
//!  = -1
//! ```
//!
//! Empty slots are written as ` = -1` and skipped on load.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::InvalidNameError;

/// Separator between the name and the score in the score file.
pub const SCORE_DELIMITER: char = '=';

/// A single entry of the high score table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    name: String,
    score: u64,
}

impl HighScore {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }
}

/// Fixed-capacity ranked list of high scores backed by a text file.
///
/// Slots are ordered best first. `None` slots are empty and rank below any
/// real score. Loading and saving are explicit; nothing is written
/// automatically.
///
/// # Example
///
/// ```
/// use tetrust_engine::ScoreManager;
///
/// let mut scores = ScoreManager::new("scores.txt");
/// assert_eq!(scores.qualifies(0), Some(0));
///
/// assert_eq!(scores.submit("ALICE", 1700).unwrap(), Some(0));
/// assert_eq!(scores.submit("BOB", 300).unwrap(), Some(1));
/// assert!(scores.submit("EVE=", 10).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ScoreManager {
    path: PathBuf,
    slots: Vec<Option<HighScore>>,
}

impl ScoreManager {
    /// Number of kept high scores.
    pub const CAPACITY: usize = 10;

    /// Creates an empty table bound to the given score file.
    ///
    /// The file is not touched until [`Self::load`] or [`Self::save`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slots: vec![None; Self::CAPACITY],
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all slots, best first. Always [`Self::CAPACITY`] long.
    #[must_use]
    pub fn slots(&self) -> &[Option<HighScore>] {
        &self.slots
    }

    /// Returns the non-empty entries, best first.
    pub fn entries(&self) -> impl Iterator<Item = &HighScore> {
        self.slots.iter().flatten()
    }

    fn slot_score(&self, index: usize) -> Option<u64> {
        self.slots[index].as_ref().map(HighScore::score)
    }

    /// Returns the index the score would take in the table, without
    /// modifying it, or `None` if it does not beat any kept entry.
    #[must_use]
    pub fn qualifies(&self, score: u64) -> Option<usize> {
        (0..Self::CAPACITY).find(|&i| self.slot_score(i) < Some(score))
    }

    /// Inserts a new high score and returns its index.
    ///
    /// An entry with the same score as existing ones is placed after them.
    /// Returns `Ok(None)` when the score is not good enough; the table is
    /// unchanged in that case. Blank names, names with leading or trailing
    /// whitespace, and names containing [`SCORE_DELIMITER`] or line breaks
    /// are rejected, since the score file could not store them as is.
    pub fn submit(&mut self, name: &str, score: u64) -> Result<Option<usize>, InvalidNameError> {
        if name.is_empty()
            || name.trim() != name
            || name.contains([SCORE_DELIMITER, '\n', '\r'])
        {
            return Err(InvalidNameError::new(name));
        }
        let Some(index) = self.qualifies(score) else {
            return Ok(None);
        };

        self.slots.insert(
            index,
            Some(HighScore {
                name: name.to_owned(),
                score,
            }),
        );
        self.slots.truncate(Self::CAPACITY);
        info!("added new high score (name = {name:?}, score = {score}) at index {index}");
        Ok(Some(index))
    }

    /// Loads the table from the score file, creating an empty file if needed.
    ///
    /// Malformed lines are skipped with a warning. Only I/O failures are
    /// reported as errors.
    pub fn load(&mut self) -> io::Result<()> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                File::create(&self.path)?;
                self.slots = vec![None; Self::CAPACITY];
                info!("created empty high score file {}", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.read_from(BufReader::new(file))?;
        info!("loaded high scores from {}", self.path.display());
        Ok(())
    }

    /// Overwrites the score file with every slot, empty ones included.
    pub fn save(&self) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("saved high scores to {}", self.path.display());
        Ok(())
    }

    /// Replaces the table with the entries read from `reader`.
    ///
    /// At most [`Self::CAPACITY`] valid lines are read. Entries are sorted
    /// best first; equal scores keep their order of appearance. Lines that
    /// are not valid UTF-8 are skipped like any other malformed line.
    pub fn read_from<R>(&mut self, mut reader: R) -> io::Result<()>
    where
        R: BufRead,
    {
        let mut entries = Vec::with_capacity(Self::CAPACITY);
        let mut buf = Vec::new();
        while entries.len() < Self::CAPACITY {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!("invalid high score line {}: {e}", raw.escape_ascii());
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some((name, score)) = line.split_once(SCORE_DELIMITER) else {
                warn!("invalid high score line {line:?}: missing '{SCORE_DELIMITER}'");
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let score = match score.trim().parse::<u64>() {
                Ok(score) => score,
                Err(e) => {
                    warn!("invalid high score line {line:?}: {e}");
                    continue;
                }
            };
            entries.push(HighScore {
                name: name.to_owned(),
                score,
            });
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        self.slots = entries.into_iter().map(Some).collect();
        self.slots.resize(Self::CAPACITY, None);
        Ok(())
    }

    /// Writes every slot as a `name = score` line.
    pub fn write_to<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        for slot in &self.slots {
            match slot {
                Some(entry) => writeln!(writer, "{} {SCORE_DELIMITER} {}", entry.name, entry.score)?,
                None => writeln!(writer, " {SCORE_DELIMITER} -1")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn full_table() -> ScoreManager {
        let mut scores = ScoreManager::new("unused.txt");
        for i in 0..10 {
            let score = 1000 - i * 100;
            scores.submit(&format!("P{i}"), score).unwrap();
        }
        scores
    }

    fn names(scores: &ScoreManager) -> Vec<&str> {
        scores.entries().map(HighScore::name).collect()
    }

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "tetrust-{name}-{}-{nanos}.txt",
            std::process::id()
        ))
    }

    #[test]
    fn test_empty_table_qualifies_everything() {
        let scores = ScoreManager::new("unused.txt");
        assert_eq!(scores.slots().len(), ScoreManager::CAPACITY);
        assert_eq!(scores.entries().count(), 0);
        assert_eq!(scores.qualifies(0), Some(0));
        assert_eq!(scores.qualifies(12345), Some(0));
    }

    #[test]
    fn test_qualifies_is_pure() {
        let scores = full_table();
        let before = scores.slots().to_vec();
        assert_eq!(scores.qualifies(1000), Some(1));
        assert_eq!(scores.qualifies(1001), Some(0));
        assert_eq!(scores.qualifies(150), Some(9));
        assert_eq!(scores.qualifies(100), None);
        assert_eq!(scores.qualifies(50), None);
        assert_eq!(scores.slots(), &before[..]);
    }

    #[test]
    fn test_submit_below_last_is_rejected() {
        let mut scores = full_table();
        let before = scores.slots().to_vec();
        assert_eq!(scores.submit("LOW", 99).unwrap(), None);
        assert_eq!(scores.submit("TIE", 100).unwrap(), None);
        assert_eq!(scores.slots(), &before[..]);
    }

    #[test]
    fn test_submit_best_goes_first_and_drops_last() {
        let mut scores = full_table();
        assert_eq!(scores.submit("TOP", 5000).unwrap(), Some(0));
        assert_eq!(
            names(&scores),
            vec!["TOP", "P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8"]
        );
        assert_eq!(scores.entries().count(), ScoreManager::CAPACITY);
    }

    #[test]
    fn test_submit_ties_go_after_existing() {
        let mut scores = ScoreManager::new("unused.txt");
        assert_eq!(scores.submit("A", 500).unwrap(), Some(0));
        assert_eq!(scores.submit("B", 500).unwrap(), Some(1));
        assert_eq!(scores.submit("C", 700).unwrap(), Some(0));
        assert_eq!(scores.submit("D", 500).unwrap(), Some(3));
        assert_eq!(names(&scores), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_submit_rejects_delimiter_in_name() {
        let mut scores = full_table();
        let before = scores.slots().to_vec();

        let err = scores.submit("A=B", 9999).unwrap_err();
        assert_eq!(err.name(), "A=B");
        assert!(scores.submit("A\nB", 9999).is_err());
        assert_eq!(scores.slots(), &before[..]);
    }

    #[test]
    fn test_submit_rejects_names_not_stored_as_is() {
        let mut scores = ScoreManager::new("unused.txt");
        for name in ["", " ", " BOB", "BOB ", "\tBOB"] {
            assert!(scores.submit(name, 500).is_err(), "{name:?}");
        }
        assert_eq!(scores.entries().count(), 0);

        scores.submit("AB 1", 500).unwrap();
        let mut buf = Vec::new();
        scores.write_to(&mut buf).unwrap();
        let mut loaded = ScoreManager::new("unused.txt");
        loaded.read_from(&buf[..]).unwrap();
        assert_eq!(loaded.slots(), scores.slots());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let mut scores = ScoreManager::new("unused.txt");
        scores.submit("ALICE", 1700).unwrap();
        scores.submit("BOB", 300).unwrap();
        scores.submit("CAROL", 300).unwrap();

        let mut buf = Vec::new();
        scores.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert_eq!(text.lines().count(), ScoreManager::CAPACITY);
        assert!(text.starts_with("ALICE = 1700\nBOB = 300\nCAROL = 300\n = -1\n"));

        let mut loaded = ScoreManager::new("unused.txt");
        loaded.read_from(&buf[..]).unwrap();
        assert_eq!(loaded.slots(), scores.slots());
    }

    #[test]
    fn test_read_skips_malformed_lines() {
        let input = "\
ALICE = 1700
no delimiter here

BOB = not-a-number
 = -1
CAROL=  250
DAVE = -5
EVE = 900
";
        let mut scores = ScoreManager::new("unused.txt");
        scores.read_from(input.as_bytes()).unwrap();
        assert_eq!(names(&scores), vec!["ALICE", "EVE", "CAROL"]);
        assert_eq!(
            scores.entries().map(HighScore::score).collect::<Vec<_>>(),
            vec![1700, 900, 250]
        );
    }

    #[test]
    fn test_read_skips_lines_with_invalid_utf8() {
        let input: &[u8] = b"ALICE = 1700\nB\xe9RANGER = 50\r\nBOB = 300\r\n";
        let mut scores = ScoreManager::new("unused.txt");
        scores.read_from(input).unwrap();
        assert_eq!(names(&scores), vec!["ALICE", "BOB"]);
        assert_eq!(
            scores.entries().map(HighScore::score).collect::<Vec<_>>(),
            vec![1700, 300]
        );
    }

    #[test]
    fn test_read_keeps_at_most_capacity_entries() {
        let input = (0..15)
            .map(|i| format!("P{i} = {}\n", 100 + i))
            .collect::<String>();
        let mut scores = ScoreManager::new("unused.txt");
        scores.read_from(input.as_bytes()).unwrap();
        assert_eq!(scores.entries().count(), ScoreManager::CAPACITY);
        // Only the first ten lines are read, then sorted best first.
        assert_eq!(scores.entries().next().unwrap().name(), "P9");
        assert_eq!(scores.entries().last().unwrap().name(), "P0");
    }

    #[test]
    fn test_save_then_load_file() {
        let path = temp_path("round-trip");
        let mut scores = ScoreManager::new(&path);
        scores.submit("ALICE", 1700).unwrap();
        scores.submit("BOB", 300).unwrap();
        scores.save().unwrap();

        let mut loaded = ScoreManager::new(&path);
        loaded.load().unwrap();
        assert_eq!(loaded.slots(), scores.slots());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_creates_missing_file() {
        let path = temp_path("missing");
        assert!(!path.exists());

        let mut scores = ScoreManager::new(&path);
        scores.load().unwrap();
        assert!(path.exists());
        assert_eq!(scores.entries().count(), 0);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_read_only_file() {
        let path = temp_path("read-only");
        fs::write(&path, "ALICE = 1700\n").unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        let mut scores = ScoreManager::new(&path);
        scores.load().unwrap();
        assert_eq!(names(&scores), vec!["ALICE"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_reports_io_failure() {
        let path = temp_path("no-such-dir").join("scores.txt");
        let mut scores = ScoreManager::new(path);
        assert!(scores.load().is_err());
    }
}
