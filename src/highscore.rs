//! Fixed-capacity high-score table, kept sorted by descending score

use heapless::String;
use ufmt::{uDisplay, uWrite, Formatter};

use crate::config::{MAX_HIGHSCORES, MAX_NAME_LEN};

pub type Name = String<MAX_NAME_LEN>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScore {
    pub name: Name,
    pub score: u16,
}

impl HighScore {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.score == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: [HighScore; MAX_HIGHSCORES],
    count: usize,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| HighScore::default()),
            count: 0,
        }
    }

    pub fn reset(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = HighScore::default();
        }
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= MAX_HIGHSCORES
    }

    /// Score of the last stored entry, 0 when the table is empty.
    pub fn lowest(&self) -> u16 {
        match self.count {
            0 => 0,
            n => self.entries[n - 1].score,
        }
    }

    /// Would `score` make it into the table?
    pub fn qualifies(&self, score: u16) -> bool {
        !self.is_full() || score > self.lowest()
    }

    /// Stored entries, best first.
    pub fn entries(&self) -> &[HighScore] {
        &self.entries[..self.count]
    }

    /// Every slot including unused ones, best first.
    pub fn slots(&self) -> &[HighScore; MAX_HIGHSCORES] {
        &self.entries
    }

    pub fn get(&self, rank: usize) -> Option<&HighScore> {
        self.entries().get(rank)
    }

    /// Insert `score` below any equal scores already stored.
    ///
    /// Returns `false` without touching the table when it is full and
    /// `score` does not beat the lowest entry. Over-long names are truncated.
    pub fn try_insert(&mut self, name: &str, score: u16) -> bool {
        if !self.qualifies(score) {
            return false;
        }

        let position = self
            .entries()
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.count);

        if !self.is_full() {
            self.count += 1;
        }
        // Shift lower entries down; the bottom one falls off when full
        for idx in (position + 1..self.count).rev() {
            self.entries[idx] = self.entries[idx - 1].clone();
        }

        self.entries[position] = HighScore {
            name: truncated(name),
            score,
        };
        true
    }
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new()
    }
}

fn truncated(name: &str) -> Name {
    let mut out = Name::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Fixed-width listing, one CRLF-terminated line per slot:
/// ` 1. ALICE          12`
impl uDisplay for HighScoreTable {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for (rank, entry) in self.entries.iter().enumerate() {
            f.write_char(' ')?;
            ufmt::uwrite!(f, "{}. ", rank + 1)?;

            let mut width = 0;
            if entry.is_empty() {
                for _ in 0..MAX_NAME_LEN {
                    f.write_char('-')?;
                }
                width = MAX_NAME_LEN;
            } else {
                for c in entry.name.chars() {
                    f.write_char(c)?;
                    width += 1;
                }
            }
            for _ in width..MAX_NAME_LEN {
                f.write_char(' ')?;
            }

            let digits = decimal_width(entry.score);
            for _ in digits..5 {
                f.write_char(' ')?;
            }
            ufmt::uwrite!(f, "{}\r\n", entry.score)?;
        }
        Ok(())
    }
}

fn decimal_width(mut value: u16) -> usize {
    let mut width = 1;
    while value >= 10 {
        value /= 10;
        width += 1;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(table: &HighScoreTable) -> heapless::Vec<u16, MAX_HIGHSCORES> {
        table.entries().iter().map(|e| e.score).collect()
    }

    fn assert_sorted(table: &HighScoreTable) {
        let entries = table.entries();
        for pair in entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn stable_tie_ordering() {
        let mut table = HighScoreTable::new();
        for (i, score) in [3, 9, 1, 9, 5, 2].into_iter().enumerate() {
            let name = ["A", "B", "C", "D", "E", "F"][i];
            assert!(table.try_insert(name, score));
            assert_sorted(&table);
        }

        assert_eq!(scores(&table).as_slice(), &[9, 9, 5, 3, 2]);
        // The first 9 stays ahead of the second
        assert_eq!(table.get(0).unwrap().name.as_str(), "B");
        assert_eq!(table.get(1).unwrap().name.as_str(), "D");
    }

    #[test]
    fn full_table_rejects_non_improving_scores() {
        let mut table = HighScoreTable::new();
        for score in [10, 8, 6, 4, 2] {
            table.try_insert("X", score);
        }
        let before = table.clone();

        assert!(!table.try_insert("LOW", 1));
        assert!(!table.try_insert("TIE", 2));
        assert_eq!(table, before);

        assert!(table.try_insert("NEW", 3));
        assert_eq!(scores(&table).as_slice(), &[10, 8, 6, 4, 3]);
    }

    #[test]
    fn increasing_scores_end_best_first() {
        let mut table = HighScoreTable::new();
        for score in 1..=20 {
            table.try_insert("P", score);
            assert_sorted(&table);
        }
        assert_eq!(scores(&table).as_slice(), &[20, 19, 18, 17, 16]);
    }

    #[test]
    fn partially_filled_table_accepts_anything() {
        let mut table = HighScoreTable::new();
        assert!(table.qualifies(0));
        assert!(table.try_insert("ZERO", 0));
        assert_eq!(table.len(), 1);
        assert_eq!(table.lowest(), 0);
    }

    #[test]
    fn long_names_are_truncated() {
        let mut table = HighScoreTable::new();
        table.try_insert("ABCDEFGHIJKLMNOP", 4);
        assert_eq!(table.get(0).unwrap().name.as_str(), "ABCDEFGHIJKL");
    }

    #[test]
    fn reset_clears_every_slot() {
        let mut table = HighScoreTable::new();
        table.try_insert("A", 5);
        table.try_insert("B", 7);
        table.reset();

        assert!(table.is_empty());
        assert!(table.slots().iter().all(HighScore::is_empty));
    }

    #[test]
    fn renders_fixed_width_rows() {
        let mut table = HighScoreTable::new();
        table.try_insert("ALICE", 12);
        table.try_insert("BOB", 7);

        let mut out: heapless::String<256> = heapless::String::new();
        ufmt::uwrite!(&mut out, "{}", table).unwrap();

        let mut lines = out.as_str().split("\r\n");
        assert_eq!(lines.next(), Some(" 1. ALICE          12"));
        assert_eq!(lines.next(), Some(" 2. BOB             7"));
        assert_eq!(lines.next(), Some(" 3. ------------    0"));
        assert_eq!(out.as_str().matches("\r\n").count(), MAX_HIGHSCORES);
    }
}
