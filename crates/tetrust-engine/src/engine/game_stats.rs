/// Returns the points awarded for clearing `lines` rows in a single tick.
///
/// | lines | points             |
/// |-------|--------------------|
/// | 0     | 0                  |
/// | 1     | 100                |
/// | 2     | 300                |
/// | 3     | 700                |
/// | N ≥ 4 | 1000 × (N − 3)     |
///
/// Clears of five or more rows are only possible in scripted boards, but the
/// formula keeps scaling instead of capping at the four-row value.
///
/// # Example
///
/// ```
/// use tetrust_engine::score_for_lines;
///
/// assert_eq!(score_for_lines(2), 300);
/// assert_eq!(score_for_lines(4), 1000);
/// assert_eq!(score_for_lines(6), 3000);
/// ```
#[must_use]
pub fn score_for_lines(lines: usize) -> u64 {
    match lines {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 700,
        n => 1000 * (n as u64 - 3),
    }
}

/// Running statistics of a game: score, cleared lines and placed pieces.
///
/// # Example
///
/// ```
/// use tetrust_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.record_landing();
/// stats.record_cleared_lines(2);
///
/// assert_eq!(stats.score(), 300);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the number of pieces merged into the board.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of simultaneous line clears.
    ///
    /// Index `n` counts the ticks that cleared exactly `n` rows; index `4`
    /// also counts every clear of more than four rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Counts a piece that landed and was merged into the board.
    pub fn record_landing(&mut self) {
        self.completed_pieces += 1;
    }

    /// Adds the points and counters for `lines` rows cleared in one tick.
    pub fn record_cleared_lines(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        self.total_cleared_lines += lines;
        self.line_cleared_counter[usize::min(lines, 4)] += 1;
        self.score += score_for_lines(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let scores = (0..=7).map(score_for_lines).collect::<Vec<_>>();
        assert_eq!(scores, vec![0, 100, 300, 700, 1000, 2000, 3000, 4000]);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = GameStats::new();
        stats.record_landing();
        stats.record_landing();
        stats.record_cleared_lines(0);
        stats.record_cleared_lines(1);
        stats.record_cleared_lines(3);
        stats.record_cleared_lines(5);

        assert_eq!(stats.completed_pieces(), 2);
        assert_eq!(stats.total_cleared_lines(), 9);
        assert_eq!(stats.score(), 100 + 700 + 2000);
        assert_eq!(stats.line_cleared_counter(), &[0, 1, 0, 1, 1]);
    }
}
