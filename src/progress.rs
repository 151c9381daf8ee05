//! Row-completion progress reporting.
//!
//! Workers bump a shared atomic counter as they finish rows; the percentage is
//! forwarded to an `indicatif` bar drawn on stderr. Updates from different
//! workers may arrive out of order, which only affects what is displayed.

use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Width of the textual bar in cells.
const BAR_CELLS: usize = 50;

/// Integer percentage of `done` out of `total`, 100 when `total` is zero.
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u32
}

/// Tracks completed rows of a render.
pub struct RowProgress {
    bar: ProgressBar,
    rows: usize,
    completed: AtomicUsize,
}

impl RowProgress {
    /// Progress bar on stderr for a render of `rows` rows.
    pub fn new(rows: usize) -> Self {
        let template = format!("Progress: [{{bar:{BAR_CELLS}}}] {{pos:>3}}%");
        let style = ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("# ");
        Self::with_bar(ProgressBar::new(100).with_style(style), rows)
    }

    /// Progress tracking with nothing drawn.
    pub fn hidden(rows: usize) -> Self {
        Self::with_bar(ProgressBar::hidden(), rows)
    }

    fn with_bar(bar: ProgressBar, rows: usize) -> Self {
        Self {
            bar,
            rows,
            completed: AtomicUsize::new(0),
        }
    }

    /// Record one finished row and return the new percentage.
    pub fn row_completed(&self) -> u32 {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        let pc = percent(done, self.rows);
        self.bar.set_position(u64::from(pc));
        pc
    }

    /// Rows finished so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_integer_and_bounded() {
        assert_eq!(percent(0, 36), 0);
        assert_eq!(percent(18, 36), 50);
        assert_eq!(percent(35, 36), 97);
        assert_eq!(percent(36, 36), 100);
        assert_eq!(percent(40, 36), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn rows_count_up_to_full() {
        let progress = RowProgress::hidden(4);
        let seen: Vec<u32> = (0..4).map(|_| progress.row_completed()).collect();
        assert_eq!(seen, vec![25, 50, 75, 100]);
        assert_eq!(progress.completed(), 4);
        progress.finish();
    }
}
