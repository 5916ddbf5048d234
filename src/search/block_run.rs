//! Feasibility of windows with respect to the minimum block run.
//!
//! A block is a maximal run of non-interrupting positions. A window `[left, right)`
//! is feasible when every block inside it, clipped to the window, is at least
//! `min_block_run` long. Blocks are the matched stretches between interruptions;
//! runs of interruptions are never measured here, their length is bounded by
//! the automaton's `max_interrupts`.
//!
//! The table answers the 2-D query `[left][right]` in O(1) from three
//! per-position arrays rebuilt once per segment; their allocations are retained
//! between segments.

#[derive(Debug, Default, Clone)]
pub struct BlockRunTable {
    min_block_run: usize,
    /// Start of the block holding a position, `p + 1` for an interruption.
    run_start: Vec<usize>,
    /// End of the block holding a position, `p` for an interruption.
    run_end: Vec<usize>,
    /// Start of the first too-short block starting at or after a position.
    next_short: Vec<usize>,
}

impl BlockRunTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, is_interrupt: &[bool], min_block_run: usize) {
        let len = is_interrupt.len();
        self.min_block_run = min_block_run;
        self.run_start.clear();
        self.run_end.clear();
        self.next_short.clear();
        if min_block_run <= 1 {
            return;
        }

        self.run_start.resize(len, 0);
        self.run_end.resize(len, 0);
        self.next_short.resize(len + 1, len);

        for pos in 0..len {
            self.run_start[pos] = if is_interrupt[pos] {
                pos + 1
            } else if pos > 0 && !is_interrupt[pos - 1] {
                self.run_start[pos - 1]
            } else {
                pos
            };
        }
        for pos in (0..len).rev() {
            self.run_end[pos] = if is_interrupt[pos] {
                pos
            } else if pos + 1 < len && !is_interrupt[pos + 1] {
                self.run_end[pos + 1]
            } else {
                pos + 1
            };
        }
        for pos in (0..len).rev() {
            let starts_short_block = !is_interrupt[pos]
                && self.run_start[pos] == pos
                && self.run_end[pos] - pos < min_block_run;
            self.next_short[pos] = if starts_short_block {
                pos
            } else {
                self.next_short[pos + 1]
            };
        }
    }

    pub fn is_feasible(&self, left: usize, right: usize) -> bool {
        if self.min_block_run <= 1 {
            return true;
        }
        debug_assert!(left < right && right <= self.run_start.len());

        let first_end = self.run_end[left].min(right);
        if first_end > left && first_end - left < self.min_block_run {
            return false;
        }
        let last_start = self.run_start[right - 1].max(left);
        if right > last_start && right - last_start < self.min_block_run {
            return false;
        }
        first_end >= right || self.next_short[first_end] >= last_start
    }
}
