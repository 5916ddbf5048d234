//! Sliding-window search for motifs inside one segment.
//!
//! The segment is given as a view in the duplex-purine alphabet. For every
//! left anchor the window first grows to `min_length` (shrinking from the left
//! while the error or composition bounds fail), then keeps growing while the
//! bounds hold and records the windows that pass every acceptance test.

use super::alphabet::{is_purine, MotifClass, GUANINE, INTERRUPT};
use super::block_run::BlockRunTable;
use super::cluster::reduce_overlapping;
use super::motif::Motif;
use super::segment::Segment;

const RATE_EPSILON: f64 = 1e-9;

/// `floor(len * rate)`, robust against products landing just below an integer.
pub(crate) fn floor_fraction(len: usize, rate: f64) -> usize {
    if rate <= 0.0 {
        0
    } else {
        (len as f64 * rate + RATE_EPSILON).floor() as usize
    }
}

#[derive(Debug, Clone)]
pub struct FilterParams {
    /// Symbol counted for the composition bounds.
    pub filter_char: u8,
    /// Symbol counted as an error.
    pub interrupt_char: u8,
    pub error_rate: f64,
    pub maximal_error: Option<usize>,
    pub min_guanine_rate: f64,
    pub max_guanine_rate: f64,
    pub mixed_parallel_max_guanine: f64,
    pub mixed_antiparallel_min_guanine: f64,
    pub min_length: usize,
    /// Unbounded when `None` or shorter than `min_length`.
    pub max_length: Option<usize>,
    pub min_block_run: usize,
    pub all_matches: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            filter_char: GUANINE,
            interrupt_char: INTERRUPT,
            error_rate: 0.0,
            maximal_error: None,
            min_guanine_rate: 0.0,
            max_guanine_rate: 1.0,
            mixed_parallel_max_guanine: 1.0,
            mixed_antiparallel_min_guanine: 0.0,
            min_length: 1,
            max_length: None,
            min_block_run: 1,
            all_matches: false,
        }
    }
}

impl FilterParams {
    pub fn allowed_errors(&self, len: usize) -> usize {
        let by_rate = floor_fraction(len, self.error_rate);
        match self.maximal_error {
            Some(cap) => by_rate.min(cap),
            None => by_rate,
        }
    }

    pub fn allowed_non_filter(&self, len: usize) -> usize {
        floor_fraction(len, 1.0 - self.min_guanine_rate)
    }

    pub fn effective_max_length(&self) -> usize {
        match self.max_length {
            Some(max_length) if max_length >= self.min_length => max_length,
            _ => usize::MAX,
        }
    }

    /// Class-specific acceptance; only mixed oligos restrict their orientation.
    pub fn class_accepts(&self, class: MotifClass, is_parallel: bool, guanine_rate: f64) -> bool {
        match class {
            MotifClass::Mixed if is_parallel => guanine_rate <= self.mixed_parallel_max_guanine,
            MotifClass::Mixed => guanine_rate >= self.mixed_antiparallel_min_guanine,
            _ => true,
        }
    }
}

/// A window accepted by the filter, in view coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub start: usize,
    pub end: usize,
    pub errors: usize,
    pub guanines: usize,
}

impl Hit {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn score(&self) -> usize {
        self.len() - self.errors
    }
}

/// Buffers reused across segments; they only grow.
#[derive(Debug, Default)]
pub struct FilterScratch {
    is_filter: Vec<bool>,
    is_interrupt: Vec<bool>,
    is_non_filter: Vec<bool>,
    is_guanine: Vec<bool>,
    blocks: BlockRunTable,
    hits: Vec<Hit>,
}

impl FilterScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Windows emitted by the last `find_windows` call.
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    fn encode(&mut self, view: &[u8], params: &FilterParams) {
        // Without a guanine floor any purine satisfies the composition bound
        let collapse = params.min_guanine_rate <= 0.0;
        self.is_filter.clear();
        self.is_interrupt.clear();
        self.is_non_filter.clear();
        self.is_guanine.clear();
        for &symbol in view {
            let is_filter = if collapse {
                is_purine(symbol)
            } else {
                symbol == params.filter_char
            };
            self.is_filter.push(is_filter);
            self.is_non_filter.push(!is_filter);
            self.is_interrupt.push(symbol == params.interrupt_char);
            self.is_guanine.push(symbol == params.filter_char);
        }
        self.blocks.rebuild(&self.is_interrupt, params.min_block_run);
    }

    fn next_anchor(&self, from: usize) -> usize {
        let mut pos = from;
        while pos < self.is_interrupt.len() && self.is_interrupt[pos] {
            pos += 1;
        }
        pos
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    left: usize,
    right: usize,
    errors: usize,
    filter: usize,
    non_filter: usize,
    guanines: usize,
}

impl Window {
    fn empty_at(pos: usize) -> Self {
        Window {
            left: pos,
            right: pos,
            errors: 0,
            filter: 0,
            non_filter: 0,
            guanines: 0,
        }
    }

    fn len(&self) -> usize {
        self.right - self.left
    }

    fn push_back(&mut self, scratch: &FilterScratch) {
        let pos = self.right;
        self.errors += scratch.is_interrupt[pos] as usize;
        self.filter += scratch.is_filter[pos] as usize;
        self.non_filter += scratch.is_non_filter[pos] as usize;
        self.guanines += scratch.is_guanine[pos] as usize;
        self.right += 1;
    }

    fn pop_front(&mut self, scratch: &FilterScratch) {
        let pos = self.left;
        self.errors -= scratch.is_interrupt[pos] as usize;
        self.filter -= scratch.is_filter[pos] as usize;
        self.non_filter -= scratch.is_non_filter[pos] as usize;
        self.guanines -= scratch.is_guanine[pos] as usize;
        self.left += 1;
    }

    fn violates(&self, params: &FilterParams) -> bool {
        let len = self.len();
        self.errors > params.allowed_errors(len) || self.non_filter > params.allowed_non_filter(len)
    }

    fn accepts(
        &self,
        class: MotifClass,
        is_parallel: bool,
        params: &FilterParams,
        scratch: &FilterScratch,
    ) -> bool {
        if scratch.is_interrupt[self.right - 1] || !scratch.blocks.is_feasible(self.left, self.right)
        {
            return false;
        }
        let len = self.len() as f64;
        let error_rate = self.errors as f64 / len;
        let guanine_rate = self.guanines as f64 / len;
        error_rate <= params.error_rate
            && guanine_rate >= params.min_guanine_rate
            && guanine_rate <= params.max_guanine_rate
            && params.class_accepts(class, is_parallel, guanine_rate)
    }

    fn hit(&self) -> Hit {
        Hit {
            start: self.left,
            end: self.right,
            errors: self.errors,
            guanines: self.guanines,
        }
    }
}

/// Finds the qualifying windows of `view`; they are left in `scratch.hits()` in
/// view coordinates. Returns the number of qualifying windows found, which also
/// counts windows whose emission was suppressed because an earlier emitted
/// window already reaches as far.
pub fn find_windows(
    view: &[u8],
    class: MotifClass,
    is_parallel: bool,
    params: &FilterParams,
    scratch: &mut FilterScratch,
) -> usize {
    scratch.hits.clear();
    let len = view.len();
    let min_length = params.min_length.max(1);
    if len < min_length {
        return 0;
    }
    scratch.encode(view, params);
    let max_length = params.effective_max_length();

    let mut matches = 0;
    let mut covered_end = 0;
    let mut left = scratch.next_anchor(0);
    while left + min_length <= len {
        let mut window = Window::empty_at(left);
        loop {
            while window.right < len && window.len() < min_length {
                window.push_back(scratch);
            }
            if window.len() < min_length {
                return matches;
            }
            while window.left < window.right
                && (window.violates(params) || scratch.is_interrupt[window.left])
            {
                window.pop_front(scratch);
            }
            if window.len() >= min_length {
                break;
            }
        }

        let mut best = None;
        while window.len() <= max_length && !window.violates(params) {
            if window.accepts(class, is_parallel, params, scratch) {
                let hit = window.hit();
                if params.all_matches {
                    matches += 1;
                    if hit.end > covered_end {
                        covered_end = hit.end;
                        scratch.hits.push(hit);
                    }
                } else {
                    best = Some(hit);
                }
            }
            if window.right == len {
                break;
            }
            window.push_back(scratch);
        }

        if let Some(hit) = best {
            matches += 1;
            if hit.end > covered_end {
                covered_end = hit.end;
                scratch.hits.push(hit);
            }
        }

        left = scratch.next_anchor(window.left + 1);
    }
    matches
}

/// Runs the window search over one segment and appends the resulting motifs in
/// host coordinates. Windows of reversed views are mirrored back using the
/// view length. With `reduce_set` the segment's motifs are first collapsed into
/// spanning clusters. Returns the count from `find_windows`.
pub fn filter_motifs(
    view: &[u8],
    segment: &Segment,
    class: MotifClass,
    params: &FilterParams,
    reduce_set: bool,
    scratch: &mut FilterScratch,
    motifs: &mut Vec<Motif>,
) -> usize {
    debug_assert_eq!(view.len(), segment.len());
    let matches = find_windows(view, class, segment.is_parallel, params, scratch);
    let view_len = view.len();
    let reversed = class.is_reversed(segment.is_parallel);

    let emitted = scratch.hits.iter().map(|hit| {
        let (start, end) = if reversed {
            (view_len - hit.end, view_len - hit.start)
        } else {
            (hit.start, hit.end)
        };
        Motif {
            seq_no: segment.seq_no,
            begin: segment.begin + start,
            end: segment.begin + end,
            class,
            is_parallel: segment.is_parallel,
            score: hit.score(),
            errors: hit.errors,
            guanines: hit.guanines,
            duplicate_count: 0,
        }
    });

    if reduce_set && scratch.hits.len() > 1 {
        let reduced = reduce_overlapping(emitted.collect(), |m| (m.begin, m.end), Motif::absorb);
        motifs.extend(reduced);
    } else {
        motifs.extend(emitted);
    }
    matches
}
