use super::alphabet::{MotifClass, Strand};

/// A TFO or TTS candidate on a host sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Motif {
    pub seq_no: usize,
    pub begin: usize,
    pub end: usize,
    pub class: MotifClass,
    pub is_parallel: bool,
    /// Matched length minus the number of interruptions.
    pub score: usize,
    pub errors: usize,
    pub guanines: usize,
    pub duplicate_count: usize,
}

impl Motif {
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_tfo(&self) -> bool {
        self.class.is_tfo()
    }

    pub fn strand(&self) -> Strand {
        self.class.strand()
    }

    /// Widens this motif to the union of both ranges; everything else is kept.
    pub fn absorb(&mut self, other: &Motif) {
        self.begin = self.begin.min(other.begin);
        self.end = self.end.max(other.end);
    }

    /// The encoded text of the motif in view order.
    pub fn view_into(&self, host: &[u8], out: &mut Vec<u8>) {
        self.class
            .view_into(&host[self.begin..self.end], self.is_parallel, out);
    }
}

/// A triplex: a TFO range paired with an equally long TTS range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    pub tfo_seq_no: usize,
    pub tfo_begin: usize,
    pub tfo_end: usize,
    pub tts_seq_no: usize,
    pub tts_begin: usize,
    pub tts_end: usize,
    pub class: MotifClass,
    pub is_parallel: bool,
    pub strand: Strand,
    pub score: usize,
    pub errors: usize,
    pub guanines: usize,
    pub diagonal: isize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.tts_end - self.tts_begin
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of windows with a length in `[min_length, max_length]` that fit into
/// a sequence of length `len`.
pub fn possible_windows(len: usize, min_length: usize, max_length: Option<usize>) -> f64 {
    let min_length = min_length.max(1);
    let longest = match max_length {
        Some(max_length) if max_length >= min_length => max_length.min(len),
        _ => len,
    };
    if longest < min_length {
        return 0.0;
    }
    (min_length..=longest)
        .map(|window| (len - window + 1) as f64)
        .sum()
}

/// Per-sequence (or per-pair) motif counts by class with their normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifPotential {
    pub counts: [u64; MotifClass::COUNT],
    pub norm: f64,
}

impl MotifPotential {
    pub fn new(norm: f64) -> Self {
        MotifPotential {
            counts: [0; MotifClass::COUNT],
            norm,
        }
    }

    pub fn add(&mut self, class: MotifClass, count: u64) {
        self.counts[class.index()] += count;
    }

    pub fn count(&self, class: MotifClass) -> u64 {
        self.counts[class.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn overall(&self) -> f64 {
        ratio(self.total(), self.norm)
    }

    /// Counters add; the normalisation depends only on the key and is kept.
    pub fn merge(&mut self, other: &MotifPotential) {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += other_count;
        }
    }
}

fn ratio(count: u64, norm: f64) -> f64 {
    if norm > 0.0 {
        count as f64 / norm
    } else {
        0.0
    }
}
