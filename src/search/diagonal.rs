//! Ungapped comparison of a TFO against a TTS.
//!
//! Both motifs are compared in view order, so equal symbols mean the oligo can
//! bind the target at that position. Every diagonal with enough equal positions
//! is masked into a consensus and searched again with the window filter.

use super::alphabet::{is_purine, INTERRUPT};
use super::automaton::Automaton;
use super::filter::{find_windows, FilterParams, FilterScratch};
use super::motif::{possible_windows, Match, Motif, MotifPotential};
use super::options::Options;
use super::segment::{find_segments, Segment};
use std::collections::BTreeMap;

/// A motif together with its encoded view and the length of its host sequence.
#[derive(Debug, Clone, Copy)]
pub struct MotifView<'a> {
    pub motif: &'a Motif,
    pub view: &'a [u8],
    pub host_len: usize,
}

impl MotifView<'_> {
    /// Maps `[start, end)` of the view back onto the host sequence.
    fn to_host(&self, start: usize, end: usize) -> (usize, usize) {
        let motif = self.motif;
        if motif.class.is_reversed(motif.is_parallel) {
            let len = motif.len();
            (motif.begin + len - end, motif.begin + len - start)
        } else {
            (motif.begin + start, motif.begin + end)
        }
    }
}

pub struct DiagonalMatcher {
    automaton: Automaton,
    params: FilterParams,
    min_length: usize,
    max_length: Option<usize>,
    min_score: usize,
    consensus: Vec<u8>,
    segments: Vec<Segment>,
    scratch: FilterScratch,
}

impl DiagonalMatcher {
    pub fn new(options: &Options) -> Self {
        DiagonalMatcher {
            automaton: Automaton::triplex(options.max_interrupts),
            params: options.filter_params(),
            min_length: options.min_length.max(1),
            max_length: options.max_length,
            min_score: options.min_score(),
            consensus: Vec::new(),
            segments: Vec::new(),
            scratch: FilterScratch::new(),
        }
    }

    /// Normalisation of a TFO/TTS sequence pair: windows of the oligo times the
    /// windows of both target strands.
    pub fn pair_norm(&self, tfo_host_len: usize, tts_host_len: usize) -> f64 {
        possible_windows(tfo_host_len, self.min_length, self.max_length)
            * 2.0
            * possible_windows(tts_host_len, self.min_length, self.max_length)
    }

    /// Appends every triplex formed by `tfo` and `tts` to `matches` and returns
    /// how many were added. The pair's potential counts qualifying windows,
    /// suppressed ones included, and is only touched when a diagonal has any.
    pub fn match_pair(
        &mut self,
        tfo: &MotifView,
        tts: &MotifView,
        matches: &mut Vec<Match>,
        potentials: &mut BTreeMap<(usize, usize), MotifPotential>,
    ) -> usize {
        let tfo_len = tfo.view.len();
        let tts_len = tts.view.len();
        if tfo_len < self.min_length || tts_len < self.min_length {
            return 0;
        }

        let mut added = 0;
        let lowest = -((tts_len - self.min_length) as isize);
        let highest = (tfo_len - self.min_length) as isize;
        for diagonal in lowest..=highest {
            let tfo_offset = diagonal.max(0) as usize;
            let tts_offset = (-diagonal).max(0) as usize;
            let span = (tfo_len - tfo_offset).min(tts_len - tts_offset);
            let tfo_side = &tfo.view[tfo_offset..tfo_offset + span];
            let tts_side = &tts.view[tts_offset..tts_offset + span];

            let equal = tfo_side
                .iter()
                .zip(tts_side)
                .filter(|(a, b)| a == b && is_purine(**a))
                .count();
            if equal < self.min_score {
                continue;
            }

            self.consensus.clear();
            self.consensus
                .extend(tfo_side.iter().zip(tts_side).map(|(&a, &b)| {
                    if a == b && is_purine(a) {
                        b
                    } else {
                        INTERRUPT
                    }
                }));

            let before = matches.len();
            let found = self.match_diagonal(tfo, tts, diagonal, tfo_offset, tts_offset, matches);
            if found > 0 {
                let norm = self.pair_norm(tfo.host_len, tts.host_len);
                potentials
                    .entry((tfo.motif.seq_no, tts.motif.seq_no))
                    .or_insert_with(|| MotifPotential::new(norm))
                    .add(tfo.motif.class, found as u64);
            }
            added += matches.len() - before;
        }
        added
    }

    /// Searches the consensus of one diagonal as a target site. Returns the
    /// number of qualifying windows.
    fn match_diagonal(
        &mut self,
        tfo: &MotifView,
        tts: &MotifView,
        diagonal: isize,
        tfo_offset: usize,
        tts_offset: usize,
        matches: &mut Vec<Match>,
    ) -> usize {
        let mut found = 0;
        find_segments(
            &self.automaton,
            &self.consensus,
            tts.motif.seq_no,
            self.min_length,
            &mut self.segments,
        );
        for segment in &self.segments {
            let window = &self.consensus[segment.begin..segment.end];
            found += find_windows(
                window,
                tts.motif.class,
                tts.motif.is_parallel,
                &self.params,
                &mut self.scratch,
            );
            for hit in self.scratch.hits() {
                let start = segment.begin + hit.start;
                let end = segment.begin + hit.end;
                let (tfo_begin, tfo_end) = tfo.to_host(tfo_offset + start, tfo_offset + end);
                let (tts_begin, tts_end) = tts.to_host(tts_offset + start, tts_offset + end);
                matches.push(Match {
                    tfo_seq_no: tfo.motif.seq_no,
                    tfo_begin,
                    tfo_end,
                    tts_seq_no: tts.motif.seq_no,
                    tts_begin,
                    tts_end,
                    class: tfo.motif.class,
                    is_parallel: tfo.motif.is_parallel,
                    strand: tts.motif.strand(),
                    score: hit.score(),
                    errors: hit.errors,
                    guanines: hit.guanines,
                    diagonal,
                });
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::alphabet::{MotifClass, Strand};

    fn motif(seq_no: usize, begin: usize, end: usize, class: MotifClass, is_parallel: bool) -> Motif {
        Motif {
            seq_no,
            begin,
            end,
            class,
            is_parallel,
            score: end - begin,
            errors: 0,
            guanines: 0,
            duplicate_count: 0,
        }
    }

    fn exact_options(min_length: usize) -> Options {
        Options {
            min_length,
            error_rate: 0.0,
            min_guanine_rate: 0.0,
            max_interrupts: 0,
            ..Options::default()
        }
    }

    struct Pair {
        tfo: Motif,
        tfo_view: Vec<u8>,
        tfo_host_len: usize,
        tts: Motif,
        tts_view: Vec<u8>,
        tts_host_len: usize,
    }

    impl Pair {
        fn new(tfo_host: &[u8], tfo: Motif, tts_host: &[u8], tts: Motif) -> Self {
            let mut tfo_view = Vec::new();
            tfo.view_into(tfo_host, &mut tfo_view);
            let mut tts_view = Vec::new();
            tts.view_into(tts_host, &mut tts_view);
            Pair {
                tfo,
                tfo_view,
                tfo_host_len: tfo_host.len(),
                tts,
                tts_view,
                tts_host_len: tts_host.len(),
            }
        }

        fn run(&self, options: &Options) -> (Vec<Match>, BTreeMap<(usize, usize), MotifPotential>) {
            let mut matcher = DiagonalMatcher::new(options);
            let tfo = MotifView {
                motif: &self.tfo,
                view: &self.tfo_view,
                host_len: self.tfo_host_len,
            };
            let tts = MotifView {
                motif: &self.tts,
                view: &self.tts_view,
                host_len: self.tts_host_len,
            };
            let mut matches = Vec::new();
            let mut potentials = BTreeMap::new();
            let added = matcher.match_pair(&tfo, &tts, &mut matches, &mut potentials);
            assert_eq!(added, matches.len());
            (matches, potentials)
        }
    }

    #[test]
    fn identical_views_match_on_the_main_diagonal() {
        let tfo_host = b"CTCCTCCTTC";
        let tts_host = b"GAGGAGGAAG";
        let pair = Pair::new(
            tfo_host,
            motif(0, 0, 10, MotifClass::Pyrimidine, true),
            tts_host,
            motif(1, 0, 10, MotifClass::TtsForward, true),
        );
        let (matches, potentials) = pair.run(&exact_options(10));
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.tfo_begin, m.tfo_end), (0, 10));
        assert_eq!((m.tts_begin, m.tts_end), (0, 10));
        assert_eq!(m.score, 10);
        assert_eq!(m.guanines, 6);
        assert_eq!(m.diagonal, 0);
        assert_eq!(m.strand, Strand::Forward);

        // re-slicing both hosts gives the same view
        let mut tfo_view = Vec::new();
        MotifClass::Pyrimidine.view_into(&tfo_host[m.tfo_begin..m.tfo_end], true, &mut tfo_view);
        let mut tts_view = Vec::new();
        MotifClass::TtsForward.view_into(&tts_host[m.tts_begin..m.tts_end], true, &mut tts_view);
        assert_eq!(tfo_view, tts_view);

        let potential = &potentials[&(0, 1)];
        assert_eq!(potential.count(MotifClass::Pyrimidine), 1);
        // one window of length 10 per sequence, two target strands
        assert_eq!(potential.norm, 2.0);
    }

    #[test]
    fn purine_oligo_binds_run_inside_target() {
        let tfo_host = b"GGGGAAAAGGGGAAAAGGGG";
        let tts_host = b"CTCTCTAAAAGGGGAAAAGGGGTCTCTC";
        let pair = Pair::new(
            tfo_host,
            motif(0, 0, 20, MotifClass::Purine, false),
            tts_host,
            motif(0, 6, 22, MotifClass::TtsForward, true),
        );
        let options = Options {
            min_length: 16,
            error_rate: 0.0,
            min_guanine_rate: 0.4,
            max_guanine_rate: 1.0,
            max_interrupts: 1,
            ..Options::default()
        };
        let (matches, potentials) = pair.run(&options);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.tfo_begin, m.tfo_end), (0, 16));
        assert_eq!((m.tts_begin, m.tts_end), (6, 22));
        assert_eq!(m.score, 16);
        assert_eq!(m.guanines, 8);
        assert_eq!(m.errors, 0);
        assert_eq!(m.diagonal, 4);
        assert_eq!(m.class, MotifClass::Purine);
        assert!(!m.is_parallel);

        // 15 oligo windows times 2 * 91 target windows
        assert_eq!(potentials[&(0, 0)].norm, 2730.0);
        assert_eq!(potentials[&(0, 0)].total(), 1);
    }

    #[test]
    fn reversed_views_map_back_to_host_coordinates() {
        let tfo_host = b"GAGGAAGAGG";
        let tts_host = b"GGCTCCTTCT";
        let pair = Pair::new(
            tfo_host,
            motif(3, 0, 10, MotifClass::Purine, false),
            tts_host,
            motif(5, 2, 10, MotifClass::TtsReverse, true),
        );
        assert_eq!(pair.tts_view, b"AGAAGGAG");
        let (matches, _) = pair.run(&exact_options(8));
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.tfo_begin, m.tfo_end), (0, 8));
        assert_eq!((m.tts_begin, m.tts_end), (2, 10));
        assert_eq!(m.diagonal, 2);
        assert_eq!(m.strand, Strand::Reverse);
        assert_eq!(m.guanines, 4);
        assert_eq!((m.tfo_seq_no, m.tts_seq_no), (3, 5));
    }

    #[test]
    fn unrelated_pair_leaves_potentials_untouched() {
        let pair = Pair::new(
            b"GGGGGGGGGG",
            motif(0, 0, 10, MotifClass::Purine, false),
            b"AAAAAAAAAA",
            motif(0, 0, 10, MotifClass::TtsForward, true),
        );
        let (matches, potentials) = pair.run(&exact_options(8));
        assert!(matches.is_empty());
        assert!(potentials.is_empty());
    }

    #[test]
    fn short_motifs_are_skipped() {
        let pair = Pair::new(
            b"GAGAG",
            motif(0, 0, 5, MotifClass::Purine, false),
            b"GAGAGAGAGA",
            motif(0, 0, 10, MotifClass::TtsForward, true),
        );
        let (matches, potentials) = pair.run(&exact_options(8));
        assert!(matches.is_empty());
        assert!(potentials.is_empty());
    }

    #[test]
    fn mismatches_within_error_rate_are_tolerated() {
        // one mismatch in the middle of a 10-base overlap
        let pair = Pair::new(
            b"CTCCTTCTCC",
            motif(0, 0, 10, MotifClass::Pyrimidine, true),
            b"GAGGAGGAGG",
            motif(1, 0, 10, MotifClass::TtsForward, true),
        );
        let options = Options {
            min_length: 10,
            error_rate: 0.1,
            min_guanine_rate: 0.0,
            max_interrupts: 1,
            ..Options::default()
        };
        let (matches, _) = pair.run(&options);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].errors, 1);
        assert_eq!(matches[0].score, 9);
    }

    #[test]
    fn pair_potential_counts_suppressed_windows() {
        // both views read GGAAGAGGAGAAGGGAGAAA; only the main diagonal qualifies
        let pair = Pair::new(
            b"CCTTCTCCTCTTCCCTCTTT",
            motif(0, 0, 20, MotifClass::Pyrimidine, true),
            b"GGAAGAGGAGAAGGGAGAAA",
            motif(1, 0, 20, MotifClass::TtsForward, true),
        );
        let (matches, potentials) = pair.run(&exact_options(16));
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].tts_begin, matches[0].tts_end), (0, 20));
        // anchors 0 to 4 each qualify; only the first reaches past the others
        assert_eq!(potentials[&(0, 1)].count(MotifClass::Pyrimidine), 5);
    }

    #[test]
    fn consensus_is_filtered_as_target_site() {
        // antiparallel view: GGGGGGGGGGGAGAGAGAGA with a guanine rate of 0.75
        let pair = Pair::new(
            b"TGTGTGTGTGGGGGGGGGGG",
            motif(0, 0, 20, MotifClass::Mixed, false),
            b"GAGAGAGAGA",
            motif(1, 0, 10, MotifClass::TtsForward, true),
        );
        let options = Options {
            min_length: 10,
            error_rate: 0.0,
            mixed_antiparallel_min_guanine: 0.7,
            max_interrupts: 0,
            ..Options::default()
        };
        let (matches, potentials) = pair.run(&options);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!((m.tfo_begin, m.tfo_end), (0, 10));
        assert_eq!((m.tts_begin, m.tts_end), (0, 10));
        assert_eq!(m.diagonal, 10);
        assert_eq!(m.guanines, 5);
        assert_eq!(m.class, MotifClass::Mixed);
        assert!(!m.is_parallel);
        assert_eq!(potentials[&(0, 1)].count(MotifClass::Mixed), 1);
    }
}
