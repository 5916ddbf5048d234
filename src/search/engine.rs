//! Parallel drivers for the three search modes.
//!
//! Work is spread over the current rayon pool. Every worker folds its share into
//! a private accumulator holding its own automaton and scratch buffers; the
//! accumulators are merged pairwise once the units are done, so results do not
//! depend on the number of threads.

use super::alphabet::MotifClass;
use super::automaton::Automaton;
use super::diagonal::{DiagonalMatcher, MotifView};
use super::filter::{filter_motifs, FilterParams, FilterScratch};
use super::motif::{possible_windows, Match, Motif, MotifPotential};
use super::options::Options;
use super::segment::{find_segments, Segment};
use crate::utils::{Result, Sequence};
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Motifs of one search together with the per-sequence potentials.
#[derive(Debug, Default, Clone)]
pub struct MotifSearch {
    pub motifs: Vec<Motif>,
    pub potentials: BTreeMap<usize, MotifPotential>,
}

impl MotifSearch {
    pub fn merge(mut self, other: MotifSearch) -> MotifSearch {
        self.motifs.extend(other.motifs);
        for (seq_no, potential) in other.potentials {
            self.potentials
                .entry(seq_no)
                .and_modify(|existing| existing.merge(&potential))
                .or_insert(potential);
        }
        self
    }

    /// Orders motifs by sequence, then position.
    pub fn sort(&mut self) {
        self.motifs.sort_unstable();
    }
}

/// Triplexes of one search together with the per-pair potentials.
#[derive(Debug, Default, Clone)]
pub struct TriplexSearch {
    pub matches: Vec<Match>,
    pub potentials: BTreeMap<(usize, usize), MotifPotential>,
}

impl TriplexSearch {
    pub fn merge(mut self, other: TriplexSearch) -> TriplexSearch {
        self.matches.extend(other.matches);
        for (pair, potential) in other.potentials {
            self.potentials
                .entry(pair)
                .and_modify(|existing| existing.merge(&potential))
                .or_insert(potential);
        }
        self
    }

    pub fn sort(&mut self) {
        self.matches.sort_unstable();
    }
}

/// Sequences and the motifs found on them, with every motif's encoded view.
#[derive(Debug)]
pub struct MotifSource {
    sequences: Vec<Sequence>,
    motifs: Vec<Motif>,
    views: Vec<Vec<u8>>,
    host_index: HashMap<usize, usize>,
}

impl MotifSource {
    pub fn new(sequences: Vec<Sequence>, motifs: Vec<Motif>) -> Result<Self> {
        let host_index: HashMap<usize, usize> = sequences
            .iter()
            .enumerate()
            .map(|(index, sequence)| (sequence.id, index))
            .collect();
        let mut views = Vec::with_capacity(motifs.len());
        for motif in &motifs {
            let host = host_index
                .get(&motif.seq_no)
                .map(|&index| &sequences[index])
                .ok_or_else(|| format!("Motif refers to unknown sequence {}", motif.seq_no))?;
            if motif.end > host.len() {
                return Err(format!(
                    "Motif {}-{} exceeds sequence {} of length {}",
                    motif.begin,
                    motif.end,
                    host.name,
                    host.len()
                ));
            }
            let mut view = Vec::with_capacity(motif.len());
            motif.view_into(&host.bases, &mut view);
            views.push(view);
        }
        Ok(MotifSource {
            sequences,
            motifs,
            views,
            host_index,
        })
    }

    pub fn len(&self) -> usize {
        self.motifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motifs.is_empty()
    }

    pub fn host(&self, seq_no: usize) -> Option<&Sequence> {
        self.host_index
            .get(&seq_no)
            .map(|&index| &self.sequences[index])
    }

    fn motif_view(&self, index: usize) -> MotifView<'_> {
        let motif = &self.motifs[index];
        MotifView {
            motif,
            view: &self.views[index],
            host_len: self.host(motif.seq_no).map_or(0, |host| host.len()),
        }
    }
}

/// Per-worker state of a motif search.
struct MotifScanner {
    automaton: Automaton,
    params: FilterParams,
    reduce_set: bool,
    encoded: Vec<u8>,
    view: Vec<u8>,
    segments: Vec<Segment>,
    scratch: FilterScratch,
}

impl MotifScanner {
    fn new(options: &Options) -> Self {
        MotifScanner {
            automaton: Automaton::triplex(options.max_interrupts),
            params: options.filter_params(),
            reduce_set: options.reduce_set,
            encoded: Vec::new(),
            view: Vec::new(),
            segments: Vec::new(),
            scratch: FilterScratch::new(),
        }
    }

    /// Appends the motifs of one class and returns the number of qualifying
    /// windows, including those whose emission was suppressed.
    fn scan(&mut self, sequence: &Sequence, class: MotifClass, motifs: &mut Vec<Motif>) -> usize {
        let mut found = 0;
        class.encode_into(&sequence.bases, &mut self.encoded);
        find_segments(
            &self.automaton,
            &self.encoded,
            sequence.id,
            self.params.min_length,
            &mut self.segments,
        );
        for segment in &self.segments {
            for &is_parallel in class.orientations() {
                self.view.clear();
                self.view
                    .extend_from_slice(&self.encoded[segment.begin..segment.end]);
                if class.is_reversed(is_parallel) {
                    self.view.reverse();
                }
                found += filter_motifs(
                    &self.view,
                    &segment.with_orientation(is_parallel),
                    class,
                    &self.params,
                    self.reduce_set,
                    &mut self.scratch,
                    motifs,
                );
            }
        }
        found
    }
}

fn assert_valid(options: &Options) {
    if let Err(err) = options.validate() {
        panic!("Invalid search options: {}", err);
    }
}

fn find_motifs(
    sequences: &[Sequence],
    options: &Options,
    classes: &[MotifClass],
    strands: f64,
) -> MotifSearch {
    let mut by_length: Vec<&Sequence> = sequences.iter().collect();
    by_length.sort_by_key(|sequence| Reverse(sequence.len()));

    let mut search = by_length
        .into_par_iter()
        .with_max_len(1)
        .fold(
            || (MotifScanner::new(options), MotifSearch::default()),
            |(mut scanner, mut search), sequence| {
                let norm =
                    strands * possible_windows(sequence.len(), options.min_length, options.max_length);
                let mut potential = MotifPotential::new(norm);
                for &class in classes {
                    let found = scanner.scan(sequence, class, &mut search.motifs);
                    potential.add(class, found as u64);
                }
                search.potentials.insert(sequence.id, potential);
                (scanner, search)
            },
        )
        .map(|(_, search)| search)
        .reduce(MotifSearch::default, MotifSearch::merge);
    search.sort();
    search
}

pub fn find_tfo_motifs(sequences: &[Sequence], options: &Options) -> MotifSearch {
    assert_valid(options);
    let search = find_motifs(sequences, options, &options.tfo_classes, 1.0);
    log::debug!(
        "Found {} TFO motifs in {} sequences",
        search.motifs.len(),
        sequences.len()
    );
    search
}

pub fn find_tts_motifs(sequences: &[Sequence], options: &Options) -> MotifSearch {
    assert_valid(options);
    let search = find_motifs(sequences, options, &options.tts_classes, 2.0);
    log::debug!(
        "Found {} TTS motifs in {} sequences",
        search.motifs.len(),
        sequences.len()
    );
    search
}

/// Same result as `find_tts_motifs`, computed `options.chunk_size` sequences at
/// a time.
pub fn find_tts_motifs_chunked(sequences: &[Sequence], options: &Options) -> MotifSearch {
    assert_valid(options);
    let mut search = sequences
        .chunks(options.chunk_size)
        .enumerate()
        .map(|(chunk_no, chunk)| {
            log::trace!("TTS chunk {} with {} sequences", chunk_no, chunk.len());
            find_motifs(chunk, options, &options.tts_classes, 2.0)
        })
        .fold(MotifSearch::default(), MotifSearch::merge);
    search.sort();
    search
}

/// Matches every TFO motif against every TTS motif.
pub fn find_triplexes(tfo: &MotifSource, tts: &MotifSource, options: &Options) -> TriplexSearch {
    assert_valid(options);
    let tts_count = tts.len();
    let units = tfo.len() * tts_count;
    let min_len = tfo.len().min(tts_count).max(1);

    let mut search = (0..units)
        .into_par_iter()
        .with_min_len(min_len)
        .fold(
            || (DiagonalMatcher::new(options), TriplexSearch::default()),
            |(mut matcher, mut search), unit| {
                let (tfo_index, tts_index) = (unit / tts_count, unit % tts_count);
                matcher.match_pair(
                    &tfo.motif_view(tfo_index),
                    &tts.motif_view(tts_index),
                    &mut search.matches,
                    &mut search.potentials,
                );
                (matcher, search)
            },
        )
        .map(|(_, search)| search)
        .reduce(TriplexSearch::default, TriplexSearch::merge);
    search.sort();
    log::debug!(
        "Found {} triplexes between {} TFO and {} TTS motifs",
        search.matches.len(),
        tfo.len(),
        tts_count
    );
    search
}
