mod alphabet;
mod automaton;
mod block_run;
mod cluster;
mod diagonal;
mod duplicates;
mod engine;
mod filter;
mod motif;
mod options;
mod segment;

pub use alphabet::{is_purine, MotifClass, Strand, GUANINE, INTERRUPT, UNKNOWN};
pub use automaton::Automaton;
pub use block_run::BlockRunTable;
pub use cluster::reduce_overlapping;
pub use diagonal::{DiagonalMatcher, MotifView};
pub use duplicates::{count_duplicates, drop_duplicates};
pub use engine::{
    find_tfo_motifs, find_triplexes, find_tts_motifs, find_tts_motifs_chunked, MotifSearch,
    MotifSource, TriplexSearch,
};
pub use filter::{filter_motifs, find_windows, FilterParams, FilterScratch, Hit};
pub use motif::{possible_windows, Match, Motif, MotifPotential};
pub use options::Options;
pub use segment::{find_segments, Segment};
