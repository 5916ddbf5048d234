mod masking;
mod output_format;
mod readers;
mod sequence;
mod util;

pub use masking::{find_tandem_repeats, mask_repeats, MASK_SYMBOL};
pub use output_format::OutputFormat;
pub use readers::{open_fasta_reader, read_sequences, stream_sequence_chunks_into_channel};
pub use sequence::Sequence;
pub use util::{create_writer, handle_error_and_exit, output_path, Result};
