mod write_motifs;
mod write_summary;
mod write_triplexes;

pub use write_motifs::MotifWriter;
pub use write_summary::SummaryWriter;
pub use write_triplexes::TriplexWriter;

use std::env;
use std::io::{self, Write};

/// Comment lines recording the program version and command line.
fn write_preamble<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "##{}Version={}",
        env!("CARGO_PKG_NAME"),
        *crate::cli::FULL_VERSION
    )?;
    let args: Vec<String> = env::args().collect();
    writeln!(writer, "##{}Command={}", env!("CARGO_PKG_NAME"), args.join(" "))
}

fn orientation_symbol(is_tfo: bool, is_parallel: bool) -> char {
    match (is_tfo, is_parallel) {
        (false, _) => '.',
        (true, true) => 'P',
        (true, false) => 'A',
    }
}
