//! Defines the `MotifWriter` struct for writing TFO and TTS motifs.
//!
use super::{orientation_symbol, write_preamble};
use crate::search::Motif;
use crate::utils::{OutputFormat, Result, Sequence};
use std::io::Write;

const TSV_HEADER: &str =
    "#SeqID\tStart\tEnd\tScore\tMotif\tStrand\tOrientation\tErrors\tGuanines\tDuplicates\tSequence";

/// Structure for writing motifs as TSV or BED records.
pub struct MotifWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> MotifWriter<W> {
    /// Constructs a new `MotifWriter` and writes the header when the format has one.
    ///
    /// # Arguments
    /// * `writer` - Destination of the records.
    /// * `format` - Output format of the records.
    pub fn new(mut writer: W, format: OutputFormat) -> Result<MotifWriter<W>> {
        if format == OutputFormat::Tsv {
            write_preamble(&mut writer)
                .and_then(|_| writeln!(writer, "{}", TSV_HEADER))
                .map_err(|e| format!("Failed to write motif header: {}", e))?;
        }
        Ok(MotifWriter { writer, format })
    }

    /// Writes one motif.
    ///
    /// # Arguments
    /// * `host` - Sequence the motif was found on.
    /// * `motif` - The motif, in coordinates of `host`.
    pub fn write(&mut self, host: &Sequence, motif: &Motif) -> Result<()> {
        let result = match self.format {
            OutputFormat::Tsv => writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                host.name,
                motif.begin,
                motif.end,
                motif.score,
                motif.class,
                motif.strand().symbol(),
                orientation_symbol(motif.is_tfo(), motif.is_parallel),
                motif.errors,
                motif.guanines,
                motif.duplicate_count,
                String::from_utf8_lossy(&host.bases[motif.begin..motif.end])
            ),
            OutputFormat::Bed => writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                host.name,
                motif.begin,
                motif.end,
                Self::bed_name(motif),
                motif.score,
                motif.strand().symbol()
            ),
        };
        result.map_err(|e| format!("Failed to write motif on {}: {}", host.name, e))
    }

    fn bed_name(motif: &Motif) -> String {
        if motif.is_tfo() {
            format!(
                "{}{}",
                motif.class,
                orientation_symbol(true, motif.is_parallel)
            )
        } else {
            "TTS".to_string()
        }
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush motifs: {}", e))?;
        Ok(self.writer)
    }
}
