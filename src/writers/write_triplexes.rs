//! Defines the `TriplexWriter` struct for writing TFO/TTS matches.
//!
use super::{orientation_symbol, write_preamble};
use crate::search::Match;
use crate::utils::{OutputFormat, Result, Sequence};
use std::io::Write;

const TSV_HEADER: &str = "#TFO-ID\tTFO-start\tTFO-end\tTTS-ID\tTTS-start\tTTS-end\tScore\tErrors\tGuanines\tMotif\tStrand\tOrientation\tDiagonal";

/// Structure for writing triplexes as TSV records or as BED records on the target.
pub struct TriplexWriter<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> TriplexWriter<W> {
    /// Constructs a new `TriplexWriter` and writes the header when the format has one.
    ///
    /// # Arguments
    /// * `writer` - Destination of the records.
    /// * `format` - Output format of the records.
    pub fn new(mut writer: W, format: OutputFormat) -> Result<TriplexWriter<W>> {
        if format == OutputFormat::Tsv {
            write_preamble(&mut writer)
                .and_then(|_| writeln!(writer, "{}", TSV_HEADER))
                .map_err(|e| format!("Failed to write triplex header: {}", e))?;
        }
        Ok(TriplexWriter { writer, format })
    }

    /// Writes one triplex.
    ///
    /// # Arguments
    /// * `tfo_host` - Sequence holding the oligo.
    /// * `tts_host` - Sequence holding the target.
    /// * `triplex` - The match between both.
    pub fn write(&mut self, tfo_host: &Sequence, tts_host: &Sequence, triplex: &Match) -> Result<()> {
        let result = match self.format {
            OutputFormat::Tsv => writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                tfo_host.name,
                triplex.tfo_begin,
                triplex.tfo_end,
                tts_host.name,
                triplex.tts_begin,
                triplex.tts_end,
                triplex.score,
                triplex.errors,
                triplex.guanines,
                triplex.class,
                triplex.strand.symbol(),
                orientation_symbol(true, triplex.is_parallel),
                triplex.diagonal
            ),
            OutputFormat::Bed => writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}",
                tts_host.name,
                triplex.tts_begin,
                triplex.tts_end,
                tfo_host.name,
                triplex.score,
                triplex.strand.symbol()
            ),
        };
        result.map_err(|e| {
            format!(
                "Failed to write triplex {} / {}: {}",
                tfo_host.name, tts_host.name, e
            )
        })
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush triplexes: {}", e))?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MotifClass, Strand};

    fn triplex() -> Match {
        Match {
            tfo_seq_no: 0,
            tfo_begin: 0,
            tfo_end: 16,
            tts_seq_no: 1,
            tts_begin: 6,
            tts_end: 22,
            class: MotifClass::Purine,
            is_parallel: false,
            strand: Strand::Reverse,
            score: 15,
            errors: 1,
            guanines: 8,
            diagonal: -4,
        }
    }

    fn written(format: OutputFormat) -> Vec<String> {
        let oligo = Sequence::new(0, "oligo", b"GA");
        let target = Sequence::new(1, "chr2", b"GA");
        let mut writer = TriplexWriter::new(Vec::new(), format).unwrap();
        writer.write(&oligo, &target, &triplex()).unwrap();
        String::from_utf8(writer.finish().unwrap())
            .unwrap()
            .lines()
            .filter(|line| !line.starts_with("##"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn tsv_record_lists_both_ranges() {
        let lines = written(OutputFormat::Tsv);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], TSV_HEADER);
        assert_eq!(lines[1], "oligo\t0\t16\tchr2\t6\t22\t15\t1\t8\tR\t-\tA\t-4");
    }

    #[test]
    fn bed_record_sits_on_the_target() {
        assert_eq!(written(OutputFormat::Bed), vec!["chr2\t6\t22\toligo\t15\t-"]);
    }
}
