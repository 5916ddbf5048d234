//! Defines the `SummaryWriter` struct for writing motif potentials.
//!
use crate::search::{MotifClass, MotifPotential};
use crate::utils::Result;
use itertools::Itertools;
use std::io::Write;

/// Writes one row per sequence (or sequence pair) with its motif counts, the
/// normalisation and the resulting potential.
pub struct SummaryWriter<W: Write> {
    writer: W,
    classes: Vec<MotifClass>,
}

impl<W: Write> SummaryWriter<W> {
    /// Constructs a new `SummaryWriter` and writes its header.
    ///
    /// # Arguments
    /// * `writer` - Destination of the rows.
    /// * `id_columns` - Names of the leading identifier columns.
    /// * `classes` - Motif classes reported, one count column each.
    pub fn new(
        mut writer: W,
        id_columns: &[&str],
        classes: &[MotifClass],
    ) -> Result<SummaryWriter<W>> {
        let header = id_columns
            .iter()
            .map(|column| column.to_string())
            .chain(classes.iter().map(|class| class.to_string()))
            .chain(["Total", "Norm", "Potential"].map(str::to_string))
            .join("\t");
        writeln!(writer, "#{}", header).map_err(|e| format!("Failed to write summary header: {}", e))?;
        Ok(SummaryWriter {
            writer,
            classes: classes.to_vec(),
        })
    }

    pub fn write(&mut self, ids: &[&str], potential: &MotifPotential) -> Result<()> {
        let counts = self
            .classes
            .iter()
            .map(|&class| potential.count(class))
            .join("\t");
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}\t{:.6e}",
            ids.join("\t"),
            counts,
            potential.total(),
            potential.norm,
            potential.overall()
        )
        .map_err(|e| format!("Failed to write summary of {}: {}", ids.join("/"), e))
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer
            .flush()
            .map_err(|e| format!("Failed to flush summary: {}", e))?;
        Ok(self.writer)
    }
}
