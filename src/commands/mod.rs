pub mod tfo;
pub mod tpx;
pub mod tts;

use crate::cli::{MaskingArgs, OutputArgs, SearchArgs};
use crate::search::{count_duplicates, drop_duplicates, Motif, MotifClass, MotifSearch, Options};
use crate::utils::{create_writer, mask_repeats, Result, Sequence};
use crate::writers::{MotifWriter, SummaryWriter};
use rayon::ThreadPoolBuilder;
use std::collections::HashMap;

fn unbounded_if_negative(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}

/// Builds the search options from the shared arguments. Modes that do not search
/// TFOs or do not chunk keep the defaults for those settings.
pub(crate) fn search_options(
    args: &SearchArgs,
    tfo_classes: Option<&[MotifClass]>,
    chunk_size: Option<usize>,
) -> Result<Options> {
    let defaults = Options::default();
    let options = Options {
        min_length: args.min_length,
        max_length: unbounded_if_negative(args.max_length),
        error_rate: args.error_rate,
        maximal_error: unbounded_if_negative(args.maximal_error),
        max_interrupts: args.max_interrupts,
        min_guanine_rate: args.min_guanine_rate,
        max_guanine_rate: args.max_guanine_rate,
        mixed_parallel_max_guanine: args.mixed_parallel_max_guanine,
        mixed_antiparallel_min_guanine: args.mixed_antiparallel_min_guanine,
        min_block_run: args.min_block_run,
        all_matches: args.all_matches,
        reduce_set: args.merge_features,
        tfo_classes: tfo_classes.map_or(defaults.tfo_classes, |classes| classes.to_vec()),
        tts_classes: defaults.tts_classes,
        chunk_size: chunk_size.unwrap_or(defaults.chunk_size),
    };
    options.validate()?;
    Ok(options)
}

pub(crate) fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    log::debug!("Initializing thread pool with {} threads...", num_threads);
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("tpx-{}", i))
        .start_handler(|_thread_index| {
            log::trace!("Initialized thread {:?}", std::thread::current().id());
        })
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}

pub(crate) fn mask_sequences(sequences: &mut [Sequence], masking: &MaskingArgs) {
    if !masking.filter_repeats {
        return;
    }
    let masked: usize = sequences
        .iter_mut()
        .map(|sequence| {
            mask_repeats(
                &mut sequence.bases,
                masking.min_repeat_length,
                masking.max_repeat_period,
            )
        })
        .sum();
    log::debug!(
        "Masked {} bases of low complexity in {} sequences",
        masked,
        sequences.len()
    );
}

pub(crate) fn index_sequences(sequences: &[Sequence]) -> HashMap<usize, &Sequence> {
    sequences
        .iter()
        .map(|sequence| (sequence.id, sequence))
        .collect()
}

pub(crate) fn lookup<'a>(sequences: &HashMap<usize, &'a Sequence>, seq_no: usize) -> Result<&'a Sequence> {
    sequences
        .get(&seq_no)
        .copied()
        .ok_or_else(|| format!("Unknown sequence number {}", seq_no))
}

/// Fills in duplicate counts and applies the cutoff, if any.
pub(crate) fn resolve_duplicates(
    motifs: &mut Vec<Motif>,
    sequences: &HashMap<usize, &Sequence>,
    cutoff: Option<usize>,
) {
    count_duplicates(motifs, |seq_no| sequences[&seq_no].bases.as_slice());
    if let Some(cutoff) = cutoff {
        let dropped = drop_duplicates(motifs, cutoff);
        log::info!(
            "Dropped {} motifs with more than {} duplicates",
            dropped,
            cutoff
        );
    }
}

/// Writes `<prefix>.<mode>.<ext>` with the motifs and `<prefix>.<mode>.summary`
/// with the potential of every sequence.
pub(crate) fn write_motif_search(
    output: &OutputArgs,
    mode: &str,
    sequences: &HashMap<usize, &Sequence>,
    search: &MotifSearch,
    classes: &[MotifClass],
) -> Result<()> {
    let suffix = format!("{}.{}", mode, output.output_format.extension());
    let mut motif_writer = MotifWriter::new(
        create_writer(&output.output_prefix, &suffix)?,
        output.output_format,
    )?;
    for motif in &search.motifs {
        motif_writer.write(lookup(sequences, motif.seq_no)?, motif)?;
    }
    motif_writer.finish()?;

    let mut summary_writer = SummaryWriter::new(
        create_writer(&output.output_prefix, &format!("{}.summary", mode))?,
        &["SeqID"],
        classes,
    )?;
    for (seq_no, potential) in &search.potentials {
        let host = lookup(sequences, *seq_no)?;
        summary_writer.write(&[host.name.as_str()], potential)?;
    }
    summary_writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        search: SearchArgs,
    }

    #[test]
    fn cli_defaults_form_valid_options() {
        let wrapper = Wrapper::parse_from(["tpx", "-L", "-1"]);
        let options = search_options(&wrapper.search, None, None).unwrap();
        assert_eq!(options.min_length, 16);
        assert_eq!(options.max_length, None);
        assert_eq!(options.maximal_error, None);
        assert_eq!(options.tts_classes, MotifClass::TTS.to_vec());
    }

    #[test]
    fn degenerate_cli_options_are_rejected() {
        let wrapper = Wrapper::parse_from(["tpx", "-b", "8"]);
        assert!(search_options(&wrapper.search, None, None).is_err());
    }

    #[test]
    fn mode_settings_override_defaults() {
        let wrapper = Wrapper::parse_from(["tpx"]);
        let options =
            search_options(&wrapper.search, Some(&[MotifClass::Mixed][..]), Some(7)).unwrap();
        assert_eq!(options.tfo_classes, vec![MotifClass::Mixed]);
        assert_eq!(options.chunk_size, 7);

        let options = search_options(&wrapper.search, None, None).unwrap();
        assert_eq!(options.tfo_classes, MotifClass::TFO.to_vec());
        assert_eq!(options.chunk_size, Options::default().chunk_size);
    }

    #[test]
    fn masking_is_opt_in() {
        let mut sequences = vec![Sequence::new(0, "a", b"GAGAGAGAGAGAGAGA")];
        let mut masking = MaskingArgs {
            filter_repeats: false,
            min_repeat_length: 10,
            max_repeat_period: 4,
            duplicate_cutoff: None,
        };
        mask_sequences(&mut sequences, &masking);
        assert_eq!(sequences[0].bases, b"GAGAGAGAGAGAGAGA");
        masking.filter_repeats = true;
        mask_sequences(&mut sequences, &masking);
        assert_eq!(sequences[0].bases, b"NNNNNNNNNNNNNNNN");
    }
}
