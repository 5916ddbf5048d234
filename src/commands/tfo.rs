use super::{
    index_sequences, initialize_thread_pool, mask_sequences, resolve_duplicates, search_options,
    write_motif_search,
};
use crate::cli::TfoArgs;
use crate::search::find_tfo_motifs;
use crate::utils::{read_sequences, Result};

pub fn tfo(args: TfoArgs) -> Result<()> {
    let options = search_options(&args.search, Some(args.motifs.0.as_slice()), None)?;

    let mut sequences = read_sequences(&args.single_strand_path)?;
    log::info!(
        "Loaded {} single-stranded sequences from {}",
        sequences.len(),
        args.single_strand_path.display()
    );
    mask_sequences(&mut sequences, &args.masking);

    let pool = initialize_thread_pool(args.output.num_threads)?;
    let mut search = pool.install(|| find_tfo_motifs(&sequences, &options));
    log::info!("Found {} TFO motifs", search.motifs.len());

    let hosts = index_sequences(&sequences);
    resolve_duplicates(&mut search.motifs, &hosts, args.masking.duplicate_cutoff);
    write_motif_search(&args.output, "tfo", &hosts, &search, &options.tfo_classes)
}
