use super::{
    index_sequences, initialize_thread_pool, mask_sequences, resolve_duplicates, search_options,
    write_motif_search,
};
use crate::cli::TtsArgs;
use crate::search::find_tts_motifs_chunked;
use crate::utils::{read_sequences, Result};

pub fn tts(args: TtsArgs) -> Result<()> {
    let options = search_options(&args.search, None, Some(args.chunk_size))?;

    let mut sequences = read_sequences(&args.duplex_path)?;
    log::info!(
        "Loaded {} duplex sequences from {}",
        sequences.len(),
        args.duplex_path.display()
    );
    mask_sequences(&mut sequences, &args.masking);

    let pool = initialize_thread_pool(args.output.num_threads)?;
    let mut search = pool.install(|| find_tts_motifs_chunked(&sequences, &options));
    log::info!("Found {} TTS motifs", search.motifs.len());

    let hosts = index_sequences(&sequences);
    resolve_duplicates(&mut search.motifs, &hosts, args.masking.duplicate_cutoff);
    write_motif_search(&args.output, "tts", &hosts, &search, &options.tts_classes)
}
