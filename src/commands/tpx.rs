use super::{
    index_sequences, initialize_thread_pool, mask_sequences, resolve_duplicates, search_options,
};
use crate::cli::TpxArgs;
use crate::search::{find_tfo_motifs, find_triplexes, find_tts_motifs, MotifSource, Options};
use crate::utils::{
    create_writer, read_sequences, stream_sequence_chunks_into_channel, Result, Sequence,
};
use crate::writers::{SummaryWriter, TriplexWriter};
use crossbeam_channel::bounded;
use std::io::Write;
use std::thread;

const CHANNEL_BUFFER_SIZE: usize = 4;

pub fn tpx(args: TpxArgs) -> Result<()> {
    let options = search_options(
        &args.search,
        Some(args.motifs.0.as_slice()),
        Some(args.chunk_size),
    )?;
    let pool = initialize_thread_pool(args.output.num_threads)?;

    let mut tfo_sequences = read_sequences(&args.single_strand_path)?;
    log::info!(
        "Loaded {} single-stranded sequences from {}",
        tfo_sequences.len(),
        args.single_strand_path.display()
    );
    mask_sequences(&mut tfo_sequences, &args.masking);
    let mut tfo_search = pool.install(|| find_tfo_motifs(&tfo_sequences, &options));
    resolve_duplicates(
        &mut tfo_search.motifs,
        &index_sequences(&tfo_sequences),
        args.masking.duplicate_cutoff,
    );
    log::info!("Found {} TFO motifs", tfo_search.motifs.len());
    let tfo_source = MotifSource::new(tfo_sequences, tfo_search.motifs)?;

    let mut triplex_writer = TriplexWriter::new(
        create_writer(
            &args.output.output_prefix,
            &format!("tpx.{}", args.output.output_format.extension()),
        )?,
        args.output.output_format,
    )?;
    let mut summary_writer = SummaryWriter::new(
        create_writer(&args.output.output_prefix, "tpx.summary")?,
        &["TFO-ID", "TTS-ID"],
        &options.tfo_classes,
    )?;

    let (sender, receiver) = bounded(CHANNEL_BUFFER_SIZE);
    let duplex_path = args.duplex_path.clone();
    let chunk_size = options.chunk_size;
    let stream_thread = thread::spawn(move || {
        stream_sequence_chunks_into_channel(&duplex_path, chunk_size, sender);
    });

    let mut totals = (0, 0, 0);
    for (chunk_no, chunk) in receiver.iter().enumerate() {
        let mut chunk = chunk?;
        mask_sequences(&mut chunk, &args.masking);
        let (tts_count, triplex_count) = match_chunk(
            &pool,
            &tfo_source,
            chunk,
            &options,
            &mut triplex_writer,
            &mut summary_writer,
        )?;
        log::debug!(
            "Chunk {}: {} TTS motifs, {} triplexes",
            chunk_no,
            tts_count,
            triplex_count
        );
        totals = (totals.0 + 1, totals.1 + tts_count, totals.2 + triplex_count);
    }

    stream_thread
        .join()
        .map_err(|_| "Duplex stream thread panicked".to_string())?;
    log::trace!("Duplex stream thread finished");

    triplex_writer.finish()?;
    summary_writer.finish()?;
    log::info!(
        "Found {} triplexes with {} TTS motifs in {} chunks",
        totals.2,
        totals.1,
        totals.0
    );
    Ok(())
}

/// Searches one chunk of duplex sequences and writes its triplexes and pair
/// potentials. Returns the number of TTS motifs and triplexes found.
fn match_chunk<W: Write, S: Write>(
    pool: &rayon::ThreadPool,
    tfo_source: &MotifSource,
    chunk: Vec<Sequence>,
    options: &Options,
    triplex_writer: &mut TriplexWriter<W>,
    summary_writer: &mut SummaryWriter<S>,
) -> Result<(usize, usize)> {
    let tts_search = pool.install(|| find_tts_motifs(&chunk, options));
    let tts_source = MotifSource::new(chunk, tts_search.motifs)?;
    let triplexes = pool.install(|| find_triplexes(tfo_source, &tts_source, options));

    for triplex in &triplexes.matches {
        let (tfo_host, tts_host) =
            hosts(tfo_source, &tts_source, triplex.tfo_seq_no, triplex.tts_seq_no)?;
        triplex_writer.write(tfo_host, tts_host, triplex)?;
    }
    for ((tfo_seq_no, tts_seq_no), potential) in &triplexes.potentials {
        let (tfo_host, tts_host) = hosts(tfo_source, &tts_source, *tfo_seq_no, *tts_seq_no)?;
        summary_writer.write(&[tfo_host.name.as_str(), tts_host.name.as_str()], potential)?;
    }
    Ok((tts_source.len(), triplexes.matches.len()))
}

fn hosts<'a>(
    tfo_source: &'a MotifSource,
    tts_source: &'a MotifSource,
    tfo_seq_no: usize,
    tts_seq_no: usize,
) -> Result<(&'a Sequence, &'a Sequence)> {
    let tfo_host = tfo_source
        .host(tfo_seq_no)
        .ok_or_else(|| format!("Unknown single-stranded sequence {}", tfo_seq_no))?;
    let tts_host = tts_source
        .host(tts_seq_no)
        .ok_or_else(|| format!("Unknown duplex sequence {}", tts_seq_no))?;
    Ok((tfo_host, tts_host))
}
