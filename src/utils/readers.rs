use super::{Result, Sequence};
use bio::io::fasta;
use crossbeam_channel::Sender;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

pub type FastaReader = fasta::Reader<BufReader<Box<dyn ioRead>>>;

pub fn open_fasta_reader(path: &Path) -> Result<FastaReader> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let reader: Box<dyn ioRead> = if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_none() {
            return Err(format!("Invalid gzip header: {}", path.to_string_lossy()));
        }
        Box::new(gz_decoder)
    } else {
        Box::new(file)
    };
    Ok(fasta::Reader::new(reader))
}

/// Loads every record of a FASTA file; ids are 0-based record ordinals.
pub fn read_sequences(path: &Path) -> Result<Vec<Sequence>> {
    let reader = open_fasta_reader(path)?;
    reader
        .records()
        .enumerate()
        .map(|(id, record)| {
            record
                .map(|record| Sequence::new(id, record.id(), record.seq()))
                .map_err(|e| format!("Error at FASTA record {}: {}", id + 1, e))
        })
        .collect()
}

/// Streams a FASTA file as chunks of at most `chunk_size` sequences. Stops at the
/// first parse error, which is sent as the last item.
pub fn stream_sequence_chunks_into_channel(
    path: &Path,
    chunk_size: usize,
    sender: Sender<Result<Vec<Sequence>>>,
) {
    let reader = match open_fasta_reader(path) {
        Ok(reader) => reader,
        Err(err) => {
            let _ = sender.send(Err(err));
            return;
        }
    };

    let chunk_size = chunk_size.max(1);
    let mut chunk = Vec::with_capacity(chunk_size);
    for (id, result_record) in reader.records().enumerate() {
        let record = match result_record {
            Ok(record) => record,
            Err(err) => {
                let error = format!("Error at FASTA record {}: {}", id + 1, err);
                let _ = sender.send(Err(error));
                return;
            }
        };
        chunk.push(Sequence::new(id, record.id(), record.seq()));
        if chunk.len() == chunk_size {
            let full = std::mem::replace(&mut chunk, Vec::with_capacity(chunk_size));
            if sender.send(Ok(full)).is_err() {
                log::debug!("Sequence chunk receiver closed early");
                return;
            }
        }
    }
    if !chunk.is_empty() {
        let _ = sender.send(Ok(chunk));
    }
}
