use super::alphabet::MotifClass;
use super::motif::Motif;
use std::collections::HashMap;

/// Sets `duplicate_count` of every motif to the number of other motifs of the
/// same class whose encoded view is identical. `host` resolves a sequence
/// number to its bases.
pub fn count_duplicates<'a, F>(motifs: &mut [Motif], host: F)
where
    F: Fn(usize) -> &'a [u8],
{
    let mut view = Vec::new();
    let keys: Vec<(MotifClass, Vec<u8>)> = motifs
        .iter()
        .map(|motif| {
            motif.view_into(host(motif.seq_no), &mut view);
            (motif.class, view.clone())
        })
        .collect();

    let mut counts: HashMap<&(MotifClass, Vec<u8>), usize> = HashMap::new();
    for key in &keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    for (motif, key) in motifs.iter_mut().zip(&keys) {
        motif.duplicate_count = counts[key] - 1;
    }
}

/// Removes motifs with more than `cutoff` duplicates; returns how many went.
pub fn drop_duplicates(motifs: &mut Vec<Motif>, cutoff: usize) -> usize {
    let before = motifs.len();
    motifs.retain(|motif| motif.duplicate_count <= cutoff);
    before - motifs.len()
}
