//! Tandem repeat masking applied to sequences before the motif search.
//!
//! Masked bases are rewritten to `N`, which none of the motif alphabets accept,
//! so a masked stretch always terminates a segment.

pub const MASK_SYMBOL: u8 = b'N';

fn same_base(a: u8, b: u8) -> bool {
    a.eq_ignore_ascii_case(&b) && !a.eq_ignore_ascii_case(&MASK_SYMBOL)
}

/// Returns merged `[start, end)` ranges covered by tandem runs of period
/// `1..=max_repeat_period` that span at least `min_repeat_length` bases.
pub fn find_tandem_repeats(
    bases: &[u8],
    min_repeat_length: usize,
    max_repeat_period: usize,
) -> Vec<(usize, usize)> {
    let mut regions = Vec::new();
    if min_repeat_length == 0 {
        return regions;
    }

    for period in 1..=max_repeat_period.min(bases.len()) {
        let mut i = period;
        while i < bases.len() {
            if !same_base(bases[i], bases[i - period]) {
                i += 1;
                continue;
            }
            let run_start = i - period;
            let mut run_end = i + 1;
            while run_end < bases.len() && same_base(bases[run_end], bases[run_end - period]) {
                run_end += 1;
            }
            if run_end - run_start >= min_repeat_length {
                regions.push((run_start, run_end));
            }
            i = run_end;
        }
    }

    regions.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(regions.len());
    for (start, end) in regions {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Masks tandem repeats in place and returns the number of masked bases.
pub fn mask_repeats(bases: &mut [u8], min_repeat_length: usize, max_repeat_period: usize) -> usize {
    let regions = find_tandem_repeats(bases, min_repeat_length, max_repeat_period);
    let mut masked = 0;
    for (start, end) in regions {
        bases[start..end].fill(MASK_SYMBOL);
        masked += end - start;
    }
    masked
}
