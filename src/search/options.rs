use super::alphabet::{MotifClass, GUANINE, INTERRUPT};
use super::filter::{floor_fraction, FilterParams};
use crate::utils::Result;

/// Thresholds shared by every search mode.
#[derive(Debug, Clone)]
pub struct Options {
    pub min_length: usize,
    /// `None`, or a value below `min_length`, leaves the window length unbounded.
    pub max_length: Option<usize>,
    pub error_rate: f64,
    pub maximal_error: Option<usize>,
    /// Longest run of consecutive interruptions inside a segment.
    pub max_interrupts: usize,
    pub min_guanine_rate: f64,
    pub max_guanine_rate: f64,
    pub mixed_parallel_max_guanine: f64,
    pub mixed_antiparallel_min_guanine: f64,
    pub min_block_run: usize,
    pub all_matches: bool,
    /// Merge overlapping motifs of one segment into their span.
    pub reduce_set: bool,
    pub tfo_classes: Vec<MotifClass>,
    pub tts_classes: Vec<MotifClass>,
    /// Number of sequences processed per chunk in streamed searches.
    pub chunk_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            min_length: 16,
            max_length: Some(30),
            error_rate: 0.2,
            maximal_error: None,
            max_interrupts: 2,
            min_guanine_rate: 0.1,
            max_guanine_rate: 1.0,
            mixed_parallel_max_guanine: 1.0,
            mixed_antiparallel_min_guanine: 0.0,
            min_block_run: 1,
            all_matches: false,
            reduce_set: false,
            tfo_classes: MotifClass::TFO.to_vec(),
            tts_classes: MotifClass::TTS.to_vec(),
            chunk_size: 1000,
        }
    }
}

fn check_unit_rate(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be within [0, 1], got {}", name, value));
    }
    Ok(())
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            return Err("Minimum length must be at least 1".into());
        }
        check_unit_rate("Error rate", self.error_rate)?;
        check_unit_rate("Minimum guanine rate", self.min_guanine_rate)?;
        check_unit_rate("Maximum guanine rate", self.max_guanine_rate)?;
        check_unit_rate(
            "Mixed parallel maximum guanine rate",
            self.mixed_parallel_max_guanine,
        )?;
        check_unit_rate(
            "Mixed antiparallel minimum guanine rate",
            self.mixed_antiparallel_min_guanine,
        )?;
        if self.min_guanine_rate > self.max_guanine_rate {
            return Err(format!(
                "Minimum guanine rate {} exceeds the maximum guanine rate {}",
                self.min_guanine_rate, self.max_guanine_rate
            ));
        }
        if self.max_interrupts > 3 {
            return Err(format!(
                "Consecutive errors must be between 0 and 3, got {}",
                self.max_interrupts
            ));
        }
        if self.min_block_run == 0 {
            return Err("Minimum block run must be at least 1".into());
        }
        if self.chunk_size == 0 {
            return Err("Chunk size must be at least 1".into());
        }
        if let Some(class) = self.tfo_classes.iter().find(|class| !class.is_tfo()) {
            return Err(format!("{} is not a TFO motif class", class));
        }
        if let Some(class) = self.tts_classes.iter().find(|class| class.is_tfo()) {
            return Err(format!("{} is not a TTS motif class", class));
        }

        let errors = self.filter_params().allowed_errors(self.min_length);
        if self.min_block_run * (errors + 1) + errors > self.min_length {
            return Err(format!(
                "Minimum block run {} cannot be met by a motif of length {} with {} errors",
                self.min_block_run, self.min_length, errors
            ));
        }
        Ok(())
    }

    pub fn filter_params(&self) -> FilterParams {
        FilterParams {
            filter_char: GUANINE,
            interrupt_char: INTERRUPT,
            error_rate: self.error_rate,
            maximal_error: self.maximal_error,
            min_guanine_rate: self.min_guanine_rate,
            max_guanine_rate: self.max_guanine_rate,
            mixed_parallel_max_guanine: self.mixed_parallel_max_guanine,
            mixed_antiparallel_min_guanine: self.mixed_antiparallel_min_guanine,
            min_length: self.min_length,
            max_length: self.max_length,
            min_block_run: self.min_block_run,
            all_matches: self.all_matches,
        }
    }

    /// Fewest matching positions a diagonal of length `min_length` can have and
    /// still hold a triplex.
    pub fn min_score(&self) -> usize {
        floor_fraction(self.min_length, 1.0 - self.error_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn min_score_rounds_tolerated_errors_up() {
        let options = Options::default();
        // 16 - ceil(3.2)
        assert_eq!(options.min_score(), 12);
        let exact = Options {
            error_rate: 0.0,
            ..Options::default()
        };
        assert_eq!(exact.min_score(), 16);
        let quarter = Options {
            error_rate: 0.25,
            ..Options::default()
        };
        assert_eq!(quarter.min_score(), 12);
    }

    #[test]
    fn invalid_rates_are_rejected() {
        let options = Options {
            error_rate: 1.5,
            ..Options::default()
        };
        assert!(options.validate().is_err());
        let options = Options {
            min_guanine_rate: 0.8,
            max_guanine_rate: 0.5,
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn max_length_below_min_length_means_unbounded() {
        let options = Options {
            max_length: Some(10),
            ..Options::default()
        };
        assert!(options.validate().is_ok());
        assert_eq!(options.filter_params().effective_max_length(), usize::MAX);
    }

    #[test]
    fn degenerate_block_run_is_rejected() {
        // three errors at length 16 leave 13 bases for four blocks
        let options = Options {
            min_block_run: 4,
            ..Options::default()
        };
        assert!(options.validate().is_err());
        let options = Options {
            min_block_run: 3,
            ..Options::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn misplaced_classes_are_rejected() {
        let options = Options {
            tfo_classes: vec![MotifClass::Purine, MotifClass::TtsForward],
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }
}
