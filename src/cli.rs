use crate::search::MotifClass;
use crate::utils::{OutputFormat, Result};
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="tpx",
          version=&**FULL_VERSION,
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) {}. This program comes with ABSOLUTELY NO WARRANTY.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Triplex-forming oligonucleotide search")]
    Tfo(TfoArgs),
    #[clap(about = "Triplex target site search")]
    Tts(TtsArgs),
    #[clap(about = "Triplex search between oligonucleotides and target sites")]
    Tpx(TpxArgs),
}

/// TFO motif classes selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfoMotifs(pub Vec<MotifClass>);

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[clap(help_heading("Motif"))]
    #[clap(short = 'l')]
    #[clap(long = "min-length")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Minimum motif length")]
    #[clap(default_value = "16")]
    #[arg(value_parser = length_at_least_one)]
    pub min_length: usize,

    #[clap(help_heading("Motif"))]
    #[clap(short = 'L')]
    #[clap(long = "max-length")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Maximum motif length (-1 for unbounded)")]
    #[clap(default_value = "30")]
    #[clap(allow_negative_numbers = true)]
    #[arg(value_parser = length_or_unbounded)]
    pub max_length: i64,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'e')]
    #[clap(long = "error-rate")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Maximum fraction of interrupted positions in a motif")]
    #[clap(default_value = "0.2")]
    #[arg(value_parser = ensure_unit_float)]
    pub error_rate: f64,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'E')]
    #[clap(long = "maximal-error")]
    #[clap(value_name = "ERRORS")]
    #[clap(help = "Maximum number of interrupted positions in a motif (-1 for unbounded)")]
    #[clap(default_value = "-1")]
    #[clap(allow_negative_numbers = true)]
    #[arg(value_parser = length_or_unbounded)]
    pub maximal_error: i64,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'c')]
    #[clap(long = "max-consecutive-errors")]
    #[clap(value_name = "ERRORS")]
    #[clap(help = "Maximum number of consecutive interrupted positions (0 to 3)")]
    #[clap(default_value = "2")]
    #[arg(value_parser = consecutive_errors_in_range)]
    pub max_interrupts: usize,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'g')]
    #[clap(long = "min-guanine")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Minimum guanine fraction of a motif")]
    #[clap(default_value = "0.1")]
    #[arg(value_parser = ensure_unit_float)]
    pub min_guanine_rate: f64,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'G')]
    #[clap(long = "max-guanine")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Maximum guanine fraction of a motif")]
    #[clap(default_value = "1.0")]
    #[arg(value_parser = ensure_unit_float)]
    pub max_guanine_rate: f64,

    #[clap(help_heading("Filtering"))]
    #[clap(long = "mixed-parallel-max-guanine")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Maximum guanine fraction of a parallel binding mixed motif")]
    #[clap(default_value = "1.0")]
    #[arg(value_parser = ensure_unit_float)]
    pub mixed_parallel_max_guanine: f64,

    #[clap(help_heading("Filtering"))]
    #[clap(long = "mixed-antiparallel-min-guanine")]
    #[clap(value_name = "RATE")]
    #[clap(help = "Minimum guanine fraction of an antiparallel binding mixed motif")]
    #[clap(default_value = "0.0")]
    #[arg(value_parser = ensure_unit_float)]
    pub mixed_antiparallel_min_guanine: f64,

    #[clap(help_heading("Filtering"))]
    #[clap(short = 'b')]
    #[clap(long = "min-block-run")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Minimum run of uninterrupted positions between errors")]
    #[clap(default_value = "1")]
    #[arg(value_parser = length_at_least_one)]
    pub min_block_run: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(short = 'a')]
    #[clap(long = "all-matches")]
    #[clap(help = "Report every qualifying window instead of the longest per start")]
    pub all_matches: bool,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "merge-features")]
    #[clap(help = "Merge overlapping motifs into their span")]
    pub merge_features: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MaskingArgs {
    #[clap(help_heading("Filtering"))]
    #[clap(long = "filter-repeats")]
    #[clap(help = "Mask low complexity tandem repeats before searching")]
    pub filter_repeats: bool,

    #[clap(help_heading("Filtering"))]
    #[clap(long = "min-repeat-length")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Minimum length of a masked repeat")]
    #[clap(default_value = "10")]
    #[arg(value_parser = length_at_least_one)]
    pub min_repeat_length: usize,

    #[clap(help_heading("Filtering"))]
    #[clap(long = "max-repeat-period")]
    #[clap(value_name = "PERIOD")]
    #[clap(help = "Maximum period of a masked repeat")]
    #[clap(default_value = "4")]
    #[arg(value_parser = length_at_least_one)]
    pub max_repeat_period: usize,

    #[clap(help_heading("Filtering"))]
    #[clap(long = "duplicate-cutoff")]
    #[clap(value_name = "COUNT")]
    #[clap(help = "Drop motifs with more duplicates than this")]
    pub duplicate_cutoff: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(long = "output-format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help = "Output format (tsv or bed)")]
    #[clap(default_value = "tsv")]
    pub output_format: OutputFormat,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("tfo")))]
#[command(arg_required_else_help(true))]
pub struct TfoArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "single-strand")]
    #[clap(help = "FASTA with single-stranded sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub single_strand_path: PathBuf,

    #[clap(help_heading("Motif"))]
    #[clap(long = "motifs")]
    #[clap(value_name = "MOTIFS")]
    #[clap(help = "TFO motif classes to search: R (purine), Y (pyrimidine), M (mixed)")]
    #[clap(default_value = "RYM")]
    #[arg(value_parser = tfo_motifs_from_string)]
    pub motifs: TfoMotifs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub masking: MaskingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("tts")))]
#[command(arg_required_else_help(true))]
pub struct TtsArgs {
    #[clap(required = true)]
    #[clap(short = 'd')]
    #[clap(long = "duplex")]
    #[clap(help = "FASTA with double-stranded sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub duplex_path: PathBuf,

    #[clap(help_heading("Motif"))]
    #[clap(long = "chunk-size")]
    #[clap(value_name = "SEQUENCES")]
    #[clap(help = "Number of duplex sequences searched at a time")]
    #[clap(default_value = "1000")]
    #[arg(value_parser = length_at_least_one)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub masking: MaskingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("tpx")))]
#[command(arg_required_else_help(true))]
pub struct TpxArgs {
    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "single-strand")]
    #[clap(help = "FASTA with single-stranded sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub single_strand_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'd')]
    #[clap(long = "duplex")]
    #[clap(help = "FASTA with double-stranded sequences")]
    #[clap(value_name = "FASTA")]
    #[arg(value_parser = check_file_exists)]
    pub duplex_path: PathBuf,

    #[clap(help_heading("Motif"))]
    #[clap(long = "motifs")]
    #[clap(value_name = "MOTIFS")]
    #[clap(help = "TFO motif classes to search: R (purine), Y (pyrimidine), M (mixed)")]
    #[clap(default_value = "RYM")]
    #[arg(value_parser = tfo_motifs_from_string)]
    pub motifs: TfoMotifs,

    #[clap(help_heading("Triplex"))]
    #[clap(long = "chunk-size")]
    #[clap(value_name = "SEQUENCES")]
    #[clap(help = "Number of duplex sequences matched at a time")]
    #[clap(default_value = "1000")]
    #[arg(value_parser = length_at_least_one)]
    pub chunk_size: usize,

    #[command(flatten)]
    pub search: SearchArgs,

    #[command(flatten)]
    pub masking: MaskingArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn ensure_unit_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "The value must be between 0.0 and 1.0, got: {}",
            value
        ))
    } else {
        Ok(value)
    }
}

fn length_at_least_one(s: &str) -> Result<usize> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid length", s))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("The value must be at least 1".into())
    }
}

fn length_or_unbounded(s: &str) -> Result<i64> {
    let value: i64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number", s))?;
    if value >= -1 {
        Ok(value)
    } else {
        Err(format!("The value must be -1 (unbounded) or non-negative, got: {}", value))
    }
}

fn consecutive_errors_in_range(s: &str) -> Result<usize> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid number of errors", s))?;
    if value <= 3 {
        Ok(value)
    } else {
        Err(format!("Consecutive errors must be between 0 and 3, got: {}", value))
    }
}

fn tfo_motifs_from_string(s: &str) -> Result<TfoMotifs> {
    let mut classes = Vec::new();
    for symbol in s.chars() {
        match MotifClass::from_symbol(symbol) {
            Some(class) if class.is_tfo() => {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
            _ => return Err(format!("Invalid TFO motif `{}` in {}; use R, Y or M", symbol, s)),
        }
    }
    if classes.is_empty() {
        return Err("At least one TFO motif class is required".into());
    }
    Ok(TfoMotifs(classes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tfo_motifs_parse_in_given_order() {
        let motifs = tfo_motifs_from_string("mr").unwrap();
        assert_eq!(motifs.0, vec![MotifClass::Mixed, MotifClass::Purine]);
        assert_eq!(tfo_motifs_from_string("RRY").unwrap().0.len(), 2);
    }

    #[test]
    fn tts_symbols_are_not_tfo_motifs() {
        assert!(tfo_motifs_from_string("R+").is_err());
        assert!(tfo_motifs_from_string("").is_err());
    }

    #[test]
    fn negative_one_means_unbounded() {
        assert_eq!(length_or_unbounded("-1"), Ok(-1));
        assert_eq!(length_or_unbounded("25"), Ok(25));
        assert!(length_or_unbounded("-2").is_err());
    }

    #[test]
    fn consecutive_errors_are_bounded() {
        assert_eq!(consecutive_errors_in_range("3"), Ok(3));
        assert!(consecutive_errors_in_range("4").is_err());
    }

    #[test]
    fn cli_parses_triplex_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("seqs.fa");
        std::fs::write(&fasta, ">a\nGAGA\n").unwrap();
        let fasta = fasta.to_str().unwrap();
        let prefix = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "tpx",
            "-vv",
            "tpx",
            "-s",
            fasta,
            "-d",
            fasta,
            "-o",
            prefix.to_str().unwrap(),
            "-L",
            "-1",
            "--motifs",
            "RY",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Command::Tpx(args) => {
                assert_eq!(args.search.max_length, -1);
                assert_eq!(args.search.min_length, 16);
                assert_eq!(args.motifs.0, vec![MotifClass::Purine, MotifClass::Pyrimidine]);
                assert_eq!(args.chunk_size, 1000);
                assert_eq!(args.output.output_format, OutputFormat::Tsv);
            }
            _ => panic!("expected the tpx subcommand"),
        }
    }

    #[test]
    fn cli_parses_target_site_chunk_size() {
        let dir = tempfile::tempdir().unwrap();
        let fasta = dir.path().join("duplex.fa");
        std::fs::write(&fasta, ">a\nGAGA\n").unwrap();
        let prefix = dir.path().join("out");
        let cli = Cli::try_parse_from([
            "tpx",
            "tts",
            "-d",
            fasta.to_str().unwrap(),
            "-o",
            prefix.to_str().unwrap(),
            "--chunk-size",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::Tts(args) => assert_eq!(args.chunk_size, 5),
            _ => panic!("expected the tts subcommand"),
        }
        assert!(Cli::try_parse_from([
            "tpx",
            "tts",
            "-d",
            fasta.to_str().unwrap(),
            "-o",
            prefix.to_str().unwrap(),
            "--chunk-size",
            "0",
        ])
        .is_err());
    }
}
