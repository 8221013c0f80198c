use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Chromatogram table to open (.tsv, .csv, .json or .parquet)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// JSON file with viewer settings
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum relative intensity at the apex (inclusive)
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Show every transition regardless of relative intensity
    #[arg(long)]
    pub no_filter: bool,

    /// Overlay the total intensity curve
    #[arg(long)]
    pub show_tic: bool,

    /// Print the apex summary to stdout instead of opening the viewer
    #[arg(long, requires = "file")]
    pub report: bool,

    /// Increase logging verbosity (can be repeated: -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Decrease logging verbosity (can be repeated: -q for warn, -qq for error)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    /// Log level implied by `-v` / `-q`, starting from `info`.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose as i16 - self.quiet as i16 {
            i16::MIN..=-2 => log::LevelFilter::Error,
            -1 => log::LevelFilter::Warn,
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_shift_level() {
        assert_eq!(Cli::parse_from(["x"]).log_level(), log::LevelFilter::Info);
        assert_eq!(Cli::parse_from(["x", "-vv"]).log_level(), log::LevelFilter::Trace);
        assert_eq!(Cli::parse_from(["x", "-q"]).log_level(), log::LevelFilter::Warn);
        assert_eq!(Cli::parse_from(["x", "-qqq"]).log_level(), log::LevelFilter::Error);
    }

    #[test]
    fn report_requires_a_file() {
        assert!(Cli::try_parse_from(["x", "--report"]).is_err());
        let cli = Cli::try_parse_from(["x", "data.tsv", "--report", "-t", "0.2"]).unwrap();
        assert!(cli.report);
        assert_eq!(cli.threshold, Some(0.2));
    }
}
