use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    pub log_level: CliLogLevel,

    #[command(subcommand)]
    pub command: CliCommands,
}

#[derive(Subcommand)]
pub enum CliCommands {
    /// Decode the most likely state sequence of each line of an observation file.
    Decode(DecodeCommand),

    /// Convert a textual model into the binary model format.
    Convert(ConvertCommand),

    /// Sample observation sequences from a model.
    Generate(GenerateCommand),
}

#[derive(Args)]
pub struct ModelInput {
    /// The model file.
    pub model: PathBuf,

    #[arg(long, value_enum, default_value_t = ModelFormat::Text)]
    pub model_format: ModelFormat,
}

#[derive(Args)]
pub struct DecodeCommand {
    #[command(flatten)]
    pub model_input: ModelInput,

    /// The observation file, one sequence per line.
    pub observations: PathBuf,

    /// Accumulate natural-log probabilities instead of multiplying probabilities.
    #[arg(long)]
    pub log_space: bool,

    /// What to do with an observation line that cannot be decoded.
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    pub on_error: OnError,

    /// Also print the score of each decoded path.
    #[arg(long)]
    pub print_score: bool,
}

#[derive(Args)]
pub struct ConvertCommand {
    /// The textual model file.
    pub model: PathBuf,

    /// Where to write the binary model.
    pub output: PathBuf,
}

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub model_input: ModelInput,

    /// The number of symbols per generated sequence.
    #[arg(long)]
    pub length: usize,

    /// The number of generated sequences.
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, default_value_t = 0)]
    pub random_seed: u64,

    /// Write the sampled hidden state paths to this file.
    #[arg(long)]
    pub state_output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModelFormat {
    /// The line-oriented textual format.
    Text,
    /// CBOR, as written by `convert`.
    Cbor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnError {
    /// Stop at the first failing line.
    Abort,
    /// Log a warning and continue with the next line.
    Skip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Off => LevelFilter::Off,
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, CliCommands, CliLogLevel, ModelFormat, OnError};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn decode_defaults() {
        let cli = Cli::try_parse_from(["hmmdec", "decode", "model.txt", "observations.txt"]).unwrap();
        assert_eq!(cli.log_level, CliLogLevel::Info);
        let CliCommands::Decode(decode) = cli.command else {
            panic!("expected the decode command");
        };
        assert_eq!(decode.model_input.model_format, ModelFormat::Text);
        assert!(!decode.log_space);
        assert_eq!(decode.on_error, OnError::Abort);
        assert!(!decode.print_score);
    }

    #[test]
    fn generate_options() {
        let cli = Cli::try_parse_from([
            "hmmdec",
            "generate",
            "model.cbor",
            "--model-format",
            "cbor",
            "--length",
            "12",
            "--count",
            "3",
            "--random-seed",
            "7",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, CliLogLevel::Debug);
        let CliCommands::Generate(generate) = cli.command else {
            panic!("expected the generate command");
        };
        assert_eq!(generate.model_input.model_format, ModelFormat::Cbor);
        assert_eq!(generate.length, 12);
        assert_eq!(generate.count, 3);
        assert_eq!(generate.random_seed, 7);
        assert!(generate.state_output.is_none());
    }
}
