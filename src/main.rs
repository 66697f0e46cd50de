use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};

use crate::error::{Error, Result};
use choose_probability_space::{call, ChooseProbabilitySpace};
use clap::Parser;
use cli::{
    Cli, CliCommands, ConvertCommand, DecodeCommand, GenerateCommand, ModelFormat, ModelInput,
    OnError,
};
use hmm_generator::HmmGenerator;
use log::{debug, error, info, warn};
use model_table::{text::parse_model, ModelTable};
use observation::{render_path, Observation};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use viterbi::{ProbabilitySpace, ViterbiDecoder};

mod choose_probability_space;
mod cli;
mod error;
mod hmm_generator;
mod model_table;
mod observation;
mod viterbi;

fn main() {
    let cli = Cli::parse();

    if let Err(logger_error) = TermLogger::init(
        cli.log_level.into(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Error: {}", Error::from(logger_error));
        std::process::exit(1);
    }

    let result = match cli.command {
        CliCommands::Decode(decode_command) => {
            call::<Decode>(decode_command.log_space, decode_command)
        }
        CliCommands::Convert(convert_command) => convert(convert_command),
        CliCommands::Generate(generate_command) => generate(generate_command),
    };

    if let Err(error) = result {
        error!("{error}");
        std::process::exit(1);
    }
}

fn load_model(model_input: &ModelInput) -> Result<ModelTable> {
    let input = BufReader::new(File::open(&model_input.model)?);
    let model = match model_input.model_format {
        ModelFormat::Text => parse_model(input)?,
        ModelFormat::Cbor => ciborium::from_reader(input)?,
    };

    info!(
        "Loaded a model with {} states and {} symbols from {:?}",
        model.state_count(),
        model.alphabet().len(),
        model_input.model
    );
    Ok(model)
}

struct Decode;

impl ChooseProbabilitySpace for Decode {
    type Arguments = DecodeCommand;

    type Return = ();

    fn call<Space: ProbabilitySpace>(decode_command: Self::Arguments) -> Result<Self::Return> {
        let model = load_model(&decode_command.model_input)?;
        let decoder = ViterbiDecoder::<Space>::new(&model);

        let observations = BufReader::new(File::open(&decode_command.observations)?);
        let mut output = BufWriter::new(std::io::stdout().lock());
        let (decoded_count, skipped_count) = decode_lines(
            &decoder,
            observations,
            &mut output,
            decode_command.on_error,
            decode_command.print_score,
        )?;
        output.flush()?;

        info!("Decoded {decoded_count} observation sequences, skipped {skipped_count}");
        Ok(())
    }
}

/// Decodes every line of `observations` and writes the report to `output`.
/// Returns the number of decoded and skipped lines.
fn decode_lines<Space: ProbabilitySpace>(
    decoder: &ViterbiDecoder<Space>,
    observations: impl BufRead,
    mut output: impl Write,
    on_error: OnError,
    print_score: bool,
) -> Result<(usize, usize)> {
    let mut decoded_count = 0;
    let mut skipped_count = 0;

    for (line_index, line) in observations.lines().enumerate() {
        let observation = Observation::parse(line?);
        let line_number = line_index + 1;

        let result = match decoder.decode(&observation.symbols) {
            Ok(result) => result,
            Err(error) if on_error == OnError::Skip => {
                warn!("Skipping line {line_number}: {error}");
                skipped_count += 1;
                continue;
            }
            Err(error) => return Err(error),
        };

        debug!(
            "Line {line_number}: {} symbols, score {}",
            observation.symbols.len(),
            result.score
        );
        if result.score == Space::ZERO {
            warn!("The best path of line {line_number} has zero probability, so ties decided it");
        }

        writeln!(output, "For the sequence: {}", observation.line)?;
        writeln!(output, "Most likely state sequence:")?;
        writeln!(output, "{}", render_path(&result.path))?;
        if print_score {
            writeln!(output, "Score: {}", result.score)?;
        }
        decoded_count += 1;
    }

    Ok((decoded_count, skipped_count))
}

fn convert(convert_command: ConvertCommand) -> Result<()> {
    let model = parse_model(BufReader::new(File::open(&convert_command.model)?))?;
    let mut output = BufWriter::new(File::create(&convert_command.output)?);
    ciborium::into_writer(&model, &mut output)?;
    output.flush()?;

    info!("Wrote binary model to {:?}", convert_command.output);
    Ok(())
}

fn generate(generate_command: GenerateCommand) -> Result<()> {
    let model = load_model(&generate_command.model_input)?;

    // Initialise random number generator.
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(generate_command.random_seed);
    let mut generator = HmmGenerator::new(&model, &mut rng)?;

    let mut output = BufWriter::new(std::io::stdout().lock());
    let mut state_output = generate_command
        .state_output
        .as_ref()
        .map(|path| File::create(path).map(BufWriter::new))
        .transpose()?;

    for _ in 0..generate_command.count {
        let sequence = generator.generate(generate_command.length)?;
        writeln!(output, "{}", sequence.symbols.iter().collect::<String>())?;
        if let Some(state_output) = &mut state_output {
            writeln!(state_output, "{}", render_path(&sequence.states))?;
        }
    }

    output.flush()?;
    if let Some(state_output) = &mut state_output {
        state_output.flush()?;
    }
    info!(
        "Generated {} sequences of length {}",
        generate_command.count, generate_command.length
    );
    Ok(())
}
