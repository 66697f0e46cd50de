//! The line-oriented model source.
//!
//! ```text
//! <state count N>
//! <N initial probabilities>
//! <N² transition probabilities, from-state outer, to-state inner>
//! <alphabet size M>
//! <M single-character symbols>
//! <N*M emission probabilities, state outer, symbol inner>
//! ```
//!
//! Tokens are separated by arbitrary whitespace and blank lines are ignored.

use std::io::BufRead;

use log::debug;

use crate::error::{Error, MalformedModel, ModelField, Result};

use super::ModelTable;

pub fn parse_model(reader: impl BufRead) -> Result<ModelTable> {
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    let mut lines = lines.iter().filter(|line| !line.trim().is_empty());
    let mut next_line = |field| lines.next().ok_or(MalformedModel::MissingLine(field));

    let state_count = parse_integer(ModelField::StateCount, next_line(ModelField::StateCount)?)?;
    let initial = next_line(ModelField::Initial)?;
    let transition = next_line(ModelField::Transition)?;
    let alphabet_size =
        parse_integer(ModelField::AlphabetSize, next_line(ModelField::AlphabetSize)?)?;
    let alphabet = next_line(ModelField::Alphabet)?;
    let emission = next_line(ModelField::Emission)?;

    if let Some(trailing) = lines.next() {
        return Err(MalformedModel::TrailingContent(trailing.clone()).into());
    }

    let alphabet_length = alphabet.split_whitespace().count();
    if alphabet_length != alphabet_size {
        return Err(MalformedModel::CountMismatch {
            field: ModelField::Alphabet,
            expected: alphabet_size,
            actual: alphabet_length,
        }
        .into());
    }

    debug!("Parsing a model with {state_count} states and {alphabet_size} symbols");
    ModelTable::from_tokens(
        state_count,
        initial.split_whitespace(),
        transition.split_whitespace(),
        alphabet.split_whitespace(),
        emission.split_whitespace(),
    )
}

fn parse_integer(field: ModelField, line: &str) -> Result<usize> {
    let token = line.trim();
    token.parse().map_err(|_| {
        Error::from(MalformedModel::NotAnInteger {
            field,
            token: token.to_string(),
        })
    })
}
