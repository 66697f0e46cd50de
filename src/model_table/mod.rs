use crate::error::{Error, MalformedModel, ModelField, Result};

mod serde;
pub mod text;

/// The fixed parameters of a discrete hidden Markov model.
///
/// Values are stored verbatim: rows are neither normalised nor checked to sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTable {
    initial: Vec<f64>,
    /// `transition[from][to]`
    transition: Vec<Vec<f64>>,
    alphabet: Vec<char>,
    /// `emission[state][symbol]`
    emission: Vec<Vec<f64>>,
}

impl ModelTable {
    /// Builds a model from row-major parameter arrays.
    ///
    /// `transition` must hold `state_count²` values (from-state outer, to-state inner)
    /// and `emission` must hold `state_count * alphabet.len()` values (state outer, symbol inner).
    pub fn build(
        state_count: usize,
        initial: Vec<f64>,
        transition: Vec<f64>,
        alphabet: Vec<char>,
        emission: Vec<f64>,
    ) -> Result<Self> {
        if state_count == 0 {
            return Err(MalformedModel::NoStates.into());
        }
        check_count(ModelField::Initial, state_count, initial.len())?;
        check_count(ModelField::Transition, state_count * state_count, transition.len())?;
        check_count(
            ModelField::Emission,
            state_count * alphabet.len(),
            emission.len(),
        )?;

        Ok(Self {
            initial,
            transition: into_rows(transition, state_count, state_count),
            emission: into_rows(emission, state_count, alphabet.len()),
            alphabet,
        })
    }

    /// Like [`ModelTable::build`], but parses the values from textual tokens first.
    pub fn from_tokens<'token>(
        state_count: usize,
        initial: impl IntoIterator<Item = &'token str>,
        transition: impl IntoIterator<Item = &'token str>,
        alphabet: impl IntoIterator<Item = &'token str>,
        emission: impl IntoIterator<Item = &'token str>,
    ) -> Result<Self> {
        let initial = parse_floats(ModelField::Initial, initial)?;
        let transition = parse_floats(ModelField::Transition, transition)?;
        let alphabet = alphabet
            .into_iter()
            .map(parse_symbol)
            .collect::<Result<Vec<_>>>()?;
        let emission = parse_floats(ModelField::Emission, emission)?;

        Self::build(state_count, initial, transition, alphabet, emission)
    }

    pub fn state_count(&self) -> usize {
        self.initial.len()
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn initial(&self, state: usize) -> f64 {
        self.initial[state]
    }

    pub fn transition(&self, from: usize, to: usize) -> f64 {
        self.transition[from][to]
    }

    pub fn emission(&self, state: usize, symbol_index: usize) -> f64 {
        self.emission[state][symbol_index]
    }

    pub fn initial_row(&self) -> &[f64] {
        &self.initial
    }

    pub fn transition_row(&self, from: usize) -> &[f64] {
        &self.transition[from]
    }

    pub fn emission_row(&self, state: usize) -> &[f64] {
        &self.emission[state]
    }

    /// Returns the column of `symbol` in the emission matrix.
    /// If the alphabet contains duplicates, the first occurrence wins.
    pub fn symbol_index(&self, symbol: char) -> Option<usize> {
        self.alphabet
            .iter()
            .position(|alphabet_symbol| *alphabet_symbol == symbol)
    }
}

fn check_count(field: ModelField, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(MalformedModel::CountMismatch {
            field,
            expected,
            actual,
        }
        .into())
    }
}

fn into_rows(values: Vec<f64>, row_count: usize, row_length: usize) -> Vec<Vec<f64>> {
    if row_length == 0 {
        // An empty alphabet still needs one (empty) emission row per state.
        return vec![Vec::new(); row_count];
    }
    values
        .chunks_exact(row_length)
        .map(<[f64]>::to_vec)
        .collect()
}

fn parse_floats<'token>(
    field: ModelField,
    tokens: impl IntoIterator<Item = &'token str>,
) -> Result<Vec<f64>> {
    tokens
        .into_iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                Error::from(MalformedModel::NotANumber {
                    field,
                    token: token.to_string(),
                })
            })
        })
        .collect()
}

fn parse_symbol(token: &str) -> Result<char> {
    let mut characters = token.chars();
    match (characters.next(), characters.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(MalformedModel::SymbolNotACharacter(token.to_string()).into()),
    }
}
