use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("malformed model: {0}")]
    MalformedModel(#[from] MalformedModel),

    #[error("observation symbol {symbol:?} at position {position} is not in the model alphabet")]
    UnknownSymbol { symbol: char, position: usize },

    #[error("the observation sequence is empty")]
    EmptyObservation,

    #[error("model serialisation error: {0}")]
    ModelSerialisation(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("model deserialisation error: {0}")]
    ModelDeserialisation(#[from] ciborium::de::Error<std::io::Error>),

    #[error("logger initialisation error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("the {row} probabilities of state {state} cannot be sampled from")]
    UnsamplableRow { row: ModelRow, state: usize },

    #[error("the initial probabilities cannot be sampled from")]
    UnsamplableInitial,

    #[error("the requested sequence length is zero")]
    ZeroLength,
}

/// The reason a model was rejected during construction or loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedModel {
    #[error("the state count is zero")]
    NoStates,

    #[error("expected {expected} {field} values, but got {actual}")]
    CountMismatch {
        field: ModelField,
        expected: usize,
        actual: usize,
    },

    #[error("{field} value {token:?} is not a floating point number")]
    NotANumber { field: ModelField, token: String },

    #[error("{field} value {token:?} is not a non-negative integer")]
    NotAnInteger { field: ModelField, token: String },

    #[error("alphabet symbol {0:?} is not a single character")]
    SymbolNotACharacter(String),

    #[error("the model source ends before the {0} line")]
    MissingLine(ModelField),

    #[error("unexpected content after the emission line: {0:?}")]
    TrailingContent(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelField {
    StateCount,
    Initial,
    Transition,
    AlphabetSize,
    Alphabet,
    Emission,
}

impl std::fmt::Display for ModelField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ModelField::StateCount => "state count",
            ModelField::Initial => "initial",
            ModelField::Transition => "transition",
            ModelField::AlphabetSize => "alphabet size",
            ModelField::Alphabet => "alphabet",
            ModelField::Emission => "emission",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRow {
    Transition,
    Emission,
}

impl std::fmt::Display for ModelRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ModelRow::Transition => "transition",
            ModelRow::Emission => "emission",
        })
    }
}
