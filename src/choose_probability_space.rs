use crate::{
    error::Result,
    viterbi::{Linear, LogSpace, ProbabilitySpace},
};

/// Calls `Function` with the probability space selected on the command line.
pub fn call<Function: ChooseProbabilitySpace>(
    log_space: bool,
    arguments: Function::Arguments,
) -> Result<Function::Return> {
    if log_space {
        Function::call::<LogSpace>(arguments)
    } else {
        Function::call::<Linear>(arguments)
    }
}

pub trait ChooseProbabilitySpace {
    type Arguments;
    type Return;

    fn call<Space: ProbabilitySpace>(arguments: Self::Arguments) -> Result<Self::Return>;
}
