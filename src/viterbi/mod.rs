//! Viterbi decoding of the most probable hidden state path.
//!
//! The decoder runs the textbook recursion
//!
//! ```text
//! score[0][i] = initial[i] * emission[i][o_0]
//! score[t][j] = max_k score[t-1][k] * transition[k][j] * emission[j][o_t]
//! ```
//!
//! in a chosen [`ProbabilitySpace`], records the maximising predecessor of every state
//! at every step and walks those backpointers from the best final state.
//! Every maximum is taken with `>=`, so ties go to the highest state index.

use std::marker::PhantomData;

use crate::{
    error::{Error, Result},
    model_table::ModelTable,
};

pub mod probability_space;

pub use probability_space::{Linear, LogSpace, ProbabilitySpace};
use probability_space::select_best;

/// The most probable state path of one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeResult {
    /// 0-indexed states, one per observation symbol.
    pub path: Vec<usize>,
    /// Score of the path in the decoder's probability space.
    pub score: f64,
}

pub struct ViterbiDecoder<'model, Space: ProbabilitySpace = Linear> {
    model: &'model ModelTable,
    space: PhantomData<Space>,
}

impl<'model, Space: ProbabilitySpace> ViterbiDecoder<'model, Space> {
    pub fn new(model: &'model ModelTable) -> Self {
        Self {
            model,
            space: PhantomData,
        }
    }

    /// Decodes a sequence of alphabet symbols.
    pub fn decode(&self, observation: &[char]) -> Result<DecodeResult> {
        let symbol_indices = observation
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                self.model
                    .symbol_index(symbol)
                    .ok_or(Error::UnknownSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>>>()?;
        self.decode_indices(&symbol_indices)
    }

    /// Decodes a sequence of emission matrix columns.
    ///
    /// # Panics
    ///
    /// Panics if an index is not smaller than the alphabet length.
    pub fn decode_indices(&self, symbol_indices: &[usize]) -> Result<DecodeResult> {
        let Some((&first_symbol, remaining_symbols)) = symbol_indices.split_first() else {
            return Err(Error::EmptyObservation);
        };
        let model = self.model;
        let state_count = model.state_count();

        let mut scores: Vec<f64> = (0..state_count)
            .map(|state| {
                Space::combine(
                    Space::lift(model.initial(state)),
                    Space::lift(model.emission(state, first_symbol)),
                )
            })
            .collect();

        // Backpointers of step 0 all hold the best initial state.
        // They are never followed, since reconstruction stops at step 0.
        let (initial_best_state, _) = select_best::<Space>(scores.iter().copied());
        let mut backpointers = Vec::with_capacity(symbol_indices.len());
        backpointers.push(vec![initial_best_state; state_count]);

        let mut next_scores = vec![Space::ZERO; state_count];
        for &symbol in remaining_symbols {
            let mut step_backpointers = vec![0; state_count];

            for (to, (next_score, backpointer)) in next_scores
                .iter_mut()
                .zip(step_backpointers.iter_mut())
                .enumerate()
            {
                let emission = Space::lift(model.emission(to, symbol));
                let (from, best) = select_best::<Space>(scores.iter().enumerate().map(
                    |(from, &score)| {
                        Space::combine(
                            Space::combine(score, Space::lift(model.transition(from, to))),
                            emission,
                        )
                    },
                ));
                *next_score = best;
                *backpointer = from;
            }

            std::mem::swap(&mut scores, &mut next_scores);
            backpointers.push(step_backpointers);
        }

        let (final_state, score) = select_best::<Space>(scores.iter().copied());

        let mut path = vec![0; symbol_indices.len()];
        let mut state = final_state;
        for (time, step_backpointers) in backpointers.iter().enumerate().rev() {
            path[time] = state;
            if time > 0 {
                state = step_backpointers[state];
            }
        }

        Ok(DecodeResult { path, score })
    }
}
