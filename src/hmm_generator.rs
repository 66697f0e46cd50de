use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};

use crate::{
    error::{Error, ModelRow, Result},
    model_table::ModelTable,
};

/// A hidden state path together with the symbols it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSequence {
    pub states: Vec<usize>,
    pub symbols: Vec<char>,
}

/// Samples state paths and observations from a model.
///
/// Every row of the model is used as a set of unnormalised weights.
pub struct HmmGenerator<'model, 'rng, RandomNumberGenerator: Rng> {
    model: &'model ModelTable,
    rng: &'rng mut RandomNumberGenerator,
    initial_sampler: WeightedIndex<f64>,
    /// `None` for rows that are not a valid weight distribution.
    transition_samplers: Vec<Option<WeightedIndex<f64>>>,
    emission_samplers: Vec<Option<WeightedIndex<f64>>>,
}

impl<'model, 'rng, RandomNumberGenerator: Rng> HmmGenerator<'model, 'rng, RandomNumberGenerator> {
    pub fn new(model: &'model ModelTable, rng: &'rng mut RandomNumberGenerator) -> Result<Self> {
        let initial_sampler = sampler(model.initial_row()).ok_or(Error::UnsamplableInitial)?;
        let transition_samplers = (0..model.state_count())
            .map(|state| sampler(model.transition_row(state)))
            .collect();
        let emission_samplers = (0..model.state_count())
            .map(|state| sampler(model.emission_row(state)))
            .collect();

        Ok(Self {
            model,
            rng,
            initial_sampler,
            transition_samplers,
            emission_samplers,
        })
    }

    pub fn generate(&mut self, length: usize) -> Result<GeneratedSequence> {
        if length == 0 {
            return Err(Error::ZeroLength);
        }

        let mut states = Vec::with_capacity(length);
        let mut symbols = Vec::with_capacity(length);
        let mut state = self.initial_sampler.sample(self.rng);

        loop {
            let emission_sampler = self.emission_samplers[state]
                .as_ref()
                .ok_or(Error::UnsamplableRow {
                    row: ModelRow::Emission,
                    state,
                })?;
            states.push(state);
            symbols.push(self.model.alphabet()[emission_sampler.sample(self.rng)]);

            if states.len() == length {
                break;
            }

            let transition_sampler = self.transition_samplers[state]
                .as_ref()
                .ok_or(Error::UnsamplableRow {
                    row: ModelRow::Transition,
                    state,
                })?;
            state = transition_sampler.sample(self.rng);
        }

        Ok(GeneratedSequence { states, symbols })
    }
}

fn sampler(weights: &[f64]) -> Option<WeightedIndex<f64>> {
    // Non-finite weights make the underlying uniform distribution panic.
    if weights.iter().all(|weight| weight.is_finite()) && weights.iter().sum::<f64>().is_finite()
    {
        WeightedIndex::new(weights).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    use crate::{
        error::{Error, ModelRow},
        model_table::ModelTable,
        viterbi::{Linear, ViterbiDecoder},
    };

    use super::{GeneratedSequence, HmmGenerator};

    fn alternating_model() -> ModelTable {
        ModelTable::build(
            2,
            vec![1.0, 0.0],
            vec![0.0, 1.0, 1.0, 0.0],
            vec!['a', 'b'],
            vec![1.0, 0.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn one_hot_model_is_deterministic() {
        let model = alternating_model();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let mut generator = HmmGenerator::new(&model, &mut rng).unwrap();
        assert_eq!(
            generator.generate(5).unwrap(),
            GeneratedSequence {
                states: vec![0, 1, 0, 1, 0],
                symbols: vec!['a', 'b', 'a', 'b', 'a'],
            }
        );
    }

    #[test]
    fn generated_observations_decode_to_the_generating_path() {
        let model = alternating_model();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let generated = HmmGenerator::new(&model, &mut rng)
            .unwrap()
            .generate(8)
            .unwrap();
        let result = ViterbiDecoder::<Linear>::new(&model)
            .decode(&generated.symbols)
            .unwrap();
        assert_eq!(result.path, generated.states);
    }

    #[test]
    fn same_seed_same_sequence() {
        let model = ModelTable::build(
            3,
            vec![0.2, 0.5, 0.3],
            vec![0.1, 0.6, 0.3, 0.4, 0.4, 0.2, 0.3, 0.3, 0.4],
            vec!['x', 'y', 'z'],
            vec![0.7, 0.2, 0.1, 0.1, 0.8, 0.1, 0.3, 0.3, 0.4],
        )
        .unwrap();

        let mut first_rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let mut second_rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let first = HmmGenerator::new(&model, &mut first_rng)
            .unwrap()
            .generate(50)
            .unwrap();
        let second = HmmGenerator::new(&model, &mut second_rng)
            .unwrap()
            .generate(50)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.states.len(), 50);
        assert!(first.symbols.iter().all(|symbol| model.alphabet().contains(symbol)));
    }

    #[test]
    fn unsamplable_rows_are_reported_when_reached() {
        let model = ModelTable::build(
            2,
            vec![0.0, 1.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec!['a'],
            vec![1.0, 1.0],
        )
        .unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let mut generator = HmmGenerator::new(&model, &mut rng).unwrap();
        assert_eq!(generator.generate(1).unwrap().states, [1]);
        assert!(matches!(
            generator.generate(2),
            Err(Error::UnsamplableRow {
                row: ModelRow::Transition,
                state: 1
            })
        ));
        assert!(matches!(generator.generate(0), Err(Error::ZeroLength)));
    }

    #[test]
    fn unsamplable_initial_is_rejected() {
        let model =
            ModelTable::build(1, vec![0.0], vec![1.0], vec!['a'], vec![1.0]).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        assert!(matches!(
            HmmGenerator::new(&model, &mut rng),
            Err(Error::UnsamplableInitial)
        ));
    }
}
