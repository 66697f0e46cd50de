use serde::{Deserialize, Serialize};

use super::ModelTable;

#[derive(Serialize)]
struct ModelTableRef<'model> {
    initial: &'model [f64],
    transition: &'model [Vec<f64>],
    alphabet: &'model [char],
    emission: &'model [Vec<f64>],
}

#[derive(Deserialize)]
struct OwnedModelTable {
    initial: Vec<f64>,
    transition: Vec<Vec<f64>>,
    alphabet: Vec<char>,
    emission: Vec<Vec<f64>>,
}

impl Serialize for ModelTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ModelTableRef {
            initial: &self.initial,
            transition: &self.transition,
            alphabet: &self.alphabet,
            emission: &self.emission,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModelTable {
    /// Deserialised tables pass through [`ModelTable::build`], so ragged rows are rejected.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let OwnedModelTable {
            initial,
            transition,
            alphabet,
            emission,
        } = Deserialize::deserialize(deserializer)?;

        let state_count = initial.len();
        if transition.iter().any(|row| row.len() != state_count)
            || emission.iter().any(|row| row.len() != alphabet.len())
        {
            return Err(serde::de::Error::custom("model rows have inconsistent lengths"));
        }

        ModelTable::build(
            state_count,
            initial,
            transition.into_iter().flatten().collect(),
            alphabet,
            emission.into_iter().flatten().collect(),
        )
        .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::model_table::ModelTable;

    #[test]
    fn cbor_round_trip_preserves_the_model() {
        let model = ModelTable::build(
            2,
            vec![0.6, 0.4],
            vec![0.7, 0.3, 0.4, 0.6],
            vec!['H', 'T'],
            vec![0.5, 0.5, 0.1, 0.9],
        )
        .unwrap();

        let mut buffer = Vec::new();
        ciborium::into_writer(&model, &mut buffer).unwrap();
        let loaded: ModelTable = ciborium::from_reader(buffer.as_slice()).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        #[derive(serde::Serialize)]
        struct Ragged {
            initial: Vec<f64>,
            transition: Vec<Vec<f64>>,
            alphabet: Vec<char>,
            emission: Vec<Vec<f64>>,
        }

        let ragged = Ragged {
            initial: vec![0.5, 0.5],
            transition: vec![vec![1.0], vec![0.5, 0.5, 0.0]],
            alphabet: vec!['a'],
            emission: vec![vec![1.0], vec![1.0]],
        };
        let mut buffer = Vec::new();
        ciborium::into_writer(&ragged, &mut buffer).unwrap();
        let loaded: Result<ModelTable, _> = ciborium::from_reader(buffer.as_slice());
        assert!(loaded.is_err());
    }

    #[test]
    fn empty_models_are_rejected() {
        #[derive(serde::Serialize)]
        struct Empty {
            initial: Vec<f64>,
            transition: Vec<Vec<f64>>,
            alphabet: Vec<char>,
            emission: Vec<Vec<f64>>,
        }

        let empty = Empty {
            initial: vec![],
            transition: vec![],
            alphabet: vec!['a'],
            emission: vec![],
        };
        let mut buffer = Vec::new();
        ciborium::into_writer(&empty, &mut buffer).unwrap();
        let loaded: Result<ModelTable, _> = ciborium::from_reader(buffer.as_slice());
        assert!(loaded.is_err());
    }
}
