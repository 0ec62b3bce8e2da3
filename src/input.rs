//! Random input sequences, as drawn by the interactive viewer.

use derivative::Derivative;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::base::HeapValue;
use crate::error::{HeapError, Result};

#[derive(Derivative, Serialize, Deserialize, Clone, Debug)]
#[derivative(Default)]
pub struct RandomInput {
    #[derivative(Default(value = "10"))]
    pub length: usize,

    /// Smallest value that can be drawn (inclusive)
    #[derivative(Default(value = "1"))]
    pub min_value: HeapValue,

    /// Largest value that can be drawn (inclusive)
    #[derivative(Default(value = "100"))]
    pub max_value: HeapValue,

    /// Seed of the generator (None means entropy)
    pub seed: Option<u64>,
}

impl RandomInput {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Draws `length` values uniformly in `[min_value, max_value]`
    pub fn generate(&self) -> Result<Vec<HeapValue>> {
        if self.min_value > self.max_value {
            return Err(HeapError::InvalidRange {
                min_value: self.min_value,
                max_value: self.max_value,
            });
        }

        let mut rng = if let Some(seed) = self.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        debug!(
            "Drawing {} values in [{}, {}]",
            self.length, self.min_value, self.max_value
        );
        Ok((0..self.length)
            .map(|_| rng.gen_range(self.min_value..=self.max_value))
            .collect())
    }
}
