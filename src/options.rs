use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::error::{HeapError, Result};

#[derive(Derivative, Serialize, Deserialize, Clone, Debug)]
#[derivative(Default)]
pub struct SimulationOptions {
    /// Longest input accepted by the simulation; the replay of longer
    /// sequences is not readable anyway
    #[derivative(Default(value = "30"))]
    pub max_length: usize,
}

impl SimulationOptions {
    /// Checks `k` and the input length before anything gets recorded
    ///
    /// An empty input goes through: the simulation then fails because the
    /// heap never holds `k` elements.
    pub fn check_bounds(&self, k: usize, length: usize) -> Result<()> {
        let invalid = k == 0 || length > self.max_length || (length > 0 && k > length);
        if invalid {
            return Err(HeapError::InvalidBounds {
                k,
                length,
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}
