use log::debug;
use numpy::{IntoPyArray, PyArray1};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::{
    pyclass, pyfunction, pymethods, pymodule, types::PyModule, wrap_pyfunction, PyErr, PyResult,
    Python,
};

use std::sync::Arc;

use crate::base::{HeapValue, NodeId};
use crate::cursor::ReplayCursor;
use crate::error::HeapError;
use crate::input::RandomInput;
use crate::options::SimulationOptions;
use crate::step::{InputPosition, Step, StepAction};
use crate::step_log::{simulate, StepLog};

fn value_error<E: std::fmt::Display>(error: E) -> PyErr {
    PyValueError::new_err(error.to_string())
}

impl From<HeapError> for PyErr {
    fn from(error: HeapError) -> Self {
        value_error(error)
    }
}

#[pyclass(name = "Step")]
struct PyStep {
    step: Step<HeapValue>,
}

#[pymethods]
impl PyStep {
    /// One of start, add, remove or done
    #[getter]
    fn action(&self) -> &'static str {
        self.step.action.name()
    }

    /// Position in the input (None for the start and done steps)
    #[getter]
    fn index(&self) -> Option<usize> {
        match self.step.index {
            InputPosition::Element(ix) => Some(ix),
            InputPosition::Start | InputPosition::End => None,
        }
    }

    #[getter]
    fn code_line(&self) -> u32 {
        self.step.code_line
    }

    /// Added value and node ID
    #[getter]
    fn added(&self) -> Option<(HeapValue, NodeId)> {
        match self.step.action {
            StepAction::Add {
                added,
                added_node_id,
            } => Some((added, added_node_id)),
            _ => None,
        }
    }

    /// Removed value and node ID
    #[getter]
    fn removed(&self) -> Option<(HeapValue, NodeId)> {
        match self.step.action {
            StepAction::Remove {
                removed,
                removed_node_id,
            } => Some((removed, removed_node_id)),
            _ => None,
        }
    }

    #[getter]
    fn kth_largest(&self) -> Option<HeapValue> {
        match self.step.action {
            StepAction::Done { kth_largest } => Some(kth_largest),
            _ => None,
        }
    }

    /// Swaps as (from, to) pairs, in the order they were performed
    #[getter]
    fn swaps(&self) -> Vec<(usize, usize)> {
        self.step.swaps.iter().map(|s| (s.from, s.to)).collect()
    }

    /// Heap values, in heap order
    fn values<'py>(&self, py: Python<'py>) -> &'py PyArray1<HeapValue> {
        self.step.values().into_pyarray(py)
    }

    /// Heap node IDs, in heap order
    fn ids<'py>(&self, py: Python<'py>) -> &'py PyArray1<NodeId> {
        self.step
            .heap
            .iter()
            .map(|node| node.id)
            .collect::<Vec<_>>()
            .into_pyarray(py)
    }

    fn __len__(&self) -> usize {
        self.step.heap_size()
    }

    fn __repr__(&self) -> String {
        format!("Step({})", self.step)
    }
}

#[pyclass(name = "StepLog")]
struct PyStepLog {
    log: Arc<StepLog<HeapValue>>,
}

#[pymethods]
impl PyStepLog {
    fn __len__(&self) -> usize {
        self.log.len()
    }

    fn __getitem__(&self, index: isize) -> PyResult<PyStep> {
        let len = self.log.len() as isize;
        let position = if index < 0 { len + index } else { index };
        if position < 0 || position >= len {
            return Err(PyIndexError::new_err(format!(
                "step {} out of range ({} steps)",
                index, len
            )));
        }

        Ok(PyStep {
            step: self.log.steps()[position as usize].clone(),
        })
    }

    #[getter]
    fn k(&self) -> usize {
        self.log.k()
    }

    #[getter]
    fn input(&self) -> Vec<HeapValue> {
        self.log.input().to_vec()
    }

    #[getter]
    fn kth_largest(&self) -> Option<HeapValue> {
        self.log.kth_largest()
    }

    fn validate(&self) -> PyResult<()> {
        self.log.validate().map_err(value_error)
    }

    fn to_json(&self) -> PyResult<String> {
        self.log.to_json().map_err(value_error)
    }

    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let log = StepLog::from_json(json).map_err(value_error)?;
        Ok(Self { log: Arc::new(log) })
    }

    /// Returns a new cursor on the first step
    fn cursor(&self) -> PyReplayCursor {
        PyReplayCursor {
            log: self.log.clone(),
            position: 0,
        }
    }
}

#[pyclass(name = "ReplayCursor")]
struct PyReplayCursor {
    log: Arc<StepLog<HeapValue>>,
    position: usize,
}

impl PyReplayCursor {
    fn navigate<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut ReplayCursor<'_, HeapValue>) -> bool,
    {
        let mut cursor = ReplayCursor::at(self.log.as_ref(), self.position);
        let moved = f(&mut cursor);
        self.position = cursor.position();
        moved
    }
}

#[pymethods]
impl PyReplayCursor {
    fn advance(&mut self) -> bool {
        self.navigate(|cursor| cursor.advance())
    }

    fn retreat(&mut self) -> bool {
        self.navigate(|cursor| cursor.retreat())
    }

    fn seek(&mut self, position: usize) {
        self.navigate(|cursor| {
            cursor.seek(position);
            true
        });
    }

    fn current(&self) -> PyStep {
        PyStep {
            step: ReplayCursor::at(self.log.as_ref(), self.position).current().clone(),
        }
    }

    #[getter]
    fn position(&self) -> usize {
        self.position
    }

    fn is_at_start(&self) -> bool {
        ReplayCursor::at(self.log.as_ref(), self.position).is_at_start()
    }

    fn is_at_end(&self) -> bool {
        ReplayCursor::at(self.log.as_ref(), self.position).is_at_end()
    }
}

/// Records the k-th largest search over `values`
#[pyfunction]
#[pyo3(name = "simulate", signature = (values, k, max_length = 30))]
fn py_simulate(values: Vec<HeapValue>, k: usize, max_length: usize) -> PyResult<PyStepLog> {
    let log = simulate(&values, k, &SimulationOptions { max_length })?;
    Ok(PyStepLog { log: Arc::new(log) })
}

/// Draws random values in [min_value, max_value]
#[pyfunction]
#[pyo3(signature = (length, min_value = 1, max_value = 100, seed = None))]
fn random_input(
    length: usize,
    min_value: HeapValue,
    max_value: HeapValue,
    seed: Option<u64>,
) -> PyResult<Vec<HeapValue>> {
    let input = RandomInput {
        length,
        min_value,
        max_value,
        seed,
    };
    Ok(input.generate()?)
}

/// A Python module implemented in Rust.
#[pymodule]
fn kth_heap_replay(_py: Python, module: &PyModule) -> PyResult<()> {
    // Init logging
    pyo3_log::init();
    debug!("Loading kth-heap-replay extension");

    module.add_class::<PyStep>()?;
    module.add_class::<PyStepLog>()?;
    module.add_class::<PyReplayCursor>()?;

    module.add_function(wrap_pyfunction!(py_simulate, module)?)?;
    module.add_function(wrap_pyfunction!(random_input, module)?)?;

    Ok(())
}
