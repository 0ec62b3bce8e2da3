use thiserror::Error;

use crate::base::{HeapValue, NodeId};

/// Errors raised by the heap engine and the simulation driver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    /// `k` is outside `[1, length]`, or the input is longer than allowed
    #[error("invalid bounds: k = {k} with an input of length {length} (maximum length {max_length})")]
    InvalidBounds {
        k: usize,
        length: usize,
        max_length: usize,
    },

    #[error("invalid value range [{min_value}, {max_value}]")]
    InvalidRange { min_value: HeapValue, max_value: HeapValue },

    #[error("cannot {operation} on an empty heap")]
    EmptyHeap { operation: &'static str },

    /// The heap never reached `k` elements, so no k-th largest exists
    #[error("the {k}-th largest element is undefined: only {size} element(s) in the heap")]
    InsufficientElements { k: usize, size: usize },
}

pub type Result<T> = std::result::Result<T, HeapError>;

/// Ways in which a step log can be malformed
///
/// `step` is always the index of the offending step in the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepLogViolation {
    #[error("the log has no step")]
    Empty,

    #[error("step {step} should be a start step with an empty heap")]
    BadStart { step: usize },

    #[error("step {step} should be the final done step")]
    BadEnd { step: usize },

    #[error("step {step}: unexpected {action} step")]
    UnexpectedAction { step: usize, action: &'static str },

    #[error("step {step}: input position does not follow the previous step")]
    PositionMismatch { step: usize },

    #[error("step {step}: node at {index} is smaller than its parent")]
    HeapProperty { step: usize, index: usize },

    #[error("step {step}: heap holds {size} element(s), expected {expected}")]
    SizeBound {
        step: usize,
        size: usize,
        expected: usize,
    },

    #[error("step {step}: replaying the swaps does not give the recorded heap")]
    ReplayMismatch { step: usize },

    #[error("step {step}: node {id} is missing from the heap")]
    MissingNode { step: usize, id: NodeId },

    #[error("step {step}: removed node {id} was not the root of the previous heap")]
    NotTheMinimum { step: usize, id: NodeId },

    #[error("step {step}: removed node {id} is still in the heap")]
    RemovedNodeStillPresent { step: usize, id: NodeId },

    #[error("step {step}: node id {id} was already used")]
    ReusedId { step: usize, id: NodeId },

    #[error("step {step}: reported answer is not the minimum of a heap of size k")]
    WrongAnswer { step: usize },

    #[error("step {step}: code line {code_line} does not match the action")]
    SourceLine { step: usize, code_line: u32 },
}
