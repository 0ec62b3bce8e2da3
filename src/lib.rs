//! Step-by-step recording of the k-th largest element search with a
//! bounded min-heap.
//!
//! [simulate] feeds the input to a [TracedMinHeap] and records a [Step] per
//! heap mutation; the resulting [StepLog] is then navigated with a
//! [ReplayCursor].

pub mod base;
pub mod cursor;
pub mod error;
pub mod heap;
pub mod input;
pub mod options;
pub mod step;
pub mod step_log;

#[cfg(feature = "python")]
mod py;

pub use cursor::ReplayCursor;
pub use error::{HeapError, Result, StepLogViolation};
pub use heap::{HeapNode, Swap, TracedMinHeap};
pub use input::RandomInput;
pub use options::SimulationOptions;
pub use step::{InputPosition, Step, StepAction};
pub use step_log::{simulate, StepLog};
