//! DragKit replay tool
//!
//! Drives a draggable from a recorded gesture script and reports the
//! resulting position trace and callbacks.

pub mod replay;

pub use replay::{run, CallbackRecord, ReplayError, ReplayResult, Sample, Script, Step, Trace};
