//! otbn-consts: known-constant GPR tracking for OTBN instruction streams
//!
//! This library tracks which general-purpose registers hold values known at
//! analysis time, so that indirect register references and loop counts in
//! decoded OTBN programs can be resolved statically.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod insn;
pub mod trace;

pub use error::{Error as ConstantsError, Result as ConstantsResult};

// Re-export commonly used types
pub use analysis::{track_sequence, ConstantContext, TrackedSequence, TransferRule};
pub use insn::{op_vals, Insn, OpVals, Operand, RegFile};
pub use trace::Trace;
