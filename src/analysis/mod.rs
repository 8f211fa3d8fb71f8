//! Constant analysis of decoded instruction streams
//!
//! This module provides:
//! - The known-constant GPR context and its transfer function
//! - The per-mnemonic rules that produce new constants
//! - Straight-line tracking of contexts across a sequence

pub mod constants;
pub mod straight_line;
pub mod transfer;

pub use constants::{ConstantContext, ZERO_REG};
pub use straight_line::{track_sequence, TrackedSequence};
pub use transfer::TransferRule;
