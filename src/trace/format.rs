//! On-disk JSON layout of a decoded instruction trace

use crate::insn::{OpVals, Operand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declaration of one instruction of the ISA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsnSpec {
    pub mnemonic: String,
    #[serde(default)]
    pub operands: Vec<Operand>,
    /// Registers written regardless of operands (flags, special registers)
    #[serde(default)]
    pub implicit_writes: Vec<String>,
}

/// One decoded instruction instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEntry {
    pub insn: String,
    #[serde(default)]
    pub op_vals: OpVals,
}

/// Top-level trace document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    pub instructions: Vec<InsnSpec>,
    pub program: Vec<ProgramEntry>,
    /// GPRs known on entry; `x0` may be omitted
    #[serde(default)]
    pub entry: BTreeMap<String, i64>,
}
