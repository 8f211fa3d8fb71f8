//! Instruction descriptors
//!
//! An [`Insn`] describes one instruction of the ISA: its mnemonic, its ordered
//! operands and how its information flow is evaluated. A decoded instruction
//! instance is an `Insn` together with its [`OpVals`].

pub mod iflow;
pub mod operand;

pub use iflow::{DestinationFlow, FixedFlow, IflowResult, InformationFlow};
pub use operand::{ImmOperandType, Operand, OperandType, RegFile, RegOperandType, INC_SUFFIX};

use std::collections::BTreeMap;
use std::sync::Arc;

/// Concrete operand values of one instruction instance, keyed by operand name
pub type OpVals = BTreeMap<String, i64>;

/// Build an [`OpVals`] map from name/value pairs
pub fn op_vals<'a>(pairs: impl IntoIterator<Item = (&'a str, i64)>) -> OpVals {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Instruction descriptor
#[derive(Debug, Clone)]
pub struct Insn {
    mnemonic: String,
    operands: Vec<Operand>,
    iflow: Arc<dyn InformationFlow>,
}

impl Insn {
    pub fn new(
        mnemonic: impl Into<String>,
        operands: Vec<Operand>,
        iflow: Arc<dyn InformationFlow>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            operands,
            iflow,
        }
    }

    /// Create a descriptor whose sinks come from its destination operands
    pub fn with_destination_flow(
        mnemonic: impl Into<String>,
        operands: Vec<Operand>,
        implicit_writes: Vec<String>,
    ) -> Self {
        Self::new(
            mnemonic,
            operands,
            Arc::new(DestinationFlow::new(implicit_writes)),
        )
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn iflow(&self) -> &dyn InformationFlow {
        self.iflow.as_ref()
    }

    /// Look up an operand by name
    pub fn operand(&self, name: &str) -> Option<&Operand> {
        self.operands.iter().find(|op| op.name == name)
    }

    /// Render the register selected by operand `opname` for this instance
    ///
    /// Returns `None` (and logs a warning) if the operand does not exist, is
    /// not a register operand, has no value in `op_vals`, or selects a
    /// register outside its file.
    pub fn op_val_str(&self, op_vals: &OpVals, opname: &str) -> Option<String> {
        let Some(op) = self.operand(opname) else {
            log::warn!("{}: no operand named `{}`", self.mnemonic, opname);
            return None;
        };
        let Some(reg) = op.op_type.as_reg() else {
            log::warn!("{}: operand `{}` is not a register", self.mnemonic, opname);
            return None;
        };
        let Some(&value) = op_vals.get(opname) else {
            log::warn!("{}: no value for operand `{}`", self.mnemonic, opname);
            return None;
        };

        let name = reg.op_val_to_str(value);
        if name.is_none() {
            log::warn!(
                "{}: operand `{}` value {} is not a valid {} index",
                self.mnemonic,
                opname,
                value,
                reg.file
            );
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addi() -> Insn {
        Insn::with_destination_flow(
            "addi",
            vec![
                Operand::gpr_dest("grd"),
                Operand::gpr("grs1"),
                Operand::imm("imm", true),
            ],
            vec![],
        )
    }

    #[test]
    fn test_op_val_str() {
        let insn = addi();
        let vals = op_vals([("grd", 2), ("grs1", 1), ("imm", 3)]);
        assert_eq!(insn.op_val_str(&vals, "grd").as_deref(), Some("x2"));
        assert_eq!(insn.op_val_str(&vals, "grs1").as_deref(), Some("x1"));
    }

    #[test]
    fn test_op_val_str_rejects_non_registers() {
        let insn = addi();
        let vals = op_vals([("grd", 40), ("imm", 3)]);
        assert_eq!(insn.op_val_str(&vals, "imm"), None);
        assert_eq!(insn.op_val_str(&vals, "grd"), None);
        assert_eq!(insn.op_val_str(&vals, "grs1"), None);
        assert_eq!(insn.op_val_str(&vals, "nope"), None);
    }
}
