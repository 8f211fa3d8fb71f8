//! Information-flow queries
//!
//! The constant tracker only needs to know which registers an instruction
//! instance writes. The full information-flow graph lives elsewhere; this
//! module exposes the narrow "sinks" view of it behind a trait so callers can
//! plug in their own evaluator.

use super::{Insn, OpVals};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

/// Evaluated information flow for one instruction instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IflowResult {
    sinks: BTreeSet<String>,
}

impl IflowResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, name: impl Into<String>) {
        self.sinks.insert(name.into());
    }

    /// All registers written by the instruction instance
    pub fn all_sinks(&self) -> impl Iterator<Item = &str> + '_ {
        self.sinks.iter().map(String::as_str)
    }

    pub fn is_sink(&self, name: &str) -> bool {
        self.sinks.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for IflowResult {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            sinks: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Evaluates an instruction's information flow for concrete operand values
pub trait InformationFlow: Debug + Send + Sync {
    /// `constants` holds the known GPR values before the instruction executes.
    fn evaluate(
        &self,
        insn: &Insn,
        op_vals: &OpVals,
        constants: &BTreeMap<String, i64>,
    ) -> IflowResult;
}

/// Flow derived from the operand declarations alone
///
/// Sinks are every destination register operand, the base register of each
/// nonzero `<base>_inc` flag, and a fixed set of implicitly written registers
/// (flags, special registers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationFlow {
    implicit_writes: Vec<String>,
}

impl DestinationFlow {
    pub fn new(implicit_writes: Vec<String>) -> Self {
        Self { implicit_writes }
    }
}

impl InformationFlow for DestinationFlow {
    fn evaluate(
        &self,
        insn: &Insn,
        op_vals: &OpVals,
        _constants: &BTreeMap<String, i64>,
    ) -> IflowResult {
        let mut result: IflowResult = self.implicit_writes.iter().cloned().collect();

        for op in insn.operands() {
            if op.op_type.as_reg().is_some_and(|reg| reg.is_dest) {
                if let Some(name) = insn.op_val_str(op_vals, &op.name) {
                    result.add_sink(name);
                }
            }

            if let Some(base) = op.increment_base() {
                if op_vals.get(&op.name).is_some_and(|&v| v != 0) {
                    if let Some(name) = insn.op_val_str(op_vals, base) {
                        result.add_sink(name);
                    }
                }
            }
        }

        result
    }
}

/// Flow with a fixed sink set, independent of operand values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedFlow {
    sinks: Vec<String>,
}

impl FixedFlow {
    pub fn new<S: Into<String>>(sinks: impl IntoIterator<Item = S>) -> Self {
        Self {
            sinks: sinks.into_iter().map(Into::into).collect(),
        }
    }
}

impl InformationFlow for FixedFlow {
    fn evaluate(
        &self,
        _insn: &Insn,
        _op_vals: &OpVals,
        _constants: &BTreeMap<String, i64>,
    ) -> IflowResult {
        self.sinks.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insn::{op_vals, Operand};

    #[test]
    fn test_destination_flow_sinks() {
        let insn = Insn::with_destination_flow(
            "bn.lid",
            vec![
                Operand::gpr("grd"),
                Operand::gpr("grs1"),
                Operand::imm("offset", true),
                Operand::imm("grs1_inc", false),
                Operand::imm("grd_inc", false),
            ],
            vec![],
        );
        let vals = op_vals([
            ("grd", 2),
            ("grs1", 3),
            ("offset", 0),
            ("grs1_inc", 1),
            ("grd_inc", 0),
        ]);

        let result = insn.iflow().evaluate(&insn, &vals, &BTreeMap::new());
        let sinks: Vec<&str> = result.all_sinks().collect();
        assert_eq!(sinks, vec!["x3"]);
    }

    #[test]
    fn test_destination_flow_implicit_writes() {
        let insn = Insn::with_destination_flow(
            "add",
            vec![Operand::gpr_dest("grd"), Operand::gpr("grs1"), Operand::gpr("grs2")],
            vec!["FG0".to_string()],
        );
        let vals = op_vals([("grd", 5), ("grs1", 1), ("grs2", 2)]);

        let result = insn.iflow().evaluate(&insn, &vals, &BTreeMap::new());
        assert!(result.is_sink("x5"));
        assert!(result.is_sink("FG0"));
        assert!(!result.is_sink("x1"));
    }
}
