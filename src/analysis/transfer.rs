//! Per-mnemonic transfer rules
//!
//! Only a handful of instructions can produce a new known constant: `addi`
//! from a known source register, `lui` unconditionally, and any instruction
//! with nonzero `<base>_inc` flags, which bumps the base register by one.
//! Everything else can only invalidate knowledge, which is handled by the
//! caller through the information-flow sinks.

use crate::insn::{Insn, OpVals};
use std::collections::BTreeMap;

const ADDI: &str = "addi";
const LUI: &str = "lui";

const GRD: &str = "grd";
const GRS1: &str = "grs1";
const IMM: &str = "imm";

/// Shift applied to the `lui` immediate
pub const LUI_SHIFT: u32 = 12;

/// Rule that computes newly known register values for an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferRule {
    /// `grd <- grs1 + imm`
    AddImmediate,
    /// `grd <- imm << 12`
    LoadUpperImmediate,
    /// `<base> <- <base> + 1` for every nonzero `<base>_inc` operand
    Increment,
}

impl TransferRule {
    pub fn for_mnemonic(mnemonic: &str) -> Self {
        match mnemonic {
            ADDI => TransferRule::AddImmediate,
            LUI => TransferRule::LoadUpperImmediate,
            _ => TransferRule::Increment,
        }
    }

    /// Compute the register values established by executing `insn`
    ///
    /// `known` is the set of constants before the instruction. Facts are
    /// returned in operand order; when two facts name the same register the
    /// later one is meant to win.
    pub fn new_facts(
        self,
        insn: &Insn,
        op_vals: &OpVals,
        known: &BTreeMap<String, i64>,
    ) -> Vec<(String, i64)> {
        match self {
            TransferRule::AddImmediate => add_immediate(insn, op_vals, known)
                .into_iter()
                .collect(),
            TransferRule::LoadUpperImmediate => load_upper_immediate(insn, op_vals)
                .into_iter()
                .collect(),
            TransferRule::Increment => increments(insn, op_vals, known),
        }
    }
}

fn imm_value(insn: &Insn, op_vals: &OpVals) -> Option<i64> {
    let imm = op_vals.get(IMM).copied();
    if imm.is_none() {
        log::warn!("{}: no value for operand `{}`", insn.mnemonic(), IMM);
    }
    imm
}

fn add_immediate(
    insn: &Insn,
    op_vals: &OpVals,
    known: &BTreeMap<String, i64>,
) -> Option<(String, i64)> {
    let src = insn.op_val_str(op_vals, GRS1)?;
    let Some(&base) = known.get(&src) else {
        log::trace!("addi: source {} is not constant", src);
        return None;
    };
    let dst = insn.op_val_str(op_vals, GRD)?;
    let imm = imm_value(insn, op_vals)?;
    Some((dst, base.wrapping_add(imm)))
}

fn load_upper_immediate(insn: &Insn, op_vals: &OpVals) -> Option<(String, i64)> {
    let dst = insn.op_val_str(op_vals, GRD)?;
    let imm = imm_value(insn, op_vals)?;
    Some((dst, imm << LUI_SHIFT))
}

fn increments(insn: &Insn, op_vals: &OpVals, known: &BTreeMap<String, i64>) -> Vec<(String, i64)> {
    let mut facts = Vec::new();

    for op in insn.operands() {
        let Some(base) = op.increment_base() else {
            continue;
        };
        if op_vals.get(&op.name).copied().unwrap_or(0) == 0 {
            continue;
        }
        let Some(reg) = insn.op_val_str(op_vals, base) else {
            continue;
        };
        if let Some(&value) = known.get(&reg) {
            facts.push((reg, value.wrapping_add(1)));
        }
    }

    facts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insn::{op_vals, Operand};

    fn known(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_rule_dispatch() {
        assert_eq!(TransferRule::for_mnemonic("addi"), TransferRule::AddImmediate);
        assert_eq!(TransferRule::for_mnemonic("lui"), TransferRule::LoadUpperImmediate);
        assert_eq!(TransferRule::for_mnemonic("bn.lid"), TransferRule::Increment);
        assert_eq!(TransferRule::for_mnemonic("ADDI"), TransferRule::Increment);
    }

    #[test]
    fn test_addi_unknown_source_produces_nothing() {
        let insn = Insn::with_destination_flow(
            "addi",
            vec![Operand::gpr_dest("grd"), Operand::gpr("grs1"), Operand::imm("imm", true)],
            vec![],
        );
        let vals = op_vals([("grd", 2), ("grs1", 1), ("imm", 3)]);
        let facts = TransferRule::AddImmediate.new_facts(&insn, &vals, &known(&[("x0", 0)]));
        assert!(facts.is_empty());
    }

    #[test]
    fn test_addi_negative_immediate() {
        let insn = Insn::with_destination_flow(
            "addi",
            vec![Operand::gpr_dest("grd"), Operand::gpr("grs1"), Operand::imm("imm", true)],
            vec![],
        );
        let vals = op_vals([("grd", 2), ("grs1", 1), ("imm", -4)]);
        let facts =
            TransferRule::AddImmediate.new_facts(&insn, &vals, &known(&[("x0", 0), ("x1", 1)]));
        assert_eq!(facts, vec![("x2".to_string(), -3)]);
    }

    #[test]
    fn test_increment_ignores_zero_flags_and_unknown_bases() {
        let insn = Insn::with_destination_flow(
            "bn.sid",
            vec![
                Operand::gpr("grs1"),
                Operand::gpr("grs2"),
                Operand::imm("grs1_inc", false),
                Operand::imm("grs2_inc", false),
            ],
            vec![],
        );
        let vals = op_vals([("grs1", 4), ("grs2", 5), ("grs1_inc", 0), ("grs2_inc", 1)]);

        let facts =
            TransferRule::Increment.new_facts(&insn, &vals, &known(&[("x0", 0), ("x4", 7)]));
        assert!(facts.is_empty());

        let facts = TransferRule::Increment.new_facts(
            &insn,
            &vals,
            &known(&[("x0", 0), ("x4", 7), ("x5", 9)]),
        );
        assert_eq!(facts, vec![("x5".to_string(), 10)]);
    }
}
