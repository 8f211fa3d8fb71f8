//! Known-constant GPR tracking
//!
//! A [`ConstantContext`] records which GPRs hold a value known at analysis
//! time. It is used to resolve indirect references, where the value of a GPR
//! (not its name) selects a WDR or a loop count.

use super::transfer::TransferRule;
use crate::error::{Error, Result};
use crate::insn::{Insn, OpVals, RegFile};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The hard-wired zero register
pub const ZERO_REG: &str = "x0";

/// Mapping from GPR name to its known value at one program point
///
/// `x0` is always present with value 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConstantContext {
    values: BTreeMap<String, i64>,
}

impl ConstantContext {
    /// Create a context from an existing mapping
    ///
    /// The mapping must contain `x0` with value 0.
    pub fn new(values: BTreeMap<String, i64>) -> Result<Self> {
        match values.get(ZERO_REG).copied() {
            Some(0) => Ok(Self { values }),
            Some(v) => Err(Error::invariant(format!(
                "{} must be 0, got {}",
                ZERO_REG, v
            ))),
            None => Err(Error::invariant(format!("{} is missing", ZERO_REG))),
        }
    }

    /// A context with no known constants other than `x0`
    pub fn empty() -> Self {
        let mut values = BTreeMap::new();
        values.insert(ZERO_REG.to_string(), 0);
        Self { values }
    }

    /// Record that `gpr` holds `value`. Writes to `x0` are ignored.
    pub fn set(&mut self, gpr: &str, value: i64) {
        if gpr == ZERO_REG {
            return;
        }
        self.values.insert(gpr.to_string(), value);
    }

    pub fn get(&self, gpr: &str) -> Option<i64> {
        self.values.get(gpr).copied()
    }

    pub fn contains(&self, gpr: &str) -> bool {
        self.values.contains_key(gpr)
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Number of known registers, including `x0`
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, `x0` is always known
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Known registers and their values, in register-name order
    pub fn values(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Returns a new context with only the values on which `self` and `other` agree
    pub fn intersect(&self, other: &ConstantContext) -> ConstantContext {
        let values = self
            .values
            .iter()
            .filter(|(k, v)| other.values.get(*k) == Some(*v))
            .map(|(k, &v)| (k.clone(), v))
            .collect();
        ConstantContext { values }
    }

    /// Render the register in `file` selected by the known value of `gpr`
    ///
    /// `None` if `gpr` is not constant or its value is not a valid index.
    pub fn resolve_indirect(&self, gpr: &str, file: RegFile) -> Option<String> {
        self.get(gpr).and_then(|value| file.reg_name(value))
    }

    /// Advance the context across one instruction instance
    ///
    /// New facts are computed first against the current values. Every
    /// register the instruction writes according to its information flow is
    /// then forgotten, and the new facts are written back on top.
    pub fn update_insn(&mut self, insn: &Insn, op_vals: &OpVals) {
        let rule = TransferRule::for_mnemonic(insn.mnemonic());
        let new_values = rule.new_facts(insn, op_vals, &self.values);
        log::trace!("{} ({:?}): new facts {:?}", insn.mnemonic(), rule, new_values);

        let iflow = insn.iflow().evaluate(insn, op_vals, &self.values);
        for sink in iflow.all_sinks() {
            if sink == ZERO_REG {
                continue;
            }
            if let Some(old) = self.values.remove(sink) {
                log::debug!("{}: {} is no longer constant (was {})", insn.mnemonic(), sink, old);
            }
        }

        for (gpr, value) in new_values {
            self.set(&gpr, value);
        }
    }
}

impl Default for ConstantContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<BTreeMap<String, i64>> for ConstantContext {
    type Error = Error;

    fn try_from(values: BTreeMap<String, i64>) -> Result<Self> {
        Self::new(values)
    }
}

impl fmt::Display for ConstantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (gpr, value)) in self.values().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", gpr, value)?;
        }
        write!(f, "}}")
    }
}
