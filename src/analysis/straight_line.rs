//! Constant tracking over a linear instruction sequence
//!
//! Walks instruction instances in order, recording the known constants at
//! every program point. Branches and joins are left to the caller, which can
//! merge the resulting contexts with [`ConstantContext::intersect`].

use super::ConstantContext;
use crate::insn::{Insn, OpVals};

/// Known constants at each point of a straight-line sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSequence {
    /// Context before each instruction, indexed like the input sequence
    pub points: Vec<ConstantContext>,
    /// Context after the last instruction
    pub exit: ConstantContext,
}

impl TrackedSequence {
    /// Number of program points, including the exit point
    pub fn len(&self) -> usize {
        self.points.len() + 1
    }

    /// Never true, there is always an exit point
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Context at program point `index`; `index == points.len()` is the exit
    pub fn at(&self, index: usize) -> Option<&ConstantContext> {
        if index == self.points.len() {
            Some(&self.exit)
        } else {
            self.points.get(index)
        }
    }
}

/// Track known constants through `program`, starting from `entry`
pub fn track_sequence<'a, I>(entry: ConstantContext, program: I) -> TrackedSequence
where
    I: IntoIterator<Item = (&'a Insn, &'a OpVals)>,
{
    let mut points = Vec::new();
    let mut current = entry;

    for (index, (insn, op_vals)) in program.into_iter().enumerate() {
        points.push(current.copy());
        current.update_insn(insn, op_vals);
        log::trace!("[{}] {} -> {}", index, insn.mnemonic(), current);
    }

    log::debug!(
        "Tracked {} instructions, {} constants known at exit",
        points.len(),
        current.len()
    );

    TrackedSequence {
        points,
        exit: current,
    }
}
