//! Decoded instruction traces
//!
//! A trace bundles instruction declarations with a linear program of decoded
//! instances, so the tracker can be run without a decoder attached.

pub mod format;

pub use format::{InsnSpec, ProgramEntry, TraceFile};

use crate::analysis::{track_sequence, ConstantContext, TrackedSequence, ZERO_REG};
use crate::error::{Error, Result};
use crate::insn::{Insn, OpVals};
use std::collections::HashMap;
use std::path::Path;

/// A parsed trace with resolved instruction descriptors
#[derive(Debug, Clone)]
pub struct Trace {
    descriptors: HashMap<String, Insn>,
    program: Vec<ProgramEntry>,
    entry: ConstantContext,
}

impl Trace {
    /// Parse a trace from its JSON text
    pub fn parse(text: &str) -> Result<Self> {
        let file: TraceFile = serde_json::from_str(text)?;
        Self::from_trace_file(file)
    }

    /// Read and parse a trace file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn from_trace_file(file: TraceFile) -> Result<Self> {
        let descriptors = file
            .instructions
            .into_iter()
            .map(|spec| {
                let insn = Insn::with_destination_flow(
                    spec.mnemonic.clone(),
                    spec.operands,
                    spec.implicit_writes,
                );
                (spec.mnemonic, insn)
            })
            .collect();

        let mut entry = file.entry;
        entry.entry(ZERO_REG.to_string()).or_insert(0);
        let entry = ConstantContext::new(entry)?;

        Ok(Self {
            descriptors,
            program: file.program,
            entry,
        })
    }

    /// Number of instruction instances in the program
    pub fn len(&self) -> usize {
        self.program.len()
    }

    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }

    pub fn entry(&self) -> &ConstantContext {
        &self.entry
    }

    pub fn descriptor(&self, mnemonic: &str) -> Option<&Insn> {
        self.descriptors.get(mnemonic)
    }

    /// Resolve every program entry to its descriptor and operand values
    pub fn instances(&self) -> Result<Vec<(&Insn, &OpVals)>> {
        self.program
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                self.descriptors
                    .get(&entry.insn)
                    .map(|insn| (insn, &entry.op_vals))
                    .ok_or_else(|| Error::UnknownMnemonic {
                        mnemonic: entry.insn.clone(),
                        index,
                    })
            })
            .collect()
    }

    /// Run the constant tracker over the whole program
    pub fn track(&self) -> Result<TrackedSequence> {
        let instances = self.instances()?;
        Ok(track_sequence(self.entry.copy(), instances))
    }
}
