//! Operand descriptors
//!
//! Operands are either register selectors or immediates. Register selectors
//! render back to a canonical register name given the concrete value an
//! instruction instance encoded for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of registers in each architectural register file
pub const REGS_PER_FILE: i64 = 32;

/// Register files that an operand can select from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegFile {
    /// General-purpose registers `x0`..`x31`
    Gpr,
    /// Wide data registers `w0`..`w31`
    Wdr,
}

impl RegFile {
    /// Name prefix used when rendering a register of this file
    pub fn prefix(self) -> &'static str {
        match self {
            RegFile::Gpr => "x",
            RegFile::Wdr => "w",
        }
    }

    /// Render register `index` of this file, if the index is in range
    pub fn reg_name(self, index: i64) -> Option<String> {
        if (0..REGS_PER_FILE).contains(&index) {
            Some(format!("{}{}", self.prefix(), index))
        } else {
            None
        }
    }
}

impl fmt::Display for RegFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegFile::Gpr => write!(f, "gpr"),
            RegFile::Wdr => write!(f, "wdr"),
        }
    }
}

/// A register-typed operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegOperandType {
    pub file: RegFile,
    /// Whether the instruction writes the selected register
    #[serde(default, rename = "dest")]
    pub is_dest: bool,
}

impl RegOperandType {
    pub fn new(file: RegFile, is_dest: bool) -> Self {
        Self { file, is_dest }
    }

    /// Convert a concrete operand value to the register name it selects
    pub fn op_val_to_str(&self, op_val: i64) -> Option<String> {
        self.file.reg_name(op_val)
    }
}

/// An immediate operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImmOperandType {
    #[serde(default)]
    pub signed: bool,
}

/// Operand type as declared by the instruction descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandType {
    Reg(RegOperandType),
    Imm(ImmOperandType),
}

impl OperandType {
    pub fn as_reg(&self) -> Option<&RegOperandType> {
        match self {
            OperandType::Reg(reg) => Some(reg),
            OperandType::Imm(_) => None,
        }
    }
}

/// A named operand of an instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    pub name: String,
    #[serde(rename = "type")]
    pub op_type: OperandType,
}

impl Operand {
    /// Source GPR operand
    pub fn gpr(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op_type: OperandType::Reg(RegOperandType::new(RegFile::Gpr, false)),
        }
    }

    /// Destination GPR operand
    pub fn gpr_dest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            op_type: OperandType::Reg(RegOperandType::new(RegFile::Gpr, true)),
        }
    }

    /// Register operand in an arbitrary file
    pub fn reg(name: impl Into<String>, file: RegFile, is_dest: bool) -> Self {
        Self {
            name: name.into(),
            op_type: OperandType::Reg(RegOperandType::new(file, is_dest)),
        }
    }

    /// Immediate operand
    pub fn imm(name: impl Into<String>, signed: bool) -> Self {
        Self {
            name: name.into(),
            op_type: OperandType::Imm(ImmOperandType { signed }),
        }
    }

    /// Returns the base operand name if this is an increment flag (`<base>_inc`)
    pub fn increment_base(&self) -> Option<&str> {
        self.name.strip_suffix(INC_SUFFIX)
    }
}

/// Suffix marking an operand as an "increment the base register" flag
pub const INC_SUFFIX: &str = "_inc";
