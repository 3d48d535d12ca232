//! Decoded instruction representation.
//!
//! This module defines the immutable form in which instructions reach the
//! scheduler. It provides:
//! 1. **Opcodes:** The operation set and its assembly mnemonics.
//! 2. **Operation Classes:** The execution resource kind each opcode needs.
//! 3. **Capability Masks:** Sets of classes an execution resource can run.
//! 4. **Decoded Instructions:** Opcode plus register and immediate fields.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::common::constants::ZERO_REG;
use crate::common::error::ParseErrorKind;

/// Operation performed by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opcode {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = rs1 << rs2[5:0]`
    Sll,
    /// `rd = rs1 >> rs2[5:0]` (logical)
    Srl,
    /// `rd = (rs1 < rs2) as signed`
    Slt,
    /// `rd = rs1 * rs2` (low 64 bits)
    Mul,
    /// `rd = rs1 / rs2` (signed)
    Div,
    /// `rd = rs1 % rs2` (signed)
    Rem,
    /// `rd = rs1 + imm`
    Addi,
    /// `rd = imm`
    Li,
    /// `rd = rs1`
    Mov,
    /// No operation.
    #[default]
    Nop,
}

impl Opcode {
    /// Every opcode, in mnemonic table order.
    pub const ALL: [Self; 15] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Sll,
        Self::Srl,
        Self::Slt,
        Self::Mul,
        Self::Div,
        Self::Rem,
        Self::Addi,
        Self::Li,
        Self::Mov,
        Self::Nop,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Slt => "slt",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Rem => "rem",
            Self::Addi => "addi",
            Self::Li => "li",
            Self::Mov => "mov",
            Self::Nop => "nop",
        }
    }

    /// Looks up an opcode by (case-insensitive) mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
    }

    /// Execution resource class required by this opcode.
    pub const fn class(self) -> OpClass {
        match self {
            Self::Mul => OpClass::IntMul,
            Self::Div | Self::Rem => OpClass::IntDiv,
            _ => OpClass::IntAlu,
        }
    }

    /// Operand layout used by the assembler and disassembler.
    pub const fn format(self) -> Format {
        match self {
            Self::Add
            | Self::Sub
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Sll
            | Self::Srl
            | Self::Slt
            | Self::Mul
            | Self::Div
            | Self::Rem => Format::R,
            Self::Addi => Format::I,
            Self::Li => Format::Imm,
            Self::Mov => Format::Move,
            Self::Nop => Format::None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Operand layout of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `op rd, rs1, rs2`
    R,
    /// `op rd, rs1, imm`
    I,
    /// `op rd, imm`
    Imm,
    /// `op rd, rs1`
    Move,
    /// `op`
    None,
}

impl Format {
    /// Number of comma-separated operands in assembly syntax.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::R | Self::I => 3,
            Self::Imm | Self::Move => 2,
            Self::None => 0,
        }
    }

    /// Which of `rd`, `rs1`, `rs2` and `imm` this layout carries, in that order.
    pub const fn fields(self) -> [bool; 4] {
        match self {
            Self::R => [true, true, true, false],
            Self::I => [true, true, false, true],
            Self::Imm => [true, false, false, true],
            Self::Move => [true, true, false, false],
            Self::None => [false, false, false, false],
        }
    }
}

/// Kind of execution resource an operation needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OpClass {
    /// Single-cycle integer arithmetic, logic and moves.
    IntAlu,
    /// Integer multiplier.
    IntMul,
    /// Integer divider.
    IntDiv,
}

impl OpClass {
    /// Every class.
    pub const ALL: [Self; 3] = [Self::IntAlu, Self::IntMul, Self::IntDiv];

    const fn bit(self) -> u8 {
        match self {
            Self::IntAlu => 1 << 0,
            Self::IntMul => 1 << 1,
            Self::IntDiv => 1 << 2,
        }
    }
}

/// Set of [`OpClass`]es an execution resource accepts; the Issue filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CapabilityMask(u8);

impl CapabilityMask {
    /// Accepts nothing.
    pub const NONE: Self = Self(0);
    /// Accepts every class.
    pub const ALL: Self = Self(0b111);

    /// Mask accepting exactly one class.
    pub const fn only(class: OpClass) -> Self {
        Self(class.bit())
    }

    /// Returns this mask extended with `class`.
    #[must_use]
    pub const fn with(self, class: OpClass) -> Self {
        Self(self.0 | class.bit())
    }

    /// Whether the mask accepts `class`.
    pub const fn contains(self, class: OpClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Whether the mask accepts the class of `instr`.
    pub const fn accepts(self, instr: &DecodedInstruction) -> bool {
        self.contains(instr.opcode.class())
    }

    /// Whether no class is accepted.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CapabilityMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl FromIterator<OpClass> for CapabilityMask {
    fn from_iter<I: IntoIterator<Item = OpClass>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl fmt::Display for CapabilityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = OpClass::ALL
            .into_iter()
            .filter(|c| self.contains(*c))
            .map(|c| format!("{c:?}"))
            .collect();
        write!(f, "{{{}}}", names.join(","))
    }
}

/// A decoded instruction as delivered to Dispatch. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodedInstruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register, if any.
    #[serde(default)]
    pub rd: Option<usize>,
    /// First source register, if any.
    #[serde(default)]
    pub rs1: Option<usize>,
    /// Second source register, if any.
    #[serde(default)]
    pub rs2: Option<usize>,
    /// Immediate operand, if any.
    #[serde(default)]
    pub imm: Option<i64>,
}

impl DecodedInstruction {
    /// Register-register form: `op rd, rs1, rs2`.
    pub const fn r(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self {
            opcode,
            rd: Some(rd),
            rs1: Some(rs1),
            rs2: Some(rs2),
            imm: None,
        }
    }

    /// Register-immediate form: `op rd, rs1, imm`.
    pub const fn i(opcode: Opcode, rd: usize, rs1: usize, imm: i64) -> Self {
        Self {
            opcode,
            rd: Some(rd),
            rs1: Some(rs1),
            rs2: None,
            imm: Some(imm),
        }
    }

    /// `li rd, imm`
    pub const fn li(rd: usize, imm: i64) -> Self {
        Self {
            opcode: Opcode::Li,
            rd: Some(rd),
            rs1: None,
            rs2: None,
            imm: Some(imm),
        }
    }

    /// `mov rd, rs1`
    pub const fn mov(rd: usize, rs1: usize) -> Self {
        Self {
            opcode: Opcode::Mov,
            rd: Some(rd),
            rs1: Some(rs1),
            rs2: None,
            imm: None,
        }
    }

    /// `nop`
    pub const fn nop() -> Self {
        Self {
            opcode: Opcode::Nop,
            rd: None,
            rs1: None,
            rs2: None,
            imm: None,
        }
    }

    /// Source registers in operand-port order.
    pub const fn sources(&self) -> [Option<usize>; 2] {
        [self.rs1, self.rs2]
    }

    /// Destination register if it names something other than the zero register.
    pub fn writes(&self) -> Option<usize> {
        self.rd.filter(|&r| r != ZERO_REG)
    }

    /// Checks that exactly the fields of the opcode's format are present.
    ///
    /// The constructors and the assembler always produce well-formed
    /// instructions; deserialized ones may not.
    ///
    /// # Errors
    ///
    /// Names the first field that is missing or should not be there.
    pub fn validate(&self) -> Result<(), ParseErrorKind> {
        let present = [
            self.rd.is_some(),
            self.rs1.is_some(),
            self.rs2.is_some(),
            self.imm.is_some(),
        ];
        let names = ["rd", "rs1", "rs2", "imm"];
        let expected = self.opcode.format().fields();
        let mismatch = names
            .into_iter()
            .zip(expected.into_iter().zip(present))
            .find(|(_, (want, have))| want != have);
        if let Some((field, (want, _))) = mismatch {
            let mnemonic = self.opcode.mnemonic().to_string();
            return Err(if want {
                ParseErrorKind::MissingField { mnemonic, field }
            } else {
                ParseErrorKind::UnexpectedField { mnemonic, field }
            });
        }
        Ok(())
    }

    /// Highest register index the instruction names.
    pub fn max_register(&self) -> Option<usize> {
        [self.rd, self.rs1, self.rs2].into_iter().flatten().max()
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = |r: Option<usize>| r.map_or_else(|| "r?".to_string(), |r| format!("r{r}"));
        let imm = self.imm.unwrap_or(0);
        match self.opcode.format() {
            Format::R => write!(
                f,
                "{} {}, {}, {}",
                self.opcode,
                reg(self.rd),
                reg(self.rs1),
                reg(self.rs2)
            ),
            Format::I => write!(
                f,
                "{} {}, {}, {}",
                self.opcode,
                reg(self.rd),
                reg(self.rs1),
                imm
            ),
            Format::Imm => write!(f, "{} {}, {}", self.opcode, reg(self.rd), imm),
            Format::Move => write!(f, "{} {}, {}", self.opcode, reg(self.rd), reg(self.rs1)),
            Format::None => write!(f, "{}", self.opcode),
        }
    }
}
