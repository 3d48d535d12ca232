//! Text assembler for decoded instruction listings.
//!
//! Parses the same syntax the [`Display`](std::fmt::Display) impl of
//! [`DecodedInstruction`] prints:
//!
//! ```text
//! li   r1, 5          # comments start with '#' or ';'
//! addi r2, r1, -1
//! mul  r3, r1, r2
//! nop
//! ```
//!
//! Registers are written `rN` (or `xN`, or `zero` for `r0`). Immediates are
//! decimal or `0x`-prefixed hexadecimal, optionally negative.

use std::str::FromStr;

use crate::common::constants::MAX_ARCH_REGS;
use crate::common::error::{ParseError, ParseErrorKind};
use crate::isa::instruction::{DecodedInstruction, Format, Opcode};

impl FromStr for DecodedInstruction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
            .map_err(|kind| ParseError { line: 1, kind })?
            .ok_or(ParseError {
                line: 1,
                kind: ParseErrorKind::UnknownMnemonic(String::new()),
            })
    }
}

/// Parses a whole listing, skipping blank and comment-only lines.
///
/// # Errors
///
/// Returns the first malformed line, numbered from 1.
pub fn parse_program(text: &str) -> Result<Vec<DecodedInstruction>, ParseError> {
    let mut program = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(instr)) => program.push(instr),
            Ok(None) => {}
            Err(kind) => return Err(ParseError { line: idx + 1, kind }),
        }
    }
    Ok(program)
}

/// Parses one line. `Ok(None)` for a line with no instruction on it.
fn parse_line(line: &str) -> Result<Option<DecodedInstruction>, ParseErrorKind> {
    let code = line
        .split(['#', ';'])
        .next()
        .unwrap_or_default()
        .trim();
    if code.is_empty() {
        return Ok(None);
    }

    let (mnemonic, rest) = code
        .split_once(char::is_whitespace)
        .map_or((code, ""), |(m, r)| (m, r.trim()));
    let opcode = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| ParseErrorKind::UnknownMnemonic(mnemonic.to_string()))?;

    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };
    let expected = opcode.format().operand_count();
    if operands.len() != expected {
        return Err(ParseErrorKind::OperandCount {
            mnemonic: opcode.mnemonic().to_string(),
            expected,
            found: operands.len(),
        });
    }

    let instr = match opcode.format() {
        Format::R => DecodedInstruction::r(
            opcode,
            parse_register(operands[0])?,
            parse_register(operands[1])?,
            parse_register(operands[2])?,
        ),
        Format::I => DecodedInstruction::i(
            opcode,
            parse_register(operands[0])?,
            parse_register(operands[1])?,
            parse_immediate(operands[2])?,
        ),
        Format::Imm => DecodedInstruction::li(
            parse_register(operands[0])?,
            parse_immediate(operands[1])?,
        ),
        Format::Move => DecodedInstruction::mov(
            parse_register(operands[0])?,
            parse_register(operands[1])?,
        ),
        Format::None => DecodedInstruction::nop(),
    };
    Ok(Some(instr))
}

fn parse_register(token: &str) -> Result<usize, ParseErrorKind> {
    let bad = || ParseErrorKind::BadRegister(token.to_string());
    if token.eq_ignore_ascii_case("zero") {
        return Ok(0);
    }
    let digits = token
        .strip_prefix(['r', 'R', 'x', 'X'])
        .ok_or_else(bad)?;
    let idx: usize = digits.parse().map_err(|_| bad())?;
    if idx >= MAX_ARCH_REGS {
        return Err(bad());
    }
    Ok(idx)
}

fn parse_immediate(token: &str) -> Result<i64, ParseErrorKind> {
    let bad = || ParseErrorKind::BadImmediate(token.to_string());
    let (negative, magnitude) = token
        .strip_prefix('-')
        .map_or((false, token), |m| (true, m));
    let bits = match magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => magnitude.parse::<u64>(),
    }
    .map_err(|_| bad())?;
    // Unsigned magnitudes are 64-bit patterns; negated ones must fit i64.
    if negative && bits > i64::MIN.unsigned_abs() {
        return Err(bad());
    }
    let value = bits as i64;
    Ok(if negative { value.wrapping_neg() } else { value })
}
