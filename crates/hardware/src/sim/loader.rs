//! Program and configuration loading.
//!
//! Programs are read either as an assembly listing (any extension) or, for
//! `.json` files, as a serialized array of decoded instructions.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::error::SimError;
use crate::config::Config;
use crate::isa::asm::parse_program;
use crate::isa::instruction::DecodedInstruction;

/// Loads a program from disk.
///
/// # Errors
///
/// Returns an I/O, JSON or parse error, or
/// [`SimError::MalformedInstruction`] for a JSON instruction whose fields do
/// not match its opcode.
pub fn load_program(path: &Path) -> Result<Vec<DecodedInstruction>, SimError> {
    let text = fs::read_to_string(path)?;
    let program = if is_json(path) {
        let program: Vec<DecodedInstruction> = serde_json::from_str(&text)?;
        for (index, instr) in program.iter().enumerate() {
            instr
                .validate()
                .map_err(|kind| SimError::MalformedInstruction { index, kind })?;
        }
        program
    } else {
        parse_program(&text)?
    };
    debug!(path = %path.display(), instructions = program.len(), "loaded program");
    Ok(program)
}

/// Loads and validates a JSON configuration.
///
/// # Errors
///
/// Returns an I/O, JSON or validation error.
pub fn load_config(path: &Path) -> Result<Config, SimError> {
    let text = fs::read_to_string(path)?;
    let config = Config::from_json(&text)?;
    config.validate()?;
    Ok(config)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
