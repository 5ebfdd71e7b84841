//! # Step Instructions
//!
//! Paragraph lines of the form `Key: value` that configure the current step
//! instead of being shown. Only leading lines are instructions; the first
//! line that is not one ends the run and the rest of the text is content.
//!
//! ## Supported keys
//!
//! - `Duration: 2:30` sets the step duration (rounded up to whole minutes).
//! - `Environment: web, ios` restricts following content to those
//!   environments until the next header.

use std::collections::BTreeSet;
use std::time::Duration;

use super::duration::{parse_duration, round_duration};
use super::text::split_list;

const KEY_DURATION: &str = "duration";
const KEY_ENVIRONMENT: &str = "environment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Duration(Duration),
    Environment(BTreeSet<String>),
}

/// Parses one line as an instruction, `None` for any other line.
pub fn parse_line(line: &str) -> Option<Instruction> {
    let (key, value) = line.split_once(':')?;
    match key.trim().to_lowercase().as_str() {
        KEY_DURATION => Some(Instruction::Duration(round_duration(parse_duration(
            value.trim(),
        )))),
        KEY_ENVIRONMENT => Some(Instruction::Environment(split_list(value))),
        _ => None,
    }
}

/// True when the first non-blank line of `text` is an instruction.
pub fn starts_with_instruction(text: &str) -> bool {
    text.lines()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| parse_line(l).is_some())
}

/// Splits `text` into its leading instructions and the remaining content.
///
/// Remaining lines are joined with spaces, matching how soft line breaks
/// read in a paragraph.
pub fn split(text: &str) -> (Vec<Instruction>, String) {
    let mut instructions = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.peek() {
        if line.trim().is_empty() {
            lines.next();
            continue;
        }
        match parse_line(line) {
            Some(instruction) => {
                instructions.push(instruction);
                lines.next();
            }
            None => break,
        }
    }
    let rest = lines.collect::<Vec<_>>().join(" ");
    (instructions, rest)
}
