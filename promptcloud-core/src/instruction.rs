//! User instructions sent to the inference backend

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A natural-language instruction with at least one non-whitespace character
///
/// The input text is kept verbatim apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instruction(String);

impl Instruction {
    /// Validate raw input text
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInstruction);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Instruction {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Instruction> for String {
    fn from(value: Instruction) -> Self {
        value.0
    }
}

impl AsRef<str> for Instruction {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(Instruction::parse(""), Err(ValidationError::EmptyInstruction));
        assert_eq!(Instruction::parse("  \t\n "), Err(ValidationError::EmptyInstruction));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let instruction = Instruction::parse("  pick up the red block \n").unwrap();
        assert_eq!(instruction.as_str(), "pick up the red block");
    }
}
