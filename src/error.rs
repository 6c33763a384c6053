//! Error types shared by every stage of the generation pipeline.

use thiserror::Error;

/// Failures raised while expanding, interpreting or assembling a tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Expansion would produce more symbols than the configured ceiling.
    #[error("grammar overflow at iteration {iteration}: {required} symbols exceeds limit of {limit}")]
    GrammarOverflow {
        limit: usize,
        required: usize,
        iteration: u32,
    },

    /// Requested more rewriting passes than the engine allows.
    #[error("grammar overflow: {requested} iterations exceeds limit of {max}")]
    IterationLimit { requested: u32, max: u32 },

    /// Push/pop symbols did not pair up.
    #[error("imbalanced branch stack: {unmatched_pops} unmatched pop(s), {unclosed_pushes} unclosed push(es)")]
    ImbalancedStack {
        unmatched_pops: usize,
        unclosed_pushes: usize,
    },

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid rule on line {line}: {reason}")]
    InvalidRule { line: usize, reason: String },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TreeError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Only stack imbalance leaves usable (if partial) geometry behind.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TreeError::ImbalancedStack { .. })
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_stack_imbalance_is_recoverable() {
        let imbalance = TreeError::ImbalancedStack {
            unmatched_pops: 1,
            unclosed_pushes: 0,
        };
        assert!(imbalance.is_recoverable());
        assert!(!TreeError::UnknownPreset("ELM".into()).is_recoverable());
        assert!(!TreeError::invalid("angle", "not finite").is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = TreeError::GrammarOverflow {
            limit: 100,
            required: 1000,
            iteration: 3,
        };
        assert_eq!(
            err.to_string(),
            "grammar overflow at iteration 3: 1000 symbols exceeds limit of 100"
        );
        assert_eq!(
            TreeError::UnknownPreset("ELM".into()).to_string(),
            "unknown preset 'ELM'"
        );
    }
}
