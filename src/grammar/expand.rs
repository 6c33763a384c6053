use super::rules::RuleSet;
use super::symbol::SymbolString;
use crate::error::{Result, TreeError};

/// Hard cap on rewriting passes, independent of the symbol ceiling
pub const MAX_ITERATIONS: u32 = 12;

/// Default ceiling on expanded string length
pub const DEFAULT_MAX_SYMBOLS: usize = 4_000_000;

/// Largest ceiling a caller may configure; larger requests are clamped
pub const MAX_SYMBOLS: usize = 16_000_000;

/// Resource ceiling enforced during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    pub max_symbols: usize,
    pub max_iterations: u32,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_symbols: DEFAULT_MAX_SYMBOLS,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl ExpansionLimits {
    pub fn with_max_symbols(mut self, max_symbols: usize) -> Self {
        self.max_symbols = max_symbols;
        self
    }
}

/// Rewrite `axiom` with `rules` for `iterations` parallel passes.
///
/// Each pass replaces every symbol that has a rule with its full replacement
/// and copies every other symbol through. The length of the next pass is
/// computed before anything is allocated, so an overflow fails without
/// building the oversized string.
pub fn expand(
    axiom: &SymbolString,
    rules: &RuleSet,
    iterations: u32,
    limits: &ExpansionLimits,
) -> Result<SymbolString> {
    if iterations > limits.max_iterations {
        return Err(TreeError::IterationLimit {
            requested: iterations,
            max: limits.max_iterations,
        });
    }
    let limit = limits.max_symbols.min(MAX_SYMBOLS);
    if axiom.len() > limit {
        return Err(TreeError::GrammarOverflow {
            limit,
            required: axiom.len(),
            iteration: 0,
        });
    }

    let mut current = axiom.clone();

    for iteration in 1..=iterations {
        let required = next_length(&current, rules);
        if required > limit {
            tracing::warn!(iteration, required, limit, "grammar expansion overflow");
            return Err(TreeError::GrammarOverflow {
                limit,
                required,
                iteration,
            });
        }

        let Some(mut next) = SymbolString::try_with_capacity(required) else {
            tracing::warn!(iteration, required, "allocation for expansion pass refused");
            return Err(TreeError::GrammarOverflow {
                limit,
                required,
                iteration,
            });
        };
        for &symbol in &current {
            match rules.get(symbol) {
                Some(replacement) => next.extend_from(replacement),
                None => next.push(symbol),
            }
        }

        tracing::trace!(iteration, length = next.len(), "expansion pass");
        current = next;
    }

    Ok(current)
}

/// Length after one more pass, saturating instead of wrapping
fn next_length(current: &SymbolString, rules: &RuleSet) -> usize {
    current.iter().fold(0usize, |acc, &symbol| {
        acc.saturating_add(rules.get(symbol).map_or(1, SymbolString::len))
    })
}
