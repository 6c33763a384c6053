use std::collections::HashMap;

use super::symbol::{Symbol, SymbolString};
use crate::error::{Result, TreeError};

/// Production rules keyed by the single symbol they rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: HashMap<Symbol, SymbolString>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule insertion; a later rule for the same symbol replaces the earlier one
    pub fn with_rule(mut self, symbol: char, replacement: &str) -> Self {
        self.rules
            .insert(Symbol::from_char(symbol), SymbolString::parse(replacement));
        self
    }

    /// Parse rules written one per line as `X:replacement`.
    ///
    /// Blank entries are skipped. Each key must be exactly one symbol and may
    /// appear only once.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rules = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let entry = raw.trim();
            if entry.is_empty() {
                continue;
            }

            let (key, replacement) = entry.split_once(':').ok_or_else(|| TreeError::InvalidRule {
                line,
                reason: format!("expected 'symbol:replacement', got '{}'", entry),
            })?;

            let mut key_chars = key.trim().chars();
            let symbol = match (key_chars.next(), key_chars.next()) {
                (Some(c), None) => Symbol::from_char(c),
                _ => {
                    return Err(TreeError::InvalidRule {
                        line,
                        reason: format!("rule key '{}' must be a single symbol", key.trim()),
                    })
                }
            };

            if rules
                .insert(symbol, SymbolString::parse(replacement))
                .is_some()
            {
                return Err(TreeError::InvalidRule {
                    line,
                    reason: format!("duplicate rule for '{}'", symbol.to_char()),
                });
            }
        }

        Ok(Self { rules })
    }

    pub fn get(&self, symbol: Symbol) -> Option<&SymbolString> {
        self.rules.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classic_rules() {
        let rules = RuleSet::parse("X:F[+X]F[-X]FX\nF:FF").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.get(Symbol::Variable('X')).unwrap().to_string(),
            "F[+X]F[-X]FX"
        );
        assert_eq!(rules.get(Symbol::Forward).unwrap().to_string(), "FF");
    }

    #[test]
    fn test_parse_tolerates_padding_and_blank_lines() {
        let rules = RuleSet::parse("\n  F : F[+F]F  \n\n").unwrap();
        assert_eq!(rules.get(Symbol::Forward).unwrap().to_string(), "F[+F]F");
    }

    #[test]
    fn test_semicolon_is_an_ordinary_symbol() {
        let rules = RuleSet::parse("X:FX;F:FF").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules.get(Symbol::Variable('X')).unwrap().to_string(),
            "FX;F:FF"
        );
    }

    #[test]
    fn test_missing_colon_is_rejected() {
        let err = RuleSet::parse("F:FF\nXFX").unwrap_err();
        match err {
            TreeError::InvalidRule { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multi_char_key_is_rejected() {
        assert!(matches!(
            RuleSet::parse("FX:F"),
            Err(TreeError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        assert!(matches!(
            RuleSet::parse("F:FF\nF:F[+F]"),
            Err(TreeError::InvalidRule { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_replacement_erases_symbol() {
        let rules = RuleSet::parse("X:").unwrap();
        assert!(rules.get(Symbol::Variable('X')).unwrap().is_empty());
    }
}
