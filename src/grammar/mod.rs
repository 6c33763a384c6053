//! Grammar engine: symbol classification, production rules and
//! parallel rewriting with an enforced size ceiling.

pub mod symbol;
pub mod rules;
pub mod expand;

pub use symbol::{Symbol, SymbolString};
pub use rules::RuleSet;
pub use expand::{expand, ExpansionLimits, DEFAULT_MAX_SYMBOLS, MAX_ITERATIONS, MAX_SYMBOLS};
