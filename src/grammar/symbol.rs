use std::fmt;

/// A grammar symbol, classified once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `F` - move forward and record a segment
    Forward,
    /// `f` - move forward without recording
    Skip,
    /// `+`
    TurnLeft,
    /// `-`
    TurnRight,
    /// `&`
    PitchDown,
    /// `^`
    PitchUp,
    /// `\`
    RollLeft,
    /// `/`
    RollRight,
    /// `|`
    TurnAround,
    /// `[`
    Push,
    /// `]`
    Pop,
    /// Any other character; only the grammar engine looks at these
    Variable(char),
}

impl Symbol {
    pub fn from_char(c: char) -> Self {
        match c {
            'F' => Symbol::Forward,
            'f' => Symbol::Skip,
            '+' => Symbol::TurnLeft,
            '-' => Symbol::TurnRight,
            '&' => Symbol::PitchDown,
            '^' => Symbol::PitchUp,
            '\\' => Symbol::RollLeft,
            '/' => Symbol::RollRight,
            '|' => Symbol::TurnAround,
            '[' => Symbol::Push,
            ']' => Symbol::Pop,
            other => Symbol::Variable(other),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Symbol::Forward => 'F',
            Symbol::Skip => 'f',
            Symbol::TurnLeft => '+',
            Symbol::TurnRight => '-',
            Symbol::PitchDown => '&',
            Symbol::PitchUp => '^',
            Symbol::RollLeft => '\\',
            Symbol::RollRight => '/',
            Symbol::TurnAround => '|',
            Symbol::Push => '[',
            Symbol::Pop => ']',
            Symbol::Variable(c) => c,
        }
    }

    /// True for symbols the turtle ignores
    pub fn is_variable(self) -> bool {
        matches!(self, Symbol::Variable(_))
    }
}

/// Ordered sequence of grammar symbols.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolString {
    symbols: Vec<Symbol>,
}

impl SymbolString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate room for `capacity` symbols, or `None` if the allocator refuses
    pub(crate) fn try_with_capacity(capacity: usize) -> Option<Self> {
        let mut symbols = Vec::new();
        symbols.try_reserve_exact(capacity).ok()?;
        Some(Self { symbols })
    }

    /// Parse text into symbols; whitespace is dropped
    pub fn parse(text: &str) -> Self {
        Self {
            symbols: text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(Symbol::from_char)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    pub(crate) fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub(crate) fn extend_from(&mut self, other: &SymbolString) {
        self.symbols.extend_from_slice(&other.symbols);
    }
}

impl<'a> IntoIterator for &'a SymbolString {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SymbolString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.symbols {
            write!(f, "{}", s.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_turtle_symbols() {
        let s = SymbolString::parse("F[+X]f&^\\/|-");
        let expected = vec![
            Symbol::Forward,
            Symbol::Push,
            Symbol::TurnLeft,
            Symbol::Variable('X'),
            Symbol::Pop,
            Symbol::Skip,
            Symbol::PitchDown,
            Symbol::PitchUp,
            Symbol::RollLeft,
            Symbol::RollRight,
            Symbol::TurnAround,
            Symbol::TurnRight,
        ];
        assert_eq!(s.as_slice(), expected.as_slice());
        assert_eq!(s.iter().filter(|sym| sym.is_variable()).count(), 1);
    }

    #[test]
    fn test_parse_skips_whitespace() {
        let s = SymbolString::parse(" F F\n[ ]\t");
        assert_eq!(s.len(), 4);
        assert_eq!(s.to_string(), "FF[]");
    }

    #[test]
    fn test_display_round_trip() {
        let text = "X:F[+X]F[-X]FX";
        assert_eq!(SymbolString::parse(text).to_string(), text);
    }

    #[test]
    fn test_count() {
        let s = SymbolString::parse("F[+F]F");
        assert_eq!(s.count(Symbol::Forward), 3);
        assert_eq!(s.count(Symbol::Push), 1);
    }
}
