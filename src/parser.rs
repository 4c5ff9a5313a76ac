use crate::error::{Result, TruthTableError};
use crate::symbols::Symbol;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::iter;

/// Variables of an expression in order of first occurrence.
///
/// The position of a variable is both its column in the rendered table and its
/// bit significance when a row index is expanded into an assignment: position 0
/// is the most significant bit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    names: Vec<char>,
    index: FxHashMap<char, usize>,
}

impl VariableSet {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[char] {
        &self.names
    }

    pub fn position(&self, var: char) -> Option<usize> {
        self.index.get(&var).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.names.iter().copied()
    }
}

impl FromIterator<char> for VariableSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::default();

        for var in iter {
            if let Entry::Vacant(e) = set.index.entry(var) {
                e.insert(set.names.len());
                set.names.push(var);
            }
        }

        set
    }
}

#[derive(Debug, Clone)]
pub struct ParsedExpression {
    pub text: String,
    pub vars: VariableSet,
    symbols: Vec<Symbol>,
}

impl ParsedExpression {
    pub fn new(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(TruthTableError::malformed("empty expression"));
        }

        let tokens = Symbol::tokenize(text);
        check_balanced(&tokens)?;

        let vars = tokens
            .iter()
            .filter_map(|t| match t {
                Symbol::Var(v) => Some(*v),
                _ => None,
            })
            .collect();

        // the outer group guarantees at least one reduction, even for a bare variable
        let symbols = iter::once(Symbol::OpenParen)
            .chain(tokens)
            .chain(iter::once(Symbol::CloseParen))
            .collect();

        Ok(Self {
            text: text.to_string(),
            vars,
            symbols,
        })
    }

    /// Tokens of the expression, wrapped in one outer pair of parentheses.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl Symbol {
    pub fn tokenize(src: &str) -> Vec<Self> {
        src.chars().map(Self::from_char).collect()
    }
}

fn check_balanced(tokens: &[Symbol]) -> Result<()> {
    let mut depth = 0usize;

    for (i, t) in tokens.iter().enumerate() {
        match t {
            Symbol::OpenParen => depth += 1,
            Symbol::CloseParen => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    TruthTableError::malformed(format!("unmatched ')' at position {i}"))
                })?;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(TruthTableError::malformed(format!(
            "{depth} unclosed '(' at end of expression"
        )));
    }

    Ok(())
}
