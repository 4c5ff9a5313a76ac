use crate::error::{Result, TruthTableError};
use crate::parser::VariableSet;
use crate::symbols::Symbol;
use itertools::Itertools;
use log::trace;
use std::iter::Peekable;
use std::slice::Iter;

type SymbolReader<'a> = Peekable<Iter<'a, Symbol>>;

/// Evaluates a fully parenthesized expression for one assignment.
///
/// `symbols` must be wrapped in an outer pair of parentheses (see
/// [`ParsedExpression::symbols`](crate::parser::ParsedExpression::symbols)).
/// `assignment[i]` is the value of the variable at position `i` in `vars`.
///
/// The innermost group (the first `)` and the `(` closest before it) is resolved
/// to a constant and the next symbol sequence is built with the group replaced by
/// that constant. This repeats until a single symbol remains.
pub fn evaluate(symbols: &[Symbol], vars: &VariableSet, assignment: &[bool]) -> Result<bool> {
    let mut current = symbols.to_vec();

    while current.len() > 1 {
        let (start, end) = innermost_group(&current)?;
        let value = resolve_group(&current[start + 1..end], vars, assignment)?;

        trace!(
            "reduce {} -> {}",
            current[start..=end].iter().join(""),
            u8::from(value)
        );

        current = current[..start]
            .iter()
            .copied()
            .chain(std::iter::once(Symbol::Const(value)))
            .chain(current[end + 1..].iter().copied())
            .collect();
    }

    match current.first() {
        Some(s) if s.is_operand() => operand_value(s, vars, assignment),
        Some(other) => Err(TruthTableError::malformed(format!(
            "expression reduced to '{other}'"
        ))),
        None => Err(TruthTableError::malformed("empty expression")),
    }
}

fn innermost_group(symbols: &[Symbol]) -> Result<(usize, usize)> {
    let mut start = None;

    for (i, s) in symbols.iter().enumerate() {
        match s {
            Symbol::OpenParen => start = Some(i),
            Symbol::CloseParen => {
                return start
                    .map(|start| (start, i))
                    .ok_or_else(|| TruthTableError::malformed(format!("unmatched ')' at {i}")));
            }
            _ => {}
        }
    }

    Err(TruthTableError::malformed(format!(
        "dangling symbols '{}' outside of any group",
        symbols.iter().join("")
    )))
}

/// Resolves the contents of one innermost group: `operand` or `operand OP operand`,
/// where an operand is a variable or constant preceded by any number of `!`.
fn resolve_group(group: &[Symbol], vars: &VariableSet, assignment: &[bool]) -> Result<bool> {
    let mut symbols = group.iter().peekable();

    let left = parse_operand(&mut symbols, group, vars, assignment)?;

    match symbols.next() {
        None => Ok(left),
        Some(Symbol::Op(op)) => {
            let right = parse_operand(&mut symbols, group, vars, assignment)?;

            if let Some(extra) = symbols.next() {
                return Err(malformed_group(
                    group,
                    format!("unexpected '{extra}' after second operand, add parentheses"),
                ));
            }

            Ok(op.apply(left, right))
        }
        Some(other) => Err(malformed_group(
            group,
            format!("expected binary operator, got '{other}'"),
        )),
    }
}

fn parse_operand(
    symbols: &mut SymbolReader,
    group: &[Symbol],
    vars: &VariableSet,
    assignment: &[bool],
) -> Result<bool> {
    let mut negate = false;

    while symbols.next_if_eq(&&Symbol::Not).is_some() {
        negate = !negate;
    }

    match symbols.next() {
        Some(s) if s.is_operand() => Ok(operand_value(s, vars, assignment)? ^ negate),
        Some(other) => Err(malformed_group(
            group,
            format!("expected operand, got '{other}'"),
        )),
        None => Err(malformed_group(group, "missing operand")),
    }
}

fn operand_value(symbol: &Symbol, vars: &VariableSet, assignment: &[bool]) -> Result<bool> {
    match symbol {
        Symbol::Const(b) => Ok(*b),
        Symbol::Var(v) => vars
            .position(*v)
            .and_then(|i| assignment.get(i).copied())
            .ok_or_else(|| TruthTableError::malformed(format!("no value assigned to '{v}'"))),
        other => Err(TruthTableError::malformed(format!(
            "'{other}' is not an operand"
        ))),
    }
}

fn malformed_group(group: &[Symbol], reason: impl AsRef<str>) -> TruthTableError {
    TruthTableError::malformed(format!(
        "in group '({})': {}",
        group.iter().join(""),
        reason.as_ref()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsedExpression;

    use test_log::test;

    fn eval(src: &str, assignment: &[bool]) -> Result<bool> {
        let parsed = ParsedExpression::new(src)?;
        evaluate(parsed.symbols(), &parsed.vars, assignment)
    }

    #[test]
    fn test_single_operator() -> Result<()> {
        assert!(eval("A.B", &[true, true])?);
        assert!(!eval("A.B", &[true, false])?);
        assert!(eval("A+B", &[false, true])?);
        assert!(!eval("A#B", &[true, true])?);
        Ok(())
    }

    #[test]
    fn test_bare_variable() -> Result<()> {
        assert!(eval("A", &[true])?);
        assert!(!eval("A", &[false])?);
        Ok(())
    }

    #[test]
    fn test_negation() -> Result<()> {
        assert!(eval("!A", &[false])?);
        assert!(!eval("!A", &[true])?);
        assert!(eval("!!A", &[true])?);
        assert!(eval("!A.B", &[false, true])?);
        assert!(!eval("A.!B", &[true, true])?);
        Ok(())
    }

    #[test]
    fn test_negated_group() -> Result<()> {
        // (!A) collapses to the negated bit
        assert!(eval("(!A)", &[false])?);
        assert!(eval("(!A).B", &[false, true])?);
        // negation of a reduced group
        assert!(eval("!(A.B)", &[true, false])?);
        assert!(!eval("!(A.B)", &[true, true])?);
        Ok(())
    }

    #[test]
    fn test_nested() -> Result<()> {
        // A + (B . (C . D))
        assert!(eval("A+(B.(C.D))", &[false, true, true, true])?);
        assert!(!eval("A+(B.(C.D))", &[false, true, true, false])?);
        assert!(eval("((A))", &[true])?);
        Ok(())
    }

    #[test]
    fn test_constants() -> Result<()> {
        assert!(eval("1", &[])?);
        assert!(!eval("0", &[])?);
        assert!(eval("(0+1)", &[])?);
        assert!(!eval("A.0", &[true])?);
        Ok(())
    }

    #[test]
    fn test_malformed_groups() {
        for src in ["A.B.C", "A.", ".A", "AB", "A!", "()", "A..B", "!"] {
            let result = eval(src, &[true, true, true]);
            assert!(
                matches!(result, Err(TruthTableError::MalformedExpression(_))),
                "{src:?} should be rejected, got {result:?}"
            );
        }
    }
}
