use crate::error::{Result, TruthTableError};
use crate::eval::evaluate;
use crate::parser::{ParsedExpression, VariableSet};
use itertools::Itertools;
use log::debug;
use std::fmt::{self, Display};

/// Largest number of variables accepted by [`TruthTable::new`].
pub const DEFAULT_MAX_VARIABLES: usize = 24;

/// Expands a row index into one bit per variable, most significant bit first.
///
/// Only the lowest `width` bits of `row` are used; positions beyond the width of
/// `usize` are always zero.
pub fn assignment(row: usize, width: usize) -> Vec<bool> {
    (0..width)
        .rev()
        .map(|shift| {
            u32::try_from(shift)
                .ok()
                .and_then(|shift| row.checked_shr(shift))
                .is_some_and(|bits| bits & 1 == 1)
        })
        .collect()
}

fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|&b| u8::from(b)).join(" ")
}

/// A single row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub inputs: Vec<bool>,
    pub output: bool,
}

impl Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            bits_to_string(&self.inputs),
            u8::from(self.output)
        )
    }
}

/// The complete truth table of an expression.
///
/// Variables and outputs are computed together when the expression is loaded and are
/// only ever replaced as a whole by [`set_expression`](Self::set_expression).
///
/// ```
/// use rstruth::TruthTable;
///
/// let table = TruthTable::new("A.B").unwrap();
/// assert_eq!(table.table_text(), "A B | X\n0 0 | 0\n0 1 | 0\n1 0 | 0\n1 1 | 1\n");
/// ```
#[derive(Debug, Clone)]
pub struct TruthTable {
    expression: ParsedExpression,
    outputs: Vec<bool>,
    max_variables: usize,
}

impl TruthTable {
    pub fn new(expression: &str) -> Result<Self> {
        Self::with_max_variables(expression, DEFAULT_MAX_VARIABLES)
    }

    pub fn with_max_variables(expression: &str, max_variables: usize) -> Result<Self> {
        let (expression, outputs) = Self::build(expression, max_variables)?;

        Ok(Self {
            expression,
            outputs,
            max_variables,
        })
    }

    /// Replaces the expression and recomputes the table.
    ///
    /// On error the previously loaded table is left untouched.
    pub fn set_expression(&mut self, expression: &str) -> Result<()> {
        let (expression, outputs) = Self::build(expression, self.max_variables)?;

        self.expression = expression;
        self.outputs = outputs;

        Ok(())
    }

    fn build(text: &str, max_variables: usize) -> Result<(ParsedExpression, Vec<bool>)> {
        let parsed = ParsedExpression::new(text)?;
        let width = parsed.vars.len();

        // also keeps the shift below within usize
        if width > max_variables || width >= usize::BITS as usize {
            return Err(TruthTableError::TooManyVariables {
                count: width,
                max: max_variables.min(usize::BITS as usize - 1),
            });
        }

        let rows = 1usize << width;

        debug!(
            "evaluating {:?}: {} variables, {} rows",
            parsed.text, width, rows
        );

        let outputs = (0..rows)
            .map(|row| evaluate(parsed.symbols(), &parsed.vars, &assignment(row, width)))
            .collect::<Result<Vec<bool>>>()?;

        Ok((parsed, outputs))
    }

    pub fn expression(&self) -> &str {
        &self.expression.text
    }

    pub fn variables(&self) -> &VariableSet {
        &self.expression.vars
    }

    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    pub const fn max_variables(&self) -> usize {
        self.max_variables
    }

    /// Number of rows, always `2^variables().len()`.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// A table always has at least one row.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    pub fn row(&self, index: usize) -> Result<Row> {
        let output = *self
            .outputs
            .get(index)
            .ok_or(TruthTableError::RowIndexOutOfRange {
                index,
                rows: self.outputs.len(),
            })?;

        Ok(Row {
            index,
            inputs: assignment(index, self.variables().len()),
            output,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        let width = self.variables().len();

        self.outputs.iter().enumerate().map(move |(index, &output)| Row {
            index,
            inputs: assignment(index, width),
            output,
        })
    }

    pub fn header(&self) -> String {
        format!("{} | X", self.variables().iter().join(" "))
    }

    /// The header line and the line of a single row.
    pub fn row_text(&self, index: usize) -> Result<String> {
        let row = self.row(index)?;
        Ok(format!("{}\n{}", self.header(), row))
    }

    pub fn table_text(&self) -> String {
        self.to_string()
    }

    pub fn to_debug_string(&self) -> String {
        format!(
            "TruthTable: expression={}, variables=[{}], outputs=[{}]",
            self.expression(),
            self.variables().iter().join(", "),
            self.outputs.iter().map(|&b| u8::from(b)).join(", ")
        )
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;

        for row in self.rows() {
            writeln!(f, "{row}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_assignment_msb_first() {
        assert_eq!(assignment(0, 3), vec![false, false, false]);
        assert_eq!(assignment(1, 3), vec![false, false, true]);
        assert_eq!(assignment(4, 3), vec![true, false, false]);
        assert_eq!(assignment(6, 3), vec![true, true, false]);
        assert_eq!(assignment(0, 0), Vec::<bool>::new());
    }

    #[test]
    fn test_assignment_wider_than_usize() {
        let bits = assignment(1, 70);
        assert_eq!(bits.len(), 70);
        assert!(bits[..69].iter().all(|&b| !b));
        assert!(bits[69]);

        let bits = assignment(usize::MAX, usize::BITS as usize + 2);
        assert_eq!(&bits[..2], &[false, false]);
        assert!(bits[2..].iter().all(|&b| b));
    }

    #[test]
    fn test_row_count() -> Result<()> {
        for (src, vars) in [("A", 1), ("A.B", 2), ("A.(B+C)", 3), ("(A#B).(C+!D)", 4), ("1", 0)] {
            let table = TruthTable::new(src)?;
            assert_eq!(table.variables().len(), vars);
            assert_eq!(table.len(), 1usize << vars);
        }
        Ok(())
    }

    #[test]
    fn test_row_out_of_range() -> Result<()> {
        let table = TruthTable::new("A.B")?;
        assert!(table.row(3).is_ok());
        assert!(matches!(
            table.row(4),
            Err(TruthTableError::RowIndexOutOfRange { index: 4, rows: 4 })
        ));
        Ok(())
    }

    #[test]
    fn test_too_many_variables() {
        let result = TruthTable::with_max_variables("A.(B.C)", 2);
        assert!(matches!(
            result,
            Err(TruthTableError::TooManyVariables { count: 3, max: 2 })
        ));
    }

    #[test]
    fn test_failed_reload_keeps_table() -> Result<()> {
        let mut table = TruthTable::new("A+B")?;
        assert!(table.set_expression("A+B+C").is_err());
        assert_eq!(table.expression(), "A+B");
        assert_eq!(table.outputs(), &[false, true, true, true]);
        Ok(())
    }

    #[test]
    fn test_reload_keeps_limit() -> Result<()> {
        let mut table = TruthTable::with_max_variables("A", 1)?;
        assert!(table.set_expression("A.B").is_err());
        table.set_expression("!B")?;
        assert_eq!(table.variables().names(), &['B']);
        assert_eq!(table.max_variables(), 1);
        Ok(())
    }
}
