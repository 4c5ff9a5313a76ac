use crate::error::Result;
use crate::truth_table::TruthTable;
use std::{
    fmt::{self, Display},
    io::Write,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Textual layout of a rendered truth table.
///
/// [`Text`] is the plain layout produced by [`TruthTable::table_text`]: a header line
/// `A B | X` followed by one `0 1 | 1` line per row.
/// [`Csv`] writes the same columns as comma separated records, with `X` as the name of
/// the output column.
///
/// [`Text`]: OutputFormat::Text
/// [`Csv`]: OutputFormat::Csv
pub enum OutputFormat {
    /// Space separated bits with a `|` before the output column
    #[default]
    Text,
    /// Comma separated values with a header record
    Csv,
}

impl OutputFormat {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::Text, Self::Csv]
    }

    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Text => &["text", "txt"],
            Self::Csv => &["csv"],
        }
    }

    fn matches(&self, s: &str) -> bool {
        self.aliases()
            .iter()
            .any(|alias| alias.eq_ignore_ascii_case(s))
    }

    pub fn render(self, table: &TruthTable) -> Result<String> {
        match self {
            Self::Text => Ok(table.table_text()),
            Self::Csv => {
                let mut buffer = Vec::new();
                write_csv(table, &mut buffer)?;
                Ok(String::from_utf8_lossy(&buffer).into_owned())
            }
        }
    }

    pub fn write<W: Write>(self, table: &TruthTable, writer: &mut W) -> Result<()> {
        match self {
            Self::Text => write!(writer, "{table}")?,
            Self::Csv => write_csv(table, writer)?,
        }

        Ok(())
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Text => "text",
            Self::Csv => "csv",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as output format"))
            .copied()
    }
}

pub fn write_csv<W: Write>(table: &TruthTable, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let header: Vec<String> = table
        .variables()
        .iter()
        .map(String::from)
        .chain(std::iter::once("X".to_string()))
        .collect();
    csv_writer.write_record(&header)?;

    for row in table.rows() {
        let record: Vec<&str> = row
            .inputs
            .iter()
            .chain(std::iter::once(&row.output))
            .map(|&b| if b { "1" } else { "0" })
            .collect();
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_parse_format() -> anyhow::Result<()> {
        assert_eq!("text".parse::<OutputFormat>()?, OutputFormat::Text);
        assert_eq!("TXT".parse::<OutputFormat>()?, OutputFormat::Text);
        assert_eq!("CSV".parse::<OutputFormat>()?, OutputFormat::Csv);
        assert_eq!("cSv".parse::<OutputFormat>()?, OutputFormat::Csv);
        assert!("json".parse::<OutputFormat>().is_err());
        Ok(())
    }

    #[test]
    fn test_display_parses_back() -> anyhow::Result<()> {
        for format in OutputFormat::variants() {
            assert_eq!(format.to_string().parse::<OutputFormat>()?, *format);
        }
        Ok(())
    }

    #[test]
    fn test_csv() -> anyhow::Result<()> {
        let table = TruthTable::new("A#B")?;
        let csv = OutputFormat::Csv.render(&table)?;
        assert_eq!(csv, "A,B,X\n0,0,0\n0,1,1\n1,0,1\n1,1,0\n");
        Ok(())
    }

    #[test]
    fn test_write_text_matches_render() -> anyhow::Result<()> {
        let table = TruthTable::new("!A")?;
        let mut buffer = Vec::new();
        OutputFormat::Text.write(&table, &mut buffer)?;
        assert_eq!(String::from_utf8(buffer)?, OutputFormat::Text.render(&table)?);
        Ok(())
    }
}
