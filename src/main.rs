use anyhow::Context;
use clap::Parser;
use log::info;
use rstruth::{OutputFormat, TruthTable, DEFAULT_MAX_VARIABLES};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// Boolean expression without spaces, e.g. "A.(B+!C)".
    /// Operators: . (and), + (or), # (xor), ! (not); every other character is a variable,
    /// except for the constants 0 and 1
    expression: String,

    #[clap(value_parser, short, long, value_name = "FILE")]
    /// The output filename (or stdout if not provided)
    output: Option<PathBuf>,

    #[clap(short, long, value_parser, default_value_t = OutputFormat::Text)]
    /// Output format of the table: text or csv
    format: OutputFormat,

    #[clap(short, long, value_parser, value_name = "N", conflicts_with = "format")]
    /// Only print the header and row N (text layout)
    row: Option<usize>,

    #[clap(long, conflicts_with_all = ["row", "format"])]
    /// Print the expression, variables and outputs in a single diagnostic line
    debug: bool,

    #[clap(long, value_parser, value_name = "N", default_value_t = DEFAULT_MAX_VARIABLES, env = "RSTRUTH_MAX_VARS")]
    /// Refuse expressions with more than N variables
    max_vars: usize,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase logging verbosity (-v, -vv, -vvv)
    verbose: u8,
}

fn log_level(verbose: u8) -> simplelog::LevelFilter {
    match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    }
}

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args_from(wild::args_os(), argfile::parse_fromfile, argfile::PREFIX)
        .context("could not expand argument files")?;
    let args = Args::parse_from(args);

    simplelog::TermLogger::init(
        log_level(args.verbose),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let table = TruthTable::with_max_variables(&args.expression, args.max_vars)
        .with_context(|| format!("could not evaluate expression {:?}", args.expression))?;

    info!(
        "{} variables, {} rows",
        table.variables().len(),
        table.len()
    );

    let mut writer = if let Some(output_file) = &args.output {
        let file = File::create(output_file)
            .with_context(|| format!("could not create {}", output_file.display()))?;
        Box::new(BufWriter::new(file)) as Box<dyn Write>
    } else {
        Box::new(BufWriter::new(io::stdout())) as Box<dyn Write>
    };

    if args.debug {
        writeln!(writer, "{}", table.to_debug_string())?;
    } else if let Some(row) = args.row {
        writeln!(writer, "{}", table.row_text(row)?)?;
    } else {
        args.format.write(&table, &mut writer)?;
    }

    writer.flush()?;

    Ok(())
}
