//! opj2dat - Origin project converter
//!
//! Parses an .opj/.opju project, reports what it contains and writes
//! every worksheet out as a semicolon-separated `.dat` table, one
//! file per sheet.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use opjread_core::{Project, SpreadSheet, Variant};
use opjread_opj::OpjReader;

#[derive(Parser)]
#[command(name = "opj2dat")]
#[command(version, disable_version_flag = true)]
#[command(about = "Convert Origin .opj/.opju projects to .dat tables")]
struct Cli {
    /// Input project file (.opj or .opju)
    input: PathBuf,

    /// Parse and report, but write no .dat files
    #[arg(long)]
    check_only: bool,

    /// Print version information and exit
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let project = OpjReader::new()
        .read_file(&cli.input)
        .with_context(|| format!("Failed to parse '{}'", cli.input.display()))?;

    println!("Parsing status = {}", project.parse_error);
    if project.parse_error != 0 {
        std::process::exit(1);
    }

    println!(
        "OPJ PROJECT \"{}\" VERSION = {}",
        cli.input.display(),
        project.version
    );
    print_counts(&project);

    for (s, spread) in project.spread_sheets.iter().enumerate() {
        println!("Spreadsheet {}", s + 1);
        println!("  Name: {}", spread.name);
        println!("  Label: {}", spread.label);
        println!("    Columns: {}", spread.column_count());
        for (j, column) in spread.columns.iter().enumerate() {
            println!(
                "    Column {} : {} / type : {}, rows : {}",
                j + 1,
                column.name,
                column.column_type,
                spread.max_rows()
            );
        }

        if !cli.check_only {
            let path = format!("{}.{}.dat", cli.input.display(), s + 1);
            write_sheet(spread, &path)
                .with_context(|| format!("Failed to write '{path}'"))?;
            println!("saved to {path}");
        }
    }

    Ok(())
}

fn print_counts(project: &Project) {
    println!("number of datasets     = {}", project.datasets.len());
    println!("number of spreadsheets = {}", project.spread_sheets.len());
    println!("number of matrixes     = {}", project.matrixes.len());
    println!("number of excels       = {}", project.excels.len());
    println!("number of functions    = {}", project.functions.len());
    println!("number of graphs       = {}", project.graphs.len());
    println!("number of notes        = {}", project.notes.len());
}

fn write_sheet(spread: &SpreadSheet, path: &str) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    for column in &spread.columns {
        write!(out, "{}; ", column.name)?;
    }
    writeln!(out)?;

    for row in 0..spread.max_rows() {
        for column in &spread.columns {
            out.write_all(field_text(column.value_at(row), row < column.end_row).as_bytes())?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Render one cell for the .dat table.
///
/// Rows before a column's first stored row count as missing values
/// and print as NaN; rows past its last stored row print as an empty
/// field.
fn field_text(value: Option<&Variant>, within_leading: bool) -> String {
    match value {
        Some(Variant::Double(v)) if v.is_nan() => "NaN; ".to_string(),
        Some(Variant::Double(v)) => format!("{v}; "),
        Some(Variant::String(s)) => format!("{s}; "),
        Some(Variant::Empty) => "; ".to_string(),
        None if within_leading => "NaN; ".to_string(),
        None => "; ".to_string(),
    }
}
