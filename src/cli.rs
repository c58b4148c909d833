use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Remap filtered animal-hospital records into the LOCALDATA CSV layout",
    long_about = None
)]
pub struct Cli {
    /// Reference CSV whose header row defines the output columns
    #[arg(short = 'r', long = "reference", default_value = "animal_hospital.csv")]
    pub reference: PathBuf,
    /// JSON file holding the array of filtered hospital records
    #[arg(
        short = 'i',
        long = "input",
        default_value = "filtered_animal_hospitals.json"
    )]
    pub input: PathBuf,
    /// Destination CSV file
    #[arg(
        short = 'o',
        long = "output",
        default_value = "filtered_animal_hospitals.csv"
    )]
    pub output: PathBuf,
    /// Delimiter of the reference file (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Delimiter for the output file (defaults to the reference delimiter)
    #[arg(long = "output-delimiter", value_parser = parse_delimiter)]
    pub output_delimiter: Option<u8>,
    /// Character encoding of the reference file (defaults to utf-8)
    #[arg(long = "reference-encoding")]
    pub reference_encoding: Option<String>,
    /// Number of rows shown in the confirmation preview
    #[arg(long = "preview-rows", default_value_t = 5)]
    pub preview_rows: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
