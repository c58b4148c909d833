//! I/O utilities for CSV reading, writing, encoding, and delimiter resolution.
//!
//! All file I/O in localdata-remap flows through this module. It provides:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: input decoding via `encoding_rs`/`encoding_rs_io`,
//!   defaulting to UTF-8. A byte-order mark in the input always wins over the
//!   requested label and is stripped before parsing.
//! - **Reader/writer construction**: decoded readers for the reference CSV
//!   and the JSON input, and a BOM-prefixed UTF-8 writer for the output CSV
//!   so spreadsheet tools detect the encoding.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};
use encoding_rs_io::DecodeReaderBytesBuilder;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// UTF-8 byte-order mark written at the start of the output file.
pub const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn resolve_output_delimiter(path: &Path, provided: Option<u8>, fallback: u8) -> u8 {
    if let Some(delim) = provided {
        return delim;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        Some(ext) if ext.eq_ignore_ascii_case("csv") => DEFAULT_CSV_DELIMITER,
        _ => fallback,
    }
}

/// Opens `path` decoded to UTF-8. A byte-order mark, when present, selects
/// the encoding and is stripped; otherwise `encoding` applies.
pub fn open_decoded_reader(path: &Path, encoding: &'static Encoding) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
    let decoder = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .bom_override(true)
        .build(BufReader::new(file));
    Ok(Box::new(decoder))
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<csv::Reader<Box<dyn Read>>> {
    let reader = open_decoded_reader(path, encoding)?;
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    Ok(builder.from_reader(reader))
}

pub fn reader_headers<R>(reader: &mut csv::Reader<R>) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.headers().context("Reading header row")?;
    Ok(headers.iter().map(|field| field.to_string()).collect())
}

/// Creates the output CSV writer. The file starts with a UTF-8 byte-order
/// mark; quoting is minimal, matching what common spreadsheet tools emit.
pub fn open_csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let mut base: Box<dyn Write> = Box::new(BufWriter::new(
        File::create(path).with_context(|| format!("Creating output file {path:?}"))?,
    ));
    base.write_all(UTF8_BOM)
        .with_context(|| format!("Writing byte-order mark to {path:?}"))?;

    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    Ok(builder.from_writer(base))
}
