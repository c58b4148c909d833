//! The record mapper: builds LOCALDATA-layout rows from filtered hospital
//! records and writes the output CSV.
//!
//! Every output row starts as empty strings in reference-schema order; the
//! fixed regulatory/status literals and the handful of source-derived fields
//! are then assigned by column name. Assignments naming a column the
//! reference schema does not contain are dropped, so the output always
//! matches the schema exactly.

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    cli::Cli,
    io_utils,
    record::{self, HospitalRecord},
    schema::ReferenceSchema,
    table,
};

// Column names of the LOCALDATA animal-hospital layout.
const COL_SEQ: &str = "번호";
const COL_SERVICE_NAME: &str = "개방서비스명";
const COL_SERVICE_ID: &str = "개방서비스아이디";
const COL_MANAGEMENT_NO: &str = "관리번호";
const COL_LICENSE_DATE: &str = "인허가일자";
const COL_STATUS_CODE: &str = "영업상태구분코드";
const COL_STATUS_NAME: &str = "영업상태명";
const COL_DETAIL_STATUS_CODE: &str = "상세영업상태코드";
const COL_DETAIL_STATUS_NAME: &str = "상세영업상태명";
const COL_PHONE: &str = "소재지전화";
const COL_POSTAL_CODE: &str = "소재지우편번호";
const COL_ADDRESS: &str = "소재지전체주소";
const COL_ROAD_ADDRESS: &str = "도로명전체주소";
const COL_ROAD_POSTAL_CODE: &str = "도로명우편번호";
const COL_BUSINESS_NAME: &str = "사업장명";
const COL_COORD_X: &str = "좌표정보x(epsg5174)";
const COL_COORD_Y: &str = "좌표정보y(epsg5174)";
const COL_LAST_MODIFIED: &str = "최종수정시점";
const COL_UPDATE_KIND: &str = "데이터갱신구분";
const COL_UPDATE_DATE: &str = "데이터갱신일자";
const COL_CATEGORY: &str = "업무구분명";

// Fixed literals for the regulatory/status columns; identical on every row.
const SERVICE_NAME: &str = "동물병원";
const SERVICE_ID: &str = "02_03_01_P";
const STATUS_CODE: &str = "01";
const STATUS_NAME: &str = "영업/정상";
const DETAIL_STATUS_CODE: &str = "0000";
const DETAIL_STATUS_NAME: &str = "정상";
const LAST_MODIFIED_AT: &str = "2025-07-14 12:00:00";
const UPDATE_KIND: &str = "U";
const UPDATE_DATE: &str = "2025-07-14 12:00:00";
const CATEGORY: &str = "동물병원";

/// Columns shown in the post-write confirmation preview.
const PREVIEW_COLUMNS: &[&str] = &[
    COL_SEQ,
    COL_BUSINESS_NAME,
    COL_ADDRESS,
    COL_PHONE,
    COL_COORD_X,
    COL_COORD_Y,
];

pub fn execute(args: &Cli) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.reference, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.reference_encoding.as_deref())?;
    let output_delimiter =
        io_utils::resolve_output_delimiter(&args.output, args.output_delimiter, delimiter);

    let schema = ReferenceSchema::load(&args.reference, delimiter, encoding)?;
    info!(
        "Reference schema with {} column(s) loaded from {:?}",
        schema.len(),
        args.reference
    );

    let hospitals = record::load_records(&args.input)?;
    info!(
        "Loaded {} hospital record(s) from {:?}",
        hospitals.len(),
        args.input
    );

    let rows = map_records(&schema, &hospitals);

    let mut writer = io_utils::open_csv_writer(&args.output, output_delimiter)?;
    writer
        .write_record(schema.columns().iter())
        .context("Writing output headers")?;
    for (idx, row) in rows.iter().enumerate() {
        writer
            .write_record(row.iter())
            .with_context(|| format!("Writing output row {}", idx + 1))?;
    }
    writer.flush().context("Flushing output")?;

    info!("Wrote {} hospital row(s) to {:?}", rows.len(), args.output);

    let (headers, preview) = build_preview(&schema, &rows, args.preview_rows);
    if !headers.is_empty() {
        table::print_table(&headers, &preview);
    }
    Ok(())
}

/// Maps every source record, preserving input order; the record at position
/// `i` carries the visible sequence number `i + 1`.
pub fn map_records(schema: &ReferenceSchema, hospitals: &[HospitalRecord]) -> Vec<Vec<String>> {
    hospitals
        .iter()
        .enumerate()
        .map(|(idx, hospital)| map_record(schema, hospital, idx + 1))
        .collect()
}

/// Builds one output row: all schema columns empty, then the fixed literals
/// and the source-derived fields assigned by column name.
pub fn map_record(schema: &ReferenceSchema, hospital: &HospitalRecord, seq: usize) -> Vec<String> {
    let mut row = vec![String::new(); schema.len()];
    let mut set = |name: &str, value: String| match schema.column_index(name) {
        Some(idx) => row[idx] = value,
        None => debug!("Reference schema has no column '{name}'; value dropped"),
    };

    set(COL_SEQ, seq.to_string());
    set(COL_SERVICE_NAME, SERVICE_NAME.to_string());
    set(COL_SERVICE_ID, SERVICE_ID.to_string());
    set(COL_MANAGEMENT_NO, hospital.management_no.to_string());
    set(COL_LICENSE_DATE, hospital.license_date.to_string());
    set(COL_STATUS_CODE, STATUS_CODE.to_string());
    set(COL_STATUS_NAME, STATUS_NAME.to_string());
    set(COL_DETAIL_STATUS_CODE, DETAIL_STATUS_CODE.to_string());
    set(COL_DETAIL_STATUS_NAME, DETAIL_STATUS_NAME.to_string());
    set(COL_PHONE, hospital.phone.to_string());
    set(COL_POSTAL_CODE, hospital.postal_code_or_empty().to_string());
    set(COL_ADDRESS, hospital.address.to_string());
    set(COL_ROAD_ADDRESS, hospital.road_address.to_string());
    set(
        COL_ROAD_POSTAL_CODE,
        hospital.postal_code_or_empty().to_string(),
    );
    set(COL_BUSINESS_NAME, hospital.hospital_name.to_string());
    set(COL_COORD_X, hospital.x_coordinate.to_string());
    set(COL_COORD_Y, hospital.y_coordinate.to_string());
    set(COL_LAST_MODIFIED, LAST_MODIFIED_AT.to_string());
    set(COL_UPDATE_KIND, UPDATE_KIND.to_string());
    set(COL_UPDATE_DATE, UPDATE_DATE.to_string());
    set(COL_CATEGORY, CATEGORY.to_string());

    row
}

/// Selects the preview columns present in the schema from the first
/// `limit` output rows.
pub fn build_preview(
    schema: &ReferenceSchema,
    rows: &[Vec<String>],
    limit: usize,
) -> (Vec<String>, Vec<Vec<String>>) {
    let indices: Vec<usize> = PREVIEW_COLUMNS
        .iter()
        .filter_map(|name| schema.column_index(name))
        .collect();
    let headers = indices
        .iter()
        .map(|&idx| schema.columns()[idx].clone())
        .collect();
    let preview = rows
        .iter()
        .take(limit)
        .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
        .collect();
    (headers, preview)
}
