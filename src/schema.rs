//! Reference schema: the ordered column names that define the output layout.

use std::{collections::HashMap, path::Path};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::io_utils;

/// Ordered column names read once from the reference CSV's header row.
/// Immutable after load; every output row has exactly these columns.
#[derive(Debug, Clone)]
pub struct ReferenceSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ReferenceSchema {
    pub fn from_headers(headers: Vec<String>) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            // First occurrence wins when a header name repeats.
            positions.entry(name.clone()).or_insert(idx);
        }
        ReferenceSchema {
            columns: headers,
            positions,
        }
    }

    pub fn load(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter, encoding)?;
        let headers = io_utils::reader_headers(&mut reader)
            .with_context(|| format!("Reading reference schema from {path:?}"))?;
        Ok(Self::from_headers(headers))
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn column_index_resolves_by_name() {
        let schema = ReferenceSchema::from_headers(headers(&["번호", "사업장명", "소재지전화"]));
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.column_index("번호"), Some(0));
        assert_eq!(schema.column_index("소재지전화"), Some(2));
        assert_eq!(schema.column_index("없는컬럼"), None);
    }

    #[test]
    fn duplicate_header_names_resolve_to_first_occurrence() {
        let schema = ReferenceSchema::from_headers(headers(&["번호", "비고", "번호"]));
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.column_index("번호"), Some(0));
    }

    #[test]
    fn empty_header_row_yields_empty_schema() {
        let schema = ReferenceSchema::from_headers(Vec::new());
        assert!(schema.is_empty());
        assert_eq!(schema.column_index("번호"), None);
    }
}
