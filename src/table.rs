//! Plain-text table rendering for the post-write preview.

use std::borrow::Cow;
use std::fmt::Write as _;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| cell_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, value) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(cell_width(value));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();

    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let rule_cells = rule_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&rule_cells, &rule_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate().take(widths.len()) {
        let sanitized = sanitize_cell(value);
        let padding = widths[idx].saturating_sub(cell_width(sanitized.as_ref()));
        let mut cell = sanitized.into_owned();
        if padding > 0 {
            cell.push_str(&" ".repeat(padding));
        }
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn cell_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        let sanitized = value
            .chars()
            .map(|ch| match ch {
                '\n' | '\r' | '\t' => ' ',
                other => other,
            })
            .collect();
        Cow::Owned(sanitized)
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn renders_header_rule_and_rows() {
        let headers = owned(&["번호", "사업장명"]);
        let rows = vec![owned(&["1", "행복동물병원"]), owned(&["2", "바다"])];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("번호"));
        assert!(lines[1].chars().all(|ch| ch == '-' || ch == ' '));
        assert!(lines[2].starts_with("1 "));
        assert!(lines[3].contains("바다"));
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let headers = owned(&["a", "b"]);
        let rows = vec![owned(&["wide-value", "x"])];
        let rendered = render_table(&headers, &rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "a           b");
        assert_eq!(lines[2], "wide-value  x");
    }

    #[test]
    fn no_trailing_spaces_on_any_line() {
        let headers = owned(&["번호", "소재지전체주소"]);
        let rows = vec![owned(&["1", "짧음"])];
        for line in render_table(&headers, &rows).lines() {
            assert!(!line.ends_with(' '));
        }
    }

    #[test]
    fn control_characters_become_spaces() {
        let headers = owned(&["값"]);
        let rows = vec![owned(&["줄1\n줄2\t끝"])];
        let rendered = render_table(&headers, &rows);
        assert!(rendered.contains("줄1 줄2 끝"));
    }

    #[test]
    fn header_only_table_renders_two_lines() {
        let headers = owned(&["번호", "사업장명"]);
        let rendered = render_table(&headers, &[]);
        assert_eq!(rendered.lines().count(), 2);
    }
}
