//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table whose column widths start at the header widths.
    pub fn with_headers(headers: &[&str]) -> Self {
        let columns = headers
            .iter()
            .map(|h| Column {
                header: h.to_string(),
                width: UnicodeWidthStr::width(*h),
            })
            .collect();
        Self::new(columns)
    }

    /// Append a row, widening columns so that every cell fits.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(row.iter()) {
            col.width = col.width.max(UnicodeWidthStr::width(cell.as_str()));
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}

// `{:<width$}` pads by char count, which misaligns wide glyphs in names.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = String::with_capacity(s.len() + width.saturating_sub(w));
    out.push_str(s);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(w)));
    out
}
