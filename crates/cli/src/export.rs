//! Plain-text report exporter.
//!
//! Writes `<report name>.txt` into the output directory, laid out in pages
//! sized for the requested paper. Every page repeats the title block and the
//! column header and ends with a page counter; pages are separated by a form
//! feed.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use gridview_tui::cell_text;
use gridview_types::{ColumnDescriptor, ExportError, ExportRequest, ReportExporter, Row};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";
/// Title, timestamp, blank line, column header, rule and page footer.
const PAGE_OVERHEAD_LINES: usize = 6;
const FORM_FEED: char = '\u{0C}';

#[derive(Debug, Clone)]
pub struct TextReportExporter {
    out_dir: PathBuf,
}

impl TextReportExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }
}

impl ReportExporter for TextReportExporter {
    fn export(&self, request: &ExportRequest) -> Result<PathBuf, ExportError> {
        let stem = sanitize_file_stem(&request.report_name)
            .ok_or_else(|| ExportError::InvalidReportName(request.report_name.clone()))?;
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{stem}.txt"));
        fs::write(&path, render_report(request, Local::now()))?;
        Ok(path)
    }
}

/// File stem derived from a report name, or `None` when nothing usable remains.
pub fn sanitize_file_stem(report_name: &str) -> Option<String> {
    let stem: String = report_name
        .trim()
        .chars()
        .map(|c| match c {
            c if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' => c,
            c if c.is_whitespace() => '_',
            _ => '-',
        })
        .collect();
    let stem = stem.trim_matches(|c| c == '.' || c == '-' || c == '_');
    if stem.is_empty() { None } else { Some(stem.to_string()) }
}

/// Lays out the whole report.
pub fn render_report(request: &ExportRequest, generated_at: DateTime<Local>) -> String {
    let columns: Vec<&ColumnDescriptor> = request.columns.iter().filter(|column| !column.omit).collect();
    let cells: Vec<Vec<String>> = request.rows.iter().map(|row| row_cells(row, &columns)).collect();
    let widths = column_widths(&columns, &cells);

    let header = format_line(columns.iter().map(|column| column.name.as_str()), &widths);
    let rule = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    let timestamp = format!("Generated {}", generated_at.format("%Y-%m-%d %H:%M"));

    let rows_per_page = request
        .paper_size
        .lines_per_page()
        .saturating_sub(PAGE_OVERHEAD_LINES)
        .max(1);
    let page_count = cells.len().div_ceil(rows_per_page).max(1);

    let mut out = String::new();
    for page in 0..page_count {
        if page > 0 {
            out.push(FORM_FEED);
        }
        out.push_str(&request.report_name);
        out.push('\n');
        out.push_str(&timestamp);
        out.push_str("\n\n");
        out.push_str(&header);
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        let start = page * rows_per_page;
        let end = (start + rows_per_page).min(cells.len());
        for row in &cells[start..end] {
            out.push_str(&format_line(row.iter().map(String::as_str), &widths));
            out.push('\n');
        }
        out.push_str(&format!("Page {} of {}\n", page + 1, page_count));
    }
    out
}

fn row_cells(row: &Row, columns: &[&ColumnDescriptor]) -> Vec<String> {
    columns
        .iter()
        .map(|column| cell_text(column.value_in(row)).replace(['\n', '\r', '\t'], " "))
        .collect()
}

fn column_widths(columns: &[&ColumnDescriptor], cells: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let widest_cell = cells.iter().map(|row| row[index].width()).max().unwrap_or(0);
            column.name.width().max(widest_cell).clamp(1, MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn format_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = values.zip(widths).map(|(value, width)| pad(value, *width)).collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

/// Truncates to `width` display columns (marking the cut with `…`) and pads with spaces.
fn pad(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    if text.width() > width {
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    } else {
        out.push_str(text);
        used = text.width();
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
