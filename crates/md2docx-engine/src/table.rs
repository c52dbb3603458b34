//! Table conversion and column layout
//!
//! Columns are sized proportionally to the widest cell text seen in
//! each column, scaled into a fixed page-content-width budget with a
//! per-column floor. Header detection is structural: the first row is
//! the header iff it exists and contains at least one cell node.

use markdown::mdast::{Node, Table as MdTable};
use md2docx_model::{Table, TableCell, TableRow, TextRun};

use crate::inline;
use crate::width::estimate_width;

/// Page content width budget in twips (A4 minus default margins)
pub const CONTENT_WIDTH: u32 = 9360;

/// Minimum column width in twips
pub const MIN_COLUMN_WIDTH: u32 = 1000;

/// Build a table block from a `table` source node.
///
/// Malformed tables degrade to minimal structure; this never fails.
pub fn build_table(table: &MdTable, content_width: u32, min_column_width: u32) -> Table {
    let rows: Vec<&Vec<Node>> = table
        .children
        .iter()
        .filter_map(|child| match child {
            Node::TableRow(row) => Some(&row.children),
            _ => None,
        })
        .collect();

    let first_row_cells = rows.first().map(|row| count_cells(row)).unwrap_or(0);
    let header = first_row_cells > 0;
    let column_count = first_row_cells.max(1);

    let column_widths = compute_column_widths(
        &rows,
        column_count,
        content_width,
        min_column_width,
    );

    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| TableRow {
            header: header && index == 0,
            cells: row
                .iter()
                .filter_map(|child| match child {
                    Node::TableCell(cell) => {
                        Some(build_cell(&cell.children, header && index == 0))
                    }
                    _ => None,
                })
                .collect(),
        })
        .collect();

    Table {
        column_widths,
        rows,
    }
}

/// Allocate column widths proportional to per-column maximum text width
fn compute_column_widths(
    rows: &[&Vec<Node>],
    column_count: usize,
    content_width: u32,
    min_column_width: u32,
) -> Vec<u32> {
    let mut maxima = vec![0usize; column_count];

    for row in rows {
        let cells = row.iter().filter_map(|child| match child {
            Node::TableCell(cell) => Some(cell),
            _ => None,
        });
        for (index, cell) in cells.enumerate() {
            if index < column_count {
                let text = inline::extract_text(&cell.children);
                maxima[index] = maxima[index].max(estimate_width(&text));
            }
        }
    }

    // All-empty table: fall back to an equal split
    if maxima.iter().all(|&m| m == 0) {
        maxima.fill(1);
    }

    let total: usize = maxima.iter().sum();
    let mut widths: Vec<u32> = maxima
        .iter()
        .map(|&max| {
            let proportional = (max as f64 / total as f64 * content_width as f64) as u32;
            proportional.max(min_column_width)
        })
        .collect();

    // Floors can push the sum past the budget; scale back down
    let allocated: u32 = widths.iter().sum();
    if allocated > content_width {
        let scale = content_width as f64 / allocated as f64;
        for width in &mut widths {
            *width = (*width as f64 * scale) as u32;
        }
    }

    widths
}

fn count_cells(row: &[Node]) -> usize {
    row.iter()
        .filter(|child| matches!(child, Node::TableCell(_)))
        .count()
}

/// Build a single cell, splitting explicit paragraph children into
/// separate in-cell paragraphs and grouping loose inline children into
/// an implicit one. Header cells get bold forced onto every run.
fn build_cell(children: &[Node], header: bool) -> TableCell {
    let mut paragraphs: Vec<Vec<TextRun>> = Vec::new();
    let mut pending: Vec<&Node> = Vec::new();

    for child in children {
        if let Node::Paragraph(paragraph) = child {
            if !pending.is_empty() {
                paragraphs.push(inline::convert_refs(std::mem::take(&mut pending)));
            }
            paragraphs.push(inline::convert_inlines(&paragraph.children));
        } else {
            pending.push(child);
        }
    }
    if !pending.is_empty() {
        paragraphs.push(inline::convert_refs(pending));
    }

    if paragraphs.is_empty() {
        paragraphs.push(vec![TextRun::new("")]);
    }

    for runs in &mut paragraphs {
        if runs.is_empty() {
            runs.push(TextRun::new(""));
        }
        if header {
            for run in runs.iter_mut() {
                run.bold = true;
            }
        }
    }

    TableCell { paragraphs }
}
