//! Line wrapping and page splitting.
//!
//! Layout only depends on two numbers from the [`PageGeometry`][crate::builder::PageGeometry]:
//! characters per row and rows per page.  Wrapping never drops or rewrites characters; a
//! break after whitespace keeps the whitespace on the earlier row.

use crate::model::{Document, Page, Row};

/// Wraps a single document line into rows of at most `width` characters.
///
/// The break is placed after the last whitespace character inside the window when there is
/// one, otherwise the line is cut hard at `width`.  An empty line yields one empty row.
/// A trailing carriage return stays on the last row and does not count toward the width.
pub fn wrap_line(line: &str, width: usize) -> Vec<Row> {
    match line.strip_suffix('\r') {
        Some(body) => {
            let mut rows = wrap_body(body, width);
            if let Some(last) = rows.pop() {
                rows.push(Row::new(format!("{}\r", last.text()), true));
            }
            rows
        }
        None => wrap_body(line, width),
    }
}

fn wrap_body(line: &str, width: usize) -> Vec<Row> {
    let width = width.max(1);
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![Row::new(String::new(), true)];
    }

    let mut rows = Vec::with_capacity(chars.len() / width + 1);
    let mut start = 0;
    while start < chars.len() {
        if chars.len() - start <= width {
            rows.push(Row::new(chars[start..].iter().collect::<String>(), true));
            break;
        }

        let window = &chars[start..start + width];
        let end = match window.iter().rposition(|ch| ch.is_whitespace()) {
            Some(pos) if pos > 0 => start + pos + 1,
            _ => start + width,
        };
        rows.push(Row::new(chars[start..end].iter().collect::<String>(), false));
        start = end;
    }

    rows
}

/// Lays the document out into pages of `lines_per_page` rows.
///
/// A document without lines still produces one empty page.
pub fn layout_pages(
    document: &Document,
    lines_per_page: usize,
    chars_per_line: usize,
) -> Vec<Page> {
    let lines_per_page = lines_per_page.max(1);
    let rows: Vec<Row> = document
        .lines()
        .iter()
        .flat_map(|line| wrap_line(line, chars_per_line))
        .collect();

    if rows.is_empty() {
        return vec![Page::empty(1)];
    }

    rows.chunks(lines_per_page)
        .enumerate()
        .map(|(index, chunk)| Page::new(index + 1, chunk.to_vec()))
        .collect()
}
