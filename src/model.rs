//! Data structures describing a paginated text document.
//!
//! A [`Document`] is the logical input: an ordered list of lines.  Layout turns it into
//! [`Page`] values made of visual [`Row`]s, and the paginator groups pages into
//! [`OutputFile`]s that carry their rendered bytes.  The types keep every character of the
//! source text so that [`reassemble`] can rebuild the input exactly.

/// Plain text split into lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `text` on `\n`.
    ///
    /// The empty string yields a document without lines.  Any other input keeps every
    /// line, including the empty line that follows a trailing newline.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Creates a document from already separated lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lines of the document.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the document holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines back into the original text.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// One visual line on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    text: String,
    ends_line: bool,
}

impl Row {
    /// Creates a row.  `ends_line` is false for rows produced by wrapping a long line.
    pub fn new(text: impl Into<String>, ends_line: bool) -> Self {
        Self {
            text: text.into(),
            ends_line,
        }
    }

    /// Returns the text shown on this row.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether this row is the last fragment of a document line.
    pub fn ends_line(&self) -> bool {
        self.ends_line
    }
}

/// A block of rows laid out for a single PDF page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    number: usize,
    rows: Vec<Row>,
}

impl Page {
    /// Creates a page with the given one-based number.
    pub fn new(number: usize, rows: Vec<Row>) -> Self {
        Self { number, rows }
    }

    /// Creates a page without rows.
    pub fn empty(number: usize) -> Self {
        Self::new(number, Vec::new())
    }

    /// Returns the one-based page number within the document.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the rows in top-down order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns whether the page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A group of consecutive pages together with their serialized bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFile {
    index: usize,
    pages: Vec<Page>,
    bytes: Vec<u8>,
}

impl OutputFile {
    /// Creates an output file with the given one-based index.
    pub fn new(index: usize, pages: Vec<Page>, bytes: Vec<u8>) -> Self {
        Self {
            index,
            pages,
            bytes,
        }
    }

    /// Returns the one-based position of this file in the output sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the pages stored in this file.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Returns the serialized bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the serialized size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the inclusive range of page numbers covered by this file.
    pub fn page_range(&self) -> Option<(usize, usize)> {
        match (self.pages.first(), self.pages.last()) {
            (Some(first), Some(last)) => Some((first.number(), last.number())),
            _ => None,
        }
    }
}

/// Rebuilds the source text from pages in order.
pub fn reassemble<'a, I>(pages: I) -> String
where
    I: IntoIterator<Item = &'a Page>,
{
    let mut text = String::new();
    let mut any_row = false;

    for row in pages.into_iter().flat_map(|page| page.rows()) {
        any_row = true;
        text.push_str(row.text());
        if row.ends_line() {
            text.push('\n');
        }
    }

    // Every line, including the last one, is terminated above.
    if any_row {
        text.pop();
    }

    text
}
