//! Page geometry and paginator construction.

use log::warn;

use crate::error::{Error, Result};
use crate::fonts::{self, MonospaceFont};
use crate::paginator::Paginator;

/// Default ceiling on the size of a single output file, in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: u64 = 400;

const DEFAULT_MARGIN_MM: f64 = 20.0;
const DEFAULT_FONT_SIZE_PT: f64 = 10.0;
const DEFAULT_LINE_SPACING: f64 = 1.2;

/// Physical paper dimensions in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaperSize {
    /// Page width.
    pub width_mm: f64,
    /// Page height.
    pub height_mm: f64,
}

impl PaperSize {
    /// ISO A4, portrait.
    pub const A4: PaperSize = PaperSize::new(210.0, 297.0);
    /// US Letter, portrait.
    pub const LETTER: PaperSize = PaperSize::new(215.9, 279.4);

    /// Creates a custom paper size.
    pub const fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Creates margins from explicit values.
    pub const fn trbl(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Uses the same margin on every side.
    pub const fn all(value: f64) -> Self {
        Self::trbl(value, value, value, value)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(DEFAULT_MARGIN_MM)
    }
}

impl From<f64> for Margins {
    fn from(value: f64) -> Self {
        Self::all(value)
    }
}

/// Fixed layout shared by every page of a document.
///
/// The number of rows per page and characters per row are derived from the paper size,
/// margins and font metrics unless explicitly overridden.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    paper_size: PaperSize,
    margins: Margins,
    font: MonospaceFont,
    font_size_pt: f64,
    line_spacing: f64,
    lines_per_page: Option<usize>,
    chars_per_line: Option<usize>,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::default(),
            margins: Margins::default(),
            font: MonospaceFont::default(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            line_spacing: DEFAULT_LINE_SPACING,
            lines_per_page: None,
            chars_per_line: None,
        }
    }
}

impl PageGeometry {
    /// Returns the paper size.
    pub fn paper_size(&self) -> PaperSize {
        self.paper_size
    }

    /// Returns the margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Returns the font used for every row.
    pub fn font(&self) -> MonospaceFont {
        self.font
    }

    /// Returns the font size in points.
    pub fn font_size_pt(&self) -> f64 {
        self.font_size_pt
    }

    /// Returns the distance between two baselines, in millimetres.
    pub fn line_height_mm(&self) -> f64 {
        fonts::pt_to_mm(self.font_size_pt * self.line_spacing)
    }

    /// Returns the usable width and height inside the margins.
    pub fn usable_area_mm(&self) -> (f64, f64) {
        let width = self.paper_size.width_mm - self.margins.left - self.margins.right;
        let height = self.paper_size.height_mm - self.margins.top - self.margins.bottom;
        (width.max(0.0), height.max(0.0))
    }

    /// Rows that physically fit between the top and bottom margins.
    pub fn fitting_lines(&self) -> usize {
        let (_, height) = self.usable_area_mm();
        (height / self.line_height_mm()).floor() as usize
    }

    /// Characters that physically fit between the left and right margins.
    pub fn fitting_chars(&self) -> usize {
        let (width, _) = self.usable_area_mm();
        (width / self.font.char_width_mm(self.font_size_pt)).floor() as usize
    }

    /// Returns the number of rows placed on each page.
    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page.unwrap_or_else(|| self.fitting_lines())
    }

    /// Returns the maximum number of characters per row.
    pub fn chars_per_line(&self) -> usize {
        self.chars_per_line.unwrap_or_else(|| self.fitting_chars())
    }

    fn validate(&self) -> Result<()> {
        if !(self.font_size_pt.is_finite() && self.font_size_pt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "font size must be positive, got {}",
                self.font_size_pt
            )));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "line spacing must be positive, got {}",
                self.line_spacing
            )));
        }
        if self.lines_per_page() == 0 {
            return Err(Error::InvalidConfig(
                "page geometry leaves room for no rows".to_owned(),
            ));
        }
        if self.chars_per_line() == 0 {
            return Err(Error::InvalidConfig(
                "page geometry leaves room for no characters per row".to_owned(),
            ));
        }

        if let Some(lines) = self.lines_per_page {
            if lines > self.fitting_lines() {
                warn!(
                    "{} rows per page requested but only {} fit; text will run past the bottom margin",
                    lines,
                    self.fitting_lines()
                );
            }
        }
        if let Some(chars) = self.chars_per_line {
            if chars > self.fitting_chars() {
                warn!(
                    "{} characters per row requested but only {} fit; text will run past the right margin",
                    chars,
                    self.fitting_chars()
                );
            }
        }

        Ok(())
    }
}

/// Builder for [`Paginator`] instances pre-configured with the crate defaults.
#[derive(Clone, Debug)]
pub struct PaginatorBuilder {
    geometry: PageGeometry,
    max_size_kb: u64,
}

impl Default for PaginatorBuilder {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            max_size_kb: DEFAULT_MAX_SIZE_KB,
        }
    }
}

impl PaginatorBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum size of each output file in kilobytes.
    pub fn with_max_size_kb(mut self, max_size_kb: u64) -> Self {
        self.max_size_kb = max_size_kb;
        self
    }

    /// Sets the paper size.
    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.geometry.paper_size = paper_size;
        self
    }

    /// Sets the page margins.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.geometry.margins = margins.into();
        self
    }

    /// Selects the monospace font.
    pub fn with_font(mut self, font: MonospaceFont) -> Self {
        self.geometry.font = font;
        self
    }

    /// Sets the font size in points.
    pub fn with_font_size(mut self, font_size_pt: f64) -> Self {
        self.geometry.font_size_pt = font_size_pt;
        self
    }

    /// Sets the line spacing as a multiple of the font size.
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.geometry.line_spacing = line_spacing;
        self
    }

    /// Fixes the number of rows per page instead of deriving it from the paper size.
    pub fn with_lines_per_page(mut self, lines: impl Into<Option<usize>>) -> Self {
        self.geometry.lines_per_page = lines.into();
        self
    }

    /// Fixes the number of characters per row instead of deriving it from the paper size.
    pub fn with_chars_per_line(mut self, chars: impl Into<Option<usize>>) -> Self {
        self.geometry.chars_per_line = chars.into();
        self
    }

    /// Validates the settings and builds the paginator.
    pub fn build(self) -> Result<Paginator> {
        if self.max_size_kb == 0 {
            return Err(Error::InvalidConfig(
                "maximum file size must be at least 1 KB".to_owned(),
            ));
        }
        let max_bytes = usize::try_from(self.max_size_kb)
            .ok()
            .and_then(|kb| kb.checked_mul(1024))
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "maximum file size of {} KB is too large",
                    self.max_size_kb
                ))
            })?;

        self.geometry.validate()?;
        Ok(Paginator::new(self.geometry, max_bytes))
    }
}
