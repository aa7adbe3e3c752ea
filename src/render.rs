//! Serialization of pages to PDF bytes.
//!
//! The paginator only needs to know how large a group of pages becomes once written, so the
//! backend sits behind the [`Renderer`] trait.  [`PdfRenderer`] is the `printpdf` implementation
//! used by the converter; tests can plug in cheaper renderers with predictable sizes.

use std::borrow::Cow;
use std::io::{BufWriter, Write};

use log::{debug, trace};
use printpdf::{CustomPdfConformance, Mm, PdfConformance, PdfDocument};

use crate::builder::PageGeometry;
use crate::error::{Error, Result};
use crate::fonts::{self, REPLACEMENT_CHAR};
use crate::model::Page;

const DOCUMENT_TITLE: &str = "text2pdf";
const LAYER_NAME: &str = "Text";

/// Turns a sequence of pages into the bytes of one output file.
pub trait Renderer {
    /// Serializes `pages`, in order, into a standalone file.
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>>;
}

/// Renders pages as monospace text using a built-in PDF font.
#[derive(Clone, Debug)]
pub struct PdfRenderer {
    geometry: PageGeometry,
}

impl PdfRenderer {
    /// Creates a renderer drawing rows with the given geometry.
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, pages: &[Page]) -> Result<Vec<u8>> {
        let paper = self.geometry.paper_size();
        let margins = self.geometry.margins();
        let font_size = self.geometry.font_size_pt();
        let line_height = self.geometry.line_height_mm();
        // Baseline of the first row sits one font size below the top margin.
        let first_baseline = paper.height_mm - margins.top - fonts::pt_to_mm(font_size);

        let document = PdfDocument::empty(DOCUMENT_TITLE).with_conformance(
            PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }),
        );
        let font = document
            .add_builtin_font(self.geometry.font().builtin())
            .map_err(|err| Error::Render(err.to_string()))?;

        let mut replaced = 0usize;
        for page in pages {
            let (page_index, layer_index) =
                document.add_page(Mm(paper.width_mm), Mm(paper.height_mm), LAYER_NAME);
            let layer = document.get_page(page_index).get_layer(layer_index);

            for (row_index, row) in page.rows().iter().enumerate() {
                let (text, substitutions) = drawable_text(row.text());
                replaced += substitutions;
                if text.trim_end().is_empty() {
                    continue;
                }

                let baseline = first_baseline - line_height * row_index as f64;
                layer.use_text(
                    text.into_owned(),
                    font_size,
                    Mm(margins.left),
                    Mm(baseline),
                    &font,
                );
            }
        }

        if replaced > 0 {
            debug!(
                "Replaced {} character(s) the built-in font cannot draw with '{}'",
                replaced, REPLACEMENT_CHAR
            );
        }

        let mut buffer = Vec::new();
        {
            let mut writer = BufWriter::new(&mut buffer);
            document
                .save(&mut writer)
                .map_err(|err| Error::Render(err.to_string()))?;
            writer
                .flush()
                .map_err(|err| Error::Render(err.to_string()))?;
        }

        trace!(
            "Rendered {} page(s) in {} into {} bytes",
            pages.len(),
            self.geometry.font().name(),
            buffer.len()
        );
        Ok(buffer)
    }
}

/// Maps a row to the characters the built-in font can draw.
///
/// Tabs become a single space and a trailing carriage return is dropped; anything else
/// outside printable ASCII is drawn as [`REPLACEMENT_CHAR`].  Returns the text and the number
/// of substituted characters.
fn drawable_text(text: &str) -> (Cow<'_, str>, usize) {
    let text = text.strip_suffix('\r').unwrap_or(text);
    if text.chars().all(fonts::is_drawable) {
        return (Cow::Borrowed(text), 0);
    }

    let mut substitutions = 0;
    let mapped = text
        .chars()
        .map(|ch| match ch {
            ch if fonts::is_drawable(ch) => ch,
            '\t' => ' ',
            _ => {
                substitutions += 1;
                REPLACEMENT_CHAR
            }
        })
        .collect::<String>();

    (Cow::Owned(mapped), substitutions)
}
