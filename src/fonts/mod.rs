//! Built-in monospace fonts and their metrics.
//!
//! Only the PDF standard Courier family is supported.  These fonts are part of every PDF
//! viewer, so nothing has to be embedded and every glyph has the same advance width, which
//! keeps the page geometry a matter of simple arithmetic.

use printpdf::BuiltinFont;

/// Horizontal advance of every Courier glyph, in em units.
pub const GLYPH_ADVANCE_EM: f64 = 0.6;

/// Millimetres per PostScript point.
pub const MM_PER_PT: f64 = 25.4 / 72.0;

/// Fallback glyph drawn for characters the built-in encoding cannot represent.
pub const REPLACEMENT_CHAR: char = '?';

/// Members of the standard Courier family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonospaceFont {
    /// Courier regular.
    #[default]
    Courier,
    /// Courier bold.
    CourierBold,
    /// Courier oblique.
    CourierOblique,
    /// Courier bold oblique.
    CourierBoldOblique,
}

impl MonospaceFont {
    /// Returns the matching `printpdf` built-in font.
    pub fn builtin(self) -> BuiltinFont {
        match self {
            Self::Courier => BuiltinFont::Courier,
            Self::CourierBold => BuiltinFont::CourierBold,
            Self::CourierOblique => BuiltinFont::CourierOblique,
            Self::CourierBoldOblique => BuiltinFont::CourierBoldOblique,
        }
    }

    /// Returns the PostScript name of the font.
    pub fn name(self) -> &'static str {
        match self {
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Width of one character cell at `font_size_pt`, in millimetres.
    pub fn char_width_mm(self, font_size_pt: f64) -> f64 {
        GLYPH_ADVANCE_EM * font_size_pt * MM_PER_PT
    }
}

/// Converts points to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_PT
}

/// Returns whether the built-in fonts can draw `ch` as-is.
pub fn is_drawable(ch: char) -> bool {
    ch == ' ' || ch.is_ascii_graphic()
}
