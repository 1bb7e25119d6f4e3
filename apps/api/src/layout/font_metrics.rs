//! Static font-metric tables for the PDF standard fonts.
//!
//! Widths are the Adobe AFM advance widths in 1/1000 em, so a string's width in
//! points is `sum(widths) * size / 1000`. The tables are indexed by WinAnsi
//! code, the same encoding the PDF strings use, so every character that can be
//! drawn is measured at its real width. Anything else falls back to
//! `average_char_width`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Faces
// ────────────────────────────────────────────────────────────────────────────

/// The two faces a résumé is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// PostScript name of the standard Type1 font.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }
}

/// Helvetica ascender, in em. Converts a line's top edge to its baseline.
pub const ASCENT_EM: f32 = 0.718;

/// PDFKit-compatible line height for Helvetica: (ascender + line gap - descender) / 1000.
pub const LINE_HEIGHT_EM: f32 = 1.156;

pub fn line_height(size: f32) -> f32 {
    size * LINE_HEIGHT_EM
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement seam
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can report the rendered width of a string.
///
/// The PDF measures in points through the metric tables; the plain-text export
/// measures in columns.
pub trait TextMeasure {
    fn width(&self, s: &str) -> f32;
}

/// A font face at a concrete size, measuring in points.
#[derive(Debug, Clone, Copy)]
pub struct SizedFont {
    pub face: FontFace,
    pub size: f32,
}

impl SizedFont {
    pub fn new(face: FontFace, size: f32) -> Self {
        Self { face, size }
    }
}

impl TextMeasure for SizedFont {
    fn width(&self, s: &str) -> f32 {
        get_metrics(self.face).measure_str(s) * self.size / 1000.0
    }
}

/// One column per character.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monospace;

impl TextMeasure for Monospace {
    fn width(&self, s: &str) -> f32 {
        s.chars().count() as f32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Unicode characters at WinAnsi codes 0x80..=0x9F. `\0` marks unassigned codes.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [char; 32] = [
    '€', '\0', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\0', 'Ž', '\0',
    '\0', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\0', 'ž', 'Ÿ',
];

/// WinAnsiEncoding byte for `c`, if the standard fonts can draw it.
pub fn win_ansi_code(c: char) -> Option<u8> {
    match c {
        '\u{0}'..='\u{7f}' | '\u{a0}'..='\u{ff}' => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&h| h == c)
            .map(|i| 0x80 + i as u8),
    }
}

pub struct FontMetricTable {
    /// 0x20..=0x7E
    ascii: [u16; 95],
    /// 0x80..=0x9F; unassigned codes are zero and never looked up.
    high: [u16; 32],
    /// 0xA0..=0xFF
    latin1: [u16; 96],
    /// Fallback width for characters outside WinAnsi.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of `s` in 1/1000 em.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c) as f32).sum()
    }

    fn char_width(&self, c: char) -> u16 {
        match win_ansi_code(c) {
            Some(code @ 0x20..=0x7E) => self.ascii[(code - 0x20) as usize],
            Some(code @ 0x80..=0x9F) => self.high[(code - 0x80) as usize],
            Some(code @ 0xA0..=0xFF) => self.latin1[(code - 0xA0) as usize],
            _ => self.average_char_width,
        }
    }
}

static HELVETICA: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    high: [
        556,   0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000,   0, 611,   0,
          0, 222, 222, 333, 333,  350, 556, 1000, 333, 1000, 500, 333,  944,   0, 500, 667,
    ],
    #[rustfmt::skip]
    latin1: [
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    average_char_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0-9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    high: [
        556,   0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000,   0, 611,   0,
          0, 278, 278, 500, 500,  350, 556, 1000, 333, 1000, 556, 333,  944,   0, 500, 667,
    ],
    #[rustfmt::skip]
    latin1: [
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    average_char_width: 556,
};

pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA,
        FontFace::Bold => &HELVETICA_BOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Regular).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_ascii_word() {
        // R(722) + u(556) + s(500) + t(278)
        let w = get_metrics(FontFace::Regular).measure_str("Rust");
        assert!((w - 2056.0).abs() < 1e-3, "got {w}");
    }

    #[test]
    fn test_sized_font_scales_to_points() {
        let font = SizedFont::new(FontFace::Regular, 10.0);
        assert!((font.width("Rust") - 20.56).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior backend engineer";
        assert!(
            get_metrics(FontFace::Bold).measure_str(text)
                > get_metrics(FontFace::Regular).measure_str(text)
        );
    }

    #[test]
    fn test_bullet_and_fallback_widths() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(m.measure_str("•"), 350.0);
        assert_eq!(m.measure_str("Ж"), m.average_char_width as f32);
    }

    #[test]
    fn test_typographic_punctuation_widths() {
        let regular = get_metrics(FontFace::Regular);
        let bold = get_metrics(FontFace::Bold);
        // ’(222) + “(333) + …(1000) + €(556)
        assert_eq!(regular.measure_str("’“…€"), 2111.0);
        assert_eq!(bold.measure_str("’"), 278.0);
        assert_eq!(regular.measure_str("ü"), 556.0);
        assert_eq!(bold.measure_str("ü"), 611.0);
    }

    #[test]
    fn test_win_ansi_codes() {
        assert_eq!(win_ansi_code('A'), Some(0x41));
        assert_eq!(win_ansi_code('’'), Some(0x92));
        assert_eq!(win_ansi_code('€'), Some(0x80));
        assert_eq!(win_ansi_code('Ÿ'), Some(0x9F));
        assert_eq!(win_ansi_code('é'), Some(0xE9));
        assert_eq!(win_ansi_code('\u{81}'), None);
        assert_eq!(win_ansi_code('Ж'), None);
    }

    #[test]
    fn test_monospace_counts_chars() {
        assert_eq!(Monospace.width("Привет"), 6.0);
    }

    #[test]
    fn test_line_height_matches_pdfkit_helvetica() {
        assert!((line_height(11.0) - 12.716).abs() < 1e-3);
    }
}
