use crate::units::*;

/// Measures how wide a run of text is when drawn
pub trait TextMeasure {
    /// Width of `text` drawn at `size`, in the regular or bold face
    fn text_width(&self, text: &str, size: Pt, bold: bool) -> Mm;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, size: Pt, bold: bool) -> Mm {
        (**self).text_width(text, size, bold)
    }
}

/// Metrics of the PDF standard Helvetica and Helvetica-Bold faces, which is what the
/// PDF exporter draws with. Widths are in 1/1000 em, as in the Adobe font metrics.
#[derive(Debug, Default, Copy, Clone)]
pub struct StandardFonts;

/// Advance used for anything the tables below don't cover
const DEFAULT_ADVANCE: u16 = 556;

// printable ASCII, ' ' (32) through '~' (126)
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl StandardFonts {
    /// Horizontal advance of a single character, in 1/1000 em
    pub fn advance(&self, ch: char, bold: bool) -> u16 {
        let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
        let ch = base_letter(ch);
        match ch {
            ' '..='~' => table[ch as usize - ' ' as usize],
            '\u{a0}' => table[0],
            '\u{2022}' => 350,
            '\u{2018}' | '\u{2019}' | '\u{201a}' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '\u{201c}' | '\u{201d}' | '\u{201e}' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            '\u{2013}' => 556,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{a9}' | '\u{ae}' => 737,
            '\u{b7}' => 278,
            _ => DEFAULT_ADVANCE,
        }
    }
}

impl TextMeasure for StandardFonts {
    fn text_width(&self, text: &str, size: Pt, bold: bool) -> Mm {
        let units: u32 = text.chars().map(|ch| self.advance(ch, bold) as u32).sum();
        (size * (units as f32 / 1000.0)).into()
    }
}

/// Latin-1 accented letters are measured as their unaccented base letter, which is
/// how the Helvetica metrics are laid out anyway
fn base_letter(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => ch,
    }
}
