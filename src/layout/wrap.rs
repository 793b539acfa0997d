use crate::layout::measure::TextMeasure;
use crate::units::*;

const TABSIZE: usize = 4;

/// Splits text into lines no wider than `max_width`, packing words greedily.
///
/// Words are never split: a word that is wider than `max_width` on its own is placed
/// on a line of its own and allowed to overflow. Explicit newlines are hard breaks,
/// and a blank line between two lines of text comes back as an empty string so the
/// caller can leave a gap for it. Text with no words at all produces no lines.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: Mm,
    size: Pt,
    bold: bool,
) -> Vec<String> {
    // replace tabs with spaces
    let text = text.replace('\t', &" ".repeat(TABSIZE));
    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    let space_width = measure.text_width(" ", size, bold);
    let mut lines: Vec<String> = Vec::new();

    for hard_line in text.trim().split('\n') {
        let mut line = String::new();
        let mut line_width = Mm(0.0);

        for word in hard_line.split_whitespace() {
            let word_width = measure.text_width(word, size, bold);
            if line.is_empty() {
                line.push_str(word);
                line_width = word_width;
            } else if line_width + space_width + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space_width + word_width;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_width = word_width;
            }
        }

        // an empty `line` here is a blank hard line, which is kept as a gap
        lines.push(line);
    }

    if lines.iter().all(String::is_empty) {
        lines.clear();
    }
    lines
}
