use crate::layout::font_metrics::TextMeasure;

/// Greedy word wrap to `max_width` (in the measure's units).
///
/// Explicit newlines always break. A single word wider than the line is split
/// at character boundaries. Blank input produces no lines; blank lines between
/// paragraphs are preserved as empty strings.
pub fn wrap_text<M: TextMeasure + ?Sized>(text: &str, max_width: f32, measure: &M) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let space_w = measure.width(" ");
    let mut lines = Vec::new();

    for paragraph in text.trim_end().lines() {
        let mut current = String::new();
        let mut current_w = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = measure.width(word);

            if word_w > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = split_long_word(word, max_width, measure);
                // The tail of a split word can share its line with what follows.
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_w = measure.width(&tail);
                current = tail;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
            } else if current_w + space_w + word_w <= max_width {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_w = word_w;
            }
        }

        lines.push(current);
    }

    lines
}

fn split_long_word<M: TextMeasure + ?Sized>(
    word: &str,
    max_width: f32,
    measure: &M,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut buf = [0u8; 4];

    for c in word.chars() {
        let candidate_w = measure.width(&piece) + measure.width(c.encode_utf8(&mut buf));
        if !piece.is_empty() && candidate_w > max_width {
            pieces.push(std::mem::take(&mut piece));
        }
        piece.push(c);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
