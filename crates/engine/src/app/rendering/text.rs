//! 3x5 bitmap font for signage and the debug overlay.
//!
//! Lowercase letters render with their uppercase glyph; characters outside
//! the table draw as blank space but still advance the pen.

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;

type Glyph = [u8; GLYPH_HEIGHT as usize];

const BLANK: Glyph = [0, 0, 0, 0, 0];

/// Pixel size `(width, height)` of `text` drawn at `scale`.
pub fn draw_text_extent(text: &str, scale: i32) -> (i32, i32) {
    let scale = scale.max(1);
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return (0, 0);
    }
    (
        chars * glyph_advance(scale) - scale,
        GLYPH_HEIGHT * scale,
    )
}

pub(crate) fn glyph_advance(scale: i32) -> i32 {
    (GLYPH_WIDTH + 1) * scale.max(1)
}

/// Calls `plot` for every lit pixel of `text` with its top-left at `(x, y)`.
pub(crate) fn for_each_text_pixel(
    x: i32,
    y: i32,
    text: &str,
    scale: i32,
    mut plot: impl FnMut(i32, i32),
) {
    let scale = scale.max(1);
    let mut pen_x = x;
    for ch in text.chars() {
        let glyph = glyph_for(ch).unwrap_or(BLANK);
        for (row_index, row_bits) in glyph.iter().enumerate() {
            let glyph_y = y + row_index as i32 * scale;
            for col in 0..GLYPH_WIDTH {
                if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                    continue;
                }
                let glyph_x = pen_x + col * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        plot(glyph_x + sx, glyph_y + sy);
                    }
                }
            }
        }
        pen_x += glyph_advance(scale);
    }
}

fn glyph_for(ch: char) -> Option<Glyph> {
    let glyph = match ch.to_ascii_uppercase() {
        ' ' => BLANK,
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b110, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b110, 0b101, 0b110, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_alphabet_has_glyphs() {
        for ch in "BLOCK A CANTEEN CAR PARK 0123456789 :.,-+/()=%".chars() {
            assert!(glyph_for(ch).is_some(), "missing glyph for '{ch}'");
        }
    }

    #[test]
    fn lowercase_reuses_uppercase_glyphs() {
        assert_eq!(glyph_for('q'), glyph_for('Q'));
        assert_eq!(glyph_for('z'), glyph_for('Z'));
    }

    #[test]
    fn unknown_character_plots_nothing_but_advances() {
        let mut plotted = Vec::new();
        for_each_text_pixel(0, 0, "\u{1f642}-", 1, |x, y| plotted.push((x, y)));
        assert_eq!(plotted, vec![(4, 2), (5, 2), (6, 2)]);
    }

    #[test]
    fn extent_follows_scale() {
        assert_eq!(draw_text_extent("", 3), (0, 0));
        assert_eq!(draw_text_extent("A", 1), (3, 5));
        assert_eq!(draw_text_extent("CANTEEN", 2), (7 * 8 - 2, 10));
    }

    #[test]
    fn scaled_glyph_covers_scale_squared_pixels_per_bit() {
        let mut count = 0;
        for_each_text_pixel(0, 0, ".", 3, |_, _| count += 1);
        assert_eq!(count, 9);
    }
}
