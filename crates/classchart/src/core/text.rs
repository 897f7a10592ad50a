//! Shared text utilities for diagram generation
//!
//! Docstring reflow and line measurement used by the extractor and the
//! layout engine.

use unicode_width::UnicodeWidthStr;

/// Column limit used when reflowing docstrings for box panels
pub const DOC_WRAP_WIDTH: usize = 40;

/// Reflow a docstring with a greedy word wrap.
///
/// Words are appended to the current line unless doing so would exceed
/// `max_line_length`. At a forced break, if the remaining unwrapped text is
/// longer than half the limit a new line starts; otherwise the word joins
/// the current line with a space. Short tails therefore hang onto the
/// previous line instead of producing a near-empty final line.
///
/// # Example
/// ```
/// use classchart::core::reflow_docstring;
///
/// let wrapped = reflow_docstring("one two three", 40);
/// assert_eq!(wrapped, "one two three");
/// ```
pub fn reflow_docstring(docstring: &str, max_line_length: usize) -> String {
    let words: Vec<&str> = docstring.split_whitespace().collect();
    let mut formatted = String::new();
    let mut current_line_length = 0usize;

    for (i, word) in words.iter().enumerate() {
        let word_width = UnicodeWidthStr::width(*word);

        if current_line_length + word_width > max_line_length {
            // Joined width of everything not yet placed, spaces included
            let remaining_width: usize = words[i..]
                .iter()
                .map(|w| UnicodeWidthStr::width(*w))
                .sum::<usize>()
                + words[i..].len().saturating_sub(1);

            if remaining_width * 2 > max_line_length {
                formatted.push('\n');
                current_line_length = 0;
            } else if !formatted.is_empty() {
                formatted.push(' ');
            }
        } else if !formatted.is_empty() {
            formatted.push(' ');
            current_line_length += 1;
        }

        formatted.push_str(word);
        current_line_length += word_width;
    }

    formatted
}

/// Display width of the widest line in a multi-line string
pub fn longest_line_width(text: &str) -> usize {
    text.lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}
