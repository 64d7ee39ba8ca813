//! Story identifiers and text helpers.

/// Positive integer key identifying one story.
pub type StoryId = u64;

/// Split story text into display paragraphs.
///
/// Paragraphs are separated by a blank line (`"\n\n"`). Each paragraph is
/// trimmed and paragraphs that are only whitespace are dropped.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_line() {
        let text = "First line.\n\nSecond paragraph\nwith a wrap.\n\n\n\n  Third.  ";
        let parts: Vec<&str> = paragraphs(text).collect();
        assert_eq!(
            parts,
            vec!["First line.", "Second paragraph\nwith a wrap.", "Third."]
        );
    }

    #[test]
    fn test_paragraphs_of_blank_text() {
        assert_eq!(paragraphs("   \n\n  ").count(), 0);
        assert_eq!(paragraphs("").count(), 0);
    }
}
