use regex::Regex;
use tracing::debug;

use crate::board::Symbols;

/// Best-effort extraction of a board encoding from free-form model output.
/// Never fails; always returns some string for `Board::decode` to chew on.
///
/// Order of preference:
/// 1. the interior of the last fenced code block (models often restate the
///    input board before their answer, so the last fence wins);
/// 2. every trimmed non-empty line drawn solely from the two board symbols,
///    joined with newlines (prose in between is dropped);
/// 3. the whole trimmed response.
pub fn extract_board(raw: &str, symbols: Symbols) -> String {
    let fence = Regex::new(r"(?s)```(?:\w*\n)?(.*?)```").expect("valid regex");
    if let Some(capture) = fence.captures_iter(raw).last() {
        debug!("extracted candidate from fenced block");
        return capture[1].trim().to_string();
    }

    let board_lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && line
                    .chars()
                    .all(|c| c == symbols.alive || c == symbols.dead)
        })
        .collect();
    if !board_lines.is_empty() {
        debug!(lines = board_lines.len(), "extracted candidate from symbol-only lines");
        return board_lines.join("\n");
    }

    debug!("no board-shaped content found, falling back to whole response");
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(raw: &str) -> String {
        extract_board(raw, Symbols::default())
    }

    #[test]
    fn last_fenced_block_wins() {
        let raw = "I think...\n```\n#.#\n.#.\n```";
        assert_eq!(extract(raw), "#.#\n.#.");
    }

    #[test]
    fn skips_earlier_fences() {
        let raw = "Input was:\n```\n###\n```\nSo the answer is:\n```\n.#.\n.#.\n```";
        assert_eq!(extract(raw), ".#.\n.#.");
    }

    #[test]
    fn language_tag_on_opening_fence_is_dropped() {
        let raw = "```text\n..#\n#..\n```";
        assert_eq!(extract(raw), "..#\n#..");
    }

    #[test]
    fn symbol_only_lines_collected_without_fences() {
        let raw = "Let me work through this.\n#.#\nThe middle row flips:\n.#.\nDone.";
        assert_eq!(extract(raw), "#.#\n.#.");
    }

    #[test]
    fn indented_symbol_lines_are_trimmed() {
        let raw = "rows:\n  ##.\n  .##\n";
        assert_eq!(extract(raw), "##.\n.##");
    }

    #[test]
    fn prose_only_falls_back_to_trimmed_text() {
        let raw = "  I cannot solve this puzzle.  ";
        assert_eq!(extract(raw), "I cannot solve this puzzle.");
    }

    #[test]
    fn error_marker_passes_through() {
        assert_eq!(extract("ERROR: connection timed out"), "ERROR: connection timed out");
    }
}
