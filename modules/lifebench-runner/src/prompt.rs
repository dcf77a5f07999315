/// Fixed prompt template. The encoded initial board is embedded verbatim;
/// the respondent is told to answer with a same-dimension board in a single
/// fenced block using the two canonical symbols.
pub fn build_prompt(board_text: &str) -> String {
    format!(
        "You are playing Conway's Game of Life. Given the current board state below, compute the next generation.

Rules:
- Any live cell (#) with 2-3 live neighbors survives
- Any dead cell (.) with exactly 3 live neighbors becomes alive
- All other cells die or stay dead
- Neighbors are the 8 adjacent cells (horizontal, vertical, and diagonal)
- Cells outside the grid boundaries are considered dead

Current board state:
```
{board_text}
```

Think through this carefully. For each cell, count its live neighbors and apply the rules.

After your reasoning, output ONLY the final board in a code block like this:
```
<your board here>
```
Use '#' for live cells and '.' for dead cells. The board must be the same dimensions as the input."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_the_board_in_a_fence() {
        let prompt = build_prompt("#..\n.#.\n..#");
        assert!(prompt.contains("```\n#..\n.#.\n..#\n```"));
    }

    #[test]
    fn states_the_rules_and_symbols() {
        let prompt = build_prompt("...");
        assert!(prompt.contains("2-3 live neighbors"));
        assert!(prompt.contains("exactly 3 live neighbors"));
        assert!(prompt.contains("'#' for live cells"));
        assert!(prompt.contains("same dimensions"));
    }
}
