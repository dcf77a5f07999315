use crate::board::Board;

/// One generation under Conway's rules.
///
/// Moore neighborhood; coordinates outside the grid count as dead (no
/// wraparound). A live cell survives on 2 or 3 neighbors, a dead cell is
/// born on exactly 3, everything else is dead. The 0x0 board maps to
/// itself. This is the ground truth the model's prediction is judged
/// against, so it must stay pure and deterministic.
pub fn step(board: &Board) -> Board {
    let (rows, cols) = board.shape();
    let mut next = vec![false; rows * cols];

    for i in 0..rows {
        for j in 0..cols {
            let mut neighbors = 0u8;
            for di in -1isize..=1 {
                for dj in -1isize..=1 {
                    if di == 0 && dj == 0 {
                        continue;
                    }
                    let ni = i as isize + di;
                    let nj = j as isize + dj;
                    if ni >= 0
                        && nj >= 0
                        && (ni as usize) < rows
                        && (nj as usize) < cols
                        && board.is_alive(ni as usize, nj as usize)
                    {
                        neighbors += 1;
                    }
                }
            }

            let alive = board.is_alive(i, j);
            next[i * cols + j] = matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3));
        }
    }

    Board::from_cells(rows, cols, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Symbols;

    fn board(text: &str) -> Board {
        Board::decode(text, Symbols::default())
    }

    fn encoded_step(text: &str) -> String {
        step(&board(text)).encode(Symbols::default())
    }

    #[test]
    fn empty_board_stays_empty() {
        let dead = Board::dead(5, 5);
        assert_eq!(step(&dead), dead);
    }

    #[test]
    fn zero_by_zero_maps_to_itself() {
        let empty = Board::dead(0, 0);
        assert_eq!(step(&empty), empty);
    }

    #[test]
    fn lonely_cell_dies() {
        let next = step(&board(".....\n.....\n..#..\n.....\n....."));
        assert!(!next.is_alive(2, 2));
        assert_eq!(next.alive_count(), 0);
    }

    #[test]
    fn block_is_still_life() {
        let block = board("....\n.##.\n.##.\n....");
        assert_eq!(step(&block), block);
    }

    #[test]
    fn overpopulated_center_dies() {
        // Cross shape: center has 4 neighbors
        let next = step(&board(".....\n..#..\n.###.\n..#..\n....."));
        assert!(!next.is_alive(2, 2));
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        // L-shape: (2,2) sees exactly 3 live cells
        let next = step(&board(".....\n.##..\n.#...\n.....\n....."));
        assert!(next.is_alive(2, 2));
    }

    #[test]
    fn corner_pair_dies_at_edge() {
        // Outside the grid counts as dead, so each corner cell has 1 neighbor
        let next = step(&board("##.\n...\n..."));
        assert!(!next.is_alive(0, 0));
        assert!(!next.is_alive(0, 1));
    }

    #[test]
    fn three_by_three_hand_verified() {
        // (1,0) is born with neighbors (0,0),(0,1),(1,1); the three live
        // cells each keep 2 neighbors; everything else stays dead.
        assert_eq!(encoded_step("##.\n.#.\n..."), "##.\n##.\n...");
    }

    #[test]
    fn blinker_oscillates_horizontal_to_vertical() {
        assert_eq!(
            encoded_step(".....\n.....\n.###.\n.....\n....."),
            ".....\n..#..\n..#..\n..#..\n....."
        );
    }
}
