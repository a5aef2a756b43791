//! Apple placement
//!
//! Draws uniformly over free cells from an injected RNG so spawn
//! sequences replay exactly for a given seed.

use rand::Rng;

use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Rejection-sampling attempts before falling back to enumerating free cells
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Pick a random cell not occupied by the snake
///
/// Returns `None` only when the snake covers the entire board.
pub fn spawn_apple<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    if snake.len() >= grid.area() {
        return None;
    }

    // Cheap path while the board is mostly empty
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let candidate = grid.cell_at(rng.random_range(0..grid.area()));
        if !snake.contains(candidate) {
            return Some(candidate);
        }
    }

    // Crowded board: pick exactly among what is left
    let free: Vec<Cell> = grid.cells().filter(|&c| !snake.contains(c)).collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_avoids_snake() {
        let grid = Grid::new(4);
        let snake = Snake::from_cells(
            &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)],
            0,
        );
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let apple = spawn_apple(&grid, &snake, &mut rng).unwrap();
            assert!(grid.contains(apple));
            assert!(!snake.contains(apple));
        }
    }

    #[test]
    fn test_spawn_finds_last_free_cell() {
        let grid = Grid::new(2);
        let snake = Snake::from_cells(&[Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)], 0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(spawn_apple(&grid, &snake, &mut rng), Some(Cell::new(0, 1)));
    }

    /// Always draws zero, so every random pick lands on cell (0, 0)
    struct ZeroRng;

    impl rand::RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_crowded_board_falls_back_to_free_cells() {
        let grid = Grid::new(3);
        let snake = Snake::from_cells(&[Cell::new(0, 0), Cell::new(1, 0)], 0);

        // Every sampled cell hits the head, so only enumeration can answer
        let apple = spawn_apple(&grid, &snake, &mut ZeroRng).unwrap();
        assert_eq!(apple, Cell::new(2, 0));
        assert!(grid.contains(apple));
        assert!(!snake.contains(apple));
    }

    #[test]
    fn test_spawn_on_full_board() {
        let grid = Grid::new(2);
        let snake = Snake::from_cells(
            &[Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1), Cell::new(0, 1)],
            0,
        );
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(spawn_apple(&grid, &snake, &mut rng), None);
    }

    #[test]
    fn test_spawn_is_deterministic() {
        let grid = Grid::new(20);
        let snake = Snake::new(grid.center());
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                spawn_apple(&grid, &snake, &mut a),
                spawn_apple(&grid, &snake, &mut b)
            );
        }
    }
}
