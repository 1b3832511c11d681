//! Synthetic property grids.

/// Creates a grid with predictable values.
///
/// Each cell value is calculated as: `row + col / 10`, so the
/// value at `grid[row][col]` identifies its own position.
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(3, 2);
/// assert_eq!(grid.len(), 2);
/// assert_eq!(grid[1][2], 1.2);
/// ```
pub fn create_test_grid(cols: usize, rows: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| r as f64 + c as f64 / 10.0).collect())
        .collect()
}

/// Creates a velocity-like grid increasing with depth (row) in m/s.
pub fn create_velocity_grid(cols: usize, rows: usize) -> Vec<Vec<f64>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| 1500.0 + r as f64 * 250.0 + c as f64 * 10.0)
                .collect()
        })
        .collect()
}
