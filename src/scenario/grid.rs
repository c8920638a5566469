//! Dense 2D grids and axis construction helpers

use serde::Serialize;

/// Row-major 2D array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Wrap row-major `data`; returns `None` if the length does not match the shape
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != rows * cols {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Build a grid by calling `f(row, col)` for every cell
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Iterate rows as slices
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        // chunks panics on zero, an empty grid has no rows to yield anyway
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Cells in row-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Same-shaped grid with `f` applied to every cell
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|k| start + step * k as f64).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Coordinate grids of shape `axis2.len() x axis1.len()`:
/// `axis1` varies along columns, `axis2` along rows
pub fn meshgrid(axis1: &[f64], axis2: &[f64]) -> (Grid<f64>, Grid<f64>) {
    let rows = axis2.len();
    let cols = axis1.len();
    let grid1 = Grid::from_fn(rows, cols, |_, col| axis1[col]);
    let grid2 = Grid::from_fn(rows, cols, |row, _| axis2[row]);
    (grid1, grid2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0045, 0.0675, 50);
        assert_eq!(xs.len(), 50);
        assert_eq!(xs[0], 0.0045);
        assert_eq!(xs[49], 0.0675);
        assert_relative_eq!(xs[1] - xs[0], 0.063 / 49.0, max_relative = 1e-9);
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert_eq!(linspace(1.0, 2.0, 3), vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_meshgrid_shape_and_orientation() {
        let (g1, g2) = meshgrid(&[1.0, 2.0, 3.0], &[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(g1.shape(), (4, 3));
        assert_eq!(g2.shape(), (4, 3));
        assert_eq!(g1.get(0, 2), Some(&3.0));
        assert_eq!(g1.get(3, 2), Some(&3.0));
        assert_eq!(g2.get(3, 0), Some(&40.0));
        assert_eq!(g2.get(3, 2), Some(&40.0));
        assert_eq!(g1.get(4, 0), None);
    }

    #[test]
    fn test_row_iter_and_map() {
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[i32]> = grid.row_iter().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
        assert_eq!(grid.map(|v| v * 10).as_slice(), &[10, 20, 30, 40]);
        assert!(Grid::from_vec(2, 3, vec![0; 5]).is_none());
    }
}
