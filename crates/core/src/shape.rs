//! Shape module - square bit grids describing tetromino occupancy
//!
//! A shape is an N×N grid (N in 1..=4) stored in a fixed 4×4 array so it stays
//! `Copy` and allocation-free. Cells outside the N×N window are always empty.
//! Rotation works on the shape as it currently is; there is no stored base
//! orientation to rotate from.

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Largest supported shape edge (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Maximum number of occupied cells a shape can have
pub const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// Occupied cell offsets `(x, y)` relative to the shape's top-left corner
pub type ShapeCells = ArrayVec<(i32, i32), MAX_SHAPE_CELLS>;

/// Square occupancy grid, row-major with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct Shape {
    size: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from an N×N grid of 0/1 values.
    ///
    /// Intended for static tables; N must be between 1 and 4.
    pub const fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= 1 && N <= MAX_SHAPE_SIZE, "shape must be 1x1 up to 4x4");

        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                bits[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }

        Self {
            size: N as u8,
            bits,
        }
    }

    /// Edge length N of the bounding square
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Width used for spawn centering (equal to the edge length)
    pub fn width(&self) -> usize {
        self.size()
    }

    /// Whether the cell at `(x, y)` is occupied. Out-of-range reads are empty.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.bits[y][x]
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    ///
    /// Pure index shuffling, so four rotations reproduce the input exactly.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut bits = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in bits.iter_mut().enumerate().take(n) {
            for (x, bit) in row.iter_mut().enumerate().take(n) {
                *bit = self.bits[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            bits,
        }
    }

    /// Offsets of every occupied cell, in row-major order
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        let n = self.size();
        for y in 0..n {
            for x in 0..n {
                if self.bits[y][x] {
                    out.push((x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Number of occupied cells
    pub fn cell_count(&self) -> usize {
        self.bits.iter().flatten().filter(|&&b| b).count()
    }
}

/// Unchecked wire form of [`Shape`]
#[derive(Deserialize)]
struct RawShape {
    size: u8,
    bits: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl TryFrom<RawShape> for Shape {
    type Error = &'static str;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        let n = raw.size as usize;
        if !(1..=MAX_SHAPE_SIZE).contains(&n) {
            return Err("shape size must be between 1 and 4");
        }
        let outside = raw
            .bits
            .iter()
            .enumerate()
            .any(|(y, row)| row.iter().enumerate().any(|(x, &b)| b && (x >= n || y >= n)));
        if outside {
            return Err("shape has cells outside its size");
        }
        Ok(Self {
            size: raw.size,
            bits: raw.bits,
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        for y in 0..n {
            for x in 0..n {
                f.write_str(if self.bits[y][x] { "#" } else { "." })?;
            }
            if y + 1 < n {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Shape = Shape::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);

    #[test]
    fn from_rows_keeps_outside_window_empty() {
        assert_eq!(T.size(), 3);
        assert!(T.get(1, 0));
        assert!(!T.get(0, 0));
        assert!(!T.get(3, 3));
        assert!(!T.get(10, 0));
        assert_eq!(T.cell_count(), 4);
    }

    #[test]
    fn rotation_is_clockwise() {
        let r = T.rotated_cw();
        assert_eq!(r.to_string(), ".#.\n.##\n.#.");
        let r2 = r.rotated_cw();
        assert_eq!(r2.to_string(), "...\n###\n.#.");
    }

    #[test]
    fn cells_are_row_major() {
        let cells = T.cells();
        assert_eq!(cells.as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn four_rotations_are_identity_for_every_size() {
        let shapes = [
            Shape::from_rows([[1]]),
            Shape::from_rows([[1, 0], [1, 1]]),
            T,
            Shape::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        ];
        for shape in shapes {
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape);
        }
    }

    #[test]
    fn deserialize_checks_size_and_window() {
        let json = serde_json::to_string(&T).unwrap();
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, T);

        let f = [false; 4];
        let too_big = serde_json::json!({ "size": 5, "bits": [f, f, f, f] });
        assert!(serde_json::from_value::<Shape>(too_big).is_err());

        let stray = serde_json::json!({
            "size": 2,
            "bits": [f, f, [false, false, true, false], f],
        });
        assert!(serde_json::from_value::<Shape>(stray).is_err());
    }
}
