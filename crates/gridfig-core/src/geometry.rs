//! Physical geometry primitives for figure layout.
//!
//! All physical lengths in gridfig are millimeters. This module provides
//! the [`Size`] value type plus per-edge containers keyed by compass
//! direction, which is how every decoration in a module (captions, titles,
//! padding) is addressed.

use serde::{Deserialize, Serialize};

/// Compass directions used to address module edges and caption slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, north first.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns the lowercase name of the direction.
    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

/// The physical dimensions of an element in millimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width in millimeters.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height in millimeters.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns true if both dimensions are strictly positive.
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        self.width / self.height
    }
}

/// A value attached to each of the four module edges.
///
/// # Examples
///
/// ```
/// use gridfig_core::geometry::{Direction, Edges};
///
/// let padding = Edges::uniform(1.5);
/// assert_eq!(padding.get(Direction::West), &1.5);
/// assert_eq!(padding.horizontal_sum(), 3.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges<T> {
    north: T,
    south: T,
    east: T,
    west: T,
}

impl<T> Edges<T> {
    pub fn new(north: T, south: T, east: T, west: T) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Returns the value attached to the given edge.
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::North => &self.north,
            Direction::South => &self.south,
            Direction::East => &self.east,
            Direction::West => &self.west,
        }
    }

    /// Returns a mutable reference to the value attached to the given edge.
    pub fn get_mut(&mut self, direction: Direction) -> &mut T {
        match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        }
    }
}

impl<T: Clone> Edges<T> {
    /// Creates edges holding the same value on all four sides.
    pub fn uniform(value: T) -> Self {
        Self {
            north: value.clone(),
            south: value.clone(),
            east: value.clone(),
            west: value,
        }
    }
}

impl Edges<f64> {
    /// Sum of the east and west values.
    pub fn horizontal_sum(&self) -> f64 {
        self.east + self.west
    }

    /// Sum of the north and south values.
    pub fn vertical_sum(&self) -> f64 {
        self.north + self.south
    }
}

/// A pair of values attached to the north and south edges.
///
/// Column title bars only exist above and below the grid, so they use this
/// narrower container instead of [`Edges`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NorthSouth<T> {
    pub north: T,
    pub south: T,
}

impl<T> NorthSouth<T> {
    pub fn new(north: T, south: T) -> Self {
        Self { north, south }
    }
}

/// A pair of values attached to the east and west edges.
///
/// The row-title counterpart of [`NorthSouth`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EastWest<T> {
    pub east: T,
    pub west: T,
}

impl<T> EastWest<T> {
    pub fn new(east: T, west: T) -> Self {
        Self { east, west }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_size_accessors() {
        let size = Size::new(120.0, 80.0);
        assert_approx_eq!(f64, size.width(), 120.0);
        assert_approx_eq!(f64, size.height(), 80.0);
        assert_approx_eq!(f64, size.ratio(), 1.5);
        assert!(size.is_positive());
    }

    #[test]
    fn test_size_not_positive() {
        assert!(!Size::new(0.0, 10.0).is_positive());
        assert!(!Size::new(10.0, -1.0).is_positive());
    }

    #[test]
    fn test_edges_uniform() {
        let edges = Edges::uniform(2.0);
        for direction in Direction::ALL {
            assert_approx_eq!(f64, *edges.get(direction), 2.0);
        }
    }

    #[test]
    fn test_edges_sums() {
        let edges = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_approx_eq!(f64, edges.vertical_sum(), 3.0);
        assert_approx_eq!(f64, edges.horizontal_sum(), 7.0);
    }

    #[test]
    fn test_edges_get_mut() {
        let mut edges = Edges::uniform(String::new());
        edges.get_mut(Direction::South).push_str("caption");
        assert_eq!(edges.get(Direction::South), "caption");
        assert_eq!(edges.get(Direction::North), "");
    }

    #[test]
    fn test_direction_names() {
        let names: Vec<_> = Direction::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["north", "south", "east", "west"]);
    }
}
