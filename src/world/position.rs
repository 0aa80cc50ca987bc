use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDelta {
    pub dx: i16,
    pub dy: i16,
    pub dz: i8,
}

impl Position {
    pub const fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    /// `None` when the result leaves the coordinate range.
    pub fn offset(self, delta: PositionDelta) -> Option<Self> {
        let x = u16::try_from(i32::from(self.x) + i32::from(delta.dx)).ok()?;
        let y = u16::try_from(i32::from(self.y) + i32::from(delta.dy)).ok()?;
        let z = u8::try_from(i16::from(self.z) + i16::from(delta.dz)).ok()?;
        Some(Self { x, y, z })
    }

    pub fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction.delta())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl Direction {
    pub fn delta(self) -> PositionDelta {
        let (dx, dy) = match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        };
        PositionDelta { dx, dy, dz: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_west_decrements_x() {
        let origin = Position::new(100, 200, 7);
        assert_eq!(origin.step(Direction::West), Some(Position::new(99, 200, 7)));
        assert_eq!(origin.step(Direction::South), Some(Position::new(100, 201, 7)));
    }

    #[test]
    fn offset_rejects_out_of_range() {
        let corner = Position::new(0, u16::MAX, 0);
        assert_eq!(corner.step(Direction::West), None);
        assert_eq!(corner.step(Direction::South), None);
        assert_eq!(
            corner.offset(PositionDelta { dx: 0, dy: 0, dz: -1 }),
            None
        );
    }

    #[test]
    fn deserializes_from_yaml_mapping() {
        let position: Position = serde_yaml::from_str("{ x: 32369, y: 32241, z: 7 }").expect("position");
        assert_eq!(position, Position::new(32369, 32241, 7));
        assert_eq!(position.to_string(), "(32369,32241,7)");
    }
}
