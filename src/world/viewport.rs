use crate::world::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u16,
    pub height: u16,
}

impl Default for ViewportSize {
    fn default() -> Self {
        // Classic clients show an 18x14 tile viewport.
        Self { width: 18, height: 14 }
    }
}

impl ViewportSize {
    /// Parses `WIDTHxHEIGHT`, e.g. `18x14`.
    pub fn parse(value: &str) -> Result<Self, String> {
        let (width, height) = value
            .trim()
            .split_once(|c: char| c.eq_ignore_ascii_case(&'x'))
            .ok_or_else(|| format!("viewport '{}' is not WIDTHxHEIGHT", value))?;
        let width = width
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("viewport '{}' has invalid width", value))?;
        let height = height
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("viewport '{}' has invalid height", value))?;
        if width == 0 || height == 0 {
            return Err(format!("viewport '{}' must not be empty", value));
        }
        Ok(Self { width, height })
    }
}

/// Rectangle of tiles on one floor, centred on the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub center: Position,
    pub min: Position,
    pub max: Position,
    pub size: ViewportSize,
}

impl Viewport {
    pub fn from_center(center: Position, size: ViewportSize) -> Self {
        let half_left = size.width / 2;
        let half_right = size.width.saturating_sub(half_left + 1);
        let half_up = size.height / 2;
        let half_down = size.height.saturating_sub(half_up + 1);

        let min = Position::new(
            center.x.saturating_sub(half_left),
            center.y.saturating_sub(half_up),
            center.z,
        );
        let max = Position::new(
            center.x.saturating_add(half_right),
            center.y.saturating_add(half_down),
            center.z,
        );

        Self {
            center,
            min,
            max,
            size,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.z == self.center.z
            && position.x >= self.min.x
            && position.x <= self.max.x
            && position.y >= self.min.y
            && position.y <= self.max.y
    }

    /// Visible positions row by row, top-left first.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y)
            .flat_map(move |y| (min.x..=max.x).map(move |x| Position::new(x, y, min.z)))
    }

    /// Pixel origin of `position` relative to the viewport's top-left tile.
    pub fn screen_offset(&self, position: Position, tile_size: i32) -> (i32, i32) {
        (
            (i32::from(position.x) - i32::from(self.min.x)) * tile_size,
            (i32::from(position.y) - i32::from(self.min.y)) * tile_size,
        )
    }
}
