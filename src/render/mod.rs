pub mod painter;

/// Edge length of one tile sprite in pixels.
pub const TILE_PIXELS: i32 = 32;
