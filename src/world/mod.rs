pub mod map;
pub mod position;
pub mod scene;
pub mod thing_types;
pub mod tile;
pub mod viewport;
