mod config;
pub mod entities;
pub mod render;
pub mod telemetry;
pub mod world;

pub use entities::thing::{Thing, ThingAttributes, ThingGroup, ThingId, ThingKind, ThingRef};
pub use render::painter::{DrawCommand, DrawList, Painter};
pub use world::map::{KnownCreatures, Map};
pub use world::position::Position;
pub use world::tile::{CreatureRegistry, Tile};

use config::AppConfig;
use telemetry::logging;
use world::viewport::Viewport;

pub fn run(args: &[String]) -> Result<(), String> {
    let config = AppConfig::from_args(args)?;
    logging::init(&config.root)?;
    logging::set_debug(config.debug);

    let (center, draw_list) = render_scene(&config).map_err(|err| {
        logging::log_error(&err);
        err
    })?;

    println!("tibia-client: frame");
    println!("- center: {}", center);
    println!("- draw calls: {}", draw_list.len());
    for command in draw_list.commands() {
        println!("- draw {} at ({},{})", command.thing.0, command.x, command.y);
    }
    Ok(())
}

fn render_scene(config: &AppConfig) -> Result<(Position, DrawList), String> {
    let types = world::thing_types::load_thing_types(&config.things_path)?;
    let scene = world::scene::load_scene(&config.scene_path, &types)?;
    let center = scene.local_player.ok_or_else(|| {
        format!(
            "scene {} has no local_player to center the view on",
            config.scene_path.display()
        )
    })?;

    let mut map = Map::new(config.tile_cache);
    scene.apply(&mut map);

    let viewport = Viewport::from_center(center, config.viewport);
    let mut draw_list = DrawList::new();
    let tiles = map.draw(&viewport, render::TILE_PIXELS, &mut draw_list);
    logging::log_client(&format!(
        "frame at {}: types={}, things={}, tiles={}, draws={}",
        center,
        types.len(),
        scene.things.len(),
        tiles,
        draw_list.len()
    ));
    Ok((center, draw_list))
}
