use crate::entities::thing::{ThingId, ThingRef};
use crate::render::painter::Painter;
use crate::telemetry::logging;
use crate::world::position::{Direction, Position};
use crate::world::tile::{CreatureRegistry, Tile};
use crate::world::viewport::Viewport;
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::rc::Rc;

pub const DEFAULT_TILE_CACHE: usize = 4096;

/// Creatures the client currently knows about, by server id.
#[derive(Debug, Default)]
pub struct KnownCreatures {
    creatures: HashMap<ThingId, ThingRef>,
}

impl KnownCreatures {
    pub fn add(&mut self, creature: ThingRef) {
        self.creatures.insert(creature.id(), creature);
    }

    pub fn get(&self, id: ThingId) -> Option<&ThingRef> {
        self.creatures.get(&id)
    }

    pub fn contains(&self, id: ThingId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

impl CreatureRegistry for KnownCreatures {
    fn remove_creature_by_id(&mut self, id: ThingId) {
        self.creatures.remove(&id);
    }
}

/// Client-side map: the tiles seen so far plus the creature registry.
///
/// Tiles live in an LRU cache; a tile pushed out of it is cleaned so its
/// creatures leave the registry with it.
pub struct Map {
    tiles: LruCache<Position, Tile>,
    creatures: KnownCreatures,
    local_player: Option<Position>,
}

impl Map {
    pub fn new(tile_capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(tile_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tiles: LruCache::new(capacity),
            creatures: KnownCreatures::default(),
            local_player: None,
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile_capacity(&self) -> usize {
        self.tiles.cap().get()
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.peek(&position)
    }

    pub fn creatures(&self) -> &KnownCreatures {
        &self.creatures
    }

    pub fn creature(&self, id: ThingId) -> Option<&ThingRef> {
        self.creatures.get(id)
    }

    pub fn local_player(&self) -> Option<Position> {
        self.local_player
    }

    pub fn set_local_player(&mut self, position: Position) {
        self.local_player = Some(position);
    }

    /// Adds `thing` to the tile at its own position, creating the tile if needed.
    pub fn add_thing(&mut self, thing: ThingRef, stackpos: u8) {
        let position = thing.position();
        if thing.attributes().always_on_top && self.is_west_of_local_player(position) {
            logging::log_debug(&format!(
                "map: always-on-top thing {} (type {}) west of local player at {}",
                thing.id().0,
                thing.type_id(),
                position
            ));
        }
        if thing.is_creature() {
            self.creatures.add(Rc::clone(&thing));
        }
        self.ensure_tile(position);
        if let Some(tile) = self.tiles.get_mut(&position) {
            tile.add_thing(thing, stackpos);
        }
    }

    pub fn get_thing(&self, position: Position, stackpos: u8) -> Option<ThingRef> {
        self.tiles
            .peek(&position)
            .and_then(|tile| tile.get_thing(stackpos))
            .cloned()
    }

    pub fn remove_thing(&mut self, position: Position, stackpos: u8) -> Option<ThingRef> {
        match self.tiles.get_mut(&position) {
            Some(tile) => tile.remove_thing(stackpos),
            None => {
                logging::log_debug(&format!(
                    "map: remove stackpos {} from unknown tile {}",
                    stackpos, position
                ));
                None
            }
        }
    }

    pub fn remove_thing_by_ptr(&mut self, thing: &ThingRef) -> bool {
        self.tiles
            .get_mut(&thing.position())
            .map(|tile| tile.remove_thing_by_ptr(thing))
            .unwrap_or(false)
    }

    pub fn clean_tile(&mut self, position: Position) {
        if let Some(tile) = self.tiles.get_mut(&position) {
            tile.clean(&mut self.creatures);
        }
    }

    /// Cleans every tile; grounds stay cached.
    pub fn clean(&mut self) {
        for (_, tile) in self.tiles.iter_mut() {
            tile.clean(&mut self.creatures);
        }
    }

    pub fn remove_creature_by_id(&mut self, id: ThingId) {
        self.creatures.remove_creature_by_id(id);
    }

    /// Draws every cached tile inside `viewport`, row by row.
    ///
    /// Returns the number of tiles drawn.
    pub fn draw<P: Painter + ?Sized>(
        &mut self,
        viewport: &Viewport,
        tile_size: i32,
        painter: &mut P,
    ) -> usize {
        let mut drawn = 0;
        for position in viewport.positions() {
            if let Some(tile) = self.tiles.get(&position) {
                let (x, y) = viewport.screen_offset(position, tile_size);
                tile.draw(x, y, painter);
                drawn += 1;
            }
        }
        drawn
    }

    fn is_west_of_local_player(&self, position: Position) -> bool {
        self.local_player
            .and_then(|player| player.step(Direction::West))
            .is_some_and(|west| west == position)
    }

    fn ensure_tile(&mut self, position: Position) {
        if self.tiles.contains(&position) {
            return;
        }
        if let Some((evicted_position, mut evicted)) = self.tiles.push(position, Tile::new()) {
            logging::log_debug(&format!(
                "map: evicted tile {} ({} things)",
                evicted_position,
                evicted.stack_size()
            ));
            evicted.clean(&mut self.creatures);
        }
    }
}
