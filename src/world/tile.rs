use crate::entities::thing::{ThingId, ThingKind, ThingRef};
use crate::render::painter::Painter;
use crate::telemetry::logging;
use std::rc::Rc;

/// Owner of global creature bookkeeping, told when a tile drops its creatures.
pub trait CreatureRegistry {
    fn remove_creature_by_id(&mut self, id: ThingId);
}

/// Occupants of one map cell.
///
/// Two orderings coexist and must not be unified:
/// - stack positions address `ground, items_top, creatures, items_bottom`
///   (effects excluded), each slice in insertion order;
/// - drawing splits `items_top` by always-on-top band and interleaves the
///   bands with the other collections, iterating each in reverse.
#[derive(Debug, Default, Clone)]
pub struct Tile {
    ground: Option<ThingRef>,
    items_top: Vec<ThingRef>,
    creatures: Vec<ThingRef>,
    items_bottom: Vec<ThingRef>,
    effects: Vec<ThingRef>,
}

impl Tile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ground(&self) -> Option<&ThingRef> {
        self.ground.as_ref()
    }

    pub fn items_top(&self) -> &[ThingRef] {
        &self.items_top
    }

    pub fn creatures(&self) -> &[ThingRef] {
        &self.creatures
    }

    pub fn items_bottom(&self) -> &[ThingRef] {
        &self.items_bottom
    }

    pub fn effects(&self) -> &[ThingRef] {
        &self.effects
    }

    pub fn is_empty(&self) -> bool {
        self.ground.is_none()
            && self.items_top.is_empty()
            && self.creatures.is_empty()
            && self.items_bottom.is_empty()
            && self.effects.is_empty()
    }

    /// Number of addressable things. Effects are not counted.
    pub fn stack_size(&self) -> usize {
        usize::from(self.ground.is_some())
            + self.items_bottom.len()
            + self.creatures.len()
            + self.items_top.len()
    }

    /// Places `thing` in the collection its kind and attributes select.
    ///
    /// `_stackpos` is what the server announced; placement never depends on it.
    pub fn add_thing(&mut self, thing: ThingRef, _stackpos: u8) {
        match thing.kind() {
            ThingKind::Item => {
                let attributes = thing.attributes();
                if attributes.is_ground() {
                    self.ground = Some(thing);
                } else if attributes.always_on_top {
                    self.items_top.push(thing);
                } else {
                    self.items_bottom.push(thing);
                }
            }
            ThingKind::Creature => self.creatures.push(thing),
            ThingKind::Effect => self.effects.push(thing),
            ThingKind::Missile => {
                logging::log_debug(&format!(
                    "tile: dropped {:?} {} (type {}), not a tile occupant",
                    thing.kind(),
                    thing.id().0,
                    thing.type_id()
                ));
            }
        }
    }

    pub fn get_thing(&self, stackpos: u8) -> Option<&ThingRef> {
        if stackpos == 0 {
            return self.ground.as_ref();
        }
        let mut index = usize::from(stackpos - 1);
        for slice in [&self.items_top, &self.creatures, &self.items_bottom] {
            if index < slice.len() {
                return slice.get(index);
            }
            index -= slice.len();
        }
        None
    }

    /// Removes the thing at `stackpos` and hands it back.
    ///
    /// An out-of-range position is written to the error log and leaves the
    /// tile untouched.
    pub fn remove_thing(&mut self, stackpos: u8) -> Option<ThingRef> {
        if stackpos == 0 {
            return self.ground.take();
        }
        let mut index = usize::from(stackpos - 1);
        for slice in [
            &mut self.items_top,
            &mut self.creatures,
            &mut self.items_bottom,
        ] {
            if index < slice.len() {
                return Some(slice.remove(index));
            }
            index -= slice.len();
        }
        logging::log_error(&format!(
            "tile: invalid stackpos {} (stack size {})",
            stackpos,
            self.stack_size()
        ));
        None
    }

    /// Erases the first entry that is the same allocation as `thing`.
    ///
    /// Returns whether anything was removed. The ground slot is not searched.
    pub fn remove_thing_by_ptr(&mut self, thing: &ThingRef) -> bool {
        let slice = match thing.kind() {
            ThingKind::Item if thing.attributes().always_on_top => &mut self.items_top,
            ThingKind::Item => &mut self.items_bottom,
            ThingKind::Creature => &mut self.creatures,
            ThingKind::Effect => &mut self.effects,
            ThingKind::Missile => return false,
        };
        match slice.iter().position(|entry| Rc::ptr_eq(entry, thing)) {
            Some(index) => {
                slice.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every occupant except the ground, releasing creatures from `registry`.
    pub fn clean<R: CreatureRegistry + ?Sized>(&mut self, registry: &mut R) {
        for creature in &self.creatures {
            registry.remove_creature_by_id(creature.id());
        }
        self.items_top.clear();
        self.creatures.clear();
        self.items_bottom.clear();
        self.effects.clear();
    }

    /// Paints the tile back to front with `(x, y)` as the tile origin.
    pub fn draw<P: Painter + ?Sized>(&self, x: i32, y: i32, painter: &mut P) {
        let mut offset: i32 = 0;

        if let Some(ground) = &self.ground {
            ground.draw(painter, x, y);
        }

        for order in [1, 2] {
            for thing in self.items_top_in_band(order) {
                thing.draw(painter, x.saturating_sub(offset), y.saturating_sub(offset));
                offset = offset.saturating_add(thing.attributes().draw_next_offset);
            }
        }

        for thing in self.items_bottom.iter().rev() {
            thing.draw(painter, x.saturating_sub(offset), y.saturating_sub(offset));
            offset = offset.saturating_add(thing.attributes().draw_next_offset);
        }

        // Creatures sit on the pile but do not raise it.
        for thing in self.creatures.iter().rev() {
            thing.draw(painter, x.saturating_sub(offset), y.saturating_sub(offset));
        }

        // Band 3 is always flush with the tile origin.
        for thing in self.items_top_in_band(3) {
            thing.draw(painter, x, y);
        }

        for thing in self.effects.iter().rev() {
            thing.draw(painter, x.saturating_sub(offset), y.saturating_sub(offset));
        }
    }

    fn items_top_in_band(&self, order: u8) -> impl Iterator<Item = &ThingRef> {
        self.items_top
            .iter()
            .rev()
            .filter(move |thing| thing.attributes().always_on_top_order == order)
    }
}
