use crate::render::painter::Painter;
use crate::world::position::Position;
use serde::Deserialize;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThingId(pub u32);

// Server creature ids start far above this range.
static NEXT_THING_ID: AtomicU32 = AtomicU32::new(1);

impl ThingId {
    pub fn next() -> Self {
        ThingId(NEXT_THING_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThingKind {
    Item,
    Creature,
    Effect,
    Missile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThingGroup {
    #[default]
    None,
    Ground,
    Container,
    Splash,
    Fluid,
    Door,
}

/// Static per-type descriptor shared by every thing of the same type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThingAttributes {
    pub group: ThingGroup,
    pub always_on_top: bool,
    /// Band 1..=3 for always-on-top items; 0 otherwise.
    pub always_on_top_order: u8,
    /// Pixel displacement this thing adds to whatever is stacked above it.
    pub draw_next_offset: i32,
}

impl ThingAttributes {
    pub fn is_ground(&self) -> bool {
        self.group == ThingGroup::Ground
    }
}

#[derive(Debug)]
pub struct Thing {
    id: ThingId,
    kind: ThingKind,
    type_id: u16,
    position: Position,
    attributes: Rc<ThingAttributes>,
}

pub type ThingRef = Rc<Thing>;

impl Thing {
    pub fn new(
        id: ThingId,
        kind: ThingKind,
        type_id: u16,
        position: Position,
        attributes: Rc<ThingAttributes>,
    ) -> Self {
        Self {
            id,
            kind,
            type_id,
            position,
            attributes,
        }
    }

    pub fn id(&self) -> ThingId {
        self.id
    }

    pub fn kind(&self) -> ThingKind {
        self.kind
    }

    pub fn type_id(&self) -> u16 {
        self.type_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn attributes(&self) -> &ThingAttributes {
        &self.attributes
    }

    pub fn is_item(&self) -> bool {
        self.kind == ThingKind::Item
    }

    pub fn is_creature(&self) -> bool {
        self.kind == ThingKind::Creature
    }

    pub fn is_effect(&self) -> bool {
        self.kind == ThingKind::Effect
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P, x: i32, y: i32) {
        painter.paint(self, x, y);
    }
}
