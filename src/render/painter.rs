use crate::entities::thing::{Thing, ThingId};

/// Sink for the per-thing draw primitive.
pub trait Painter {
    fn paint(&mut self, thing: &Thing, x: i32, y: i32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub thing: ThingId,
    pub x: i32,
    pub y: i32,
}

/// Records draw commands in paint order (back to front).
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Painter for DrawList {
    fn paint(&mut self, thing: &Thing, x: i32, y: i32) {
        self.commands.push(DrawCommand {
            thing: thing.id(),
            x,
            y,
        });
    }
}
