use crate::entities::thing::{Thing, ThingId, ThingKind, ThingRef};
use crate::world::map::Map;
use crate::world::position::Position;
use crate::world::thing_types::ThingTypeIndex;
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;

/// A snapshot of world contents, applied to a map in file order.
#[derive(Debug, Default)]
pub struct Scene {
    pub local_player: Option<Position>,
    pub things: Vec<PlacedThing>,
}

#[derive(Debug)]
pub struct PlacedThing {
    pub thing: ThingRef,
    pub stackpos: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SceneFile {
    local_player: Option<Position>,
    things: Vec<SceneEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneEntry {
    id: Option<u32>,
    kind: ThingKind,
    type_id: u16,
    position: Position,
    #[serde(default)]
    stackpos: u8,
}

impl Scene {
    pub fn apply(&self, map: &mut Map) {
        if let Some(position) = self.local_player {
            map.set_local_player(position);
        }
        for placed in &self.things {
            map.add_thing(Rc::clone(&placed.thing), placed.stackpos);
        }
    }
}

pub fn load_scene(path: &Path, types: &ThingTypeIndex) -> Result<Scene, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read scene {}: {}", path.display(), err))?;
    parse_scene(&content, types).map_err(|err| format!("scene {}: {}", path.display(), err))
}

pub fn parse_scene(content: &str, types: &ThingTypeIndex) -> Result<Scene, String> {
    let file: SceneFile =
        serde_yaml::from_str(content).map_err(|err| format!("invalid yaml: {}", err))?;

    let mut things = Vec::with_capacity(file.things.len());
    for (index, entry) in file.things.into_iter().enumerate() {
        let attributes = types.attributes(entry.kind, entry.type_id).ok_or_else(|| {
            format!(
                "thing #{} references unknown {:?} type {}",
                index + 1,
                entry.kind,
                entry.type_id
            )
        })?;
        let id = entry.id.map(ThingId).unwrap_or_else(ThingId::next);
        things.push(PlacedThing {
            thing: Rc::new(Thing::new(
                id,
                entry.kind,
                entry.type_id,
                entry.position,
                attributes,
            )),
            stackpos: entry.stackpos,
        });
    }

    Ok(Scene {
        local_player: file.local_player,
        things,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::thing_types::parse_thing_types;

    fn catalogue() -> ThingTypeIndex {
        parse_thing_types(
            "items:\n  - id: 102\n    group: ground\n  - id: 2148\n    draw_next_offset: 4\ncreatures:\n  - id: 128\n",
        )
        .expect("catalogue")
    }

    #[test]
    fn parse_and_apply_scene() {
        let scene = parse_scene(
            r#"
local_player: { x: 100, y: 100, z: 7 }
things:
  - { kind: item, type_id: 102, position: { x: 100, y: 100, z: 7 } }
  - { kind: item, type_id: 2148, position: { x: 100, y: 100, z: 7 }, stackpos: 1 }
  - { id: 1073741825, kind: creature, type_id: 128, position: { x: 100, y: 100, z: 7 } }
"#,
            &catalogue(),
        )
        .expect("scene");
        assert_eq!(scene.things.len(), 3);
        assert_eq!(scene.things[1].stackpos, 1);

        let mut map = Map::new(8);
        scene.apply(&mut map);
        let position = Position::new(100, 100, 7);
        assert_eq!(map.local_player(), Some(position));
        assert_eq!(map.tile(position).map(|tile| tile.stack_size()), Some(3));
        assert!(map.creature(ThingId(1_073_741_825)).is_some());
        // Creatures address before bottom items.
        assert_eq!(
            map.get_thing(position, 1).map(|thing| thing.id()),
            Some(ThingId(1_073_741_825))
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = parse_scene(
            "things:\n  - { kind: effect, type_id: 9, position: { x: 1, y: 1, z: 7 } }\n",
            &catalogue(),
        )
        .expect_err("unknown type");
        assert!(err.contains("unknown Effect type 9"), "{}", err);
    }

    #[test]
    fn empty_scene_has_no_player() {
        let scene = parse_scene("{}", &catalogue()).expect("scene");
        assert!(scene.local_player.is_none());
        assert!(scene.things.is_empty());
    }

    #[test]
    fn bundled_scene_loads_and_stacks() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let types = crate::world::thing_types::load_thing_types(&root.join("things.yml"))
            .expect("bundled thing types");
        let scene = load_scene(&root.join("scene.yml"), &types).expect("bundled scene");

        let mut map = Map::new(64);
        scene.apply(&mut map);
        let shop = Position::new(32370, 32241, 7);
        let tile = map.tile(shop).expect("shop tile");
        // The missile is dropped and the effect is not addressable.
        assert_eq!(tile.stack_size(), 4);
        assert_eq!(tile.effects().len(), 1);

        let mut list = crate::render::painter::DrawList::new();
        tile.draw(64, 64, &mut list);
        let offsets: Vec<(i32, i32)> = list
            .commands()
            .iter()
            .map(|command| (command.x, command.y))
            .collect();
        assert_eq!(offsets, vec![(64, 64), (64, 64), (56, 56), (52, 52), (52, 52)]);
    }
}
