use crate::entities::thing::{ThingAttributes, ThingKind};
use crate::render::TILE_PIXELS;
use crate::telemetry::logging;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThingType {
    pub kind: ThingKind,
    pub id: u16,
    pub name: String,
    pub attributes: Rc<ThingAttributes>,
}

/// Read-only attribute descriptors, one id space per thing kind.
#[derive(Debug, Default, Clone)]
pub struct ThingTypeIndex {
    types: HashMap<(ThingKind, u16), ThingType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct CatalogueFile {
    items: Vec<CatalogueEntry>,
    creatures: Vec<CatalogueEntry>,
    effects: Vec<CatalogueEntry>,
    missiles: Vec<CatalogueEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogueEntry {
    id: u16,
    #[serde(default)]
    name: String,
    #[serde(flatten)]
    attributes: ThingAttributes,
}

impl ThingTypeIndex {
    pub fn get(&self, kind: ThingKind, id: u16) -> Option<&ThingType> {
        self.types.get(&(kind, id))
    }

    pub fn attributes(&self, kind: ThingKind, id: u16) -> Option<Rc<ThingAttributes>> {
        self.get(kind, id).map(|entry| Rc::clone(&entry.attributes))
    }

    pub fn insert(&mut self, entry: ThingType) -> Result<(), String> {
        let key = (entry.kind, entry.id);
        if self.types.contains_key(&key) {
            return Err(format!("thing type {:?} {} already exists", entry.kind, entry.id));
        }
        self.types.insert(key, entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn count(&self, kind: ThingKind) -> usize {
        self.types.keys().filter(|(entry_kind, _)| *entry_kind == kind).count()
    }
}

pub fn load_thing_types(path: &Path) -> Result<ThingTypeIndex, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read thing types {}: {}", path.display(), err))?;
    parse_thing_types(&content)
        .map_err(|err| format!("thing types {}: {}", path.display(), err))
}

pub fn parse_thing_types(content: &str) -> Result<ThingTypeIndex, String> {
    let file: CatalogueFile =
        serde_yaml::from_str(content).map_err(|err| format!("invalid yaml: {}", err))?;

    let mut index = ThingTypeIndex::default();
    for (kind, entries) in [
        (ThingKind::Item, file.items),
        (ThingKind::Creature, file.creatures),
        (ThingKind::Effect, file.effects),
        (ThingKind::Missile, file.missiles),
    ] {
        for entry in entries {
            validate_attributes(kind, &entry)?;
            index.insert(ThingType {
                kind,
                id: entry.id,
                name: entry.name,
                attributes: Rc::new(entry.attributes),
            })?;
        }
    }
    Ok(index)
}

fn validate_attributes(kind: ThingKind, entry: &CatalogueEntry) -> Result<(), String> {
    let attributes = &entry.attributes;
    if attributes.always_on_top_order > 3 {
        return Err(format!(
            "{:?} {} has always_on_top_order {} (expected 0..=3)",
            kind, entry.id, attributes.always_on_top_order
        ));
    }
    if !(0..=TILE_PIXELS).contains(&attributes.draw_next_offset) {
        return Err(format!(
            "{:?} {} has draw_next_offset {} (expected 0..={})",
            kind, entry.id, attributes.draw_next_offset, TILE_PIXELS
        ));
    }
    if attributes.always_on_top && attributes.always_on_top_order == 0 {
        logging::log_debug(&format!(
            "thing types: {:?} {} is always on top without a band and will not be drawn",
            kind, entry.id
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::thing::ThingGroup;

    const CATALOGUE: &str = r#"
items:
  - id: 102
    name: grass
    group: ground
  - id: 1049
    name: stone wall
    always_on_top: true
    always_on_top_order: 2
  - id: 2148
    name: gold coin
    draw_next_offset: 4
creatures:
  - id: 128
    name: citizen outfit
effects:
  - id: 3
    name: poff
missiles:
  - id: 2
    name: spear
"#;

    #[test]
    fn parses_every_section() {
        let index = parse_thing_types(CATALOGUE).expect("catalogue");
        assert_eq!(index.len(), 6);
        assert_eq!(index.count(ThingKind::Item), 3);
        assert_eq!(index.count(ThingKind::Missile), 1);

        let grass = index.get(ThingKind::Item, 102).expect("grass");
        assert_eq!(grass.name, "grass");
        assert_eq!(grass.attributes.group, ThingGroup::Ground);

        let wall = index.attributes(ThingKind::Item, 1049).expect("wall");
        assert!(wall.always_on_top);
        assert_eq!(wall.always_on_top_order, 2);

        let coin = index.attributes(ThingKind::Item, 2148).expect("coin");
        assert_eq!(coin.draw_next_offset, 4);
        assert!(!coin.always_on_top);
    }

    #[test]
    fn id_spaces_are_per_kind() {
        let index = parse_thing_types("items:\n  - id: 3\neffects:\n  - id: 3\n").expect("catalogue");
        assert!(index.get(ThingKind::Item, 3).is_some());
        assert!(index.get(ThingKind::Effect, 3).is_some());
        assert!(index.get(ThingKind::Creature, 3).is_none());
    }

    #[test]
    fn shared_attributes_are_one_allocation() {
        let index = parse_thing_types(CATALOGUE).expect("catalogue");
        let first = index.attributes(ThingKind::Item, 102).expect("grass");
        let second = index.attributes(ThingKind::Item, 102).expect("grass");
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = parse_thing_types("items:\n  - id: 1\n  - id: 1\n").expect_err("duplicate");
        assert!(err.contains("already exists"), "{}", err);
    }

    #[test]
    fn rejects_unknown_band() {
        let err = parse_thing_types(
            "items:\n  - id: 1\n    always_on_top: true\n    always_on_top_order: 4\n",
        )
        .expect_err("band");
        assert!(err.contains("always_on_top_order 4"), "{}", err);
    }

    #[test]
    fn rejects_offsets_outside_a_tile() {
        let err = parse_thing_types("items:\n  - id: 1\n    draw_next_offset: 2147483647\n")
            .expect_err("huge offset");
        assert!(err.contains("draw_next_offset 2147483647"), "{}", err);
        assert!(parse_thing_types("items:\n  - id: 1\n    draw_next_offset: -1\n").is_err());
        assert!(parse_thing_types("items:\n  - id: 1\n    draw_next_offset: 32\n").is_ok());
    }

    #[test]
    fn rejects_unknown_sections() {
        assert!(parse_thing_types("outfits:\n  - id: 1\n").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("tibia-client-missing-things.yml");
        let err = load_thing_types(&path).expect_err("missing");
        assert!(err.contains("failed to read thing types"), "{}", err);
    }
}
