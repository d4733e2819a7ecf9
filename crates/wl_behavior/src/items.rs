use bevy::log::info;
use wl_core::{planar, EntityStore};
use wl_player::PlayerPose;
use wl_world::{InteractionKind, Item, ItemDefinition};

/// Distance on the ground plane at which the player interacts with items.
pub const INTERACTION_RANGE: f32 = 1.5;

fn definition_name(definitions: &[ItemDefinition], index: usize) -> &str {
    definitions
        .get(index)
        .map(|d| d.name.as_str())
        .unwrap_or("item")
}

/// Open every unopened container the player is standing next to.
///
/// Only items with [`InteractionKind::Open`] open by proximity; `Take` items
/// stay put until [`take_items`] is called.
pub fn open_nearby_items(
    store: &mut EntityStore<Item>,
    definitions: &[ItemDefinition],
    player: &PlayerPose,
) -> usize {
    let origin = player.planar_position();
    let reach = INTERACTION_RANGE * INTERACTION_RANGE;
    let mut opened = 0;

    for item in store
        .iter_active_mut()
        .filter(|i| i.interaction == InteractionKind::Open && !i.opened)
    {
        if (planar(item.position) - origin).length_squared() <= reach {
            item.opened = true;
            opened += 1;
            info!(
                "Opened {} at ({:.1}, {:.1})",
                definition_name(definitions, item.definition),
                item.position.x,
                item.position.z
            );
        }
    }
    opened
}

/// Pick up every takeable item in reach that is not behind the player.
///
/// Taken items leave the world. Returns the definition index of each one.
pub fn take_items(
    store: &mut EntityStore<Item>,
    definitions: &[ItemDefinition],
    player: &PlayerPose,
) -> Vec<usize> {
    let origin = player.planar_position();
    let forward = player.forward_planar();
    let reach = INTERACTION_RANGE * INTERACTION_RANGE;
    let mut taken = Vec::new();

    for item in store
        .iter_active_mut()
        .filter(|i| i.interaction == InteractionKind::Take && !i.taken)
    {
        let offset = planar(item.position) - origin;
        if offset.length_squared() <= reach && offset.dot(forward) >= 0.0 {
            item.taken = true;
            item.active = false;
            taken.push(item.definition);
            info!("Took {}", definition_name(definitions, item.definition));
        }
    }
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    fn stocked(entries: &[(usize, f32, f32)]) -> (EntityStore<Item>, Vec<ItemDefinition>) {
        let definitions = ItemDefinition::all_defaults();
        let mut store = EntityStore::new();
        store.ensure_capacity(entries.len()).unwrap();
        for &(index, x, z) in entries {
            store
                .push(Item::from_definition(index, &definitions[index], Vec3::new(x, 0.5, z)))
                .unwrap();
        }
        (store, definitions)
    }

    #[test]
    fn containers_open_when_close() {
        let (mut store, defs) = stocked(&[
            (ItemDefinition::CHEST, 1.0, 1.0),
            (ItemDefinition::CRATE, 3.0, 0.0),
            (ItemDefinition::AXE, 0.5, 0.0),
        ]);
        let player = PlayerPose::default();

        assert_eq!(open_nearby_items(&mut store, &defs, &player), 1);
        let opened: Vec<bool> = store.iter().map(|i| i.opened).collect();
        assert_eq!(opened, vec![true, false, false]);

        assert_eq!(open_nearby_items(&mut store, &defs, &player), 0);
        assert!(store.get(0).unwrap().active);
    }

    #[test]
    fn proximity_never_opens_takeable_items() {
        let (mut store, defs) = stocked(&[(ItemDefinition::KNIFE, 0.0, 0.2)]);
        assert_eq!(open_nearby_items(&mut store, &defs, &PlayerPose::default()), 0);
        let knife = store.get(0).unwrap();
        assert!(!knife.opened && knife.active);
    }

    #[test]
    fn tools_are_taken_on_request() {
        let (mut store, defs) = stocked(&[
            (ItemDefinition::AXE, 0.0, 1.0),
            (ItemDefinition::SWORD, 0.0, -1.0),
            (ItemDefinition::BARREL, 0.0, 0.5),
        ]);
        let player = PlayerPose::default();

        assert_eq!(take_items(&mut store, &defs, &player), vec![ItemDefinition::AXE]);
        let axe = store.get(0).unwrap();
        assert!(axe.taken && !axe.active);
        assert!(store.get(1).unwrap().active);
        assert!(!store.get(2).unwrap().taken);

        assert!(take_items(&mut store, &defs, &player).is_empty());
    }
}
