//! Read-only views over the entity stores for the renderer.

use bevy::math::Vec3;
use wl_core::{sprite_direction, EntityStore};

use crate::assets::{SpriteRegistry, TextureHandle};
use crate::entities::{Animal, Item, StaticElement, Vegetation};

/// Everything the renderer needs to draw one camera-facing quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BillboardView {
    /// Bottom centre of the quad.
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub texture: TextureHandle,
    /// Resolved directional sprite, for entities drawn with eight views.
    pub sprite_direction: Option<usize>,
}

pub fn animal_billboards<'a>(
    animals: &'a EntityStore<Animal>,
    sprites: &'a SpriteRegistry,
    camera: Vec3,
) -> impl Iterator<Item = BillboardView> + 'a {
    animals.iter_active().filter_map(move |animal| {
        let set = sprites.animal_sprites(animal.species)?;
        let direction = sprite_direction(animal.position, camera, animal.rotation);
        Some(BillboardView {
            position: animal.position,
            width: animal.width,
            height: animal.height,
            texture: set.get(direction),
            sprite_direction: Some(direction),
        })
    })
}

pub fn static_billboards<'a>(
    statics: &'a EntityStore<StaticElement>,
    sprites: &'a SpriteRegistry,
    camera: Vec3,
) -> impl Iterator<Item = BillboardView> + 'a {
    statics.iter_active().filter_map(move |element| {
        let set = sprites.static_sprites(element.type_index)?;
        let direction = sprite_direction(element.position, camera, element.rotation);
        Some(BillboardView {
            position: element.position,
            width: element.width,
            height: element.height,
            texture: set.get(direction),
            sprite_direction: Some(direction),
        })
    })
}

pub fn vegetation_billboards<'a>(
    vegetation: &'a EntityStore<Vegetation>,
    sprites: &'a SpriteRegistry,
) -> impl Iterator<Item = BillboardView> + 'a {
    vegetation.iter_active().filter_map(move |plant| {
        let texture = sprites.vegetation_texture(plant.kind, plant.variant);
        texture.is_loaded().then_some(BillboardView {
            position: plant.position,
            width: plant.width,
            height: plant.height,
            texture,
            sprite_direction: None,
        })
    })
}

/// Items are positioned by their centre, so the quad base is lowered by half
/// the item height.
pub fn item_billboards<'a>(
    items: &'a EntityStore<Item>,
    sprites: &'a SpriteRegistry,
) -> impl Iterator<Item = BillboardView> + 'a {
    items.iter_active().filter_map(move |item| {
        let textures = sprites.item_textures(item.definition)?;
        let texture = if item.opened {
            textures.opened
        } else {
            textures.closed
        };
        Some(BillboardView {
            position: item.position - Vec3::Y * (item.height * 0.5),
            width: item.width,
            height: item.height,
            texture,
            sprite_direction: None,
        })
    })
}
