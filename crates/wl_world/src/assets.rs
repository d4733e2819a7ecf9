use wl_core::SPRITE_DIRECTIONS;

use crate::catalog::WorldCatalog;
use crate::entities::VegetationKind;

/// Opaque texture handle handed out by the asset loader. Zero means the
/// texture failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    pub const NONE: TextureHandle = TextureHandle(0);

    pub const fn is_loaded(&self) -> bool {
        self.0 != 0
    }
}

/// One sprite per viewing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionalSprites(pub [TextureHandle; SPRITE_DIRECTIONS]);

impl DirectionalSprites {
    /// A set is usable only when every direction loaded.
    pub fn is_loaded(&self) -> bool {
        self.0.iter().all(TextureHandle::is_loaded)
    }

    pub fn get(&self, direction: usize) -> TextureHandle {
        self.0
            .get(direction)
            .copied()
            .unwrap_or(TextureHandle::NONE)
    }
}

/// Closed and opened looks of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemTextures {
    pub closed: TextureHandle,
    pub opened: TextureHandle,
}

impl ItemTextures {
    pub fn is_loaded(&self) -> bool {
        self.closed.is_loaded() && self.opened.is_loaded()
    }
}

/// Texture handles for everything the world can contain, filled in by the
/// asset loader. Categories whose textures are missing are left out of
/// generation and rendering.
#[derive(Debug, Clone, Default)]
pub struct SpriteRegistry {
    /// Texture variants per vegetation tier, indexed by [`VegetationKind::index`].
    pub vegetation: [Vec<TextureHandle>; 3],
    /// Indexed by species.
    pub animals: Vec<DirectionalSprites>,
    /// Indexed by landmark kind.
    pub static_kinds: Vec<DirectionalSprites>,
    /// Indexed by item definition.
    pub items: Vec<ItemTextures>,
    /// Particle texture for cut foliage.
    pub leaf_particle: TextureHandle,
}

impl SpriteRegistry {
    /// Registry with a distinct non-zero handle for every slot in `catalog`.
    /// Used by headless runs and tests where no real textures exist.
    pub fn placeholder(catalog: &WorldCatalog, vegetation_variants: usize) -> Self {
        let mut next = 0u32;
        let mut handle = move || {
            next += 1;
            TextureHandle(next)
        };

        let mut registry = SpriteRegistry::default();
        for kind in VegetationKind::ALL {
            registry.vegetation[kind.index()] = (0..vegetation_variants).map(|_| handle()).collect();
        }
        for _ in &catalog.species {
            registry.animals.push(DirectionalSprites(std::array::from_fn(|_| handle())));
        }
        for _ in &catalog.static_kinds {
            registry.static_kinds.push(DirectionalSprites(std::array::from_fn(|_| handle())));
        }
        for _ in &catalog.items {
            registry.items.push(ItemTextures {
                closed: handle(),
                opened: handle(),
            });
        }
        registry.leaf_particle = handle();
        registry
    }

    /// Indices of the loaded texture variants for a vegetation tier.
    pub fn loaded_vegetation_variants(&self, kind: VegetationKind) -> Vec<usize> {
        self.vegetation[kind.index()]
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_loaded())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn vegetation_texture(&self, kind: VegetationKind, variant: usize) -> TextureHandle {
        self.vegetation[kind.index()]
            .get(variant)
            .copied()
            .unwrap_or(TextureHandle::NONE)
    }

    pub fn animal_sprites(&self, species: usize) -> Option<&DirectionalSprites> {
        self.animals.get(species).filter(|s| s.is_loaded())
    }

    pub fn static_sprites(&self, kind: usize) -> Option<&DirectionalSprites> {
        self.static_kinds.get(kind).filter(|s| s.is_loaded())
    }

    pub fn item_textures(&self, definition: usize) -> Option<&ItemTextures> {
        self.items.get(definition).filter(|t| t.is_loaded())
    }

    /// Species indices below `count` whose sprites loaded.
    pub fn loaded_species(&self, count: usize) -> Vec<usize> {
        (0..count).filter(|&i| self.animal_sprites(i).is_some()).collect()
    }

    /// Landmark kind indices below `count` whose sprites loaded.
    pub fn loaded_static_kinds(&self, count: usize) -> Vec<usize> {
        (0..count).filter(|&i| self.static_sprites(i).is_some()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_handles_are_unique_and_loaded() {
        let catalog = WorldCatalog::default();
        let registry = SpriteRegistry::placeholder(&catalog, 3);

        let mut all = Vec::new();
        for variants in &registry.vegetation {
            all.extend(variants.iter().copied());
        }
        for set in registry.animals.iter().chain(registry.static_kinds.iter()) {
            assert!(set.is_loaded());
            all.extend(set.0.iter().copied());
        }
        for item in &registry.items {
            all.push(item.closed);
            all.push(item.opened);
        }
        all.push(registry.leaf_particle);

        let count = all.len();
        all.sort_by_key(|h| h.0);
        all.dedup();
        assert_eq!(all.len(), count);
        assert!(all.iter().all(TextureHandle::is_loaded));
    }

    #[test]
    fn partially_loaded_sprite_set_is_unavailable() {
        let catalog = WorldCatalog::default();
        let mut registry = SpriteRegistry::placeholder(&catalog, 2);
        registry.animals[1].0[4] = TextureHandle::NONE;
        assert!(registry.animal_sprites(1).is_none());
        assert_eq!(registry.loaded_species(catalog.species.len()), vec![0, 2, 3]);
    }

    #[test]
    fn missing_vegetation_variants_are_skipped() {
        let mut registry = SpriteRegistry::default();
        registry.vegetation[VegetationKind::Big.index()] =
            vec![TextureHandle(5), TextureHandle::NONE, TextureHandle(9)];
        assert_eq!(registry.loaded_vegetation_variants(VegetationKind::Big), vec![0, 2]);
        assert!(registry.loaded_vegetation_variants(VegetationKind::Small).is_empty());
        assert_eq!(registry.vegetation_texture(VegetationKind::Big, 7), TextureHandle::NONE);
    }
}
