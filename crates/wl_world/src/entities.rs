use bevy::math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wl_core::{uniform_between, Slot};

use crate::catalog::{AnimalSpecies, ItemDefinition};

/// Movement state of a wandering animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimalState {
    #[default]
    Idle,
    Walking,
}

impl AnimalState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walking => "Walking",
        }
    }
}

/// A wandering animal.
#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub position: Vec3,
    /// Where the animal was placed; wandering is bounded around this point.
    pub spawn_point: Vec3,
    /// Facing angle in degrees. Follows `direction` while walking.
    pub rotation: f32,
    /// Heading in degrees the animal walks along.
    pub direction: f32,
    pub velocity: f32,
    pub max_velocity: f32,
    pub state: AnimalState,
    /// Seconds left in the current state.
    pub state_timer: f32,
    /// Index into the species catalog.
    pub species: usize,
    pub width: f32,
    pub height: f32,
    pub wander_radius: f32,
    pub active: bool,
}

impl Animal {
    /// Arm the walking state: fresh random heading, full speed and a walking
    /// duration drawn from the species range.
    pub fn start_walking(&mut self, species: &AnimalSpecies, rng: &mut impl Rng) {
        self.state = AnimalState::Walking;
        self.direction = rng.gen_range(0.0..360.0);
        self.velocity = self.max_velocity;
        self.state_timer = uniform_between(rng, species.walk_time.0, species.walk_time.1);
    }

    /// Arm the idle state: stop and draw an idle duration.
    pub fn start_idle(&mut self, species: &AnimalSpecies, rng: &mut impl Rng) {
        self.state = AnimalState::Idle;
        self.velocity = 0.0;
        self.state_timer = uniform_between(rng, species.idle_time.0, species.idle_time.1);
    }

    pub fn is_walking(&self) -> bool {
        self.state == AnimalState::Walking
    }
}

impl Slot for Animal {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// An immobile landmark that may seed loot around itself once.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticElement {
    pub position: Vec3,
    /// Fixed at placement.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    /// Index into the landmark catalog.
    pub type_index: usize,
    pub active: bool,
    pub items_spawned: bool,
}

impl Slot for StaticElement {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Size tier of a vegetation feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VegetationKind {
    Small,
    Medium,
    Big,
}

impl VegetationKind {
    pub const ALL: [VegetationKind; 3] = [Self::Small, Self::Medium, Self::Big];

    /// Index for table lookups (0-2).
    pub const fn index(&self) -> usize {
        match self {
            Self::Small => 0,
            Self::Medium => 1,
            Self::Big => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Big => "Big",
        }
    }

    /// Only medium bushes can be cut down.
    pub const fn is_cuttable(&self) -> bool {
        matches!(self, Self::Medium)
    }
}

/// A grass tuft, bush or tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Vegetation {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    pub kind: VegetationKind,
    /// Index into the loaded textures for `kind`.
    pub variant: usize,
    pub active: bool,
}

impl Slot for Vegetation {
    fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Container,
    Tool,
    Weapon,
}

/// How the player interacts with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    /// Opens by itself when the player walks up to it.
    Open,
    /// Picked up by an explicit player action.
    Take,
}

/// A collectible item or container lying in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub position: Vec3,
    pub width: f32,
    pub height: f32,
    /// Index into the item definitions.
    pub definition: usize,
    pub category: ItemCategory,
    pub interaction: InteractionKind,
    pub opened: bool,
    pub taken: bool,
    pub active: bool,
}

impl Item {
    /// A fresh, unopened item of the given definition centred at `position`.
    pub fn from_definition(index: usize, definition: &ItemDefinition, position: Vec3) -> Self {
        Self {
            position,
            width: definition.width,
            height: definition.height,
            definition: index,
            category: definition.category,
            interaction: definition.interaction,
            opened: false,
            taken: false,
            active: true,
        }
    }
}

impl Slot for Item {
    fn is_active(&self) -> bool {
        self.active
    }
}
