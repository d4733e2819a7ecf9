use std::path::Path;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::math::Vec2;
use bevy::prelude::*;
use wl_core::{Chunk, GameSettings};
use wl_persistence::{load_catalog_or_default, WlPersistencePlugin, CATALOG_PATH};
use wl_player::{PlayerPose, WlPlayerPlugin};
use wl_sky::{LightingParams, WlSkyPlugin};
use wl_world::SpriteRegistry;

mod session;

use session::{noise_terrain, WorldSession, WORLD_SIZE};

const TICK_RATE: f64 = 60.0;

/// Texture variants per vegetation tier in headless runs.
const VEGETATION_VARIANTS: usize = 3;

/// Walking speed of the roaming player in units per second.
const ROAM_SPEED: f32 = 3.0;

/// Seconds between status lines.
const STATUS_INTERVAL: f32 = 10.0;

/// Command line options read once at launch.
#[derive(Resource, Debug, Clone, Copy, Default)]
struct LaunchOptions {
    new_game: bool,
}

fn main() {
    let options = LaunchOptions {
        new_game: std::env::args().skip(1).any(|arg| arg == "--new-game"),
    };

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / TICK_RATE,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .insert_resource(options)
        // Plugins
        .add_plugins((
            WlPersistencePlugin::default(),
            WlPlayerPlugin,
            WlSkyPlugin,
        ))
        .add_systems(Startup, start_session)
        .add_systems(
            Update,
            (
                roam_player,
                simulate_world,
                interact,
                publish_lighting,
                report_status,
            )
                .chain(),
        )
        .run();
}

fn start_session(
    mut commands: Commands,
    options: Res<LaunchOptions>,
    mut settings: ResMut<GameSettings>,
    mut player: ResMut<PlayerPose>,
) {
    let catalog = load_catalog_or_default(Path::new(CATALOG_PATH));
    let sprites = SpriteRegistry::placeholder(&catalog, VEGETATION_VARIANTS);
    let mut session = WorldSession::new(
        noise_terrain(),
        settings.seed,
        Chunk::centered(WORLD_SIZE),
        catalog,
        sprites,
    );

    if options.new_game {
        session.new_game(&mut settings);
    } else {
        session.regenerate(&settings);
    }

    session.place_player(&mut player, Vec2::new(0.0, -10.0));
    commands.insert_resource(session);
}

/// Stand-in for input: walk forward and turn away from anything in the way.
fn roam_player(time: Res<Time>, session: Res<WorldSession>, mut player: ResMut<PlayerPose>) {
    let step = player.step(ROAM_SPEED * time.delta_secs(), 0.0);
    if !session.try_move_player(&mut player, step) {
        player.turn(90.0);
    }
}

fn simulate_world(time: Res<Time>, mut session: ResMut<WorldSession>, player: Res<PlayerPose>) {
    session.tick(time.delta_secs(), &player);
}

fn interact(mut session: ResMut<WorldSession>, player: Res<PlayerPose>) {
    let cut = session.cut_foliage(&player);
    if cut > 0 {
        debug!("Cleared {} bushes", cut);
    }
    session.take_items(&player);
}

fn publish_lighting(session: Res<WorldSession>, mut lighting: ResMut<LightingParams>) {
    let current = session.lighting();
    if *lighting != current {
        *lighting = current;
    }
}

fn report_status(
    time: Res<Time>,
    mut since_last: Local<f32>,
    mut session: ResMut<WorldSession>,
    player: Res<PlayerPose>,
) {
    *since_last += time.delta_secs();
    if *since_last < STATUS_INTERVAL {
        return;
    }
    *since_last = 0.0;

    let bursts = session.drain_particles().len();
    let visible = session.billboards(player.position).len();
    info!(
        "Day {} {} ({}): player at ({:.1}, {:.1}), {} billboards, {} leaf bursts, {} items carried",
        session.cycle.day(),
        session.cycle.clock_string(),
        session.cycle.period().name(),
        player.position.x,
        player.position.z,
        visible,
        bursts,
        session.inventory.len()
    );
}
