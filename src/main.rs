mod animation;
mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod fsm;
mod movement;
mod player;
mod respawn;
mod stats;
mod timing;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Duskblade".to_string(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(PhysicsPlugins::default())
    // Gravity is applied per actor by the movement systems
    .insert_resource(Gravity(Vec2::ZERO))
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        animation::AnimationPlugin,
        movement::MovementPlugin,
        stats::StatsPlugin,
        combat::CombatPlugin,
        player::PlayerPlugin,
        respawn::RespawnPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
