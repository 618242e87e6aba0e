//! Core domain: camera and arena setup.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn spawn_arena(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy]);

    let slabs = [
        // Floor
        (Vec2::new(0.0, -200.0), Vec2::new(1600.0, 40.0), ground_color),
        // Left ledge
        (Vec2::new(-350.0, -50.0), Vec2::new(180.0, 20.0), platform_color),
        // Right ledge, higher
        (Vec2::new(300.0, 60.0), Vec2::new(180.0, 20.0), platform_color),
    ];

    for (position, size, color) in slabs {
        commands.spawn((
            Ground,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    }
}
