//! Movement domain: ground detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MovementState, MovementTuning};

/// Casts a short ray down from each actor's feet against the ground layer.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(Entity, &Transform, &Collider, &mut MovementState)>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, collider, mut state) in &mut query {
        let was_on_ground = state.on_ground;

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(
            ray_origin,
            Dir2::NEG_Y,
            tuning.ground_probe_distance,
            true,
            &ground_filter,
        );

        state.on_ground = hit.is_some();

        if state.on_ground != was_on_ground {
            debug!("{:?} grounded changed: on_ground={}", entity, state.on_ground);
        }
    }
}
