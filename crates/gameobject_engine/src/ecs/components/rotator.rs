//! Rotator module
//!
//! Moves its entity around a point on a circle in the XY plane. The point is
//! either fixed or, when orbiting the parent, re-read from the parent's world
//! position every frame.

use crate::ecs::{EntityId, World};
use crate::foundation::math::{orbit_point, Vec3};

/// Radius of the circle traced by a rotator, in world units
pub const DEFAULT_ORBIT_RADIUS: f32 = 50.0;

/// Circular motion around a point
#[derive(Debug, Clone, PartialEq)]
pub struct RotatorModule {
    rotation_speed: f32,
    current_angle: f32,
    rotation_direction: f32,
    radius: f32,
    rotate_around_parent: bool,
    rotation_point: Vec3,
}

impl RotatorModule {
    /// Rotator turning at `rotation_speed` radians per second
    pub fn new(rotation_speed: f32, rotate_around_parent: bool) -> Self {
        Self {
            rotation_speed,
            current_angle: 0.0,
            rotation_direction: 1.0,
            radius: DEFAULT_ORBIT_RADIUS,
            rotate_around_parent,
            rotation_point: Vec3::zeros(),
        }
    }

    /// Builder pattern: set the circle radius
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the center of rotation
    ///
    /// Overwritten every frame while orbiting a parent.
    pub fn set_rotation_point(&mut self, point: Vec3) {
        self.rotation_point = point;
    }

    /// `true` turns with increasing angle, `false` reverses
    pub fn set_rotation_direction(&mut self, clockwise: bool) {
        self.rotation_direction = if clockwise { 1.0 } else { -1.0 };
    }

    /// Center of rotation
    pub fn rotation_point(&self) -> Vec3 {
        self.rotation_point
    }

    /// Accumulated angle in radians
    pub fn angle(&self) -> f32 {
        self.current_angle
    }

    /// +1 or -1
    pub fn direction(&self) -> f32 {
        self.rotation_direction
    }

    /// Angular speed in radians per second
    pub fn speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Circle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the rotation point follows the parent
    pub fn orbits_parent(&self) -> bool {
        self.rotate_around_parent
    }

    pub(crate) fn update(&mut self, world: &mut World, owner: EntityId, delta_time: f32) {
        if self.rotate_around_parent {
            if let Some(center) = world.parent(owner).and_then(|parent| world.world_position(parent)) {
                self.rotation_point = center;
            }
        }

        let z = world.local_position(owner).map_or(0.0, |position| position.z);
        self.current_angle += self.rotation_direction * self.rotation_speed * delta_time;

        let position = orbit_point(self.rotation_point, self.current_angle, self.radius, z);
        world.set_local_position(owner, position);
    }
}
