//! Projectile components.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// A straight-flying shot. The entity is its identity; `Transform` holds its position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Unit vector, fixed at creation.
    pub direction: Vec3,
    /// Seconds since it was fired.
    pub age: f32,
}

/// Result of one flight step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Flying,
    /// Lived past its lifetime; removed without moving.
    Expired,
    OutOfBounds,
}

impl Projectile {
    /// `None` for a zero direction.
    pub fn new(direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { direction, age: 0.0 })
    }

    /// Age, then move, then check bounds. Hit tests are the caller's job.
    pub fn advance(&mut self, position: &mut Vec3, dt: f32, tunables: &Tunables) -> Flight {
        self.age += dt;
        if self.age > tunables.projectile_lifetime {
            return Flight::Expired;
        }

        *position += self.direction * tunables.projectile_speed * dt;

        if tunables.out_of_projectile_bounds(*position) {
            Flight::OutOfBounds
        } else {
            Flight::Flying
        }
    }
}
