//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    // Player
    pub player_speed: f32,
    pub player_linear_damping: f32,
    pub mouse_sensitivity: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub player_spawn: Vec3,
    pub muzzle_offset: Vec3,

    // Projectiles
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub projectile_damage: i32,
    pub hit_radius: f32,
    pub arena_half_extent: f32,
    pub projectile_min_y: f32,
    pub projectile_max_y: f32,

    // Enemies
    pub enemy_base_speed: f32,
    pub enemy_linear_damping: f32,
    pub enemy_speed_per_wave: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub hit_flash_secs: f32,
    pub jump_impulse_min: f32,
    pub jump_impulse_spread: f32,
    pub jump_interval_min: f32,
    pub jump_interval_max: f32,

    // Spawning
    pub spawn_edge: f32,
    pub spawn_spread: f32,
    pub spawn_height: f32,

    // World
    pub gravity: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 8.0,
            player_linear_damping: 5.0,
            mouse_sensitivity: 0.003,
            pitch_min: -std::f32::consts::FRAC_PI_3,
            pitch_max: std::f32::consts::FRAC_PI_6,
            player_spawn: Vec3::new(0.0, 2.0, 0.0),
            muzzle_offset: Vec3::new(0.3, 0.7, -1.05),

            projectile_speed: 40.0,
            projectile_lifetime: 3.0,
            projectile_damage: 25,
            hit_radius: 1.0,
            arena_half_extent: 26.0,
            projectile_min_y: -1.0,
            projectile_max_y: 20.0,

            enemy_base_speed: 3.0,
            enemy_linear_damping: 3.0,
            enemy_speed_per_wave: 0.15,
            attack_range: 1.5,
            attack_cooldown: 1.0,
            hit_flash_secs: 0.15,
            jump_impulse_min: 6.0,
            jump_impulse_spread: 3.0,
            jump_interval_min: 1.0,
            jump_interval_max: 2.5,

            spawn_edge: 22.0,
            spawn_spread: 20.0,
            spawn_height: 1.0,

            gravity: 20.0,
        }
    }
}

impl Tunables {
    /// Chase speed multiplier for a wave: `1 + (wave-1) * step`.
    #[inline]
    pub fn wave_speed_multiplier(&self, wave: u32) -> f32 {
        1.0 + wave.saturating_sub(1) as f32 * self.enemy_speed_per_wave
    }

    /// Player damage dealt by one enemy attack in `wave`.
    #[inline]
    pub fn enemy_attack_damage(&self, wave: u32) -> u32 {
        10 + wave * 2
    }

    /// True when `p` has left the projectile volume.
    #[inline]
    pub fn out_of_projectile_bounds(&self, p: Vec3) -> bool {
        p.x.abs() > self.arena_half_extent
            || p.z.abs() > self.arena_half_extent
            || p.y < self.projectile_min_y
            || p.y > self.projectile_max_y
    }
}
