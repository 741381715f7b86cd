//! Enemy variants and their fixed stats.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyVariant {
    Normal,
    Tank,
    Speeder,
    Jumper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantStats {
    pub scale: f32,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    pub collider_radius: f32,
    pub jumps: bool,
}

/// Body colors, picked by spawn serial.
pub const ENEMY_PALETTE: [Color; 5] = [
    Color::srgb(1.0, 0.0, 0.266_666_68),
    Color::srgb(1.0, 0.4, 0.0),
    Color::srgb(0.666_666_7, 0.0, 1.0),
    Color::srgb(0.0, 1.0, 0.533_333_36),
    Color::srgb(1.0, 1.0, 0.0),
];

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 4] = [Self::Normal, Self::Tank, Self::Speeder, Self::Jumper];

    /// Map a uniform sample in `[0, 1)` to a variant: Tank 20%, Speeder 15%, Jumper 15%,
    /// Normal the rest.
    pub fn roll(r: f32) -> Self {
        if r < 0.20 {
            Self::Tank
        } else if r < 0.35 {
            Self::Speeder
        } else if r < 0.50 {
            Self::Jumper
        } else {
            Self::Normal
        }
    }

    pub const fn stats(self) -> VariantStats {
        match self {
            Self::Normal => VariantStats {
                scale: 1.0,
                health_multiplier: 1.0,
                speed_multiplier: 1.0,
                collider_radius: 0.4,
                jumps: false,
            },
            Self::Tank => VariantStats {
                scale: 1.5,
                health_multiplier: 2.5,
                speed_multiplier: 0.6,
                collider_radius: 0.6,
                jumps: false,
            },
            Self::Speeder => VariantStats {
                scale: 0.75,
                health_multiplier: 0.6,
                speed_multiplier: 1.7,
                collider_radius: 0.3,
                jumps: false,
            },
            Self::Jumper => VariantStats {
                scale: 0.9,
                health_multiplier: 0.8,
                speed_multiplier: 1.1,
                collider_radius: 0.36,
                jumps: true,
            },
        }
    }

    /// Starting hit points in `wave`: `(50 + wave*10) * multiplier`, rounded, at least 1.
    pub fn starting_health(self, wave: u32) -> i32 {
        let base = 50.0 + wave as f32 * 10.0;
        ((base * self.stats().health_multiplier).round() as i32).max(1)
    }
}

pub fn palette_color(serial: u32) -> Color {
    ENEMY_PALETTE[serial as usize % ENEMY_PALETTE.len()]
}
