use bevy::prelude::*;

use super::follow_target;

#[test]
fn sits_behind_and_above_at_rest() {
    let (eye, look_at) = follow_target(Vec3::ZERO, 0.0, 0.0);
    // Behind = +Z when facing -Z.
    assert!(eye.z > 5.0 && eye.x.abs() < 1e-5);
    assert!(eye.y > 3.0);
    assert!(look_at.abs_diff_eq(Vec3::new(0.0, 1.2, -2.0), 1e-5));
}

#[test]
fn orbits_with_yaw() {
    let (eye, _) = follow_target(Vec3::ZERO, std::f32::consts::FRAC_PI_2, 0.0);
    assert!(eye.x > 5.0 && eye.z.abs() < 1e-4, "{eye}");
}

#[test]
fn looking_down_raises_the_camera() {
    let (level, _) = follow_target(Vec3::ZERO, 0.0, 0.0);
    let (down, _) = follow_target(Vec3::ZERO, 0.0, 0.4);
    assert!(down.y > level.y);
}
