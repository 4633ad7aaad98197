//! Circle overlap tests and simple bounce responses.
//!
//! Bodies are treated as equal-mass circles. `restitution` scales the
//! velocity along the contact normal: 1 is perfectly elastic, 0 kills it.

use glam::Vec2;

use super::VectorExt;

/// True when `point` lies inside or on the circle.
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// True when two circles overlap or touch.
pub fn circles_touch(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    point_in_circle(a, b, a_radius + b_radius)
}

/// Velocities after two equal-mass circles at `a` and `b` collide.
///
/// Circles already moving apart keep their velocities. Coincident centers
/// have no normal, so the velocities are swapped and scaled instead.
pub fn resolve_circles(
    a: Vec2,
    a_velocity: Vec2,
    b: Vec2,
    b_velocity: Vec2,
    restitution: f32,
) -> (Vec2, Vec2) {
    let Ok(normal) = (b - a).try_normalized() else {
        return (b_velocity * restitution, a_velocity * restitution);
    };
    let closing = (a_velocity - b_velocity).dot(normal);
    if closing <= 0.0 {
        return (a_velocity, b_velocity);
    }
    let impulse = normal * (closing * (1.0 + restitution) / 2.0);
    (a_velocity - impulse, b_velocity + impulse)
}

/// Velocity of a circle at `position` after hitting an immovable circle
/// centered on `obstacle`.
pub fn bounce_off_static_circle(
    position: Vec2,
    velocity: Vec2,
    obstacle: Vec2,
    restitution: f32,
) -> Vec2 {
    let Ok(normal) = (position - obstacle).try_normalized() else {
        return -velocity * restitution;
    };
    let along = velocity.dot(normal);
    if along >= 0.0 {
        return velocity;
    }
    velocity - normal * (along * (1.0 + restitution))
}
