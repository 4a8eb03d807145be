use crate::geometry::Vec2;

/*
 * The slice of the rigid-body engine the gameplay code needs.
 *
 * Implemented by whatever owns the player's physics body. Nothing here
 * steps the simulation; the host does that between frames.
 */
pub trait PhysicsBody {
    fn is_on_ground(&self) -> bool;
    fn position(&self) -> Vec2;
    fn apply_force(&mut self, force: Vec2);
    fn apply_impulse(&mut self, impulse: Vec2);
    fn set_friction(&mut self, friction: f32);
    fn set_velocity(&mut self, velocity: Vec2);
    fn set_position(&mut self, position: Vec2);
    fn set_max_horizontal_velocity(&mut self, limit: f32);
}
