//! Damped spring used to animate an offset back to rest.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Integration step in seconds. Frames longer than this are subdivided.
const TIMESTEP: f64 = 0.004;

/// Longest span simulated per call. Anything beyond is dropped.
const MAX_FRAME: f64 = 0.1;

/// Spring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringSpec {
    /// Spring constant. Higher values pull harder.
    pub stiffness: f64,
    /// Velocity-proportional friction.
    pub damping: f64,
    /// Mass of the animated value.
    pub mass: f64,
    /// Distance from the target under which the spring may settle.
    pub rest_displacement_threshold: f64,
    /// Speed under which the spring may settle.
    pub rest_speed_threshold: f64,
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_displacement_threshold: 0.001,
            rest_speed_threshold: 0.001,
        }
    }
}

impl SpringSpec {
    /// Damping ratio: 1.0 is critically damped, below 1.0 overshoots.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// An in-flight spring animation of a 2D value toward a target.
///
/// The host's frame scheduler drives it through [`SpringBack::advance`].
/// Dropping it cancels the animation; the last value written stays put.
#[derive(Debug, Clone)]
pub struct SpringBack {
    spec: SpringSpec,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    settled: bool,
}

impl SpringBack {
    /// Start a spring at `from`, at rest, heading for `target`.
    pub fn new(from: Vec2, target: Vec2, spec: SpringSpec) -> Self {
        let mut spring = Self {
            spec,
            position: from,
            velocity: Vec2::ZERO,
            target,
            settled: false,
        };
        spring.settled = spring.is_at_rest();
        if spring.settled {
            spring.position = target;
        }
        spring
    }

    /// Spring from `from` back to the origin.
    pub fn to_origin(from: Vec2, spec: SpringSpec) -> Self {
        Self::new(from, Vec2::ZERO, spec)
    }

    /// Current value.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Value the spring is heading for.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Check if the spring has come to rest.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance the simulation by `dt`. Returns the new value.
    ///
    /// Once settled the value is snapped exactly onto the target.
    pub fn advance(&mut self, dt: Duration) -> Vec2 {
        if self.settled {
            return self.position;
        }

        let dt = dt.as_secs_f64().min(MAX_FRAME);
        let mass = self.spec.mass.max(f64::EPSILON);
        let mut elapsed = 0.0;

        // Semi-implicit Euler
        while elapsed < dt {
            let step = TIMESTEP.min(dt - elapsed);
            let displacement = self.position - self.target;
            let force = displacement * -self.spec.stiffness - self.velocity * self.spec.damping;
            self.velocity += force * (step / mass);
            self.position += self.velocity * step;
            elapsed += step;
        }

        // Too stiff for the step size: give up and land on the target
        if !self.position.is_finite() || !self.velocity.is_finite() {
            log::warn!("Spring diverged, snapping to target");
            self.position = self.target;
            self.velocity = Vec2::ZERO;
            self.settled = true;
            return self.position;
        }

        if self.is_at_rest() {
            self.position = self.target;
            self.velocity = Vec2::ZERO;
            self.settled = true;
        }

        self.position
    }

    fn is_at_rest(&self) -> bool {
        (self.position - self.target).hypot() < self.spec.rest_displacement_threshold
            && self.velocity.hypot() < self.spec.rest_speed_threshold
    }
}
