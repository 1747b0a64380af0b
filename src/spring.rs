/// Mass-spring-damper parameters.
///
/// Integrated with semi-implicit Euler rather than a closed-form solution,
/// matching the damped-oscillation feel of the interactive effects.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringSpec {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringSpec {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    /// Subtle movement: stiffness 300, damping 20.
    pub fn gentle() -> Self {
        Self::new(300.0, 20.0)
    }

    /// Quick interactions: stiffness 500, damping 30.
    pub fn snappy() -> Self {
        Self::new(500.0, 30.0)
    }

    /// Playful overshoot: stiffness 400, damping 10.
    pub fn bouncy() -> Self {
        Self::new(400.0, 10.0)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::gentle()
    }
}

/// Position and velocity thresholds below which a spring snaps to rest.
const REST_EPS: f64 = 1e-3;

/// A scalar value continuously driven toward a target.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub spec: SpringSpec,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(spec: SpringSpec, initial: f64) -> Self {
        Self {
            spec,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Hard reset to a value with zero velocity; target follows.
    pub fn reset_to(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.target = value;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_EPS && self.velocity.abs() < REST_EPS
    }

    /// Advances the simulation by `dt` seconds. Returns true while moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if dt <= 0.0 {
            return !self.is_settled();
        }

        let displacement = self.value - self.target;
        let accel =
            (-self.spec.stiffness * displacement - self.spec.damping * self.velocity)
                / self.spec.mass.max(f64::EPSILON);
        self.velocity += accel * dt;
        self.value += self.velocity * dt;

        if self.is_settled() {
            // Snap exactly so callers observe the rest value, not an epsilon.
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }
        true
    }
}

/// Paired springs for 2-D offsets; both settle independently, sampled together.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Spring2 {
    pub x: Spring,
    pub y: Spring,
}

impl Spring2 {
    pub fn new(spec: SpringSpec) -> Self {
        Self {
            x: Spring::new(spec, 0.0),
            y: Spring::new(spec, 0.0),
        }
    }

    pub fn set_target(&mut self, target: kurbo::Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn value(&self) -> kurbo::Vec2 {
        kurbo::Vec2::new(self.x.value(), self.y.value())
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    pub fn step(&mut self, dt: f64) -> bool {
        let mx = self.x.step(dt);
        let my = self.y.step(dt);
        mx || my
    }
}
