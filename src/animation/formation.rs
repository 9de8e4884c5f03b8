//! The two-state formation toggle and its continuously-animated mix scalar.

use super::easing::EasingFunction;

/// The two logical scene formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Formation {
    /// Points and instances rest in the spherical cloud.
    Scattered,
    /// Points and instances rest in the assembled cone.
    #[default]
    TreeShape,
}

impl Formation {
    /// The mix value this formation eases toward.
    pub fn target_mix(self) -> f32 {
        match self {
            Self::Scattered => 0.0,
            Self::TreeShape => 1.0,
        }
    }

    /// The opposite formation.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Scattered => Self::TreeShape,
            Self::TreeShape => Self::Scattered,
        }
    }
}

/// Eases the continuous mix scalar toward the current formation target.
///
/// The mix is what the shaders consume: 0 = fully scattered, 1 = fully
/// tree-shaped, with every value in between a transient of the animation —
/// never a persisted state of its own.
#[derive(Debug, Clone)]
pub struct FormationMix {
    target: Formation,
    start_mix: f32,
    current: f32,
    elapsed: f32,
    duration: f32,
    easing: EasingFunction,
}

impl FormationMix {
    /// Create an animator already settled at the given formation.
    pub fn new(initial: Formation, duration_secs: f32) -> Self {
        Self {
            target: initial,
            start_mix: initial.target_mix(),
            current: initial.target_mix(),
            elapsed: duration_secs,
            duration: duration_secs.max(f32::EPSILON),
            easing: EasingFunction::DEFAULT,
        }
    }

    /// The formation currently eased toward.
    pub fn target(&self) -> Formation {
        self.target
    }

    /// The current mix value in [0,1].
    pub fn mix(&self) -> f32 {
        self.current
    }

    /// Whether the mix has reached the target exactly.
    pub fn is_settled(&self) -> bool {
        self.current == self.target.target_mix()
    }

    /// Begin easing toward a new formation. A no-op when already targeted.
    pub fn set_target(&mut self, formation: Formation) {
        if formation == self.target {
            return;
        }
        self.target = formation;
        self.start_mix = self.current;
        self.elapsed = 0.0;
    }

    /// Flip the target formation.
    pub fn toggle(&mut self) {
        self.set_target(self.target.toggled());
    }

    /// Advance the animation by `dt` seconds and return the new mix.
    pub fn update(&mut self, dt: f32) -> f32 {
        if !self.is_settled() {
            self.elapsed += dt.max(0.0);
            let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
            let eased = self.easing.evaluate(t);
            let target = self.target.target_mix();
            self.current = self.start_mix + (target - self.start_mix) * eased;
            if t >= 1.0 {
                self.current = target;
            }
        }
        self.current
    }
}
