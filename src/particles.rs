//! Decorative particles. No gameplay effect.

use glam::Vec2;
use rand::Rng;

use crate::entities::{Particle, ParticleKind};

/// How a batch of particles is launched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emitter {
    pub kind: ParticleKind,
    pub max_life: u32,
    /// Each velocity component is uniform in `[-speed, speed]`.
    pub speed: f32,
}

pub const GLOW: Emitter = Emitter { kind: ParticleKind::Glow, max_life: 15, speed: 1.0 };
pub const TRACER: Emitter = Emitter { kind: ParticleKind::Tracer, max_life: 10, speed: 1.0 };
pub const CRATE_CHIP: Emitter = Emitter { kind: ParticleKind::Debris, max_life: 10, speed: 1.0 };
pub const CRATE_BREAK: Emitter = Emitter { kind: ParticleKind::Debris, max_life: 30, speed: 2.0 };
pub const HIT_BURST: Emitter = Emitter { kind: ParticleKind::Burst, max_life: 50, speed: 3.0 };
pub const SWIRL_BURST: Emitter = Emitter { kind: ParticleKind::Swirl, max_life: 40, speed: 4.0 };

pub fn emit(particles: &mut Vec<Particle>, pos: Vec2, emitter: Emitter, count: usize, rng: &mut impl Rng) {
    particles.extend((0..count).map(|_| Particle {
        pos,
        vel: Vec2::new(
            rng.gen_range(-emitter.speed..=emitter.speed),
            rng.gen_range(-emitter.speed..=emitter.speed),
        ),
        radius: rng.gen_range(1..=3),
        kind: emitter.kind,
        alpha: rng.gen_range(150..=255) as f32,
        life: 0,
        max_life: emitter.max_life,
    }));
}

/// Emit one particle with probability `chance`.
pub fn maybe_emit(particles: &mut Vec<Particle>, pos: Vec2, emitter: Emitter, chance: f64, rng: &mut impl Rng) {
    if rng.gen_bool(chance) {
        emit(particles, pos, emitter, 1, rng);
    }
}

/// Step one particle. Returns true once it has expired.
pub fn advance(p: &mut Particle) -> bool {
    p.pos += p.vel;
    p.life += 1;
    p.alpha = (255.0 - p.life as f32 * (255.0 / p.max_life as f32)).max(0.0);
    p.life >= p.max_life
}

pub fn advance_all(particles: &mut Vec<Particle>) {
    particles.retain_mut(|p| !advance(p));
}
