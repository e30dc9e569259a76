//! Weapon, projectiles, timed buffs, the swirl-shield and contact damage.

use glam::Vec2;
use rand::Rng;

use crate::constants::{
    BULLET_SPEED, CONTACT_DAMAGE, FIRE_COOLDOWN, MULTISHOT_JITTER, SCREEN_HEIGHT, SCREEN_WIDTH,
    SWIRL_DRAIN_PER_FRAME, SWIRL_SPIN_STEP, TARGET_RANGE,
};
use crate::entities::{Bullet, FrameEvent, KillCause, Player, Sentinel, SentinelId, Session};
use crate::loot;
use crate::particles::{self, HIT_BURST, SWIRL_BURST, TRACER};
use crate::physics::{self, Aabb};

// ── Targeting ─────────────────────────────────────────────────────────────────

/// Nearest sentinel strictly inside `TARGET_RANGE`. Ties keep the earlier one.
pub fn nearest_target(from: Vec2, sentinels: &[Sentinel]) -> Option<SentinelId> {
    let mut best = None;
    let mut min_dist = f32::INFINITY;
    for s in sentinels {
        let dist = from.distance(s.pos);
        if dist < min_dist && dist < TARGET_RANGE {
            min_dist = dist;
            best = Some(s.id);
        }
    }
    best
}

// ── Firing ────────────────────────────────────────────────────────────────────

fn homing_bullet(from: Vec2, target_pos: Vec2, target: SentinelId) -> Bullet {
    let vel = (target_pos - from).normalize_or_zero() * BULLET_SPEED;
    Bullet { pos: from, vel, target: Some(target) }
}

/// Fire at the current target if everything allows it. Returns the number
/// of projectiles spawned; every refusal is a silent no-op.
pub fn try_fire(
    session: &mut Session,
    trigger: bool,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) -> u32 {
    let Some(target) = session.target else {
        return 0;
    };
    let Some(target_pos) = session.sentinel(target).map(|s| s.pos) else {
        return 0;
    };
    let player = &mut session.player;
    if !trigger || player.cooldown > 0 || player.ammo <= 0.0 || player.effects.swirling {
        return 0;
    }

    player.spend_ammo(1.0);
    session.bullets.push(homing_bullet(player.pos, target_pos, target));
    let mut shots = 1;

    if player.effects.multishot_active && player.ammo > 0.0 {
        player.spend_ammo(1.0);
        for _ in 0..2 {
            let jitter = Vec2::new(
                rng.gen_range(-MULTISHOT_JITTER..=MULTISHOT_JITTER) as f32,
                rng.gen_range(-MULTISHOT_JITTER..=MULTISHOT_JITTER) as f32,
            );
            session
                .bullets
                .push(homing_bullet(player.pos + jitter, target_pos, target));
            shots += 1;
        }
    }

    player.cooldown = FIRE_COOLDOWN;
    events.push(FrameEvent::Fired { shots });
    shots
}

// ── Projectile motion ─────────────────────────────────────────────────────────

pub fn play_area() -> Aabb {
    Aabb::from_min_size(Vec2::ZERO, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT))
}

/// Step one projectile. Returns false when it should be removed.
///
/// While its target lives it re-aims every frame (pure pursuit). Once the
/// target is gone it keeps its last velocity until it has left the play area.
pub fn advance_bullet(bullet: &mut Bullet, sentinels: &[Sentinel]) -> bool {
    let target = bullet
        .target
        .and_then(|id| sentinels.iter().find(|s| s.id == id));

    match target {
        Some(target) => {
            let to_target = target.pos - bullet.pos;
            let dist = to_target.length();
            if dist <= 0.0 {
                return false;
            }
            bullet.vel = to_target / dist * BULLET_SPEED;
            bullet.pos += bullet.vel;
            true
        }
        None => {
            bullet.target = None;
            bullet.pos += bullet.vel;
            bullet.vel != Vec2::ZERO && play_area().overlaps(&bullet.bounds())
        }
    }
}

pub fn advance_bullets(session: &mut Session, rng: &mut impl Rng) {
    let sentinels = &session.sentinels;
    let particles = &mut session.particles;
    session.bullets.retain_mut(|b| {
        let alive = advance_bullet(b, sentinels);
        particles::maybe_emit(particles, b.pos, TRACER, 0.3, rng);
        alive
    });
}

// ── Timed buffs & swirl-shield ────────────────────────────────────────────────

/// Weapon cooldown and buff countdowns, once per frame.
pub fn tick_timers(player: &mut Player) {
    player.cooldown = player.cooldown.saturating_sub(1);

    let fx = &mut player.effects;
    fx.shield_timer = fx.shield_timer.saturating_sub(1);
    if fx.shield_timer == 0 {
        fx.shield_active = false;
    }
    fx.multishot_timer = fx.multishot_timer.saturating_sub(1);
    if fx.multishot_timer == 0 {
        fx.multishot_active = false;
    }
}

/// The swirl-shield is on exactly while its input is held and ammo remains.
pub fn set_swirl(player: &mut Player, held: bool) {
    player.effects.swirling = held && player.ammo > 0.0;
}

/// Drain, spin and switch off when dry.
pub fn update_swirl(player: &mut Player) {
    if !player.effects.swirling {
        return;
    }
    if player.ammo > 0.0 {
        player.spend_ammo(SWIRL_DRAIN_PER_FRAME);
    }
    if player.ammo <= 0.0 {
        player.effects.swirling = false;
    }
    player.effects.swirl_angle = (player.effects.swirl_angle + SWIRL_SPIN_STEP) % 360.0;
}

// ── Contact resolution ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Swirl-shield shredded the sentinel.
    Swirled,
    /// The power-up shield absorbed the hit and is used up.
    Shielded,
    /// No protection: the player took `CONTACT_DAMAGE`.
    Damaged,
}

/// Apply one sentinel touch to the player. First matching rule wins; the
/// sentinel dies in every case.
pub fn resolve_contact(player: &mut Player) -> ContactOutcome {
    if player.effects.swirling {
        ContactOutcome::Swirled
    } else if player.effects.shield_active {
        player.effects.shield_active = false;
        player.effects.shield_timer = 0;
        ContactOutcome::Shielded
    } else {
        player.take_damage(CONTACT_DAMAGE);
        ContactOutcome::Damaged
    }
}

/// Resolve every sentinel touching the player. Returns true if the player
/// died.
pub fn resolve_player_contacts(
    session: &mut Session,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) -> bool {
    let player_box = session.player.bounds();
    let (touching, rest): (Vec<Sentinel>, Vec<Sentinel>) = std::mem::take(&mut session.sentinels)
        .into_iter()
        .partition(|s| s.bounds().overlaps(&player_box));
    session.sentinels = rest;

    let mut died = false;
    for sentinel in touching {
        let cause = match resolve_contact(&mut session.player) {
            ContactOutcome::Swirled => {
                particles::emit(&mut session.particles, sentinel.pos, SWIRL_BURST, 30, rng);
                KillCause::Swirl
            }
            ContactOutcome::Shielded => KillCause::Shield,
            ContactOutcome::Damaged => {
                events.push(FrameEvent::PlayerHit { health: session.player.health });
                died |= session.player.is_dead();
                KillCause::Contact
            }
        };
        events.push(FrameEvent::SentinelDestroyed { pos: sentinel.pos, cause });
    }
    died
}

/// Projectiles against sentinels, then against crates. A projectile is
/// spent by its first kind of hit and never checked again this frame.
pub fn resolve_projectile_hits(
    session: &mut Session,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) {
    let bullets = std::mem::take(&mut session.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for bullet in bullets {
        if hit_sentinels(session, &bullet, rng, events) {
            continue;
        }
        if loot::hit_crates(session, &bullet, rng, events) {
            continue;
        }
        survivors.push(bullet);
    }
    session.bullets = survivors;
}

/// Destroys every sentinel the projectile overlaps.
fn hit_sentinels(
    session: &mut Session,
    bullet: &Bullet,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) -> bool {
    let before = session.sentinels.len();
    session.sentinels.retain(|s| {
        let hit = physics::circle_overlaps_aabb(bullet.pos, bullet.radius(), &s.bounds());
        if hit {
            events.push(FrameEvent::SentinelDestroyed {
                pos: s.pos,
                cause: KillCause::Projectile,
            });
        }
        !hit
    });
    if session.sentinels.len() == before {
        return false;
    }
    particles::emit(&mut session.particles, bullet.pos, HIT_BURST, 20, rng);
    true
}
