//! Crates, their loot table, pickups and cores.

use rand::Rng;

use crate::constants::{
    AMMO_PICKUP, HEALTH_PICKUP, LOOT_AMMO_BELOW, LOOT_HEALTH_BELOW, LOOT_POWER_UP_BELOW,
    MULTISHOT_DURATION, SHIELD_DURATION,
};
use crate::entities::{Bullet, FrameEvent, Pickup, PickupKind, Player, Session};
use crate::particles::{self, CRATE_BREAK, CRATE_CHIP};
use crate::physics;

// ── Loot table ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loot {
    /// Shield or multishot, coin flip.
    PowerUp,
    Ammo,
    Health,
    Nothing,
}

/// Map a roll in `[0, 1)` onto the cumulative bands. Lower bounds inclusive.
pub fn loot_for_roll(roll: f64) -> Loot {
    if roll < LOOT_POWER_UP_BELOW {
        Loot::PowerUp
    } else if roll < LOOT_AMMO_BELOW {
        Loot::Ammo
    } else if roll < LOOT_HEALTH_BELOW {
        Loot::Health
    } else {
        Loot::Nothing
    }
}

pub fn roll_loot(rng: &mut impl Rng) -> Option<PickupKind> {
    match loot_for_roll(rng.gen::<f64>()) {
        Loot::PowerUp if rng.gen_bool(0.5) => Some(PickupKind::Shield),
        Loot::PowerUp => Some(PickupKind::MultiShot),
        Loot::Ammo => Some(PickupKind::Ammo),
        Loot::Health => Some(PickupKind::Health),
        Loot::Nothing => None,
    }
}

// ── Crates ────────────────────────────────────────────────────────────────────

/// Damage every crate the projectile overlaps. Broken crates drop at most
/// one pickup. Returns true if anything was hit.
pub fn hit_crates(
    session: &mut Session,
    bullet: &Bullet,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) -> bool {
    let mut hit_any = false;
    let mut i = 0;
    while i < session.crates.len() {
        let bounds = session.crates[i].bounds();
        if !physics::circle_overlaps_aabb(bullet.pos, bullet.radius(), &bounds) {
            i += 1;
            continue;
        }
        hit_any = true;
        let pos = session.crates[i].pos;
        session.crates[i].health -= 1;
        particles::emit(&mut session.particles, pos, CRATE_CHIP, 5, rng);
        events.push(FrameEvent::CrateHit);

        if session.crates[i].health > 0 {
            i += 1;
            continue;
        }
        session.crates.remove(i);
        particles::emit(&mut session.particles, pos, CRATE_BREAK, 10, rng);
        let loot = roll_loot(rng);
        if let Some(kind) = loot {
            session.pickups.push(Pickup { pos, kind });
        }
        events.push(FrameEvent::CrateBroken { loot });
    }
    hit_any
}

// ── Pickups & cores ───────────────────────────────────────────────────────────

pub fn apply_pickup(player: &mut Player, kind: PickupKind) {
    match kind {
        PickupKind::Shield => {
            player.effects.shield_active = true;
            player.effects.shield_timer = SHIELD_DURATION;
        }
        PickupKind::MultiShot => {
            player.effects.multishot_active = true;
            player.effects.multishot_timer = MULTISHOT_DURATION;
        }
        PickupKind::Ammo => player.add_ammo(AMMO_PICKUP),
        PickupKind::Health => player.heal(HEALTH_PICKUP),
    }
}

/// Apply and remove every pickup the player touches.
pub fn collect_pickups(session: &mut Session, events: &mut Vec<FrameEvent>) {
    let player_box = session.player.bounds();
    let (taken, left): (Vec<Pickup>, Vec<Pickup>) = std::mem::take(&mut session.pickups)
        .into_iter()
        .partition(|p| p.bounds().overlaps(&player_box));
    session.pickups = left;

    for pickup in taken {
        apply_pickup(&mut session.player, pickup.kind);
        events.push(FrameEvent::PickupCollected(pickup.kind));
    }
}

/// Remove touched cores and count them. Returns how many were taken.
pub fn collect_cores(session: &mut Session, events: &mut Vec<FrameEvent>) -> u32 {
    let player_box = session.player.bounds();
    let before = session.cores.len();
    session.cores.retain(|c| !c.bounds().overlaps(&player_box));
    let taken = (before - session.cores.len()) as u32;

    if taken > 0 {
        session.cores_collected += taken;
        events.push(FrameEvent::CoreCollected { total: session.cores_collected });
    }
    taken
}
