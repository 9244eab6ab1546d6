/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameWorld` and returns a brand-new `GameWorld`.  The simulation is fully
/// deterministic — no randomness anywhere.

use crate::config::Settings;
use crate::entities::{
    Boss, Bullet, Enemy, GameStatus, GameWorld, PatrolBounds, Player, Rect,
};

// ── Field & sprite constants ─────────────────────────────────────────────────

pub const FIELD_WIDTH: i32 = 800;
pub const FIELD_HEIGHT: i32 = 700;

pub const SPRITE_W: i32 = 80;
pub const SPRITE_H: i32 = 74;

pub const BULLET_W: i32 = 10;
pub const BULLET_H: i32 = 5;
pub const BULLET_SPEED: i32 = 30;

const BOSS_SPEED: i32 = 10;
const ENEMY_SPEED: i32 = 5;

// ── Constructors ─────────────────────────────────────────────────────────────

/// An enemy bouncing between the corner thresholds `(x1,y1)`–`(x2,y2)`.
/// A degenerate bound pair pins that axis, giving a pure horizontal or
/// vertical patrol lane.
fn patrol_enemy(
    start_x: i32,
    start_y: i32,
    bounds: PatrolBounds,
    speed: i32,
    hit_points: u32,
) -> Enemy {
    Enemy {
        rect: Rect::new(start_x, start_y, SPRITE_W, SPRITE_H),
        x_speed: if bounds.x1 == bounds.x2 { 0 } else { speed },
        y_speed: if bounds.y1 == bounds.y2 { 0 } else { speed },
        bounds,
        hit_points,
        damaged: false,
    }
}

/// Build the initial world: the fixed maze, its three patrol enemies, the
/// boss on its rectangular path, and the player at the configured start.
pub fn init_world(settings: &Settings) -> GameWorld {
    let barriers = vec![
        Rect::new(350, 350, 100, 350),
        Rect::new(100, 250, 100, 350),
        Rect::new(550, 250, 100, 350),
        Rect::new(350, -200, 100, 350),
    ];

    let enemies = vec![
        // Horizontal lane under the central wall gap.
        patrol_enemy(1, 350, PatrolBounds { x1: 0, x2: 270, y1: 350, y2: 350 }, ENEMY_SPEED, 1),
        // Two armoured sentries in the upper corridors.
        patrol_enemy(270, 1, PatrolBounds { x1: 270, x2: 270, y1: 0, y2: 175 }, ENEMY_SPEED, 4),
        patrol_enemy(450, 174, PatrolBounds { x1: 450, x2: 450, y1: 0, y2: 175 }, ENEMY_SPEED, 4),
    ];

    GameWorld {
        player: Player {
            rect: Rect::new(settings.start_x, settings.start_y, SPRITE_W, SPRITE_H),
            x_speed: 0,
            y_speed: 0,
            ammo: settings.bullets_amount,
            can_strike: true,
        },
        enemies,
        boss: Boss {
            rect: Rect::new(600, 620, SPRITE_W, SPRITE_H),
            x_speed: -BOSS_SPEED,
            y_speed: -BOSS_SPEED,
        },
        bullets: Vec::new(),
        barriers,
        goal: Rect::new(700, 600, 100, 100),
        strike_cooldown: 0,
        status: GameStatus::Running,
        tick: 0,
        player_speed: settings.player_speed,
        collision: settings.collision,
        enemy_collision: settings.enemy_collision,
        cooldown_ticks: settings.bullets_cooldown,
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Key-down on a horizontal key: add `delta` to the player's x-speed.
pub fn push_player_x(world: &GameWorld, delta: i32) -> GameWorld {
    let mut next = world.clone();
    next.player.x_speed += delta;
    next
}

/// Key-down on a vertical key: add `delta` to the player's y-speed.
pub fn push_player_y(world: &GameWorld, delta: i32) -> GameWorld {
    let mut next = world.clone();
    next.player.y_speed += delta;
    next
}

/// Key-up on a horizontal key zeroes the whole axis, regardless of how many
/// keys contributed to it.
pub fn halt_player_x(world: &GameWorld) -> GameWorld {
    let mut next = world.clone();
    next.player.x_speed = 0;
    next
}

/// Key-up on a vertical key zeroes the whole axis.
pub fn halt_player_y(world: &GameWorld) -> GameWorld {
    let mut next = world.clone();
    next.player.y_speed = 0;
    next
}

/// Fire a bullet from the player's center — gated on remaining ammo and the
/// strike cooldown.  Each shot adds the configured cooldown to the counter.
pub fn player_strike(world: &GameWorld) -> GameWorld {
    if world.player.ammo < 1 || !world.player.can_strike {
        return world.clone();
    }
    let (cx, cy) = world.player.rect.center();
    let mut next = world.clone();
    next.bullets.push(Bullet {
        rect: Rect::new(cx, cy, BULLET_W, BULLET_H),
        x_speed: BULLET_SPEED,
    });
    next.player.ammo -= 1;
    next.strike_cooldown += next.cooldown_ticks;
    next
}

// ── Per-tick phases ──────────────────────────────────────────────────────────

/// Axis-separated player move: apply x, resolve against bounds and barriers
/// on x only, then the same for y.  Resolving one axis at a time keeps the
/// player from tunnelling through barrier corners.
fn move_player(player: &Player, barriers: &[Rect], collision: bool, width: i32, height: i32) -> Player {
    let mut p = player.clone();

    p.rect.x += p.x_speed;
    if collision {
        if p.rect.x < 0 {
            p.rect.x = 0;
        }
        if p.rect.right() > width {
            p.rect.x = width - p.rect.w;
        }
        for barrier in barriers {
            if !p.rect.overlaps(barrier) {
                continue;
            }
            if p.x_speed > 0 {
                // Moving right: pull the right edge back to the wall's left.
                p.rect.x = p.rect.x.min(barrier.x - p.rect.w);
            } else if p.x_speed < 0 {
                p.rect.x = p.rect.x.max(barrier.right());
            }
        }
    }

    p.rect.y += p.y_speed;
    if collision {
        if p.rect.y < 0 {
            p.rect.y = 0;
        }
        if p.rect.bottom() > height {
            p.rect.y = height - p.rect.h;
        }
        for barrier in barriers {
            if !p.rect.overlaps(barrier) {
                continue;
            }
            if p.y_speed > 0 {
                p.rect.y = p.rect.y.min(barrier.y - p.rect.h);
            } else if p.y_speed < 0 {
                p.rect.y = p.rect.y.max(barrier.bottom());
            }
        }
    }

    p
}

/// Linear patrol: when both components sit at (or past) the same corner of
/// the patrol bounds, both velocity components invert.  Enemies never test
/// barriers — their lanes are open by level design.
fn move_enemy(enemy: &Enemy) -> Enemy {
    let mut e = enemy.clone();
    let b = e.bounds;
    if (e.rect.x >= b.x2 && e.rect.y >= b.y2) || (e.rect.x <= b.x1 && e.rect.y <= b.y1) {
        e.x_speed = -e.x_speed;
        e.y_speed = -e.y_speed;
    }
    e.rect.x += e.x_speed;
    e.rect.y += e.y_speed;
    e
}

/// Rectangular patrol: four independently-triggered corner thresholds, each
/// *setting* one axis speed rather than flipping it, so crossing the same
/// threshold twice cannot double-flip.
fn move_boss(boss: &Boss) -> Boss {
    let mut b = boss.clone();
    if b.rect.x <= 600 && b.rect.y >= 620 {
        b.y_speed = -BOSS_SPEED;
    }
    if b.rect.x <= 480 && b.rect.y <= 500 {
        b.x_speed = BOSS_SPEED;
    }
    if b.rect.x >= 600 && b.rect.y <= 380 {
        b.y_speed = BOSS_SPEED;
    }
    if b.rect.x >= 720 && b.rect.y >= 500 {
        b.x_speed = -BOSS_SPEED;
    }
    b.rect.x += b.x_speed;
    b.rect.y += b.y_speed;
    b
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick.  No-op once the game has reached a
/// terminal state.
pub fn tick(world: &GameWorld) -> GameWorld {
    if world.status != GameStatus::Running {
        return world.clone();
    }

    let mut next = world.clone();
    next.tick += 1;

    // ── 1. Strike cooldown ───────────────────────────────────────────────────
    if next.strike_cooldown >= 1 {
        next.player.can_strike = false;
        next.strike_cooldown -= 1;
    } else {
        next.player.can_strike = true;
    }

    // ── 2. Player move with axis-separated resolution ────────────────────────
    next.player = move_player(&next.player, &next.barriers, next.collision, next.width, next.height);

    // ── 3. Enemy & boss patrols ──────────────────────────────────────────────
    next.enemies = next.enemies.iter().map(move_enemy).collect();
    next.boss = move_boss(&next.boss);

    // ── 4. Bullets: advance, then barrier / enemy collisions ─────────────────
    // Bullets are processed in order against a working enemy set, so the
    // first bullet to reach an enemy is the one that damages it; a bullet
    // aimed at an enemy that already died this tick flies on.  Removals are
    // collected and applied after each scan, never mid-iteration.
    let mut surviving_bullets: Vec<Bullet> = Vec::new();
    for bullet in &next.bullets {
        let mut b = bullet.clone();
        b.rect.x += b.x_speed;

        // Off-field bullets vanish.
        if b.rect.right() < 0 || b.rect.x > next.width {
            continue;
        }
        // Barriers soak bullets; barriers themselves are indestructible.
        if next.barriers.iter().any(|wall| b.rect.overlaps(wall)) {
            continue;
        }
        // First overlapped live enemy takes one damage and spends the bullet.
        let hit = next
            .enemies
            .iter()
            .position(|enemy| b.rect.overlaps(&enemy.rect));
        match hit {
            Some(index) => damage_enemy(&mut next.enemies, index),
            None => surviving_bullets.push(b),
        }
    }
    next.bullets = surviving_bullets;

    // ── 5. Win check ─────────────────────────────────────────────────────────
    // Overlap alone is not enough: the player's center must sit strictly past
    // the goal's top-left corner on both axes ("actually inside", not merely
    // edge-touching).
    let (cx, cy) = next.player.rect.center();
    if next.player.rect.overlaps(&next.goal) && cx > next.goal.x && cy > next.goal.y {
        next.status = GameStatus::Won;
    }

    // ── 6. Lose checks ───────────────────────────────────────────────────────
    // Evaluated after the win check, so a tick that somehow triggers both
    // ends Lost.
    if next.enemy_collision {
        let p = &next.player.rect;
        if next.enemies.iter().any(|e| p.overlaps(&e.rect)) || p.overlaps(&next.boss.rect) {
            next.status = GameStatus::Lost;
        }
    }

    next
}

/// One point of damage to `enemies[index]`: armoured enemies lose a hit
/// point and switch to the damaged variant; an enemy on its last hit point
/// is removed from the active set permanently.
fn damage_enemy(enemies: &mut Vec<Enemy>, index: usize) {
    if enemies[index].hit_points >= 2 {
        enemies[index].hit_points -= 1;
        enemies[index].damaged = true;
    } else {
        enemies.remove(index);
    }
}
