/// All game entity types — pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box, top-left origin, field units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// AABB overlap with half-open extents: rects that merely touch along
    /// an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Dynamic entities ──────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub x_speed: i32,
    pub y_speed: i32,
    /// Bullets left in the magazine.
    pub ammo: u32,
    /// False while the strike cooldown counter is still draining.
    pub can_strike: bool,
}

/// Corner thresholds an enemy bounces between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatrolBounds {
    pub x1: i32,
    pub x2: i32,
    pub y1: i32,
    pub y2: i32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub rect: Rect,
    pub x_speed: i32,
    pub y_speed: i32,
    pub bounds: PatrolBounds,
    pub hit_points: u32,
    /// Set on the first non-lethal hit; drives the damaged sprite colour.
    pub damaged: bool,
}

/// Patrols a fixed rectangle via four independent corner thresholds.
/// No damage model — the boss is never destroyed.
#[derive(Clone, Debug)]
pub struct Boss {
    pub rect: Rect,
    pub x_speed: i32,
    pub y_speed: i32,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub rect: Rect,
    pub x_speed: i32,
}

// ── Game state machine ────────────────────────────────────────────────────────

/// One-way: Running → Won | Lost, never back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Won,
    Lost,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameWorld {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,
    pub bullets: Vec<Bullet>,
    /// Static maze walls, fixed at world construction.
    pub barriers: Vec<Rect>,
    /// Static goal tile; entering it past its top-left corner wins.
    pub goal: Rect,
    /// Ticks remaining before the player may strike again.
    pub strike_cooldown: u32,
    pub status: GameStatus,
    pub tick: u64,
    // Settings snapshot the tick loop needs.
    pub player_speed: i32,
    pub collision: bool,
    pub enemy_collision: bool,
    pub cooldown_ticks: u32,
    pub width: i32,
    pub height: i32,
}
