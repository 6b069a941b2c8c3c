//! Actors and their per-substep behaviour
//!
//! Every dynamic thing in a level is an [`Actor`]: a box with a position
//! plus a variant body. Actors never reference each other; they see the rest
//! of the level only through [`Level`] queries.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::{Contact, Level, Status};
use super::plan::{LavaMotion, Spawn};
use super::tick::TickInput;
use crate::Vector;
use crate::consts::*;

/// Variant tag, used for contact dispatch and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Coin,
    Lava,
}

/// Variant-specific state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorBody {
    Player {
        speed: Vector,
    },
    Coin {
        base_pos: Vector,
        /// Bobbing phase (radians)
        wobble: f64,
    },
    Lava {
        speed: Vector,
        /// Where a dripping block restarts after hitting something
        repeat_pos: Option<Vector>,
    },
}

/// A dynamic entity with an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Stable within a level, assigned in plan order
    pub id: u32,
    /// Top-left corner
    pub pos: Vector,
    pub size: Vector,
    pub body: ActorBody,
}

impl Actor {
    /// Build the actor for a plan glyph found at grid cell `cell`
    pub fn spawn(id: u32, spawn: Spawn, cell: Vector, rng: &mut impl Rng) -> Self {
        match spawn {
            Spawn::Player => Self::player(id, cell),
            Spawn::Coin => Self::coin(id, cell, rng.random_range(0.0..std::f64::consts::TAU)),
            Spawn::Lava(motion) => Self::lava(id, cell, motion),
        }
    }

    pub fn player(id: u32, cell: Vector) -> Self {
        Self {
            id,
            pos: cell + PLAYER_SPAWN_OFFSET,
            size: PLAYER_SIZE,
            body: ActorBody::Player { speed: Vector::ZERO },
        }
    }

    pub fn coin(id: u32, cell: Vector, wobble: f64) -> Self {
        let base_pos = cell + COIN_SPAWN_OFFSET;
        Self {
            id,
            pos: base_pos,
            size: COIN_SIZE,
            body: ActorBody::Coin { base_pos, wobble },
        }
    }

    pub fn lava(id: u32, cell: Vector, motion: LavaMotion) -> Self {
        let (speed, repeat_pos) = match motion {
            LavaMotion::Horizontal => (Vector::new(2.0, 0.0), None),
            LavaMotion::Vertical => (Vector::new(0.0, 2.0), None),
            LavaMotion::Dripping => (Vector::new(0.0, 3.0), Some(cell)),
        };
        Self {
            id,
            pos: cell,
            size: LAVA_SIZE,
            body: ActorBody::Lava { speed, repeat_pos },
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self.body {
            ActorBody::Player { .. } => ActorKind::Player,
            ActorBody::Coin { .. } => ActorKind::Coin,
            ActorBody::Lava { .. } => ActorKind::Lava,
        }
    }

    /// Current velocity, for the variants that move
    pub fn speed(&self) -> Option<Vector> {
        match self.body {
            ActorBody::Player { speed } | ActorBody::Lava { speed, .. } => Some(speed),
            ActorBody::Coin { .. } => None,
        }
    }

    /// What the player experiences when it overlaps this actor
    pub fn contact(&self) -> Option<Contact> {
        match self.body {
            ActorBody::Player { .. } => None,
            ActorBody::Coin { .. } => Some(Contact::Coin { id: self.id }),
            ActorBody::Lava { .. } => Some(Contact::Lava),
        }
    }

    /// Strict AABB overlap; shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Actor) -> bool {
        self.pos.x + self.size.x > other.pos.x
            && self.pos.x < other.pos.x + other.size.x
            && self.pos.y + self.size.y > other.pos.y
            && self.pos.y < other.pos.y + other.size.y
    }

    /// Advance this actor by one substep
    pub fn act(&mut self, dt: f64, level: &mut Level, input: &TickInput) {
        match self.body {
            ActorBody::Player { speed } => self.act_player(speed, dt, level, input),
            ActorBody::Coin { base_pos, wobble } => {
                let tuning = level.tuning();
                let wobble = wobble + dt * tuning.wobble_speed;
                self.pos = base_pos + Vector::new(0.0, wobble.sin() * tuning.wobble_dist);
                self.body = ActorBody::Coin { base_pos, wobble };
            }
            ActorBody::Lava { speed, repeat_pos } => {
                let new_pos = self.pos + speed * dt;
                if level.obstacle_at(new_pos, self.size).is_none() {
                    self.pos = new_pos;
                } else if let Some(origin) = repeat_pos {
                    self.pos = origin;
                } else {
                    self.body = ActorBody::Lava {
                        speed: speed * -1.0,
                        repeat_pos,
                    };
                }
            }
        }
    }

    fn act_player(&mut self, mut speed: Vector, dt: f64, level: &mut Level, input: &TickInput) {
        let tuning = level.tuning();

        // Horizontal pass: walking speed comes straight from input
        speed.x = 0.0;
        if input.left {
            speed.x -= tuning.player_x_speed;
        }
        if input.right {
            speed.x += tuning.player_x_speed;
        }

        let new_pos = self.pos + Vector::new(speed.x * dt, 0.0);
        match level.obstacle_at(new_pos, self.size) {
            Some(obstacle) => level.player_touched(obstacle.into()),
            None => self.pos = new_pos,
        }

        // Vertical pass: gravity, landing and jumping
        speed.y += dt * tuning.gravity;
        let new_pos = self.pos + Vector::new(0.0, speed.y * dt);
        match level.obstacle_at(new_pos, self.size) {
            Some(obstacle) => {
                level.player_touched(obstacle.into());
                speed.y = if input.up && speed.y > 0.0 {
                    -tuning.jump_speed
                } else {
                    0.0
                };
            }
            None => self.pos = new_pos,
        }

        self.body = ActorBody::Player { speed };

        if let Some(contact) = level.actor_at(self).and_then(Actor::contact) {
            level.player_touched(contact);
        }

        // Sinking animation once the level is lost
        if level.status() == Status::Lost {
            self.pos.y += dt;
            self.size.y -= dt;
        }
    }
}
