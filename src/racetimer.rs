use log::{debug, info};
use num_traits::Zero;

use crate::constants::{BLEEP_INTERVAL, MINI_BLEEP_INTERVAL, RESPAWN_Y_OFFSET};
use crate::geometry::{vec2, Rect, Vec2};
use crate::physics::PhysicsBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Intermediate,
    End,
    Unknown,
}

impl MarkerKind {
    // Level designers use both the long and the short names.
    pub fn from_type(s: &str) -> MarkerKind {
        match s {
            "race_start" | "start" => MarkerKind::Start,
            "race_intermediate" | "intermediate" => MarkerKind::Intermediate,
            "race_end" | "end" => MarkerKind::End,
            _ => MarkerKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceMarker {
    pub bounds: Rect,
    pub kind: MarkerKind,
    pub race_id: i32,
}

impl RaceMarker {
    pub fn position(&self) -> Vec2 {
        self.bounds.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub bounds: Rect,
    pub active: bool,
    pub resets_timer: bool,
}

impl Checkpoint {
    pub fn new(bounds: Rect) -> Checkpoint {
        Checkpoint {
            bounds,
            active: false,
            resets_timer: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.bounds.center()
    }
}

// Where a respawn sends the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnAnchor {
    Checkpoint(usize),
    // Installed when a race starts. Respawning here restarts the clock.
    RaceStart { position: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Racing(i32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RaceEvent {
    Started { race_id: i32 },
    Finished { race_id: i32, elapsed: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCue {
    Bleep,
    MiniBleep,
}

pub struct RaceTimer {
    phase: RacePhase,
    elapsed: f64,
    current: Option<RespawnAnchor>,
    checkpoints: Vec<Checkpoint>,

    bleep_timer: f64,
    mini_bleep_timer: f64,
    windup: f64,
}

impl RaceTimer {
    pub fn new(checkpoints: Vec<Checkpoint>) -> RaceTimer {
        RaceTimer {
            phase: RacePhase::Idle,
            elapsed: 0.0,
            current: None,
            checkpoints,
            bleep_timer: 0.0,
            mini_bleep_timer: 0.0,
            windup: 0.0,
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn active_race(&self) -> Option<i32> {
        match self.phase {
            RacePhase::Idle => None,
            RacePhase::Racing(race_id) => Some(race_id),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    // HUD fade, 0.0-1.0.
    pub fn windup(&self) -> f64 {
        self.windup
    }

    pub fn current_anchor(&self) -> Option<RespawnAnchor> {
        self.current
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    fn anchor_position(&self, anchor: RespawnAnchor) -> Option<Vec2> {
        match anchor {
            RespawnAnchor::Checkpoint(index) => self.checkpoints.get(index).map(Checkpoint::position),
            RespawnAnchor::RaceStart { position } => Some(position),
        }
    }

    fn anchor_resets_timer(&self, anchor: RespawnAnchor) -> bool {
        match anchor {
            RespawnAnchor::Checkpoint(index) => self
                .checkpoints
                .get(index)
                .map(|checkpoint| checkpoint.resets_timer)
                .unwrap_or(false),
            RespawnAnchor::RaceStart { .. } => true,
        }
    }

    fn deactivate_all(&mut self) {
        for checkpoint in self.checkpoints.iter_mut() {
            checkpoint.active = false;
        }
    }

    fn clear_cues(&mut self) {
        self.bleep_timer = 0.0;
        self.mini_bleep_timer = 0.0;
    }

    // Returns true if this made the checkpoint current.
    pub fn touch_checkpoint(&mut self, index: usize) -> bool {
        match self.checkpoints.get(index) {
            Some(checkpoint) if !checkpoint.active => {}
            _ => return false,
        }
        self.deactivate_all();
        self.checkpoints[index].active = true;
        self.current = Some(RespawnAnchor::Checkpoint(index));
        info!("checkpoint {} activated", index);
        true
    }

    pub fn touch_marker(&mut self, marker: &RaceMarker) -> Option<RaceEvent> {
        match (marker.kind, self.phase) {
            (MarkerKind::Start, RacePhase::Idle) => {
                info!("race {} started", marker.race_id);
                self.phase = RacePhase::Racing(marker.race_id);
                self.elapsed = 0.0;
                self.current = Some(RespawnAnchor::RaceStart {
                    position: marker.position(),
                });
                self.deactivate_all();
                Some(RaceEvent::Started {
                    race_id: marker.race_id,
                })
            }
            (MarkerKind::End, RacePhase::Racing(race_id)) if race_id == marker.race_id => {
                info!("race {} finished in {:.3}s", race_id, self.elapsed);
                self.phase = RacePhase::Idle;
                Some(RaceEvent::Finished {
                    race_id,
                    elapsed: self.elapsed,
                })
            }
            _ => None,
        }
    }

    // Advances the race clock. Returns the audio cues due this frame.
    pub fn update(&mut self, delta_time: f64) -> Vec<TimerCue> {
        let mut cues = Vec::new();
        match self.phase {
            RacePhase::Racing(_) => {
                self.elapsed += delta_time;
                self.bleep_timer += delta_time;
                self.mini_bleep_timer += delta_time;
                self.windup = (self.windup + delta_time).min(1.0);
            }
            RacePhase::Idle => {
                self.clear_cues();
                self.windup = (self.windup - delta_time).max(0.0);
            }
        }

        if self.bleep_timer >= BLEEP_INTERVAL {
            self.bleep_timer -= BLEEP_INTERVAL;
            cues.push(TimerCue::Bleep);
        }
        if self.mini_bleep_timer >= MINI_BLEEP_INTERVAL {
            self.mini_bleep_timer -= MINI_BLEEP_INTERVAL;
            cues.push(TimerCue::MiniBleep);
        }
        cues
    }

    // Sends the player back to the current anchor. Returns false if there isn't one.
    pub fn respawn(&mut self, body: &mut dyn PhysicsBody) -> bool {
        let Some(anchor) = self.current else {
            debug!("respawn requested with no checkpoint");
            return false;
        };
        let Some(position) = self.anchor_position(anchor) else {
            return false;
        };

        body.set_position(position + vec2(0.0, RESPAWN_Y_OFFSET));
        body.set_velocity(Vec2::zero());
        if self.anchor_resets_timer(anchor) {
            self.elapsed = 0.0;
            self.clear_cues();
        }
        info!("respawned at {:?}", anchor);
        true
    }
}
