#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{LifeGrid, Loc, OutOfBounds, Random};
use log::{debug, trace};
use std::time::{Duration, Instant};

pub const MIN_INTERVAL: Duration = Duration::from_millis(10);
pub const MAX_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(400);

#[derive(Debug)]
pub struct Simulation {
    grid: LifeGrid,
    rand: Random,
    playing: bool,
    interval: Duration,
    next_tick: Option<Instant>,
    generation: u64,
}

impl Simulation {
    pub fn new(width: u32, height: u32, rand: Random) -> Self {
        Self {
            grid: LifeGrid::new(width, height),
            rand,
            playing: false,
            interval: DEFAULT_INTERVAL,
            next_tick: None,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.next_tick = Some(Instant::now() + self.interval);
        debug!("playback started at {:?} per generation", self.interval);
    }

    // Dropping the armed deadline is the cancellation: poll can never step
    // again until play re-arms it.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.next_tick = None;
        debug!("playback paused at generation {}", self.generation);
    }

    pub fn step(&mut self) {
        self.grid.next_generation();
        self.generation += 1;
        trace!("advanced to generation {}", self.generation);
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        // An already-armed deadline keeps its old schedule; the next re-arm
        // picks up the new interval.
        debug!("interval set to {:?}", self.interval);
    }

    pub fn randomize(&mut self, live_probability: f64) {
        self.grid.randomize(live_probability, &mut self.rand);
        self.generation = 0;
        debug!("grid randomized with live probability {live_probability}");
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.generation = 0;
        debug!("grid cleared");
    }

    // A successful manual edit pauses playback. A failed edit changes
    // nothing, including the playback state.
    pub fn toggle_cell(&mut self, loc: Loc) -> Result<bool, OutOfBounds> {
        let alive = self.grid.toggle(loc)?;
        self.pause();
        Ok(alive)
    }

    // Advances at most one generation per call, however far past the
    // deadline the caller is. Returns whether a generation was produced.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        let Some(deadline) = self.next_tick else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.step();
        let mut next = deadline + self.interval;
        while next <= now {
            next += self.interval;
        }
        self.next_tick = Some(next);
        true
    }
}
