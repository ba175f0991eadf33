//! Wave spawn scheduler
//!
//! Three-state machine run once per frame:
//! - `Idle`: wait for the wave interval to elapse
//! - `ClearCheck`: wait until nothing is still sliding in from the top
//! - `Emit`: lay down one pattern row
//!
//! Difficulty is a step function of elapsed time. A wave in the same tier as
//! the previous one gets a single row; the first wave of a new tier gets a
//! stacked three-row layout.

use std::collections::VecDeque;

use rand::Rng;

use super::catalog::Catalog;
use super::pattern::{self, Cell, MULTI_LINE, PatternLayout, SINGLE_LINE};
use super::pool::Pools;
use crate::Playfield;

/// Difficulty tier, chosen by elapsed game time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Calm,
    Steady,
    Brisk,
    Frantic,
    Relentless,
}

impl Tier {
    pub fn for_elapsed_secs(secs: u64) -> Self {
        match secs {
            0..30 => Tier::Calm,
            30..75 => Tier::Steady,
            75..150 => Tier::Brisk,
            150..240 => Tier::Frantic,
            _ => Tier::Relentless,
        }
    }

    pub fn for_frame(frame: u64, fps: u32) -> Self {
        Self::for_elapsed_secs(frame / u64::from(fps.max(1)))
    }

    /// Seconds from one wave to the next eligible one
    pub fn wave_interval_secs(self) -> u64 {
        match self {
            Tier::Calm => 6,
            Tier::Steady => 4,
            Tier::Brisk => 2,
            Tier::Frantic => 1,
            Tier::Relentless => 0,
        }
    }

    /// Score granted each time a wave is laid out in this tier
    pub fn score_award(self) -> u64 {
        match self {
            Tier::Calm => 10,
            Tier::Steady => 25,
            Tier::Brisk => 50,
            Tier::Frantic => 100,
            Tier::Relentless => 200,
        }
    }
}

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPhase {
    Idle,
    ClearCheck,
    Emit,
}

/// What one emitted row produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveReport {
    pub tier: Tier,
    pub layout: PatternLayout,
    /// Index into `SINGLE_LINE` or `MULTI_LINE`
    pub pattern: usize,
    /// Row within the pattern
    pub row: usize,
    /// Set on the first row of a pattern; the tier's score award was granted
    pub new_wave: bool,
    pub tier_changed: bool,
    pub spawned: usize,
    /// Cells lost to full pools
    pub dropped: usize,
}

/// Rows of the pattern currently being laid down
#[derive(Debug, Clone)]
struct ActiveWave {
    tier: Tier,
    layout: PatternLayout,
    pattern: usize,
    next_row: usize,
    tier_changed: bool,
    rows: VecDeque<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    phase: SpawnPhase,
    next_eligible_frame: u64,
    last_tier: Tier,
    fps: u32,
    active: Option<ActiveWave>,
}

impl SpawnScheduler {
    pub fn new(fps: u32) -> Self {
        Self {
            phase: SpawnPhase::Idle,
            next_eligible_frame: 0,
            // The opening wave counts as a repeat of the first tier
            last_tier: Tier::Calm,
            fps,
            active: None,
        }
    }

    pub fn phase(&self) -> SpawnPhase {
        self.phase
    }

    pub fn next_eligible_frame(&self) -> u64 {
        self.next_eligible_frame
    }

    pub fn last_tier(&self) -> Tier {
        self.last_tier
    }

    /// Run the state machine for `frame`; returns a report when a row was laid down
    pub fn evaluate(
        &mut self,
        frame: u64,
        pools: &mut Pools,
        catalog: &Catalog,
        playfield: &Playfield,
        rng: &mut impl Rng,
    ) -> Option<WaveReport> {
        if self.phase == SpawnPhase::Idle {
            if frame < self.next_eligible_frame {
                return None;
            }
            self.phase = SpawnPhase::ClearCheck;
        }

        if self.phase == SpawnPhase::ClearCheck {
            if pools.any_emerging() {
                return None;
            }
            self.phase = SpawnPhase::Emit;
        }

        let new_wave = self.active.is_none();
        let mut wave = match self.active.take() {
            Some(wave) => wave,
            None => self.choose_wave(frame, rng),
        };

        let row_index = wave.next_row;
        let (spawned, dropped) = match wave.rows.pop_front() {
            Some(row) => emit_row(row, pools, catalog, playfield, rng),
            None => (0, 0),
        };
        wave.next_row += 1;

        let report = WaveReport {
            tier: wave.tier,
            layout: wave.layout,
            pattern: wave.pattern,
            row: row_index,
            new_wave,
            tier_changed: wave.tier_changed && new_wave,
            spawned,
            dropped,
        };

        if wave.rows.is_empty() {
            self.next_eligible_frame =
                frame + wave.tier.wave_interval_secs() * u64::from(self.fps);
            self.phase = SpawnPhase::Idle;
        } else {
            // Next row waits for this one to clear the top edge
            self.active = Some(wave);
            self.phase = SpawnPhase::ClearCheck;
        }

        log::debug!(
            "Wave {:?} {:?} #{} row {}: {} spawned, {} dropped",
            report.tier,
            report.layout,
            report.pattern,
            report.row,
            report.spawned,
            report.dropped
        );
        Some(report)
    }

    fn choose_wave(&mut self, frame: u64, rng: &mut impl Rng) -> ActiveWave {
        let tier = Tier::for_frame(frame, self.fps);
        let tier_changed = tier != self.last_tier;
        if tier_changed {
            log::info!("Difficulty tier {:?} -> {:?}", self.last_tier, tier);
        }
        self.last_tier = tier;

        let (layout, pattern, rows) = if tier_changed {
            let index = rng.random_range(0..MULTI_LINE.len());
            let rows = MULTI_LINE[index].iter().copied().collect::<VecDeque<_>>();
            (PatternLayout::MultiLine, index, rows)
        } else {
            let index = rng.random_range(0..SINGLE_LINE.len());
            (PatternLayout::SingleLine, index, VecDeque::from([SINGLE_LINE[index]]))
        };

        ActiveWave {
            tier,
            layout,
            pattern,
            next_row: 0,
            tier_changed,
            rows,
        }
    }
}

/// Instantiate one pattern row; full pools drop single cells
fn emit_row(
    row: &str,
    pools: &mut Pools,
    catalog: &Catalog,
    playfield: &Playfield,
    rng: &mut impl Rng,
) -> (usize, usize) {
    let mut spawned = 0;
    let mut dropped = 0;

    for (column, cell) in pattern::cells(row) {
        let x = playfield.column_x(column);
        let slot = match cell {
            Cell::Enemy => {
                let index = rng.random_range(0..catalog.enemies().len());
                pools.enemies.create(catalog.enemy(index), x)
            }
            Cell::PowerUp => {
                let index = rng.random_range(0..catalog.powerups().len());
                pools.powerups.create(catalog.powerup(index), x)
            }
            Cell::Boss(kind) => pools.bosses.create(catalog.boss(kind), x),
            Cell::Gap => continue,
        };
        match slot {
            Some(_) => spawned += 1,
            None => dropped += 1,
        }
    }

    (spawned, dropped)
}
