//! Simulation facade: the single entry point the rendering/editing layer
//! drives
//!
//! `ThermalSimulation` owns the grid, the container and the sample list.
//! It is single-threaded and synchronous: `step` completes fully before
//! returning and `initialize` is an exclusive rebuild. The grid has one
//! writer (the stepper, through this facade) and any number of readers
//! strictly between ticks.

mod scene;

pub use scene::{Scene, SceneError};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::analysis::{interference_report, pair_score, PairPolicy, PairScore, NOT_STARTED_MESSAGE};
use crate::core_types::{Container, Fahrenheit, Sample, SampleId, Seconds};
use crate::grid::{build_grid, GridBuildError, ScalarField, ThermalGrid, DEFAULT_DOWNSAMPLE};
use crate::solver::step_diffusion;

/// Substep cap for high-speed playback; beyond it the time step widens
/// instead, trading fidelity for throughput.
pub const MAX_SUBSTEPS_PER_TICK: u32 = 8;

/// Tuning knobs of the engine.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimulationConfig {
    /// Simulated time per `step` call
    pub time_step: Seconds,
    /// Integer factor the render surface is downsampled by
    pub downsample: u32,
    /// Which sample pairs the interference report considers
    pub pair_policy: PairPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            time_step: Seconds::new(0.05),
            downsample: DEFAULT_DOWNSAMPLE,
            pair_policy: PairPolicy::AllPairs,
        }
    }
}

/// The simulation engine.
///
/// Callers must `initialize` before stepping or reading; every accessor
/// degrades to a sentinel (`None`, `0°F`) instead of panicking when called
/// early. Any structural change to the container or sample set requires a
/// fresh `initialize`; clamp toggles between ticks do not.
#[derive(Debug, Default)]
pub struct ThermalSimulation {
    config: SimulationConfig,
    container: Option<Container>,
    samples: Vec<Sample>,
    grid: Option<ThermalGrid>,
    elapsed: f32,
    ticks: u64,
}

impl ThermalSimulation {
    /// Create an engine with the given configuration. No grid exists until
    /// `initialize` runs.
    #[must_use]
    pub fn new(config: SimulationConfig) -> Self {
        ThermalSimulation {
            config,
            ..ThermalSimulation::default()
        }
    }

    /// Build the grid and ownership cache from scratch.
    ///
    /// Rebuilds everything: cells, media, boundary flags, ownership. Call
    /// it once up front and again after any structural change; stale
    /// ownership is never patched in place. Elapsed time resets to zero.
    ///
    /// # Errors
    /// Returns `GridBuildError` for degenerate render dimensions or invalid
    /// sample layer configurations.
    pub fn initialize(
        &mut self,
        container: Container,
        samples: Vec<Sample>,
        render_width: u32,
        render_height: u32,
    ) -> Result<(), GridBuildError> {
        let grid = build_grid(
            &container,
            &samples,
            render_width,
            render_height,
            self.config.downsample,
        )?;
        info!(
            nx = grid.nx,
            ny = grid.ny,
            cell_size_m = grid.cell_size_m,
            samples = samples.len(),
            "initialized thermal grid"
        );
        self.container = Some(container);
        self.samples = samples;
        self.grid = Some(grid);
        self.elapsed = 0.0;
        self.ticks = 0;
        self.refresh_sample_temperatures();
        Ok(())
    }

    /// Advance one tick of the configured time step and return the
    /// Fahrenheit grid snapshot. `None` (and no state change) before
    /// `initialize`.
    pub fn step(&mut self) -> Option<ScalarField> {
        let dt = self.config.time_step.value();
        self.advance_once(dt)?;
        self.grid_fahrenheit()
    }

    /// Advance `n` ticks and return the final snapshot.
    pub fn step_n(&mut self, n: u32) -> Option<ScalarField> {
        let dt = self.config.time_step.value();
        for _ in 0..n {
            self.advance_once(dt)?;
        }
        self.grid_fahrenheit()
    }

    /// High-speed playback: advance one animation tick at `speed` times
    /// real time.
    ///
    /// Up to `MAX_SUBSTEPS_PER_TICK`, extra speed comes from extra substeps
    /// at the configured time step. Beyond that the substep count stays
    /// fixed and the time step widens, so throughput keeps scaling while
    /// fidelity drops. The widened step must still respect the stability
    /// bound; that remains the caller's configuration obligation.
    pub fn advance_scaled(&mut self, speed: f32) -> Option<ScalarField> {
        let speed = speed.max(1.0);
        let requested = speed.round() as u32;
        let (substeps, dt) = if requested <= MAX_SUBSTEPS_PER_TICK {
            (requested.max(1), self.config.time_step.value())
        } else {
            (
                MAX_SUBSTEPS_PER_TICK,
                self.config.time_step.value() * speed / MAX_SUBSTEPS_PER_TICK as f32,
            )
        };
        for _ in 0..substeps {
            self.advance_once(dt)?;
        }
        self.grid_fahrenheit()
    }

    fn advance_once(&mut self, dt: f32) -> Option<()> {
        let Some(grid) = self.grid.as_mut() else {
            debug!("step called before initialize; ignoring");
            return None;
        };

        let mut clamps = FxHashMap::default();
        for sample in &self.samples {
            if let Some(target) = sample.active_clamp_target() {
                clamps.insert(sample.id, target.to_celsius().as_f32());
            }
        }

        step_diffusion(grid, &clamps, dt);
        self.elapsed += dt;
        self.ticks += 1;
        self.refresh_sample_temperatures();
        Some(())
    }

    /// Mean temperature of a sample in Fahrenheit.
    ///
    /// `0°F` is the defined sentinel for a sample that owns no cells or an
    /// engine that was never initialized; neither is an error.
    #[must_use]
    pub fn sample_temperature(&self, id: SampleId) -> Fahrenheit {
        self.grid
            .as_ref()
            .and_then(|grid| grid.mean_sample_temperature(id))
            .map_or(Fahrenheit::new(0.0), |celsius| celsius.to_fahrenheit())
    }

    /// Read-only Fahrenheit snapshot of the grid for rendering.
    #[must_use]
    pub fn grid_fahrenheit(&self) -> Option<ScalarField> {
        self.grid.as_ref().map(ThermalGrid::fahrenheit_snapshot)
    }

    /// Interference severity for a pair of samples, `None` when either id
    /// is unknown or no grid exists.
    #[must_use]
    pub fn score(&self, a: SampleId, b: SampleId) -> Option<PairScore> {
        let grid = self.grid.as_ref()?;
        let container = self.container.as_ref()?;
        let sample_a = self.sample(a)?;
        let sample_b = self.sample(b)?;
        Some(pair_score(sample_a, sample_b, container, grid))
    }

    /// Interference report for the current grid state.
    #[must_use]
    pub fn report(&self) -> Vec<String> {
        match self.container.as_ref() {
            Some(container) => interference_report(
                &self.samples,
                container,
                self.elapsed,
                self.grid.as_ref(),
                self.config.pair_policy,
            ),
            None => vec![String::from(NOT_STARTED_MESSAGE)],
        }
    }

    /// Toggle a sample's Peltier clamp. Returns false when the sample does
    /// not exist or carries no clamp. Non-structural: no re-initialization.
    pub fn set_peltier_active(&mut self, id: SampleId, active: bool) -> bool {
        for sample in &mut self.samples {
            if sample.id == id {
                if let Some(clamp) = sample.peltier.as_mut() {
                    clamp.active = active;
                    return true;
                }
                return false;
            }
        }
        false
    }

    fn refresh_sample_temperatures(&mut self) {
        let Some(grid) = self.grid.as_ref() else {
            return;
        };
        for sample in &mut self.samples {
            sample.current_temperature = grid
                .mean_sample_temperature(sample.id)
                .map_or(Fahrenheit::new(0.0), |celsius| celsius.to_fahrenheit());
        }
    }

    /// Sample lookup by id.
    #[must_use]
    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.samples.iter().find(|sample| sample.id == id)
    }

    /// The current sample list, derived temperatures included.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The container, once initialized.
    #[must_use]
    pub fn container(&self) -> Option<&Container> {
        self.container.as_ref()
    }

    /// Borrow the live grid, once initialized.
    #[must_use]
    pub fn grid(&self) -> Option<&ThermalGrid> {
        self.grid.as_ref()
    }

    /// Simulated time since the last `initialize`.
    #[must_use]
    pub fn elapsed(&self) -> Seconds {
        Seconds::new(self.elapsed)
    }

    /// Ticks since the last `initialize`.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Whether `initialize` has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    /// Grid dimensions in cells, once initialized.
    #[must_use]
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.grid.as_ref().map(|grid| (grid.nx, grid.ny))
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
