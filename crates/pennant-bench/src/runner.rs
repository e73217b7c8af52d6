//! Benchmark runner: drives a scenario through the frame loop.

use std::time::Instant;

use pennant_debug::hooks::InspectionHook;
use pennant_solver::{FrameDriver, StepOutcome};
use pennant_types::PennantResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Runs one scenario to completion.
    pub fn run(scenario: &Scenario) -> PennantResult<BenchmarkMetrics> {
        Self::run_with_hooks(scenario, Vec::new())
    }

    /// Runs one scenario with inspection hooks attached to the driver.
    pub fn run_with_hooks(
        scenario: &Scenario,
        hooks: Vec<Box<dyn InspectionHook>>,
    ) -> PennantResult<BenchmarkMetrics> {
        let mut driver = FrameDriver::from_config(&scenario.config)?;
        for hook in hooks {
            driver.add_hook(hook);
        }

        let mut step_times = Vec::with_capacity(scenario.frames as usize);
        let mut wind_total = 0.0f64;

        let total_start = Instant::now();
        for _ in 0..scenario.frames {
            // The driver samples then advances the fan, so read it first.
            let wind = driver.wind().strength();
            if let StepOutcome::Stepped(report) = driver.tick()? {
                step_times.push(report.wall_time);
                wind_total += wind as f64;
            }
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();
        driver.finish();

        let sim = driver.simulator();
        let cloth = sim.cloth();
        let steps = step_times.len() as u32;

        let (avg_step, avg_wind) = if step_times.is_empty() {
            (0.0, 0.0)
        } else {
            (
                step_times.iter().sum::<f64>() / step_times.len() as f64,
                (wind_total / step_times.len() as f64) as f32,
            )
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            total_wall_time,
            steps,
            avg_step_time: avg_step,
            min_step_time: if steps == 0 { 0.0 } else { min_step },
            max_step_time: max_step,
            final_kinetic_energy: cloth.kinetic_energy(sim.time_step()),
            max_displacement: cloth.max_displacement(),
            max_stretch: cloth.max_constraint_error(),
            avg_wind_strength: avg_wind,
            particle_count: cloth.particle_count(),
            constraint_count: cloth.constraint_count(),
        })
    }

    /// Runs every scenario at its default length.
    pub fn run_all() -> PennantResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
