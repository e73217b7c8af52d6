//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Steps actually executed.
    pub steps: u32,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Largest particle distance from its rest position at the end.
    pub max_displacement: f32,
    /// Largest constraint length error at the end.
    pub max_stretch: f32,
    /// Mean wind strength over all steps.
    pub avg_wind_strength: f32,
    pub particle_count: usize,
    pub constraint_count: usize,
}

impl BenchmarkMetrics {
    pub fn to_csv_header() -> String {
        "scenario,particle_count,constraint_count,steps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,max_stretch,avg_wind".to_string()
    }

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.4},{:.4},{:.2}",
            self.scenario,
            self.particle_count,
            self.constraint_count,
            self.steps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.max_stretch,
            self.avg_wind_strength,
        )
    }

    /// Header plus one row per run.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
