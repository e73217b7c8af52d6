//! Integration tests for pennant-bench.

use pennant_bench::metrics::BenchmarkMetrics;
use pennant_bench::runner::BenchmarkRunner;
use pennant_bench::scenarios::{Scenario, ScenarioKind};
use pennant_debug::hooks::InspectionHook;

fn sample_metrics(name: &str) -> BenchmarkMetrics {
    BenchmarkMetrics {
        scenario: name.into(),
        total_wall_time: 1.5,
        steps: 100,
        avg_step_time: 0.015,
        min_step_time: 0.01,
        max_step_time: 0.02,
        final_kinetic_energy: 1e-5,
        max_displacement: 42.0,
        max_stretch: 3.5,
        avg_wind_strength: 40.0,
        particle_count: 441,
        constraint_count: 840,
    }
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn hanging_banner_setup() {
    let s = Scenario::hanging_banner();
    assert_eq!(s.kind, ScenarioKind::HangingBanner);
    assert_eq!(s.config.grid.width, 20);
    assert!(s.config.wind.oscillate);
    assert!(s.config.validate().is_ok());
}

#[test]
fn becalmed_has_no_wind() {
    let s = Scenario::becalmed();
    assert_eq!(s.config.wind.strength, 0.0);
    assert_eq!(s.config.wind.gust_amplitude, 0.0);
}

#[test]
fn scenario_names_round_trip() {
    assert_eq!(ScenarioKind::all().len(), 3);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(ScenarioKind::from_name("sphere_drape"), None);
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn run_hanging_banner() {
    let scenario = Scenario::hanging_banner().with_frames(5);
    let metrics = BenchmarkRunner::run(&scenario).unwrap();

    assert_eq!(metrics.scenario, "hanging_banner");
    assert_eq!(metrics.steps, 5);
    assert_eq!(metrics.particle_count, 441);
    assert_eq!(metrics.constraint_count, 2 * 20 * 20 + 20 + 20);
    assert!(metrics.max_displacement > 0.0);
    assert!(metrics.avg_wind_strength > 0.0);
}

#[test]
fn becalmed_run_reports_no_wind() {
    let metrics = BenchmarkRunner::run(&Scenario::becalmed().with_frames(4)).unwrap();
    assert_eq!(metrics.avg_wind_strength, 0.0);
    assert!(metrics.max_displacement > 0.0); // gravity still acts
}

#[test]
fn run_all_scenarios_short() {
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind).with_frames(3);
        let metrics = BenchmarkRunner::run(&scenario).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert_eq!(metrics.steps, 3);
        assert!(metrics.total_wall_time >= 0.0);
        assert!(metrics.final_kinetic_energy.is_finite());
    }
}

#[test]
fn hooks_see_every_step() {
    use std::sync::{Arc, Mutex};

    struct Counter(Arc<Mutex<u32>>);
    impl InspectionHook for Counter {
        fn on_step_end(&mut self, _step: u64, _wall_time: f64, _kinetic: f64) {
            *self.0.lock().unwrap() += 1;
        }
        fn name(&self) -> &str {
            "counter"
        }
    }

    let count = Arc::new(Mutex::new(0));
    let scenario = Scenario::corner_pinned().with_frames(7);
    BenchmarkRunner::run_with_hooks(&scenario, vec![Box::new(Counter(Arc::clone(&count)))])
        .unwrap();
    assert_eq!(*count.lock().unwrap(), 7);
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_row() {
    let row = sample_metrics("test").to_csv_row();
    assert!(row.starts_with("test,441,840,100,"));
}

#[test]
fn metrics_csv_multi() {
    let csv = BenchmarkMetrics::to_csv(&[sample_metrics("a"), sample_metrics("b")]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,"));
    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count(),
        "header and row column counts differ"
    );
}

#[test]
fn metrics_json_round_trip() {
    let json = serde_json::to_string(&sample_metrics("json")).unwrap();
    let back: BenchmarkMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scenario, "json");
    assert_eq!(back.constraint_count, 840);
}
