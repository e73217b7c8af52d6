//! CLI command implementations.

use pennant_bench::metrics::BenchmarkMetrics;
use pennant_bench::runner::BenchmarkRunner;
use pennant_bench::scenarios::{Scenario, ScenarioKind};
use pennant_debug::hooks::TelemetryHook;
use pennant_debug::snapshot::ClothSnapshot;
use pennant_mesh::SurfaceMesh;
use pennant_solver::{FrameDriver, SimulatorConfig};
use pennant_telemetry::{EventBus, TracingSink};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn load_config(path: Option<&str>) -> Result<SimulatorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            println!("Config:    {path}");
            Ok(SimulatorConfig::from_toml_file(path)?)
        }
        None => {
            println!("Config:    (defaults)");
            Ok(SimulatorConfig::default())
        }
    }
}

fn run_driver(
    driver: &mut FrameDriver,
    frames: u32,
    mut bus: Option<&mut EventBus>,
) -> Result<u32, Box<dyn std::error::Error>> {
    let start = std::time::Instant::now();
    let stepped = driver.run_with(frames, |_| {
        if let Some(bus) = bus.as_deref_mut() {
            bus.flush();
        }
    })?;
    let elapsed = start.elapsed().as_secs_f64();

    let sim = driver.simulator();
    let cloth = sim.cloth();
    println!("Steps:        {stepped}");
    println!("Sim time:     {:.3}s", sim.sim_time());
    println!("Wall time:    {elapsed:.3}s");
    println!("Final KE:     {:.6e}", cloth.kinetic_energy(sim.time_step()));
    println!("Max displace: {:.3}", cloth.max_displacement());
    println!("Max stretch:  {:.3}", cloth.max_constraint_error());
    Ok(stepped)
}

/// Run a simulation from config file.
pub fn simulate(
    config_path: Option<&str>,
    frames: u32,
    snapshot_path: Option<&str>,
    trace_events: bool,
) -> CommandResult {
    println!("Pennant Simulation");
    println!("──────────────────");

    let config = load_config(config_path)?;
    let mut driver = FrameDriver::from_config(&config)?;

    let mut bus = trace_events.then(|| {
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
        bus
    });
    if let Some(bus) = &bus {
        driver.add_hook(Box::new(TelemetryHook::with_sender(bus.sender())));
    }

    let cloth = driver.simulator().cloth();
    println!(
        "Banner:    {}×{} segments ({} particles, {} constraints, {} pinned)",
        cloth.width(),
        cloth.height(),
        cloth.particle_count(),
        cloth.constraint_count(),
        driver.simulator().pins().len(),
    );
    println!("Frames:    {frames}");
    println!();

    run_driver(&mut driver, frames, bus.as_mut())?;
    driver.finish();
    if let Some(bus) = &mut bus {
        bus.finish();
    }

    if let Some(path) = snapshot_path {
        let sim = driver.simulator();
        let snapshot = ClothSnapshot::capture(sim.cloth(), sim.steps(), sim.sim_time());
        std::fs::write(path, snapshot.to_bytes()?)?;
        println!();
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, output_path: Option<&str>) -> CommandResult {
    println!("Pennant Benchmark Suite");
    println!("═══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(scenario_name) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {scenario_name}");
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind);
        let grid = &scenario.config.grid;

        println!(
            "Running: {} ({}×{} segments, {} frames)",
            kind.name(),
            grid.width,
            grid.height,
            scenario.frames,
        );

        let metrics =
            BenchmarkRunner::run(&scenario).map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.3}", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    if let Some(path) = output_path {
        let csv = BenchmarkMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", BenchmarkMetrics::to_csv(&all_metrics));
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CommandResult {
    println!("Pennant Snapshot Inspector");
    println!("──────────────────────────");
    println!();

    let data = std::fs::read(path)?;
    let snapshot =
        ClothSnapshot::from_bytes(&data).map_err(|e| format!("Failed to read snapshot: {e}"))?;

    println!("Step:         {}", snapshot.step);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Grid:         {}×{}", snapshot.width, snapshot.height);
    println!("Particles:    {}", snapshot.particle_count());

    if snapshot.particle_count() > 0 {
        let (min_y, max_y) = (0..snapshot.particle_count())
            .map(|i| snapshot.position(i).y)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        println!("Y range:      [{min_y:.3}, {max_y:.3}]");
    }

    Ok(())
}

/// Validate a config or exported mesh.
pub fn validate(path: &str) -> CommandResult {
    println!("Pennant Validator");
    println!("─────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        match SimulatorConfig::from_toml_file(path) {
            Ok(config) => println!(
                "✅ Config is valid ({}×{} banner).",
                config.grid.width, config.grid.height
            ),
            Err(e) => println!("❌ Config validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: SurfaceMesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (mesh).");
    }

    Ok(())
}

/// Run a simulation and write the final surface mesh as JSON.
pub fn export(config_path: Option<&str>, frames: u32, output_path: &str) -> CommandResult {
    println!("Pennant Export");
    println!("──────────────");

    let config = load_config(config_path)?;
    let mut driver = FrameDriver::from_config(&config)?;
    println!("Frames:    {frames}");
    println!();

    run_driver(&mut driver, frames, None)?;
    driver.finish();

    let json = serde_json::to_string_pretty(driver.surface())?;
    std::fs::write(output_path, json)?;
    println!();
    println!("Surface written to: {output_path}");

    Ok(())
}
