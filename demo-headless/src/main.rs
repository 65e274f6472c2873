use clap::Parser;
use nalgebra::Point2;
use thermal_bench_core::{
    Container, Fahrenheit, Material, Sample, SampleId, SimulationConfig, ThermalSimulation,
};

/// Headless thermal bench demo: two layered samples in a shared bath,
/// printed temperatures and a final interference report.
#[derive(Parser, Debug)]
#[command(name = "thermal-bench-demo")]
#[command(about = "Benchtop heat-bleed simulation demo", long_about = None)]
struct Args {
    /// Simulated duration in seconds
    #[arg(short, long, default_value_t = 120.0)]
    duration: f32,

    /// Ambient temperature in °F
    #[arg(short, long, default_value_t = 70.0)]
    ambient: f64,

    /// Initial temperature of the hot sample in °F
    #[arg(long, default_value_t = 150.0)]
    hot_temperature: f64,

    /// Hold the hot sample at its initial temperature with a Peltier clamp
    #[arg(short = 'c', long)]
    clamp: bool,

    /// Center-to-center spacing between the two samples in display units
    #[arg(short, long, default_value_t = 140.0)]
    spacing: f32,

    /// Container width in display units (square render surface)
    #[arg(long, default_value_t = 800.0)]
    container_width: f32,

    /// Fill material: oil, water, or aluminum (dry block)
    #[arg(long, default_value = "aluminum")]
    fill: String,

    /// Report interval in simulated seconds
    #[arg(short, long, default_value_t = 10.0)]
    report_interval: f32,
}

fn fill_material(name: &str) -> Material {
    match name {
        "oil" => Material::mineral_oil(),
        "water" => Material::water(),
        _ => Material::aluminum(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let render = args.container_width.round() as u32;
    let ambient = Fahrenheit::new(args.ambient);
    let container = Container::rectangle(
        args.container_width,
        args.container_width,
        fill_material(&args.fill),
        ambient,
    );

    let center_y = args.container_width / 2.0;
    let left_x = (args.container_width - args.spacing) / 2.0;
    let mut hot = Sample::new(
        SampleId(1),
        "hot sample",
        Point2::new(left_x, center_y),
        40.0,
        Material::agar_gel(),
        Material::agar_gel(),
        Material::stainless_steel(),
        Fahrenheit::new(args.hot_temperature),
    );
    if args.clamp {
        hot = hot.with_peltier(Fahrenheit::new(args.hot_temperature), true);
    }
    let passive = Sample::new(
        SampleId(2),
        "passive sample",
        Point2::new(left_x + args.spacing, center_y),
        40.0,
        Material::agar_gel(),
        Material::agar_gel(),
        Material::borosilicate_glass(),
        ambient,
    );

    let config = SimulationConfig::default();
    let dt = config.time_step.value();
    let mut sim = ThermalSimulation::new(config);
    sim.initialize(container, vec![hot, passive], render, render)
        .expect("scene should build a valid grid");

    println!(
        "thermal bench: {}x{} cells, fill {}, dt {dt} s",
        sim.dimensions().unwrap().0,
        sim.dimensions().unwrap().1,
        args.fill
    );

    let ticks_per_report = (args.report_interval / dt).max(1.0) as u32;
    let total_ticks = (args.duration / dt).max(1.0) as u32;
    let mut done = 0u32;
    while done < total_ticks {
        let batch = ticks_per_report.min(total_ticks - done);
        let _ = sim.step_n(batch);
        done += batch;
        println!(
            "t = {:7.1} s | hot {} | passive {}",
            sim.elapsed().value(),
            sim.sample_temperature(SampleId(1)),
            sim.sample_temperature(SampleId(2)),
        );
    }

    println!();
    for line in sim.report() {
        println!("{line}");
    }
}
