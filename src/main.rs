// src/main.rs - plan-toolpath entry point
use clap::Parser;
use toolpath_rs::{Args, config, report};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if args.print_config {
        println!("{}", config::default_config_toml()?);
        return Ok(());
    }

    let result = toolpath_rs::run(&args).map_err(|e| {
        tracing::error!("Planning failed: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync + 'static>
    })?;

    let stats = result.stats();
    tracing::info!(
        "Planned {} segments from {} samples: {:.3} s over {:.3} units, peak {:.3}",
        stats.planned_segments,
        stats.samples,
        stats.total_time,
        stats.total_distance,
        stats.peak_velocity
    );

    if args.json {
        println!("{}", report::stage_json(&result, args.stage)?);
    } else {
        println!("{}", report::summary(&result));
    }
    Ok(())
}
