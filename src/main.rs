use clap::Parser;
use linemaven::cli::{Cli, Commands};
use linemaven::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = linemaven::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Convert(args) => args.execute()?,
        Commands::Score(args) => args.execute()?,
        Commands::Size(args) => args.execute(&config)?,
        Commands::Parlay(args) => args.execute(&config)?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Store: freshness window {}s",
                config.store.freshness_window_secs
            );
            println!(
                "  Risk: unit scale {}, buckets medium {} / high {}",
                config.risk.unit_scale,
                config.risk.medium_risk_threshold,
                config.risk.high_risk_threshold
            );
            println!("  Parlay: max {} legs", config.parlay.max_legs);
            println!(
                "  Telemetry: level {}, metrics port {:?}",
                config.telemetry.log_level, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}
