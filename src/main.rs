use clap::Parser;
use stable_pairs::cli::Args;
use stable_pairs::config::{LogFormat, Settings};
use stable_pairs::core::{run_experiment, Matcher};
use stable_pairs::services::{build_report, load_population, render_experiment, render_json, render_text};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    // Load .env file if present
    dotenv::dotenv().ok();

    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };
    args.apply(&mut settings);

    // Initialize logging; env vars win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match LogFormat::from_name(&log_format) {
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
        LogFormat::Full => subscriber.init(),
    }

    info!("Configuration loaded successfully");

    if let Err(e) = run(&args, &settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let json = settings.output.format.eq_ignore_ascii_case("json");

    // With a profile path, match it; otherwise run an experiment
    match &args.profile {
        Some(path) => {
            let mut population = load_population(path)?;
            if settings.matching.reverse_roles {
                info!("Reversing roles: responders propose");
                population = population.reversed();
            }

            let matcher = Matcher::new(settings.matching.strategy);
            let result = matcher.run(&population)?;
            let report = build_report(&population, &result);

            if json {
                println!("{}", render_json(&report)?);
            } else {
                print!("{}", render_text(&report));
            }
        }
        None => {
            let result = run_experiment(&settings.experiment_request())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_experiment(&result));
            }
        }
    }

    Ok(())
}
