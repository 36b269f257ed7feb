use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vitals_lib::{VitalsConfig, collect_with_config, generate_report};

/// Write a health snapshot of this workstation as an HTML report
#[derive(Parser)]
#[command(name = "vitals", version, about, after_help = AFTER_HELP)]
struct Cli {
    /// Where to write the report [default: SystemHealthReport.html]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the collected data as JSON instead of writing HTML
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

const AFTER_HELP: &str = "\
CONFIGURATION:
  All keys are optional:

    output = \"SystemHealthReport.html\"
    probe_hosts = [\"8.8.8.8\", \"www.google.com\"]
    critical_services = [\"Spooler\", \"Dnscache\"]
    cpu_sample_millis = 1000
    command_timeout_secs = 30

  Sections whose data could not be collected are logged as warnings and
  left empty in the report.
";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> vitals_lib::Result<()> {
    let mut config = match &cli.config {
        Some(path) => VitalsConfig::load(path)?,
        None => VitalsConfig::new(),
    };
    if let Some(output) = cli.output {
        config = config.output(output);
    }
    tracing::debug!(?config, "effective configuration");

    if cli.json {
        let report = collect_with_config(&config);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let path = generate_report(&config)?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn init_tracing(verbose: u8) {
    // Collector warnings stay visible at the default level.
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,vitals_lib=info".to_string(),
            2 => "info,vitals_lib=debug".to_string(),
            _ => "debug,vitals_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
