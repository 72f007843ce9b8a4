use git_remotes::presentation::cli::CliApp;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let app = CliApp::new();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let default_level = if app.cli().verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Run the CLI application
    app.run()
}
