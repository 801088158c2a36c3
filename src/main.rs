use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::{read_settings, Settings};

/// The main entry point for the Kaniu shelter API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    web_server::init_tracing()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Validation is deferred so check-config can report what is wrong.
    let mut settings = read_settings()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                settings.server.host = host;
            }
            if let Some(port) = args.port {
                settings.server.port = port;
            }
            // A missing DATABASE_URL stops us here, before anything binds.
            settings.validate()?;
            web_server::run_server(settings).await
        }
        Commands::CheckConfig => {
            let validation = match settings.validate() {
                Ok(()) => "ok".to_string(),
                Err(e) => e.to_string(),
            };
            print_settings(&settings, &validation);
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Read-only HTTP API over the shelter's animal records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Print the effective configuration (password redacted) and whether it is valid.
    CheckConfig,
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

fn print_settings(settings: &Settings, validation: &str) {
    let mut table = Table::new();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["server.host".to_string(), settings.server.host.clone()]);
    table.add_row(vec!["server.port".to_string(), settings.server.port.to_string()]);
    table.add_row(vec![
        "server.cors_origins".to_string(),
        settings.server.cors_origins.join(", "),
    ]);
    table.add_row(vec!["database.url".to_string(), settings.database.redacted_url()]);
    table.add_row(vec![
        "database.max_connections".to_string(),
        settings.database.max_connections.to_string(),
    ]);
    table.add_row(vec![
        "database.acquire_timeout_secs".to_string(),
        settings.database.acquire_timeout_secs.to_string(),
    ]);
    table.add_row(vec![
        "database.query_timeout_secs".to_string(),
        settings.database.query_timeout_secs.to_string(),
    ]);
    table.add_row(vec![
        "database.run_migrations".to_string(),
        settings.database.run_migrations.to_string(),
    ]);
    table.add_row(vec!["api.max_animals".to_string(), settings.api.max_animals.to_string()]);
    table.add_row(vec!["validation".to_string(), validation.to_string()]);
    println!("{table}");
}
