use clap::Parser;
use tracing_subscriber::EnvFilter;

use auditdeck::cli;
use auditdeck::errors::DeckError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Upload(args) => cli::upload::handle_upload(args).await,
        cli::Commands::List(args) => cli::list::handle_list(args).await,
        cli::Commands::Show(args) => cli::show::handle_show(args).await,
        cli::Commands::Watch(args) => cli::watch::handle_watch(args).await,
        cli::Commands::Delete(args) => cli::delete::handle_delete(args).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                DeckError::Config(_) => 2,
                DeckError::Validation(_) => 3,
                DeckError::NotFound(_) => 4,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}
