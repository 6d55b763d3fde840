//! ldg CLI entry point.

use clap::Parser;
use ldg::cli::commands;
use ldg::cli::{Cli, Commands};
use ldg::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let server = cli.server.as_deref();
    let token = cli.token.as_deref();
    let json = cli.json;

    match &cli.command {
        Commands::Configure { url, token } => commands::configure::execute(url, token, json),

        Commands::Add(args) => commands::bookmarks::add(args, server, token, json),
        Commands::List(args) => commands::bookmarks::list(args, server, token, json),
        Commands::Show { id } => commands::bookmarks::show(*id, server, token, json),
        Commands::Update(args) => commands::bookmarks::update(args, server, token, json),
        Commands::Delete { id, yes } => {
            commands::bookmarks::delete(*id, *yes, server, token, json)
        }

        Commands::Import(args) => commands::import::execute(args, server, token, json),
        Commands::Export(args) => commands::export::execute(args, server, token, json),
        Commands::Restore(args) => commands::restore::execute(args, server, token, json),

        Commands::Version => commands::version::execute(json),
        Commands::Completions { shell } => commands::completions::execute(*shell),
    }
}
