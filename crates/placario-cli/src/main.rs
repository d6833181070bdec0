use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "placario-cli", version, about = "Placário CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rental period taxonomy
    Period {
        #[command(subcommand)]
        action: commands::period::PeriodAction,
    },
    /// Session lifecycle
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Routing decisions for the current session
    Route {
        #[command(subcommand)]
        action: commands::route::RouteAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Period { action } => commands::period::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Route { action } => commands::route::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "placario-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
