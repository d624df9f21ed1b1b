use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use steer_infrastructure::ConfigService;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "steer")]
#[command(about = "Steer CLI - browse, search and load repository files for agent prompts", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of RUST_LOG and config
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a directory tree, optionally filtered by file name
    Tree(commands::tree::TreeArgs),
    /// Load file contents the way they are attached to a prompt
    Read(commands::read::ReadArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let service = match cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::new_default()?,
    };
    let loaded = service.get_config();
    let log_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    logging::init(cli.verbose, &log_level);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid configuration, using defaults");
        Default::default()
    });

    match cli.command {
        Commands::Tree(args) => commands::tree::run(args).await?,
        Commands::Read(args) => commands::read::run(args).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Path => commands::config::path(&service),
            ConfigAction::Init => commands::config::init(&service)?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["steer", "tree", ".", "--query", "rs", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Tree(args) => assert_eq!(args.query.as_deref(), Some("rs")),
            _ => panic!("expected tree"),
        }
    }

    #[test]
    fn test_tree_respects_gitignore_unless_disabled() {
        let cli = Cli::try_parse_from(["steer", "tree"]).unwrap();
        match cli.command {
            Commands::Tree(args) => assert!(!args.no_ignore),
            _ => panic!("expected tree"),
        }

        let cli = Cli::try_parse_from(["steer", "tree", "--no-ignore"]).unwrap();
        match cli.command {
            Commands::Tree(args) => assert!(args.no_ignore),
            _ => panic!("expected tree"),
        }
    }

    #[test]
    fn test_read_requires_paths() {
        assert!(Cli::try_parse_from(["steer", "read"]).is_err());
    }

    #[test]
    fn test_config_subcommands() {
        let cli =
            Cli::try_parse_from(["steer", "--config", "/tmp/steer.toml", "config", "init"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/steer.toml")));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init
            }
        ));
    }
}
