use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "explorer",
    version,
    about = "Serve GitHub repository metadata from a local cache"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "EXPLORER_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database path, or ":memory:" (overrides config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<String>,

    /// GitHub API base URL (overrides config file)
    #[arg(long, global = true, value_name = "URL")]
    pub github_url: Option<String>,

    /// Log level filter, e.g. "info" or "explorer=debug" (RUST_LOG takes precedence)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides config file)
        #[arg(long, short = 'l', value_name = "ADDR")]
        listen: Option<String>,
    },
    /// Look up a single repository and print it as JSON
    #[command(visible_alias = "get")]
    Lookup {
        /// Repository owner (user or organisation)
        owner: String,
        /// Repository name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "explorer",
            "--database",
            ":memory:",
            "serve",
            "--listen",
            "0.0.0.0:9000",
        ])
        .unwrap();

        assert_eq!(cli.database.as_deref(), Some(":memory:"));
        match cli.command {
            Commands::Serve { listen } => assert_eq!(listen.as_deref(), Some("0.0.0.0:9000")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_lookup_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "explorer",
            "lookup",
            "octocat",
            "Hello-World",
            "--github-url",
            "http://localhost:1234",
        ])
        .unwrap();

        assert_eq!(cli.github_url.as_deref(), Some("http://localhost:1234"));
        match cli.command {
            Commands::Lookup { owner, name } => {
                assert_eq!(owner, "octocat");
                assert_eq!(name, "Hello-World");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_lookup_requires_name() {
        assert!(Cli::try_parse_from(["explorer", "lookup", "octocat"]).is_err());
    }
}
