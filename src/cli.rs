//! Command-line interface definitions.
//!
//! All options have defaults so a bare invocation scrapes everything and
//! writes `./data.json`; network knobs can also come from the environment.

use clap::Parser;

/// Command-line arguments for the fan-game index scraper.
///
/// # Examples
///
/// ```sh
/// # Full run with defaults
/// fangame_index
///
/// # Quick run: one listing page per category, custom output
/// fangame_index -o /tmp/data.json --max-pages 1
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON snapshot to write
    #[arg(short, long, default_value = "./data.json")]
    pub output: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FANGAME_TIMEOUT_SECS", default_value_t = 8)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "FANGAME_USER_AGENT", default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// Cap listing pages per category (lowers the built-in bounds only)
    #[arg(long)]
    pub max_pages: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["fangame_index"]);
        assert_eq!(cli.output, "./data.json");
        assert_eq!(cli.timeout_secs, 8);
        assert_eq!(cli.user_agent, "Mozilla/5.0");
        assert_eq!(cli.max_pages, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "fangame_index",
            "-o",
            "/tmp/out.json",
            "--timeout-secs",
            "3",
            "--max-pages",
            "2",
        ]);
        assert_eq!(cli.output, "/tmp/out.json");
        assert_eq!(cli.timeout_secs, 3);
        assert_eq!(cli.max_pages, Some(2));
    }
}
