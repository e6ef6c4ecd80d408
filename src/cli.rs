use crate::standup::{OutputFormat, RunConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "standup")]
#[command(about = "Summarize your recent commits across every git repository under a directory")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, default_value_t = 1, help = "Number of days to look back")]
    pub days: u32,

    #[arg(short, long, help = "Author name to filter by (default: git config user.name)")]
    pub author: Option<String>,

    #[arg(short, long, help = "Path to scan for git repositories (default: current directory)")]
    pub path: Option<PathBuf>,

    #[arg(short, long = "exclude", value_name = "NAME", help = "Additional directory name to skip while scanning (repeatable)")]
    pub exclude: Vec<String>,

    #[arg(short, long, help = "Number of repositories to query in parallel")]
    pub jobs: Option<usize>,

    #[arg(
        long,
        default_value = "30s",
        value_parser = humantime::parse_duration,
        help = "Give up on a single git invocation after this long (0s to wait forever)"
    )]
    pub timeout: std::time::Duration,

    #[arg(long, conflicts_with = "ndjson", help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, help = "Log diagnostics to stderr")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_tracing(self.verbose);
        let config = self.into_config()?;
        crate::standup::exec(config)
    }

    pub fn into_config(self) -> Result<RunConfig> {
        let root = match self.path {
            Some(path) => path,
            None => std::env::current_dir().context("Failed to get current working directory")?,
        };
        // Canonical paths give repository headers a real base name even for `.`
        let root = root.canonicalize().unwrap_or(root);

        let format = if self.json {
            OutputFormat::Json
        } else if self.ndjson {
            OutputFormat::Ndjson
        } else {
            OutputFormat::Text
        };

        Ok(RunConfig {
            author: self.author,
            days: self.days,
            root,
            exclude: self.exclude,
            jobs: self.jobs,
            timeout: self.timeout,
            format,
            colored: !self.no_color && console::colors_enabled(),
            progress: console::user_attended_stderr(),
        })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "standup=debug" } else { "standup=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
