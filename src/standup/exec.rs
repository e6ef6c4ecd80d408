use super::aggregate::{build_report, FetchOptions};
use super::output::{empty_message, write_json, write_ndjson, write_text};
use crate::git::{resolve_author, CommandRunner, GitCli};
use crate::locate::locate_repositories;
use crate::model::{StandupQuery, StandupReport};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Ndjson,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub author: Option<String>,
    pub days: u32,
    pub root: PathBuf,
    pub exclude: Vec<String>,
    pub jobs: Option<usize>,
    pub timeout: Duration,
    pub format: OutputFormat,
    pub colored: bool,
    pub progress: bool,
}

pub fn exec(config: RunConfig) -> anyhow::Result<()> {
    let runner = GitCli::new().with_timeout(config.timeout);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&runner, &config, &mut out, &mut std::io::stderr())
}

/// Resolves the author, finds repositories under the root and prints the
/// report to `out`. Notices that must stay out of machine-readable output go
/// to `diag`.
pub fn run<W: Write, E: Write>(
    runner: &dyn CommandRunner,
    config: &RunConfig,
    out: &mut W,
    diag: &mut E,
) -> anyhow::Result<()> {
    let author = resolve_author(runner, config.author.as_deref())?;
    let query = StandupQuery::new(author, config.days, config.root.clone())
        .with_extra_skip_dirs(config.exclude.iter().cloned());
    let text = config.format == OutputFormat::Text;
    let colored = text && config.colored;

    if text {
        writeln!(out, "Searching for git repos in {}...", query.root().display())?;
    }

    let repos = locate_repositories(query.root(), query.skip_dirs())
        .context("Failed to find git repositories")?;
    info!(count = repos.len(), root = %query.root().display(), "located repositories");

    if repos.is_empty() {
        return render(out, diag, &StandupReport::new(0), &query, config.format, colored);
    }

    if text {
        writeln!(
            out,
            "Found {} repositories. Checking commits for author '{}' in the last {} days...\n",
            repos.len(),
            query.author(),
            query.days()
        )?;
        out.flush()?;
    }

    let progress = progress_bar(repos.len() as u64, text && config.progress);
    let options = FetchOptions { jobs: config.jobs, colored };
    let report = build_report(runner, repos, &query, options, &progress)
        .context("Failed to collect commit history")?;
    progress.finish_and_clear();

    render(out, diag, &report, &query, config.format, colored)
}

fn render<W: Write, E: Write>(
    out: &mut W,
    diag: &mut E,
    report: &StandupReport,
    query: &StandupQuery,
    format: OutputFormat,
    colored: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, report, query, colored)?,
        OutputFormat::Json => write_json(out, report, query)?,
        OutputFormat::Ndjson => {
            write_ndjson(out, report, query)?;
            if let Some(message) = empty_message(report, query) {
                writeln!(diag, "{message}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.set_message("Reading commit history...");
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::CommandOutput;
    use pretty_assertions::assert_eq;
    use std::ffi::OsString;
    use std::fs;
    use std::io;
    use std::path::Path;
    use tempfile::tempdir;

    /// `git config` answers with a name; `git log` answers per repository
    /// directory name.
    struct FakeGit {
        user: Option<&'static str>,
        logs: Vec<(&'static str, i32, &'static str)>,
    }

    impl CommandRunner for FakeGit {
        fn run(&self, args: &[OsString]) -> io::Result<CommandOutput> {
            if args.first().map(|a| a == "config").unwrap_or(false) {
                return Ok(match self.user {
                    Some(name) => CommandOutput::success(format!("{name}\n")),
                    None => CommandOutput::failure(1),
                });
            }
            let repo = Path::new(&args[1]);
            let name = repo.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            Ok(self
                .logs
                .iter()
                .find(|(dir, _, _)| *dir == name)
                .map(|(_, code, out)| CommandOutput { stdout: out.to_string(), code: Some(*code) })
                .unwrap_or_else(|| CommandOutput::success("")))
        }
    }

    fn config(root: &Path) -> RunConfig {
        RunConfig {
            author: None,
            days: 1,
            root: root.to_path_buf(),
            exclude: Vec::new(),
            jobs: Some(2),
            timeout: Duration::ZERO,
            format: OutputFormat::Text,
            colored: false,
            progress: false,
        }
    }

    fn run_to_string(runner: &FakeGit, config: &RunConfig) -> anyhow::Result<String> {
        Ok(run_captured(runner, config)?.0)
    }

    /// Returns what the run wrote to the report and diagnostic streams.
    fn run_captured(runner: &FakeGit, config: &RunConfig) -> anyhow::Result<(String, String)> {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        run(runner, config, &mut out, &mut diag)?;
        Ok((String::from_utf8(out).unwrap(), String::from_utf8(diag).unwrap()))
    }

    #[test]
    fn reports_only_repositories_with_commits() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("alpha/.git")).unwrap();
        fs::create_dir_all(root.join("team/beta/.git")).unwrap();
        fs::create_dir_all(root.join("team/broken/.git")).unwrap();

        let runner = FakeGit {
            user: Some("Ada"),
            logs: vec![
                ("alpha", 0, ""),
                ("beta", 0, "b1 Add cache (3 hours ago)\nb0 Scaffold (20 hours ago)\n"),
                ("broken", 128, ""),
            ],
        };
        let text = run_to_string(&runner, &config(root)).unwrap();

        let expected = format!(
            "Searching for git repos in {}...\n\
             Found 3 repositories. Checking commits for author 'Ada' in the last 1 days...\n\n\
             # team/beta\nb1 Add cache (3 hours ago)\nb0 Scaffold (20 hours ago)\n\n",
            root.display()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn zero_repositories_message_differs_from_zero_commits() {
        let empty = tempdir().unwrap();
        let runner = FakeGit { user: Some("Ada"), logs: Vec::new() };
        let none = run_to_string(&runner, &config(empty.path())).unwrap();
        assert!(none.ends_with("No git repositories found.\n"));

        let quiet = tempdir().unwrap();
        fs::create_dir_all(quiet.path().join("r/.git")).unwrap();
        let some = run_to_string(&runner, &config(quiet.path())).unwrap();
        assert!(some.ends_with(
            "No commits found for author 'Ada' in the last 1 days across 1 repositories.\n"
        ));
    }

    #[test]
    fn unresolved_identity_aborts_before_any_output() {
        let dir = tempdir().unwrap();
        let runner = FakeGit { user: None, logs: Vec::new() };
        let mut buf = Vec::new();
        let err = run(&runner, &config(dir.path()), &mut buf, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("user.name"));
        assert!(buf.is_empty());
    }

    #[test]
    fn missing_root_aborts_without_report() {
        let dir = tempdir().unwrap();
        let runner = FakeGit { user: Some("Ada"), logs: Vec::new() };
        let mut buf = Vec::new();
        let err = run(&runner, &config(&dir.path().join("missing")), &mut buf, &mut Vec::<u8>::new()).unwrap_err();
        assert!(format!("{err:#}").contains("does not exist"));
        let text = String::from_utf8(buf).unwrap();
        assert!(!text.contains("No git repositories found"));
    }

    #[test]
    fn explicit_author_and_excludes_are_honoured() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("keep/.git")).unwrap();
        fs::create_dir_all(root.join("scratch/skipme/.git")).unwrap();

        let runner = FakeGit {
            user: None,
            logs: vec![("keep", 0, "k1 Keep (1 hour ago)"), ("skipme", 0, "s1 Skip (1 hour ago)")],
        };
        let mut cfg = config(root);
        cfg.author = Some("Grace".into());
        cfg.exclude = vec!["scratch".into()];
        cfg.format = OutputFormat::Json;

        let text = run_to_string(&runner, &cfg).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["author"], "Grace");
        assert_eq!(v["repositories_scanned"], 1);
        assert_eq!(v["repositories"][0]["name"], "keep");
    }

    #[test]
    fn ndjson_empty_cases_are_reported_on_the_diagnostic_stream() {
        let runner = FakeGit { user: Some("Ada"), logs: Vec::new() };

        let empty = tempdir().unwrap();
        let mut cfg = config(empty.path());
        cfg.format = OutputFormat::Ndjson;
        let (out, diag) = run_captured(&runner, &cfg).unwrap();
        assert_eq!(out, "");
        assert_eq!(diag, "No git repositories found.\n");

        let quiet = tempdir().unwrap();
        fs::create_dir_all(quiet.path().join("r/.git")).unwrap();
        let mut cfg = config(quiet.path());
        cfg.format = OutputFormat::Ndjson;
        let (out, diag) = run_captured(&runner, &cfg).unwrap();
        assert_eq!(out, "");
        assert_eq!(
            diag,
            "No commits found for author 'Ada' in the last 1 days across 1 repositories.\n"
        );
    }

    #[test]
    fn ndjson_with_results_keeps_the_diagnostic_stream_quiet() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("r/.git")).unwrap();
        let runner = FakeGit { user: Some("Ada"), logs: vec![("r", 0, "r1 Work (1 hour ago)")] };
        let mut cfg = config(dir.path());
        cfg.format = OutputFormat::Ndjson;

        let (out, diag) = run_captured(&runner, &cfg).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("\"name\":\"r\""));
        assert_eq!(diag, "");
    }
}
