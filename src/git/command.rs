use std::ffi::OsString;
use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self { stdout: stdout.into(), code: Some(0) }
    }

    pub fn failure(code: i32) -> Self {
        Self { stdout: String::new(), code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the version-control client with the given arguments.
///
/// `Err` means the command could not be run to completion at all (spawn
/// failure, timeout); a non-zero exit is reported through [`CommandOutput`].
pub trait CommandRunner: Send + Sync {
    fn run(&self, args: &[OsString]) -> io::Result<CommandOutput>;
}

/// Spawns the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    timeout: Option<Duration>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    pub fn new() -> Self {
        Self { program: OsString::from("git"), timeout: None }
    }

    /// Use a different executable, e.g. a wrapper script.
    #[cfg(test)]
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill the child if it runs longer than `timeout`. A zero duration disables the limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }
}

impl CommandRunner for GitCli {
    fn run(&self, args: &[OsString]) -> io::Result<CommandOutput> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // Drain stdout on its own thread so a chatty child cannot block on a full pipe.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "child stdout was not captured"))?;
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let status = match self.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit)?,
            None => child.wait()?,
        };

        let bytes = reader
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "stdout reader panicked"))??;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&bytes).into_owned(),
            code: status.code(),
        })
    }
}

fn wait_with_deadline(child: &mut Child, limit: Duration) -> io::Result<std::process::ExitStatus> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("command timed out after {}", humantime::format_duration(limit)),
            ));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
