pub mod command;
pub mod identity;
pub mod log;

pub use command::{CommandOutput, CommandRunner, GitCli};
pub use identity::resolve_author;
pub use log::{fetch_commits, log_args, parse_log};
