pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{build_report, FetchOptions};
pub use exec::{exec, run, OutputFormat, RunConfig};
pub use output::{write_json, write_ndjson, write_text};
