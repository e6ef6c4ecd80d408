//! Collects the commits one author made recently across every git
//! repository below a directory.

pub mod cli;
pub mod error;
pub mod git;
pub mod locate;
pub mod model;
pub mod standup;
pub mod util;
