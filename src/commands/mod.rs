//! Command handlers for the mdabbr CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to. Handlers return the process exit code.

pub mod init;
pub mod list;
pub mod scan;
