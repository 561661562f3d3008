// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command line front end of icsnorm: reads an iCalendar document, runs the import
//! pipeline of [`icsnorm_core`] and prints the records as JSON or as a table.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_import;
mod config;
mod record_formatter;
mod table;

pub use crate::arg::OutputFormat;
pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_generate_completion::{CmdGenerateCompletion, Shell};
pub use crate::cmd_import::CmdImport;
pub use crate::config::{Config, parse_config};
