// SPDX-License-Identifier: MPL-2.0
//! File management and network diagnostics behind the Tools page.
//!
//! Everything here is UI-agnostic: filesystem helpers are plain blocking
//! functions meant to run through [`crate::worker`], network helpers are
//! async and drive OS subprocesses with a deadline.

pub mod fs_ops;
pub mod log;
pub mod network;

pub use fs_ops::{format_size, DirectoryListing, FilePreview};
pub use log::ToolLog;
pub use network::CommandOutput;
