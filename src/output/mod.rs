//! Output module for the harvested path list
//!
//! This module handles:
//! - Writing the final path list to a file
//! - Printing it to standard output
//! - Summarizing the run

mod traits;
mod writer;

pub use traits::{OutputHandler, RunSummary};
pub use writer::{FileOutput, WriterOutput};
