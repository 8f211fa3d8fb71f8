//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod track;

/// Common CLI utilities
pub mod utils {
    use crate::error::Result;
    use std::path::Path;

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<()> {
        match output_path {
            Some(path) => {
                std::fs::write(path, content)?;
                Ok(())
            }
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}
