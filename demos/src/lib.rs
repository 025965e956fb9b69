//! Helpers shared by the demo programs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Path of `file_name` inside `output/`, creating the directory.
pub fn output_path(file_name: &str) -> io::Result<PathBuf> {
    let dir = Path::new("output");
    fs::create_dir_all(dir)?;
    Ok(dir.join(file_name))
}
