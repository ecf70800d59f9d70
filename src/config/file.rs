//
//  mediawiki-butt
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations used by [`Config`](super::Config). Write
//! operations create missing parent directories.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use mediawiki_butt::config::{config_exists, read_config_file, write_config_file};
//!
//! let path = Path::new("/tmp/mwb/config.toml");
//!
//! if config_exists(path) {
//!     let content = read_config_file(path)?;
//!     println!("{}", content);
//! } else {
//!     write_config_file(path, "[wiki]\nurl = \"https://wiki.example.org/w\"\n")?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the raw configuration text.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Writes configuration text, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(())
}

pub fn config_exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "[wiki]\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "[wiki]\n");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let dir = TempDir::new().unwrap();
        let err = read_config_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config file"));
    }
}
