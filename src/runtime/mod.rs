//! Runtime abstraction for system operations.
//!
//! Providers and commands reach the environment and the file system only
//! through [`Runtime`], so tests can swap in `MockRuntime`.
//!
//! # Structure
//!
//! - `env` - Environment variables and well-known directories
//! - `fs` - File system reads

mod env;
mod fs;

use anyhow::Result;
use std::env as std_env;
use std::path::{Path, PathBuf};

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;
    fn exists(&self, path: &Path) -> bool;

    // Directories
    fn config_dir(&self) -> Option<PathBuf>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir_impl()
    }
}
