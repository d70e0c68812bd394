//! Persistent client state under `.htp/`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const STATE_DIR: &str = ".htp";
pub const BASE_URL_FILE: &str = "base_url.env";
pub const AUTH_TOKEN_FILE: &str = "auth_token.env";

/// Small key files kept in a `.htp` directory
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Store rooted at `root/.htp`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: root.as_ref().join(STATE_DIR),
        }
    }

    /// Store in the current working directory
    pub fn in_current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    pub fn base_url(&self) -> io::Result<Option<String>> {
        self.read(BASE_URL_FILE)
    }

    pub fn set_base_url(&self, url: &str) -> io::Result<()> {
        self.write(BASE_URL_FILE, url)
    }

    pub fn auth_token(&self) -> io::Result<Option<String>> {
        self.read(AUTH_TOKEN_FILE)
    }

    pub fn set_auth_token(&self, token: &str) -> io::Result<()> {
        self.write(AUTH_TOKEN_FILE, token)
    }

    /// Trimmed file contents; a missing file or a blank one reads as `None`
    fn read(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.dir.join(name)) {
            Ok(content) => {
                let value = content.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, name: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(name), value)
    }
}
