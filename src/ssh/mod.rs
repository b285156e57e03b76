// ABOUTME: SSH client config module tying the host model and include loaders to the parser
// ABOUTME: Also resolves the SSH directory once and reads the top-level config file from disk

pub mod error;
pub mod host;
pub mod loader;
pub mod parser;

pub use error::{ErrorKind, ParseError};
pub use host::{Host, HostOption, find_host};
pub use loader::{FsIncludeLoader, IncludeLoader, IncludedFile, NoIncludes};
pub use parser::{Parser, parse};

use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the SSH directory and the config file inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshPaths {
    pub ssh_dir: PathBuf,
    pub config_path: PathBuf,
}

impl SshPaths {
    pub fn for_home(home: &Path) -> Self {
        let ssh_dir = home.join(".ssh");
        let config_path = ssh_dir.join("config");
        Self { ssh_dir, config_path }
    }

    /// Looks up the home directory once; nothing below this reads the environment.
    pub fn discover() -> Option<Self> {
        dirs::home_dir().map(|home| Self::for_home(&home))
    }
}

pub fn read_config(path: &Path) -> Result<String, ParseError> {
    fs::read_to_string(path).map_err(|source| ParseError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads `path` and parses it, resolving includes relative to `ssh_dir`.
pub fn parse_ssh_config(path: &Path, ssh_dir: &Path) -> Result<Vec<Host>, ParseError> {
    parse_ssh_config_with_depth(path, ssh_dir, None)
}

pub fn parse_ssh_config_with_depth(
    path: &Path,
    ssh_dir: &Path,
    max_include_depth: Option<usize>,
) -> Result<Vec<Host>, ParseError> {
    let content = read_config(path)?;
    tracing::debug!("Parsing SSH config: {}", path.display());

    let loader = FsIncludeLoader::new(ssh_dir);
    let mut parser = Parser::new(&loader);
    if let Some(depth) = max_include_depth {
        parser = parser.with_max_depth(depth);
    }

    let hosts = parser.parse(&content)?;
    tracing::info!("Parsed {} host block(s) from {}", hosts.len(), path.display());
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_for_home() {
        let paths = SshPaths::for_home(Path::new("/home/user"));
        assert_eq!(paths.ssh_dir, PathBuf::from("/home/user/.ssh"));
        assert_eq!(paths.config_path, PathBuf::from("/home/user/.ssh/config"));
    }

    #[test]
    fn test_discover_uses_home_dir() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(SshPaths::discover(), Some(SshPaths::for_home(&home)));
        }
    }

    #[test]
    fn test_read_missing_config() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("hoge");

        let err = read_config(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
        assert!(err.to_string().contains("hoge"));
    }

    #[test]
    fn test_parse_ssh_config_from_disk() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("conf.d")).unwrap();
        fs::write(
            dir.path().join("conf.d/work"),
            "Host work\n    HostName 10.0.0.5\n    User deploy\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("config"),
            "Include conf.d/*\n\nHost home\n    HostName 192.0.2.1\n",
        )
        .unwrap();

        let hosts = parse_ssh_config(&dir.path().join("config"), dir.path()).unwrap();

        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].name, "work");
        assert_eq!(hosts[0].value("User"), Some("deploy"));
        assert_eq!(hosts[1].name, "home");
    }

    #[test]
    fn test_parse_ssh_config_depth_bound() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config"), "Host loop\nInclude config\n").unwrap();

        let err = parse_ssh_config_with_depth(&dir.path().join("config"), dir.path(), Some(3))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncludeDepthExceeded);
    }
}
