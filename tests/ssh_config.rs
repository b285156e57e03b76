// ABOUTME: End-to-end tests parsing SSH configs laid out under a temporary home directory
// ABOUTME: Checks include splicing over CRLF input and error context for bad files

use sshcfg::ssh::{ErrorKind, Host, HostOption, ParseError, SshPaths, parse_ssh_config};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_home_layout_with_includes() {
    let home = TempDir::new().unwrap();
    let paths = SshPaths::for_home(home.path());

    write(
        &paths.ssh_dir,
        "config",
        "# personal machines\r\n\
         Include config.d/*\r\n\
         \r\n\
         Host testhost\r\n\
         \x20   # host name\r\n\
         \x20   HostName 192.0.2.1\r\n\
         \x20   User myuser\r\n\
         \x20   IdentityFile ~/.ssh/id_rsa\r\n\
         \x20   ServerAliveInterval  60\r\n",
    );
    write(&paths.ssh_dir, "config.d/10-work", "Host bastion\n  HostName 10.1.0.1\n");
    write(&paths.ssh_dir, "config.d/20-lab", "host lab\n  User root\n  Port 2222\n");

    let hosts = parse_ssh_config(&paths.config_path, &paths.ssh_dir).unwrap();

    assert_eq!(
        hosts,
        vec![
            Host::with_options("bastion", vec![HostOption::new("HostName", "10.1.0.1")]),
            Host::with_options(
                "lab",
                vec![HostOption::new("User", "root"), HostOption::new("Port", "2222")]
            ),
            Host::with_options(
                "testhost",
                vec![
                    HostOption::new("HostName", "192.0.2.1"),
                    HostOption::new("User", "myuser"),
                    HostOption::new("IdentityFile", "~/.ssh/id_rsa"),
                    HostOption::new("ServerAliveInterval", "60"),
                ]
            ),
        ]
    );

    let testhost = sshcfg::find_host(&hosts, "testhost").unwrap();
    assert_eq!(testhost.value("hostname"), Some("192.0.2.1"));
    assert_eq!(testhost.value("ProxyJump"), None);
}

#[test]
fn test_missing_top_level_file() {
    let home = TempDir::new().unwrap();
    let paths = SshPaths::for_home(home.path());

    let err = parse_ssh_config(&paths.config_path, &paths.ssh_dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(matches!(err, ParseError::SourceUnavailable { .. }));
}

#[test]
fn test_malformed_line_in_included_file() {
    let home = TempDir::new().unwrap();
    let paths = SshPaths::for_home(home.path());

    write(&paths.ssh_dir, "config", "Include extra\nHost after\n");
    write(&paths.ssh_dir, "extra", "Host\n");

    let err = parse_ssh_config(&paths.config_path, &paths.ssh_dir).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDirective);

    let chain = format!("{:#}", anyhow::Error::from(err));
    assert!(chain.contains("extra"));
    assert!(chain.contains("line 1"));
}
