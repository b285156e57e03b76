// ABOUTME: Library root for parsing OpenSSH client configuration into host blocks
// ABOUTME: Exposes the SSH parser module and the TOML settings used by the sshcfg binary

pub mod config;
pub mod ssh;

pub use ssh::{Host, HostOption, ParseError, find_host, parse, parse_ssh_config};
