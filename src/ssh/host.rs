// ABOUTME: Host blocks and their key/value options as produced by the SSH config parser
// ABOUTME: Provides first-match lookups for hosts by name and options by keyword

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostOption {
    pub name: String,
    pub value: String,
}

impl HostOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Host {
    pub name: String,
    pub options: Vec<HostOption>,
}

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(name: impl Into<String>, options: Vec<HostOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// First option whose keyword matches `name`, ignoring ASCII case.
    pub fn find_option(&self, name: &str) -> Option<&HostOption> {
        self.options
            .iter()
            .find(|opt| opt.name.eq_ignore_ascii_case(name))
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.find_option(name).map(|opt| opt.value.as_str())
    }

    /// Every value given for a repeated keyword such as `IdentityFile`, in file order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.options
            .iter()
            .filter(move |opt| opt.name.eq_ignore_ascii_case(name))
            .map(|opt| opt.value.as_str())
    }
}

/// First host named exactly `name`. Later blocks with the same name are not merged.
pub fn find_host<'a>(hosts: &'a [Host], name: &str) -> Option<&'a Host> {
    hosts.iter().find(|host| host.name == name)
}
