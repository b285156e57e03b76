// ABOUTME: Recursive descent parser turning SSH client config text into ordered host blocks
// ABOUTME: Expands Include directives through an injected loader and splices hosts in file order

use crate::ssh::error::ParseError;
use crate::ssh::host::{Host, HostOption};
use crate::ssh::loader::IncludeLoader;

/// Parses `text` with no bound on include nesting.
///
/// Include cycles are not detected. A file that includes itself recurses until
/// the stack is exhausted; use [`Parser::with_max_depth`] when that matters.
pub fn parse(text: &str, loader: &dyn IncludeLoader) -> Result<Vec<Host>, ParseError> {
    Parser::new(loader).parse(text)
}

pub struct Parser<'a> {
    loader: &'a dyn IncludeLoader,
    max_depth: Option<usize>,
}

impl<'a> Parser<'a> {
    pub fn new(loader: &'a dyn IncludeLoader) -> Self {
        Self {
            loader,
            max_depth: None,
        }
    }

    /// Fails with `IncludeDepthExceeded` once includes nest deeper than `depth`.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn parse(&self, text: &str) -> Result<Vec<Host>, ParseError> {
        self.parse_at(text, 0)
    }

    fn parse_at(&self, text: &str, depth: usize) -> Result<Vec<Host>, ParseError> {
        let mut hosts: Vec<Host> = Vec::new();

        for (index, line) in split_lines(text).enumerate() {
            let line_no = index + 1;

            if starts_with_letter(line) {
                let parts: Vec<&str> = line.split_whitespace().collect();
                let Some(keyword) = parts.first() else {
                    continue;
                };

                if keyword.eq_ignore_ascii_case("host") {
                    let name = parts
                        .get(1)
                        .ok_or_else(|| ParseError::malformed(line_no, keyword, "name"))?;
                    hosts.push(Host::new(*name));
                } else if keyword.eq_ignore_ascii_case("include") {
                    let pattern = parts
                        .get(1)
                        .ok_or_else(|| ParseError::malformed(line_no, keyword, "pattern"))?;
                    let included = self.expand_include(pattern, depth)?;
                    hosts.extend(included);
                }
                // Other keywords at column zero carry no host and are dropped
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = trimmed.split_whitespace().collect();
            let Some(key) = parts.first() else {
                continue;
            };

            let Some(current) = hosts.last_mut() else {
                tracing::trace!("Line {}: option '{}' precedes any Host, skipping", line_no, key);
                continue;
            };

            let value = parts
                .get(1)
                .ok_or_else(|| ParseError::malformed(line_no, key, "value"))?;
            current.options.push(HostOption::new(*key, *value));
        }

        Ok(hosts)
    }

    fn expand_include(&self, pattern: &str, depth: usize) -> Result<Vec<Host>, ParseError> {
        if let Some(max) = self.max_depth {
            if depth >= max {
                return Err(ParseError::IncludeDepthExceeded { depth: max });
            }
        }

        let files = self
            .loader
            .load(pattern)
            .map_err(|source| ParseError::Include {
                pattern: pattern.to_string(),
                source: Box::new(source),
            })?;
        tracing::debug!("Include '{}' matched {} file(s)", pattern, files.len());

        let mut hosts = Vec::new();
        for file in files {
            let parsed = self
                .parse_at(&file.content, depth + 1)
                .map_err(|source| ParseError::Included {
                    path: file.path.clone(),
                    source: Box::new(source),
                })?;
            hosts.extend(parsed);
        }

        Ok(hosts)
    }
}

/// Splits on `\n`, dropping the `\r` of a `\r\n` pair.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn starts_with_letter(line: &str) -> bool {
    line.as_bytes()
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic())
}
