// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use crate::config::consts::{PATH_SEPARATOR, SCOPE_SEPARATOR};
use crate::errors::RegistryError;

/// A parsed namespace path such as `Todo.Application` or `Todo::Application`.
///
/// Both separators may be mixed in one input; the canonical rendering always
/// uses dots. Components are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath(Vec<String>);

impl NamespacePath {
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        if input.is_empty() {
            return Err(RegistryError::invalid_path(input, "path is empty"));
        }

        let mut components = Vec::new();
        for component in input
            .split(SCOPE_SEPARATOR)
            .flat_map(|part| part.split(PATH_SEPARATOR))
        {
            if component.is_empty() {
                return Err(RegistryError::invalid_path(input, "empty component"));
            }
            if component.contains(':') {
                return Err(RegistryError::invalid_path(
                    input,
                    format!("stray ':' in component '{}'", component),
                ));
            }
            if component.chars().any(char::is_whitespace) {
                return Err(RegistryError::invalid_path(
                    input,
                    format!("whitespace in component '{}'", component),
                ));
            }
            components.push(component.to_string());
        }

        Ok(Self(components))
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// The terminal component, where the module is stored.
    pub fn last(&self) -> &str {
        // parse() never yields an empty path
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Extend this path with a suffix, which may itself contain separators.
    pub fn child(&self, suffix: &str) -> Result<Self, RegistryError> {
        let tail = Self::parse(suffix).map_err(|_| {
            RegistryError::invalid_path(
                &format!("{}{}{}", self, PATH_SEPARATOR, suffix),
                format!("invalid suffix '{}'", suffix),
            )
        })?;

        let mut components = self.0.clone();
        components.extend(tail.0);
        Ok(Self(components))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(PATH_SEPARATOR))
    }
}

impl FromStr for NamespacePath {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for NamespacePath {
    type Error = RegistryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
