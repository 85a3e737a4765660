// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Manifest validation.
//!
//! Checks run over every entry and all failures are reported together:
//!
//! 1. **Path validation**: each `path` parses into a namespace path
//! 2. **Uniqueness validation**: no two entries share a canonical path, so
//!    `A.B` and `A::B` collide

use std::collections::HashMap;

use crate::config::RegistryConfig;
use crate::errors::{RegistryError, ValidationError};
use crate::registry::NamespacePath;

/// Validate a manifest, returning every problem found.
pub fn validate_manifest(cfg: &RegistryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, entry) in cfg.modules.iter().enumerate() {
        match NamespacePath::parse(&entry.path) {
            Ok(path) => {
                let canonical = path.to_string();
                if let Some(&first) = seen.get(&canonical) {
                    errors.push(ValidationError::DuplicatePath {
                        path: canonical,
                        first,
                        second: index,
                    });
                } else {
                    seen.insert(canonical, index);
                }
            }
            Err(RegistryError::InvalidPath { reason, .. }) => {
                errors.push(ValidationError::InvalidPath {
                    index,
                    path: entry.path.clone(),
                    reason,
                });
            }
            Err(other) => {
                errors.push(ValidationError::InvalidPath {
                    index,
                    path: entry.path.clone(),
                    reason: other.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleEntry;

    fn manifest(paths: &[&str]) -> RegistryConfig {
        RegistryConfig {
            log_filter: None,
            modules: paths
                .iter()
                .map(|path| ModuleEntry {
                    path: path.to_string(),
                    object: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_validate_manifest_table_driven() {
        struct TestCase {
            name: &'static str,
            paths: Vec<&'static str>,
            expected: Result<(), Vec<ValidationError>>,
        }

        let test_cases = vec![
            TestCase {
                name: "empty manifest",
                paths: vec![],
                expected: Ok(()),
            },
            TestCase {
                name: "distinct paths",
                paths: vec!["A", "A.B", "B::C"],
                expected: Ok(()),
            },
            TestCase {
                name: "duplicate through separator",
                paths: vec!["A.B", "X", "A::B"],
                expected: Err(vec![ValidationError::DuplicatePath {
                    path: "A.B".to_string(),
                    first: 0,
                    second: 2,
                }]),
            },
            TestCase {
                name: "invalid path",
                paths: vec!["A..B"],
                expected: Err(vec![ValidationError::InvalidPath {
                    index: 0,
                    path: "A..B".to_string(),
                    reason: "empty component".to_string(),
                }]),
            },
        ];

        for test_case in test_cases {
            let result = validate_manifest(&manifest(&test_case.paths));
            assert_eq!(result, test_case.expected, "{}", test_case.name);
        }
    }

    #[test]
    fn test_reports_every_error() {
        let result = validate_manifest(&manifest(&["", "A", "A", "B.", "A"]));
        let errors = result.unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ValidationError::InvalidPath { index: 0, .. }));
        assert!(matches!(
            errors[1],
            ValidationError::DuplicatePath { first: 1, second: 2, .. }
        ));
        assert!(matches!(errors[2], ValidationError::InvalidPath { index: 3, .. }));
        assert!(matches!(
            errors[3],
            ValidationError::DuplicatePath { first: 1, second: 4, .. }
        ));
    }
}
