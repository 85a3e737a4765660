// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::RegistryConfig;
use crate::errors::RegistryError;
use crate::registry::Registry;

/// Registry builder - declares manifest entries into a registry.
///
/// # Examples
///
/// ```
/// use namespace_module::config::{parse_config, RegistryBuilder};
///
/// let config = parse_config(
///     "modules:\n  - path: Todo.Task\n  - path: Todo.Version\n    object: \"1.0\"\n",
/// )
/// .unwrap();
///
/// let registry = RegistryBuilder::from_config(&config).unwrap();
/// assert!(registry.fetch("Todo.Task").is_some());
/// assert!(registry.run("Todo.Version", vec![]).is_none());
/// ```
pub struct RegistryBuilder;

impl RegistryBuilder {
    /// Build a fresh registry holding every manifest entry.
    pub fn from_config(cfg: &RegistryConfig) -> Result<Registry, RegistryError> {
        let registry = Registry::new();
        Self::populate(&registry, cfg)?;
        Ok(registry)
    }

    /// Declare every manifest entry, in order, into an existing registry.
    ///
    /// Entries with an `object` replace whatever is at their path; entries
    /// without one reuse an existing module.
    pub fn populate(registry: &Registry, cfg: &RegistryConfig) -> Result<(), RegistryError> {
        for entry in &cfg.modules {
            match &entry.object {
                Some(object) => registry.register_object(&entry.path, object.clone())?,
                None => registry.declare(&entry.path)?,
            };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleEntry;
    use crate::registry::{Module, ModuleKind};
    use serde_json::json;

    #[test]
    fn test_from_config_declares_entries() {
        let cfg = RegistryConfig {
            log_filter: None,
            modules: vec![
                ModuleEntry {
                    path: "App.Task".to_string(),
                    object: None,
                },
                ModuleEntry {
                    path: "App::Version".to_string(),
                    object: Some(json!("1.0")),
                },
            ],
        };

        let registry = RegistryBuilder::from_config(&cfg).unwrap();

        assert_eq!(
            registry.paths(),
            vec![
                ("App.Task".to_string(), ModuleKind::Constructible),
                ("App.Version".to_string(), ModuleKind::Verbatim),
            ]
        );
        assert_eq!(registry.fetch("App.Version"), Some(Module::verbatim("1.0")));
    }

    #[test]
    fn test_populate_reuses_existing_modules() {
        let registry = Registry::new();
        let existing = registry.declare("App.Task").unwrap();

        let cfg = RegistryConfig {
            log_filter: None,
            modules: vec![ModuleEntry {
                path: "App.Task".to_string(),
                object: None,
            }],
        };
        RegistryBuilder::populate(&registry, &cfg).unwrap();

        assert_eq!(registry.fetch("App.Task"), Some(existing));
    }

    #[test]
    fn test_invalid_entry_stops_population() {
        let cfg = RegistryConfig {
            log_filter: None,
            modules: vec![
                ModuleEntry {
                    path: "Good".to_string(),
                    object: None,
                },
                ModuleEntry {
                    path: "Bad..Path".to_string(),
                    object: None,
                },
            ],
        };

        let result = RegistryBuilder::from_config(&cfg);
        assert!(matches!(result, Err(RegistryError::InvalidPath { .. })));
    }
}
