//! Menu capability shared by the catalog entities.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use crate::types::{Configuration, Parameter};

/// Something the user picks options from.
///
/// Implemented by [`Configuration`] (pick a source) and [`Parameter`] (pick
/// choices) so a single menu implementation serves both.
pub trait Selectable {
    /// Prompt text for the menu.
    fn description(&self) -> &str;

    /// Display names of the options, in order.
    fn option_names(&self) -> Vec<&str>;

    /// Find an option by display name or 1-based number.
    ///
    /// Returns the 1-based index of the first match.
    fn find_option(&self, key: &str) -> Option<usize> {
        let names = self.option_names();

        if let Some(pos) = names.iter().position(|n| *n == key) {
            return Some(pos + 1);
        }

        key.parse::<usize>()
            .ok()
            .filter(|n| (1..=names.len()).contains(n))
    }
}

impl Selectable for Configuration {
    fn description(&self) -> &str {
        &self.description
    }

    fn option_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }
}

impl Selectable for Parameter {
    fn description(&self) -> &str {
        &self.description
    }

    fn option_names(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.label.as_str()).collect()
    }

    /// Labels first, then substitution values, then numbers.
    fn find_option(&self, key: &str) -> Option<usize> {
        if let Some(pos) = self.choices.iter().position(|c| c.label == key) {
            return Some(pos + 1);
        }
        if let Some(pos) = self.choices.iter().position(|c| c.value == key) {
            return Some(pos + 1);
        }

        key.parse::<usize>()
            .ok()
            .filter(|n| (1..=self.choices.len()).contains(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Choice, Source};

    fn param() -> Parameter {
        Parameter::new(
            "env",
            "Choose environments",
            vec![Choice::new("Production", "prod"), Choice::new("Development", "dev")],
        )
    }

    #[test]
    fn test_parameter_options() {
        let p = param();
        assert_eq!(p.description(), "Choose environments");
        assert_eq!(p.option_names(), vec!["Production", "Development"]);
    }

    #[test]
    fn test_parameter_find_by_label_value_or_number() {
        let p = param();
        assert_eq!(p.find_option("Development"), Some(2));
        assert_eq!(p.find_option("prod"), Some(1));
        assert_eq!(p.find_option("2"), Some(2));
        assert_eq!(p.find_option("3"), None);
        assert_eq!(p.find_option("0"), None);
        assert_eq!(p.find_option("staging"), None);
    }

    #[test]
    fn test_configuration_options() {
        let config = Configuration {
            description: "Pick one".into(),
            sources: vec![
                Source {
                    name: "logs".into(),
                    ..Default::default()
                },
                Source {
                    name: "dumps".into(),
                    ..Default::default()
                },
            ],
        };

        assert_eq!(config.description(), "Pick one");
        assert_eq!(config.option_names(), vec!["logs", "dumps"]);
        assert_eq!(config.find_option("dumps"), Some(2));
        assert_eq!(config.find_option("1"), Some(1));
    }
}
