//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::error::Error;
use std::io;

use batch_fetch_config::Selectable;
use dialoguer::{MultiSelect, Select};

/// Answer to a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Distinct 1-based option numbers, non-empty.
    Chosen(Vec<usize>),
    /// The user asked to stop the whole run.
    Abort,
}

/// Preset key that stops the run, like the Exit menu entry.
const ABORT_KEY: &str = "0";

/// Label of the menu entry that stops the run.
const EXIT_LABEL: &str = "Exit";

/// Picks options from catalog menus, from presets or by asking.
#[derive(Debug, Clone, Copy)]
pub struct Chooser {
    non_interactive: bool,
}

impl Chooser {
    /// Create a chooser. When `non_interactive` is set, a missing preset is an error.
    #[must_use]
    pub const fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }

    /// Choose options from `menu`.
    ///
    /// Preset keys are matched with [`Selectable::find_option`]; a key of `0`
    /// that names no option aborts. Without presets the user is prompted.
    ///
    /// # Arguments
    ///
    /// * `menu` - What to choose from
    /// * `multi` - Whether several options may be chosen
    /// * `what` - Name used in error messages
    /// * `preset` - Answers given on the command line
    ///
    /// # Errors
    ///
    /// * If a preset key matches no option
    /// * If several presets are given for a single choice
    /// * If there is no preset and prompting is disabled
    /// * If the prompt fails
    pub fn choose(
        self,
        menu: &dyn Selectable,
        multi: bool,
        what: &str,
        preset: Option<&[String]>,
    ) -> Result<Selection, Box<dyn Error>> {
        if let Some(keys) = preset.filter(|k| !k.is_empty()) {
            return resolve_preset(menu, multi, what, keys).map_err(Into::into);
        }

        if self.non_interactive {
            return Err(format!("No selection given for {what} in non-interactive mode").into());
        }

        Ok(prompt(menu, multi)?)
    }
}

fn resolve_preset(
    menu: &dyn Selectable,
    multi: bool,
    what: &str,
    keys: &[String],
) -> Result<Selection, String> {
    if !multi && keys.len() > 1 {
        return Err(format!("Only one value may be given for {what}"));
    }

    let mut chosen = Vec::with_capacity(keys.len());
    for key in keys {
        let found = menu.find_option(key);
        if found.is_none() && key.trim() == ABORT_KEY {
            return Ok(Selection::Abort);
        }
        let index = found.ok_or_else(|| {
            format!(
                "Unknown value {key:?} for {what} (expected one of: {})",
                menu.option_names().join(", ")
            )
        })?;
        if !chosen.contains(&index) {
            chosen.push(index);
        }
    }

    Ok(Selection::Chosen(chosen))
}

/// Ask the user. Esc or the trailing Exit entry aborts.
fn prompt(menu: &dyn Selectable, multi: bool) -> io::Result<Selection> {
    let mut entries: Vec<String> = menu.option_names().into_iter().map(String::from).collect();
    let exit = entries.len();
    entries.push(EXIT_LABEL.to_string());

    if multi {
        loop {
            let picked = MultiSelect::new()
                .with_prompt(format!("{} (Space to toggle, Esc to exit)", menu.description()))
                .items(&entries)
                .interact_opt()?;

            match multi_selection(picked, exit) {
                Some(selection) => return Ok(selection),
                None => println!("Input is empty. Please repeat."),
            }
        }
    }

    let picked = Select::new()
        .with_prompt(menu.description())
        .items(&entries)
        .default(0)
        .interact_opt()?;

    Ok(single_selection(picked, exit))
}

/// Map a multi-select answer over `exit` options plus the Exit entry.
///
/// Returns `None` when nothing was picked and the menu should be shown again.
fn multi_selection(picked: Option<Vec<usize>>, exit: usize) -> Option<Selection> {
    let picked = match picked {
        None => return Some(Selection::Abort),
        Some(picked) => picked,
    };

    if picked.contains(&exit) {
        return Some(Selection::Abort);
    }
    if picked.is_empty() {
        return None;
    }

    Some(Selection::Chosen(picked.into_iter().map(|i| i + 1).collect()))
}

/// Map a single-select answer over `exit` options plus the Exit entry.
fn single_selection(picked: Option<usize>, exit: usize) -> Selection {
    match picked {
        Some(i) if i < exit => Selection::Chosen(vec![i + 1]),
        _ => Selection::Abort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batch_fetch_config::{Choice, Parameter};

    fn param() -> Parameter {
        Parameter::new(
            "env",
            "Environments",
            vec![Choice::new("Production", "prod"), Choice::new("Development", "dev")],
        )
    }

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_preset_by_value_and_label() {
        let selection = Chooser::new(true)
            .choose(&param(), true, "env", Some(keys(&["dev", "Production"]).as_slice()))
            .unwrap();
        assert_eq!(selection, Selection::Chosen(vec![2, 1]));
    }

    #[test]
    fn test_preset_deduplicates() {
        let selection = Chooser::new(true)
            .choose(&param(), true, "env", Some(keys(&["prod", "1", "Production"]).as_slice()))
            .unwrap();
        assert_eq!(selection, Selection::Chosen(vec![1]));
    }

    #[test]
    fn test_preset_unknown_value() {
        let err = Chooser::new(true)
            .choose(&param(), true, "env", Some(keys(&["staging"]).as_slice()))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown value \"staging\" for env"));
    }

    #[test]
    fn test_single_choice_rejects_many_presets() {
        let err = Chooser::new(true)
            .choose(&param(), false, "source", Some(keys(&["prod", "dev"]).as_slice()))
            .unwrap_err();
        assert!(err.to_string().contains("Only one value"));
    }

    #[test]
    fn test_preset_zero_aborts() {
        let selection = Chooser::new(true)
            .choose(&param(), true, "env", Some(keys(&["prod", "0"]).as_slice()))
            .unwrap();
        assert_eq!(selection, Selection::Abort);
    }

    #[test]
    fn test_preset_zero_matches_option_named_zero() {
        let menu = Parameter::new("level", "Level", vec![Choice::new("0", "zero")]);
        let selection = Chooser::new(true)
            .choose(&menu, true, "level", Some(keys(&["0"]).as_slice()))
            .unwrap();
        assert_eq!(selection, Selection::Chosen(vec![1]));
    }

    #[test]
    fn test_multi_menu_exit_entry_aborts() {
        assert_eq!(multi_selection(Some(vec![0, 2]), 2), Some(Selection::Abort));
        assert_eq!(multi_selection(None, 2), Some(Selection::Abort));
        assert_eq!(multi_selection(Some(Vec::new()), 2), None);
        assert_eq!(
            multi_selection(Some(vec![1, 0]), 2),
            Some(Selection::Chosen(vec![2, 1]))
        );
    }

    #[test]
    fn test_single_menu_exit_entry_aborts() {
        assert_eq!(single_selection(Some(2), 2), Selection::Abort);
        assert_eq!(single_selection(None, 2), Selection::Abort);
        assert_eq!(single_selection(Some(1), 2), Selection::Chosen(vec![2]));
    }

    #[test]
    fn test_non_interactive_requires_preset() {
        let err = Chooser::new(true)
            .choose(&param(), true, "env", None)
            .unwrap_err();
        assert!(err.to_string().contains("non-interactive"));
    }
}
