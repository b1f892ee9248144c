//! Parameter resolution from user selections.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use batch_fetch_config::Parameter;

use crate::error::ExpandError;

/// Resolve a parameter from 1-based choice indices.
///
/// Each index maps to `choices[index - 1].value`. Selection order is kept and
/// duplicates are allowed.
///
/// # Arguments
///
/// * `parameter` - The parameter to resolve
/// * `selected` - 1-based indices into the parameter's choices
///
/// # Errors
///
/// * If an index is `0` or greater than the number of choices
/// * If the parameter is already resolved
pub fn resolve_parameter(parameter: &mut Parameter, selected: &[usize]) -> Result<(), ExpandError> {
    let count = parameter.choices.len();

    let values = selected
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|i| parameter.choices.get(i))
                .map(|choice| choice.value.clone())
                .ok_or_else(|| ExpandError::ChoiceOutOfRange {
                    parameter: parameter.name.clone(),
                    index,
                    count,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    parameter.resolve(values)?;
    Ok(())
}
