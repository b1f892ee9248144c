//! Cross-product substitution of parameters into path templates.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use batch_fetch_config::Parameter;

use crate::error::ExpandError;

/// Expand templates with every resolved parameter value.
///
/// Parameters are applied in order. Each one replaces the current generation
/// of paths with `paths x values`, substituting `${name}` literally. The
/// result has `templates.len() * product(values.len())` entries; a parameter
/// with no values yields an empty result.
///
/// # Arguments
///
/// * `templates` - Path templates of the chosen source
/// * `parameters` - The source's parameters, all resolved
///
/// # Errors
///
/// * If any parameter is unresolved
/// * If a pattern still contains a `${...}` placeholder afterwards
pub fn expand_templates(
    templates: &[String],
    parameters: &[Parameter],
) -> Result<Vec<String>, ExpandError> {
    let mut paths = templates.to_vec();

    for param in parameters {
        let values = param.resolved()?;
        let placeholder = param.placeholder();

        paths = paths
            .iter()
            .flat_map(|path| values.iter().map(|v| path.replace(&placeholder, v)))
            .collect();
    }

    for path in &paths {
        if let Some(placeholder) = find_placeholder(path) {
            return Err(ExpandError::UnresolvedPlaceholder {
                pattern: path.clone(),
                placeholder: placeholder.to_string(),
            });
        }
    }

    log::debug!(
        "Expanded {} template(s) into {} pattern(s)",
        templates.len(),
        paths.len()
    );

    Ok(paths)
}

fn find_placeholder(path: &str) -> Option<&str> {
    let start = path.find("${")?;
    let len = path[start..].find('}')?;
    Some(&path[start..=start + len])
}
