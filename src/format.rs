//! Output rendering for created secrets.

use serde::Serialize;

use crate::error::Error;

/// How each created secret is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The ARN returned by Secrets Manager, one per line.
    Arn,
    /// One JSON object per line, shaped for the "secrets" array of an ECS
    /// container task definition.
    TaskDefinition,
}

/// Element of an ECS task definition "secrets" array.
#[derive(Serialize)]
struct TaskSecret<'a> {
    name: String,
    #[serde(rename = "valueFrom")]
    value_from: &'a str,
}

/// Render one output line for a created secret.
pub fn render(mode: OutputMode, name: &str, arn: &str) -> Result<String, Error> {
    match mode {
        OutputMode::Arn => Ok(arn.to_string()),
        OutputMode::TaskDefinition => {
            let element = TaskSecret {
                name: env_var_name(name),
                value_from: arn,
            };
            Ok(serde_json::to_string(&element)?)
        }
    }
}

/// Derive an environment-variable-style name from a secret name: keep only
/// the part after the last `/`, uppercase it, map space, hyphen, and
/// underscore to underscore, and drop everything else that is not an
/// uppercase ASCII letter.
pub fn env_var_name(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.to_uppercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' | '_' => Some('_'),
            'A'..='Z' => Some(c),
            _ => None,
        })
        .collect()
}
