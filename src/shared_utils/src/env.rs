use std::str::FromStr;

use thiserror::Error;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The variable is set but its value does not parse into the requested type.
    #[error("Invalid value {value:?} for environment variable {name}: {message}")]
    Invalid {
        name: String,
        value: String,
        message: String,
    },
}

/// Reads an optional environment variable. Unset and empty values are both `None`.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads an optional environment variable and parses it with [`FromStr`].
///
/// Returns `Ok(None)` when the variable is unset or blank, and
/// [`EnvError::Invalid`] when it is set to something that does not parse.
pub fn get_optional_env_parsed<T>(name: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional_env_var(name) {
        None => Ok(None),
        Some(raw) => parse_value(name, &raw).map(Some),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| EnvError::Invalid {
        name: name.to_string(),
        value: raw.to_string(),
        message: e.to_string(),
    })
}
