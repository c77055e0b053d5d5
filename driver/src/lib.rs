use crate::error::DriverError;

pub mod config;
pub mod database;
pub mod error;
pub mod mq;

pub(crate) fn env(key: &str) -> Result<String, DriverError> {
    dotenvy::var(key).map_err(DriverError::from)
}

/// Like [`env`], but falls back to `default` when the variable is unset.
pub(crate) fn env_or<T>(key: &str, default: T) -> Result<T, DriverError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    match dotenvy::var(key) {
        Ok(value) => value.trim().parse().map_err(DriverError::from),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(error) => Err(DriverError::from(error)),
    }
}
