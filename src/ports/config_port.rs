//! Configuration access port trait.

use crate::domain::error::PricecastError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Integer value of `[section] key`, or `default` when the key is absent.
    ///
    /// A present value that is not an integer is `ConfigInvalid`.
    fn get_int(&self, section: &str, key: &str, default: i64) -> Result<i64, PricecastError> {
        match self.get_string(section, key) {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| PricecastError::ConfigInvalid {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: format!("expected an integer, got '{}'", raw.trim()),
                }),
        }
    }
}
