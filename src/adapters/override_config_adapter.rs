//! Configuration layer that lets command-line flags win over file values.

use crate::ports::config_port::ConfigPort;
use std::collections::HashMap;

pub struct OverrideConfigAdapter<'a> {
    base: &'a dyn ConfigPort,
    overrides: HashMap<(String, String), String>,
}

impl<'a> OverrideConfigAdapter<'a> {
    pub fn new(base: &'a dyn ConfigPort) -> Self {
        Self {
            base,
            overrides: HashMap::new(),
        }
    }

    /// Set `[section] key` to `value`; `None` leaves the base value in place.
    pub fn set(&mut self, section: &str, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            self.overrides
                .insert((section.to_string(), key.to_string()), v.to_string());
        }
        self
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.overrides
            .get(&(section.to_string(), key.to_string()))
            .map(String::as_str)
    }
}

impl ConfigPort for OverrideConfigAdapter<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.lookup(section, key) {
            Some(v) => Some(v.to_string()),
            None => self.base.get_string(section, key),
        }
    }
}
