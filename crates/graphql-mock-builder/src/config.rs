use std::collections::BTreeMap;

use crate::{error::Result, types::UserDefinedClass};

/// Parser settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schema types the user provides themselves, keyed by type name. This assumes the user
    /// defined classes are a superset of the generated ones.
    pub user_defined_classes: BTreeMap<String, UserDefinedClass>,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn user_defined(&self, type_name: &str) -> Option<&UserDefinedClass> {
        self.user_defined_classes.get(type_name)
    }
}
