//! Serde support for [`FieldConfig`].
//!
//! A field configuration travels as its annotation text (`"BE,skip"`, `"-"`,
//! ...), so layouts described in configuration files use the same syntax as
//! the one documented in [crate::tag].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::tag::FieldConfig;

impl Serialize for FieldConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let Ok(config) = text.parse::<FieldConfig>();
        Ok(config)
    }
}
