use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// keys that name an electric energy carrier rather than a combustible fuel.
const ELECTRIC_CARRIERS: [&str; 3] = ["ev", "electric", "electricity"];

/// canonical form of a reference table key. trims, lower-cases, and joins the
/// parts separated by whitespace, '-' or '/' with '_'.
///
/// "Heavy-Duty Truck" -> "heavy_duty_truck"
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|part| !part.is_empty())
        .join("_")
}

/// identifier into a reference table (fuel, vehicle, incineration or landfill
/// type). always holds the canonical form, so tables and callers agree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReferenceKey(String);

impl ReferenceKey {
    pub fn new(raw: &str) -> ReferenceKey {
        ReferenceKey(canonical_key(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_electric_carrier(&self) -> bool {
        ELECTRIC_CARRIERS.contains(&self.0.as_str())
    }
}

impl From<String> for ReferenceKey {
    fn from(value: String) -> Self {
        ReferenceKey::new(&value)
    }
}

impl From<&str> for ReferenceKey {
    fn from(value: &str) -> Self {
        ReferenceKey::new(value)
    }
}

impl From<ReferenceKey> for String {
    fn from(value: ReferenceKey) -> Self {
        value.0
    }
}

impl Display for ReferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
