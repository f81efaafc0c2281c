use std::fmt::Display;

/// Name endings of curry, stew and mapo tofu style dishes.
const SOUPLIKE_SUFFIXES: [&str; 3] = ["カレー", "シチュー", "麻婆豆腐"];

/// One item of a day's menu, exactly as the vendor wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Dish(String);

impl Dish {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the dish comes with a roux or sauce that is eaten with a spoon.
    pub fn is_souplike(&self) -> bool {
        SOUPLIKE_SUFFIXES
            .iter()
            .any(|suffix| self.0.ends_with(suffix))
    }
}

impl From<&str> for Dish {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Dish {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Display for Dish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
