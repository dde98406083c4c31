use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreProvider {
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "rest")]
    Rest,
}

impl std::str::FromStr for StoreProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreProvider::Memory),
            "rest" => Ok(StoreProvider::Rest),
            other => Err(format!("unknown store provider '{other}'")),
        }
    }
}
