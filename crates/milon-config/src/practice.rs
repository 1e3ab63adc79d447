use milon_types::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PracticeConfig {
    pub default_direction: Direction,
}
