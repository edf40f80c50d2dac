use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

impl Venue {
    pub fn new(name: &str, city: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            city: city
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}
