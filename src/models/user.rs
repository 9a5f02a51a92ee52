use serde::{Deserialize, Serialize};

/// A registered farmer from the shared application database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub crop: Option<String>,
    pub language: Option<String>,
}

impl User {
    /// Whether this user lives in the given district (case-insensitive)
    pub fn is_in_district(&self, district: &str) -> bool {
        self.district
            .as_deref()
            .map(|d| d.eq_ignore_ascii_case(district))
            .unwrap_or(false)
    }
}
