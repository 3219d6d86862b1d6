use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, rename = "profile_image")]
    pub profile_image_ref: Option<String>,
}

impl UserProfile {
    /// Up to two upper-case initials of the full name, or of the username.
    pub fn initials(&self) -> String {
        let source = if self.full_name.trim().is_empty() { &self.username } else { &self.full_name };
        let initials: String = source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    /// Absolute URL of the profile image. Server-relative paths are joined to `base_url`.
    pub fn image_url(&self, base_url: &str) -> Option<String> {
        let path = self.profile_image_ref.as_deref().filter(|p| !p.is_empty())?;
        if path.starts_with("http") {
            Some(path.to_string())
        } else {
            Some(format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/')))
        }
    }
}

/// Fields replaced by an explicit "update profile" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
