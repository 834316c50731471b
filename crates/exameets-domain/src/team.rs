//! Team member profiles shown on the public "About" page.

use serde::{Deserialize, Serialize};

use crate::common::{impl_record_traits, RecordId};

/// Known social link slots; any of them may be blank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub website: String,
}

impl SocialLinks {
    pub const KEYS: [&'static str; 4] = ["linkedin", "github", "twitter", "website"];

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "linkedin" => Some(&self.linkedin),
            "github" => Some(&self.github),
            "twitter" => Some(&self.twitter),
            "website" => Some(&self.website),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamMember {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub bio: String,
    /// Durable URL returned by the media host.
    pub profile_image: String,
    #[serde(default)]
    pub certificates: Vec<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub social_links: SocialLinks,
}

impl_record_traits!(TeamMember, name, "Team");
