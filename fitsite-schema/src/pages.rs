use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AboutPage {
    pub tagline: String,
    pub founded: u16,
    pub story: Vec<String>,
    pub philosophy: Vec<PhilosophyItem>,
    pub team: Vec<TeamMember>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhilosophyItem {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_cta: bool,
}
