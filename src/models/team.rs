use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Intermediate" => SkillLevel::Intermediate,
            "Advanced" => SkillLevel::Advanced,
            _ => SkillLevel::Beginner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub sport: String,
    pub city: String,
    pub description: String,
    /// Member user ids in join order; the creator is always first.
    pub members: Vec<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub max_players: u32,
    pub skill_level: SkillLevel,
    pub practice_schedule: String,
    pub contact_email: String,
    pub logo: Option<String>,
}

impl Team {
    pub fn is_full(&self) -> bool {
        self.members.len() as u32 >= self.max_players
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub sport: String,
    pub city: String,
    #[serde(default)]
    pub description: String,
    pub max_players: u32,
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub practice_schedule: String,
    #[serde(default)]
    pub contact_email: String,
    pub logo: Option<String>,
}
