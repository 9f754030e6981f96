//! Record types exchanged between the storage, search and HTTP layers.

use serde::{Deserialize, Serialize};

/// A biographical leader record.
///
/// `name_primary`/`name_secondary` are the two locale variants of the display
/// name (native and romanized). The record is immutable within a request;
/// mutation goes through [`LeaderPatch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    pub id: i64,
    pub name_primary: String,
    pub name_secondary: String,
    #[serde(default)]
    pub slug: String,
    pub birth_year: Option<i32>,
    pub birth_place: Option<String>,
    pub death_year: Option<i32>,
    pub death_place: Option<String>,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub achievements: String,
    pub biography: Option<String>,
    pub short_description: Option<String>,
    pub legacy: Option<String>,
    pub years_in_power_start: Option<i32>,
    pub years_in_power_end: Option<i32>,
    /// 1-10 scale.
    #[serde(default = "default_significance")]
    pub historical_significance: i32,
    pub video_id: Option<i32>,
    pub portrait_url: Option<String>,
    #[serde(default = "bool_true")]
    pub is_published: bool,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn default_significance() -> i32 { 5 }
fn bool_true() -> bool { true }

impl Default for Leader {
    fn default() -> Self {
        Self {
            id: 0,
            name_primary: String::new(),
            name_secondary: String::new(),
            slug: String::new(),
            birth_year: None,
            birth_place: None,
            death_year: None,
            death_place: None,
            position: String::new(),
            achievements: String::new(),
            biography: None,
            short_description: None,
            legacy: None,
            years_in_power_start: None,
            years_in_power_end: None,
            historical_significance: default_significance(),
            video_id: None,
            portrait_url: None,
            is_published: true,
            view_count: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

/// Payload for creating a leader. Only the display names are required.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaderDraft {
    #[serde(default)]
    pub name_primary: String,
    #[serde(default)]
    pub name_secondary: String,
    pub slug: Option<String>,
    pub birth_year: Option<i32>,
    pub birth_place: Option<String>,
    pub death_year: Option<i32>,
    pub death_place: Option<String>,
    pub position: Option<String>,
    pub achievements: Option<String>,
    pub biography: Option<String>,
    pub short_description: Option<String>,
    pub legacy: Option<String>,
    pub years_in_power_start: Option<i32>,
    pub years_in_power_end: Option<i32>,
    pub historical_significance: Option<i32>,
    pub video_id: Option<i32>,
    pub portrait_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeaderPatch {
    pub name_primary: Option<String>,
    pub name_secondary: Option<String>,
    pub slug: Option<String>,
    pub birth_year: Option<i32>,
    pub birth_place: Option<String>,
    pub death_year: Option<i32>,
    pub death_place: Option<String>,
    pub position: Option<String>,
    pub achievements: Option<String>,
    pub biography: Option<String>,
    pub short_description: Option<String>,
    pub legacy: Option<String>,
    pub years_in_power_start: Option<i32>,
    pub years_in_power_end: Option<i32>,
    pub historical_significance: Option<i32>,
    pub video_id: Option<i32>,
    pub portrait_url: Option<String>,
    pub is_published: Option<bool>,
}

impl LeaderPatch {
    /// Apply this patch onto an existing record.
    pub fn apply(self, leader: &mut Leader) {
        if let Some(v) = self.name_primary { leader.name_primary = v; }
        if let Some(v) = self.name_secondary { leader.name_secondary = v; }
        if let Some(v) = self.slug { leader.slug = v; }
        if let Some(v) = self.birth_year { leader.birth_year = Some(v); }
        if let Some(v) = self.birth_place { leader.birth_place = Some(v); }
        if let Some(v) = self.death_year { leader.death_year = Some(v); }
        if let Some(v) = self.death_place { leader.death_place = Some(v); }
        if let Some(v) = self.position { leader.position = v; }
        if let Some(v) = self.achievements { leader.achievements = v; }
        if let Some(v) = self.biography { leader.biography = Some(v); }
        if let Some(v) = self.short_description { leader.short_description = Some(v); }
        if let Some(v) = self.legacy { leader.legacy = Some(v); }
        if let Some(v) = self.years_in_power_start { leader.years_in_power_start = Some(v); }
        if let Some(v) = self.years_in_power_end { leader.years_in_power_end = Some(v); }
        if let Some(v) = self.historical_significance { leader.historical_significance = v; }
        if let Some(v) = self.video_id { leader.video_id = Some(v); }
        if let Some(v) = self.portrait_url { leader.portrait_url = Some(v); }
        if let Some(v) = self.is_published { leader.is_published = v; }
    }
}

/// A persisted fact about one leader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub id: i64,
    pub leader_id: i64,
    pub fact_text: String,
    pub category: Option<String>,
    pub is_verified: bool,
    pub created_at: String,
}

/// One row of the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub user_id: Option<String>,
    pub leader_id: Option<i64>,
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut leader = Leader {
            id: 1,
            name_primary: "Ленин".into(),
            name_secondary: "Lenin".into(),
            position: "Председатель Совнаркома".into(),
            ..Default::default()
        };

        let patch = LeaderPatch {
            position: Some("Председатель СНК СССР".into()),
            historical_significance: Some(10),
            ..Default::default()
        };
        patch.apply(&mut leader);

        assert_eq!(leader.position, "Председатель СНК СССР");
        assert_eq!(leader.historical_significance, 10);
        assert_eq!(leader.name_primary, "Ленин");
        assert_eq!(leader.name_secondary, "Lenin");
    }

    #[test]
    fn test_leader_wire_keys() {
        let leader = Leader { id: 7, name_primary: "Горбачёв".into(), ..Default::default() };
        let value = serde_json::to_value(&leader).unwrap();
        assert_eq!(value["id"], 7);
        assert!(value.get("name_primary").is_some());
        assert!(value.get("name_secondary").is_some());
        assert!(value.get("position").is_some());
        assert!(value.get("achievements").is_some());
    }
}
