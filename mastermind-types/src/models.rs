use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::ErrorCategory;

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339_opts(SecondsFormat::Secs, true);
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    /// Target number of posts per generated week
    pub posts_per_week: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: Uuid,
    pub company_id: Uuid,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subreddit {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    /// Weekly cap; `None` means no cap
    #[serde(default)]
    pub max_posts_per_week: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Subreddit {
    pub fn weekly_cap(&self) -> u32 {
        self.max_posts_per_week.unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub id: Uuid,
    pub company_id: Uuid,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub id: Uuid,
    pub company_id: Uuid,
    /// Always a Monday
    pub week_start: NaiveDate,
    pub week_number: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub week_id: Uuid,
    pub subreddit_id: Uuid,
    pub title: String,
    pub body: String,
    pub author_persona_id: Uuid,
    #[serde(with = "datetime_format")]
    pub scheduled_at: DateTime<Utc>,
    pub keyword_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    /// Parent comment ID for replies (None for top-level comments)
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    pub persona_id: Uuid,
    #[serde(with = "datetime_format")]
    pub scheduled_at: DateTime<Utc>,
    pub comment_text: String,
}

/// Slice of a stored post used to steer rotation away from recent choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPost {
    pub title: String,
    pub subreddit_id: Uuid,
    pub author_persona_id: Uuid,
    pub keyword_ids: Vec<Uuid>,
}

// Request/Response types for API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub id: Uuid,
    pub week_number: i32,
    pub week_start: NaiveDate,
}

impl From<&Week> for WeekSummary {
    fn from(week: &Week) -> Self {
        Self {
            id: week.id,
            week_number: week.week_number,
            week_start: week.week_start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCounts {
    pub posts: usize,
    pub comments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateWeekResponse {
    pub ok: bool,
    pub week: WeekSummary,
    pub created: CreatedCounts,
}

/// One row of the weekly calendar table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub post_id: String,
    #[serde(with = "datetime_format")]
    pub scheduled_at: DateTime<Utc>,
    pub subreddit: String,
    pub author: String,
    pub title: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarView {
    /// None when no week has been generated yet
    pub week: Option<Week>,
    pub posts: Vec<CalendarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadPost {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(with = "datetime_format")]
    pub scheduled_at: DateTime<Utc>,
    pub subreddit: String,
    pub author: String,
    pub keyword_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: String,
    pub author: String,
    #[serde(with = "datetime_format")]
    pub scheduled_at: DateTime<Utc>,
    pub comment_text: String,
    #[serde(default)]
    pub children: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadView {
    pub post: ThreadPost,
    pub comments: Vec<CommentNode>,
}

/// Everything the generator draws from, for the data check view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputsOverview {
    pub company: Option<Company>,
    pub personas: Vec<Persona>,
    pub subreddits: Vec<Subreddit>,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
    #[serde(default)]
    pub category: Option<ErrorCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_response_shape() {
        let response = GenerateWeekResponse {
            ok: true,
            week: WeekSummary {
                id: Uuid::nil(),
                week_number: 4,
                week_start: NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
            },
            created: CreatedCounts {
                posts: 3,
                comments: 12,
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["week"]["week_number"], 4);
        assert_eq!(json["week"]["week_start"], "2026-10-12");
        assert_eq!(json["created"]["posts"], 3);
        assert_eq!(json["created"]["comments"], 12);
    }

    #[test]
    fn test_comment_timestamp_format() {
        let comment = Comment {
            id: "C1-1-1".to_string(),
            post_id: "P1-1".to_string(),
            parent_comment_id: None,
            persona_id: Uuid::nil(),
            scheduled_at: Utc.with_ymd_and_hms(2026, 10, 13, 17, 45, 0).unwrap(),
            comment_text: "hi".to_string(),
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["scheduled_at"], "2026-10-13T17:45:00Z");
        assert!(json["parent_comment_id"].is_null());

        let back: Comment = serde_json::from_value(json).unwrap();
        assert_eq!(back, comment);
    }

    #[test]
    fn test_uncapped_subreddit() {
        let subreddit = Subreddit {
            id: Uuid::nil(),
            company_id: Uuid::nil(),
            name: "r/slides".to_string(),
            max_posts_per_week: None,
            notes: None,
        };
        assert_eq!(subreddit.weekly_cap(), u32::MAX);

        let capped = Subreddit {
            max_posts_per_week: Some(2),
            ..subreddit
        };
        assert_eq!(capped.weekly_cap(), 2);
    }

    #[test]
    fn test_error_response_category() {
        let response = ErrorResponse {
            error: "Bad Request".to_string(),
            details: Some("Missing personas/subreddits/keywords".to_string()),
            category: Some(ErrorCategory::MissingInputs),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["category"], "missing-inputs");
    }
}
