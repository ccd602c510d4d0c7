use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use mastermind_types::{Persona, RecentPost, Subreddit};

/// Rotation bookkeeping for one generation run.
///
/// Seeded from recent post history, then updated after every post so later
/// posts in the same batch steer away from earlier choices.
#[derive(Debug, Clone, Default)]
pub struct RotationState {
    seen_titles: HashSet<String>,
    seen_keyword_ids: HashSet<Uuid>,
    recent_author_ids: Vec<Uuid>,
    subreddit_usage: HashMap<Uuid, u32>,
    last_subreddit_id: Option<Uuid>,
    last_author_id: Option<Uuid>,
}

impl RotationState {
    /// Build the starting state. `history` is newest first; only the first
    /// `recent_author_window` authors are avoided.
    pub fn from_history(history: &[RecentPost], recent_author_window: usize) -> Self {
        Self {
            seen_titles: history.iter().map(|p| p.title.clone()).collect(),
            seen_keyword_ids: history
                .iter()
                .flat_map(|p| p.keyword_ids.iter().copied())
                .collect(),
            recent_author_ids: history
                .iter()
                .take(recent_author_window)
                .map(|p| p.author_persona_id)
                .collect(),
            ..Self::default()
        }
    }

    pub fn subreddit_usage(&self, subreddit_id: &Uuid) -> u32 {
        self.subreddit_usage.get(subreddit_id).copied().unwrap_or(0)
    }

    /// Under its weekly cap and not the previous post's subreddit
    pub fn subreddit_available(&self, subreddit: &Subreddit) -> bool {
        self.subreddit_usage(&subreddit.id) < subreddit.weekly_cap()
            && self.last_subreddit_id != Some(subreddit.id)
    }

    /// Not the previous post's author and not a recent author
    pub fn author_available(&self, persona: &Persona) -> bool {
        self.last_author_id != Some(persona.id) && !self.recent_author_ids.contains(&persona.id)
    }

    pub fn keyword_is_fresh(&self, keyword_id: &Uuid) -> bool {
        !self.seen_keyword_ids.contains(keyword_id)
    }

    pub fn title_is_fresh(&self, title: &str) -> bool {
        !self.seen_titles.contains(title)
    }

    pub fn record_subreddit(&mut self, subreddit_id: Uuid) {
        *self.subreddit_usage.entry(subreddit_id).or_insert(0) += 1;
        self.last_subreddit_id = Some(subreddit_id);
    }

    pub fn record_author(&mut self, persona_id: Uuid) {
        self.last_author_id = Some(persona_id);
    }

    pub fn record_keywords<I>(&mut self, keyword_ids: I)
    where
        I: IntoIterator<Item = Uuid>,
    {
        self.seen_keyword_ids.extend(keyword_ids);
    }

    pub fn record_title(&mut self, title: &str) {
        self.seen_titles.insert(title.to_string());
    }
}
