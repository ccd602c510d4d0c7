use chrono::{DateTime, Utc};
use rand::Rng;

use mastermind_types::{CreatedCounts, GenerateWeekResponse, WeekSummary};

use crate::error::GenerateError;
use crate::generator::{GenerationInputs, WeekGenerator};
use crate::store::ContentStore;

/// Loads generation inputs, runs the generator and persists the result
pub struct WeekService<S> {
    store: S,
    generator: WeekGenerator,
}

impl<S: ContentStore> WeekService<S> {
    pub fn new(store: S, generator: WeekGenerator) -> Self {
        Self { store, generator }
    }

    /// Generate and store the week after the latest one.
    ///
    /// Stages are written week, posts, comments. A failing stage returns at
    /// once and leaves earlier stages committed.
    pub fn generate_next_week<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<GenerateWeekResponse, GenerateError> {
        let company = self.store.first_company()?.ok_or(GenerateError::NotFound)?;

        let personas = self.store.personas(&company.id)?;
        let subreddits = self.store.subreddits(&company.id)?;
        let keywords = self.store.keywords(&company.id)?;
        let prior_week = self.store.latest_week(&company.id)?;
        let recent_posts = self
            .store
            .recent_posts(&company.id, self.generator.config().history_window)?;

        let inputs = GenerationInputs {
            company: Some(&company),
            personas: &personas,
            subreddits: &subreddits,
            keywords: &keywords,
            prior_week: prior_week.as_ref(),
            recent_posts: &recent_posts,
        };
        let generated = self.generator.generate(&inputs, now, rng)?;

        self.store.insert_week(&generated.week)?;
        self.store.insert_posts(&generated.posts)?;
        self.store.insert_comments(&generated.comments)?;

        tracing::info!(
            "Generated week {} for {}: {} posts, {} comments",
            generated.week.week_number,
            company.name,
            generated.posts.len(),
            generated.comments.len()
        );

        Ok(GenerateWeekResponse {
            ok: true,
            week: WeekSummary::from(&generated.week),
            created: CreatedCounts {
                posts: generated.posts.len(),
                comments: generated.comments.len(),
            },
        })
    }
}
