use axum::{extract::State, Json};

use crate::{
    api::{ApiError, ApiResult},
    error::StoreError,
    state::AppState,
    store::{ContentStore, SqliteContentStore},
};
use mastermind_types::InputsOverview;

/// GET /inputs - The company and the pools the generator draws from
pub async fn get_inputs(State(state): State<AppState>) -> ApiResult<Json<InputsOverview>> {
    let store = SqliteContentStore::new(state.db.clone());
    let overview = load_overview(&store)
        .map_err(|e| ApiError::InternalError(format!("Failed to load inputs: {}", e)))?;
    Ok(Json(overview))
}

fn load_overview(store: &impl ContentStore) -> Result<InputsOverview, StoreError> {
    let Some(company) = store.first_company()? else {
        return Ok(InputsOverview {
            company: None,
            personas: Vec::new(),
            subreddits: Vec::new(),
            keywords: Vec::new(),
        });
    };

    Ok(InputsOverview {
        personas: store.personas(&company.id)?,
        subreddits: store.subreddits(&company.id)?,
        keywords: store.keywords(&company.id)?,
        company: Some(company),
    })
}
