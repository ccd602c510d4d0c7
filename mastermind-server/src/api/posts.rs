use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{ApiError, ApiResult},
    generator::ids::parse_post_id,
    state::AppState,
    views,
};
use mastermind_types::ThreadView;

/// GET /posts/:id/thread - A post and its comment tree
pub async fn get_thread(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> ApiResult<Json<ThreadView>> {
    if parse_post_id(&post_id).is_none() {
        return Err(ApiError::BadRequest(format!("Invalid post id: {}", post_id)));
    }
    let post_id = post_id.trim();

    views::load_thread(&state.db, post_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Post {} not found", post_id)))
}
