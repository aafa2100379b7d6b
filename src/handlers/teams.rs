use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::user_id;
use crate::models::{NewTeam, Team};
use crate::services::teams;
use crate::state::AppState;

// GET /api/teams
pub async fn list_teams(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Team>>, AppError> {
    let teams = queries::list_teams(&*state.conn()?)?;
    Ok(Json(teams))
}

// POST /api/teams
pub async fn create_team(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new_team): Json<NewTeam>,
) -> Result<Json<Team>, AppError> {
    let user = user_id(&headers)?;
    let team = teams::create_team(&*state.conn()?, &user, new_team)?;
    Ok(Json(team))
}

// GET /api/teams/:id
pub async fn get_team(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Team>, AppError> {
    let team = queries::get_team(&*state.conn()?, &id)?;
    team.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("team {id}")))
}

// POST /api/teams/:id/join
pub async fn join_team(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Team>, AppError> {
    let user = user_id(&headers)?;
    let team = teams::join_team(&*state.conn()?, &id, &user)?;
    Ok(Json(team))
}

// GET /api/me/teams
pub async fn my_teams(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Team>>, AppError> {
    let user = user_id(&headers)?;
    let teams = queries::list_teams_for_user(&*state.conn()?, &user)?;
    Ok(Json(teams))
}
