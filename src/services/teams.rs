use chrono::{SubsecRound, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::models::{NewTeam, Team};

#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error("team not found: {0}")]
    NotFound(String),

    #[error("team {0} is full")]
    TeamFull(String),

    #[error("invalid team: {0}")]
    Invalid(String),

    #[error("team store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub fn create_team(conn: &Connection, user_id: &str, new_team: NewTeam) -> Result<Team, TeamError> {
    if new_team.name.trim().is_empty() {
        return Err(TeamError::Invalid("team name must not be empty".to_string()));
    }
    if new_team.max_players == 0 {
        return Err(TeamError::Invalid("max_players must be at least 1".to_string()));
    }

    let team = Team {
        id: format!("team-{}", uuid::Uuid::new_v4()),
        name: new_team.name,
        sport: new_team.sport,
        city: new_team.city,
        description: new_team.description,
        members: vec![user_id.to_string()],
        created_by: user_id.to_string(),
        created_at: Utc::now().naive_utc().trunc_subsecs(0),
        max_players: new_team.max_players,
        skill_level: new_team.skill_level,
        practice_schedule: new_team.practice_schedule,
        contact_email: new_team.contact_email,
        logo: new_team.logo,
    };

    queries::insert_team(conn, &team)?;
    tracing::info!(team_id = %team.id, user_id, "team created");
    Ok(team)
}

/// Adds the user to the team. Joining a team you are already in is a no-op.
pub fn join_team(conn: &Connection, team_id: &str, user_id: &str) -> Result<Team, TeamError> {
    let team = queries::get_team(conn, team_id)?
        .ok_or_else(|| TeamError::NotFound(team_id.to_string()))?;

    if team.members.iter().any(|m| m == user_id) {
        return Ok(team);
    }
    if team.is_full() {
        return Err(TeamError::TeamFull(team_id.to_string()));
    }

    queries::add_team_member(conn, team_id, user_id)?;
    tracing::info!(team_id, user_id, "joined team");

    queries::get_team(conn, team_id)?.ok_or_else(|| TeamError::NotFound(team_id.to_string()))
}
