use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::models::{FollowResponse, OwnProfileResponse, ProfileListQuery, ProfileListResponse, ProfileSettingsRequest};
use crate::routes::{error_response, storage_error, validation_error, AppState, Viewer};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile", web::get().to(own_profile))
        .route("/profile/settings", web::put().to(profile_settings))
        .route("/profiles", web::get().to(profile_list))
        .route("/users/{user_id}", web::get().to(user_profile))
        .route("/users/{user_id}/follow", web::post().to(follow))
        .route("/users/{user_id}/follow", web::delete().to(unfollow));
}

/// GET /api/v1/profile
async fn own_profile(state: web::Data<AppState>, viewer: Viewer) -> impl Responder {
    let user = match state.postgres.get_user(viewer.id).await {
        Ok(user) => user,
        Err(e) => return storage_error("Failed to fetch account", e),
    };

    match state.postgres.get_profile_card(viewer.id).await {
        Ok(profile) => HttpResponse::Ok().json(OwnProfileResponse { user, profile }),
        Err(e) => storage_error("Failed to fetch profile", e),
    }
}

/// PUT /api/v1/profile/settings
async fn profile_settings(
    state: web::Data<AppState>,
    viewer: Viewer,
    req: web::Json<ProfileSettingsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for profile settings of {}: {:?}", viewer.id, errors);
        return validation_error(errors);
    }

    match state.postgres.update_profile(viewer.id, &req).await {
        Ok(profile) => {
            tracing::info!("Updated profile {}", viewer.id);
            HttpResponse::Ok().json(profile)
        }
        Err(e) => storage_error("Failed to update profile", e),
    }
}

/// Browse profiles
///
/// GET /api/v1/profiles?name={name}&username={username}&followed=true
///
/// Applies the viewer's stored sex and age preferences, then the optional
/// free-text narrowing. A repeated parameter keeps its last value.
async fn profile_list(
    state: web::Data<AppState>,
    viewer: Viewer,
    query: web::Query<Vec<(String, String)>>,
) -> impl Responder {
    let query = ProfileListQuery::from_pairs(query.into_inner());

    let preferences = match state.postgres.get_preferences(viewer.id).await {
        Ok(preferences) => preferences,
        Err(e) => return storage_error("Failed to fetch preferences", e),
    };

    let followed = if query.followed_only() {
        match state.postgres.followed_ids(viewer.id).await {
            Ok(ids) => Some(ids),
            Err(e) => return storage_error("Failed to fetch followed profiles", e),
        }
    } else {
        None
    };

    let candidates = match state
        .postgres
        .query_candidates(viewer.id, preferences.sex_preference)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return storage_error("Failed to query candidates", e),
    };

    let filter = state
        .matcher
        .build_filter(&preferences, &query, followed, Utc::now().date_naive());
    let result = state.matcher.find_profiles(&filter, candidates);

    tracing::info!(
        "Returning {} profiles for user {} (from {} candidates)",
        result.profiles.len(),
        viewer.id,
        result.total_candidates
    );

    HttpResponse::Ok().json(ProfileListResponse {
        total_results: result.profiles.len(),
        profiles: result.profiles,
    })
}

/// GET /api/v1/users/{user_id}
async fn user_profile(
    state: web::Data<AppState>,
    _viewer: Viewer,
    path: web::Path<i64>,
) -> impl Responder {
    match state.postgres.get_profile_card(path.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => storage_error("Failed to fetch profile", e),
    }
}

/// POST /api/v1/users/{user_id}/follow
async fn follow(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
) -> impl Responder {
    let target_id = path.into_inner();
    if target_id == viewer.id {
        return error_response(StatusCode::BAD_REQUEST, "Invalid target", "you cannot follow yourself");
    }

    if let Err(e) = state.postgres.follow(viewer.id, target_id).await {
        return storage_error("Failed to follow", e);
    }

    follow_state(&state, target_id, true).await
}

/// DELETE /api/v1/users/{user_id}/follow
async fn unfollow(
    state: web::Data<AppState>,
    viewer: Viewer,
    path: web::Path<i64>,
) -> impl Responder {
    let target_id = path.into_inner();
    if target_id == viewer.id {
        return error_response(StatusCode::BAD_REQUEST, "Invalid target", "you cannot follow yourself");
    }

    match state.postgres.unfollow(viewer.id, target_id).await {
        Ok(removed) => tracing::debug!("Unfollow {} -> {} (existed: {})", viewer.id, target_id, removed),
        Err(e) => return storage_error("Failed to unfollow", e),
    }

    follow_state(&state, target_id, false).await
}

async fn follow_state(state: &AppState, target_id: i64, following: bool) -> HttpResponse {
    match state.postgres.follower_count(target_id).await {
        Ok(follower_count) => HttpResponse::Ok().json(FollowResponse {
            user_id: target_id,
            following,
            follower_count,
        }),
        Err(e) => storage_error("Failed to count followers", e),
    }
}
