use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    database::Store,
    models::{ensure_storable, parse_object_id, NewUser, ProfileUpdate, RoleChange, User},
    services::auth_service::Claims,
    utils::{AppError, AppResult},
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserCountResponse {
    #[serde(rename = "totalUser")]
    pub total_user: u64,
}

/// GET /user?email= - Perfil do usuário autenticado (JWT)
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    params(EmailQuery),
    responses(
        (status = 200, description = "The user document, or null"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token belongs to another email")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_user(
    claims: web::ReqData<Claims>,
    store: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> AppResult<HttpResponse> {
    log::info!("👤 GET /user - email: {}", query.email);

    if claims.email != query.email {
        log::warn!("⛔ Token for {} used to read {}", claims.email, query.email);
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }

    let user: Option<User> = store
        .find_user_by_email(&query.email)
        .await
        .inspect_err(|e| log::error!("❌ Failed to get user {}: {}", query.email, e))?;

    Ok(HttpResponse::Ok().json(user))
}

/// PATCH /user - Atualiza perfil (cria se o email não existir)
#[utoipa::path(
    patch,
    path = "/user",
    tag = "Users",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Update result; upsertedId set when a user was created")
    )
)]
pub async fn update_profile(
    store: web::Data<dyn Store>,
    request: web::Json<ProfileUpdate>,
) -> AppResult<HttpResponse> {
    log::info!("🔧 PATCH /user - email: {}", request.email);

    let outcome = store
        .upsert_profile(&request)
        .await
        .inspect_err(|e| log::error!("❌ Failed to update profile {}: {}", request.email, e))?;

    if outcome.upserted_id.is_some() {
        log::warn!("⚠️ No user with email {}, created a new one", request.email);
    }

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Insert result")
    )
)]
pub async fn create_user(
    store: web::Data<dyn Store>,
    request: web::Json<NewUser>,
) -> AppResult<HttpResponse> {
    let user = User::from(request.into_inner());
    log::info!("📝 POST /users - email: {}", user.email().unwrap_or("N/A"));
    ensure_storable(&user)?;

    let outcome = store
        .insert_user(user)
        .await
        .inspect_err(|e| log::error!("❌ Failed to create user: {}", e))?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users")
    )
)]
pub async fn list_users(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    log::info!("📋 GET /users");

    let users = store
        .list_users()
        .await
        .inspect_err(|e| log::error!("❌ Failed to list users: {}", e))?;

    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ObjectId")
    ),
    responses(
        (status = 200, description = "Delete result"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", id);

    let outcome = store
        .delete_user(parse_object_id(&id)?)
        .await
        .inspect_err(|e| log::error!("❌ Failed to delete user {}: {}", id, e))?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// PATCH /users/role - Troca o status (papel) do usuário
#[utoipa::path(
    patch,
    path = "/users/role",
    tag = "Users",
    request_body = RoleChange,
    responses(
        (status = 200, description = "Update result")
    )
)]
pub async fn change_role(
    store: web::Data<dyn Store>,
    request: web::Json<RoleChange>,
) -> AppResult<HttpResponse> {
    log::info!("🎖️  PATCH /users/role - {} -> {}", request.email, request.status);

    let outcome = store
        .upsert_user_status(&request.email, &request.status)
        .await
        .inspect_err(|e| log::error!("❌ Failed to change role for {}: {}", request.email, e))?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/totalUser",
    tag = "Users",
    responses(
        (status = 200, description = "Estimated number of users", body = UserCountResponse)
    )
)]
pub async fn count_users(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    let total_user = store
        .count_users()
        .await
        .inspect_err(|e| log::error!("❌ Failed to count users: {}", e))?;

    Ok(HttpResponse::Ok().json(UserCountResponse { total_user }))
}
