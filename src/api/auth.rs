use actix_web::{web, HttpResponse};

use crate::{
    services::auth_service::{TokenKeys, TokenRequest, TokenResponse},
    utils::AppResult,
};

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed, time-boxed token", body = TokenResponse)
    )
)]
pub async fn issue_token(
    keys: web::Data<TokenKeys>,
    request: web::Json<TokenRequest>,
) -> AppResult<HttpResponse> {
    log::info!("🔐 POST /jwt - email: {}", request.email);

    let token = keys
        .issue(&request.email)
        .inspect_err(|e| log::error!("❌ Failed to issue token for {}: {}", request.email, e))?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
