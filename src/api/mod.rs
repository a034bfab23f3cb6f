pub mod auth;
pub mod health;
pub mod metrics;
pub mod papers;
pub mod saves;
pub mod swagger;
pub mod users;


use actix_web::{web, HttpResponse};

use crate::middleware::AuthGate;
use crate::utils::AppError;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("Hello from Our Research Center")
}

pub async fn no_route() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("No routes Found")
}

/// Registers every route. Expects `web::Data<dyn Store>` and
/// `web::Data<TokenKeys>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig, auth: AuthGate) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(index))
    // Health & Metrics
    .route("/health", web::get().to(health::health_check))
    .route("/metrics", web::get().to(metrics::get_metrics))
    // Auth
    .route("/jwt", web::post().to(auth::issue_token))
    // Pagination
    .route("/totalProducts", web::get().to(papers::count_papers))
    .route("/products", web::get().to(papers::list_page))
    // Users
    .service(
        web::resource("/user")
            .route(web::get().to(users::get_user).wrap(auth))
            .route(web::patch().to(users::update_profile)),
    )
    .route("/users", web::get().to(users::list_users))
    .route("/users", web::post().to(users::create_user))
    .route("/users/role", web::patch().to(users::change_role))
    .route("/users/{id}", web::delete().to(users::delete_user))
    .route("/totalUser", web::get().to(users::count_users))
    // Papers
    .route("/allpapers", web::get().to(papers::list_papers))
    .route("/allpapers", web::post().to(papers::submit_paper))
    .route("/allpapers/{id}", web::get().to(papers::get_paper))
    .route("/allpapers/{id}/publish", web::patch().to(papers::publish_paper))
    .route("/allpapers/{id}/unpublish", web::patch().to(papers::unpublish_paper))
    .route("/unpublished", web::get().to(papers::list_unpublished))
    .route("/search", web::get().to(papers::search_papers))
    .route("/recent", web::get().to(papers::recent_papers))
    .route("/category", web::get().to(papers::papers_by_category))
    // Saves
    .route("/saves", web::post().to(saves::save_item))
    .route("/saves", web::get().to(saves::list_saved))
    .route("/saves/{id}", web::delete().to(saves::delete_saved))
    // Catch-all, must stay last
    .route("/{tail:.*}", web::get().to(no_route));
}
