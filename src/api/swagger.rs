use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Research Center API",
        version = "1.0.0",
        description = "Paper catalog, submissions, user profiles and bookmarks.\n\n**Authentication:** only `GET /user` requires a JWT Bearer token, obtained from `POST /jwt`."
    ),
    paths(
        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Auth
        crate::api::auth::issue_token,

        // Users
        crate::api::users::get_user,
        crate::api::users::update_profile,
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::delete_user,
        crate::api::users::change_role,
        crate::api::users::count_users,

        // Papers
        crate::api::papers::count_papers,
        crate::api::papers::list_page,
        crate::api::papers::get_paper,
        crate::api::papers::list_papers,
        crate::api::papers::submit_paper,
        crate::api::papers::publish_paper,
        crate::api::papers::unpublish_paper,
        crate::api::papers::list_unpublished,
        crate::api::papers::search_papers,
        crate::api::papers::recent_papers,
        crate::api::papers::papers_by_category,

        // Saves
        crate::api::saves::save_item,
        crate::api::saves::list_saved,
        crate::api::saves::delete_saved,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::users::UserCountResponse,
            crate::api::papers::PaperCountResponse,
            crate::services::auth_service::TokenRequest,
            crate::services::auth_service::TokenResponse,
            crate::models::ProfileUpdate,
            crate::models::RoleChange,
            crate::models::PaperStatus,
        )
    ),
    tags(
        (name = "Health", description = "Liveness, database ping and request counters."),
        (name = "Auth", description = "Token issuance for the protected profile lookup."),
        (name = "Users", description = "Profiles, roles and registration. Updates create the user when the email is unknown."),
        (name = "Papers", description = "Catalog browsing, search, pagination, submission and publishing."),
        (name = "Saves", description = "Per-user bookmarks."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
