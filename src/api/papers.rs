use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    database::Store,
    models::{ensure_storable, parse_object_id, NewPaper, Paper, PaperStatus},
    services::paper_service::{self, PageQuery},
    utils::AppResult,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitleQuery {
    /// Substring to look for, case-insensitive
    pub title: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Exact category, or "all"
    pub category: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaperCountResponse {
    #[serde(rename = "totalProducts")]
    pub total_products: u64,
}

// ==================== PAGINATION ====================

#[utoipa::path(
    get,
    path = "/totalProducts",
    tag = "Papers",
    responses(
        (status = 200, description = "Estimated number of papers", body = PaperCountResponse)
    )
)]
pub async fn count_papers(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    let total_products = store
        .count_papers()
        .await
        .inspect_err(|e| log::error!("❌ Failed to count papers: {}", e))?;

    Ok(HttpResponse::Ok().json(PaperCountResponse { total_products }))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Papers",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of papers in natural order")
    )
)]
pub async fn list_page(
    store: web::Data<dyn Store>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let window = query.window();
    log::info!("📄 GET /products - skip: {}, limit: {}", window.skip, window.limit);

    let papers = store
        .papers_page(window.skip, window.limit)
        .await
        .inspect_err(|e| log::error!("❌ Failed to fetch page: {}", e))?;

    Ok(HttpResponse::Ok().json(papers))
}

// ==================== CATALOG ====================

/// GET /allpapers/{id} - Answers a single-element array, `[null]` when missing.
#[utoipa::path(
    get,
    path = "/allpapers/{id}",
    tag = "Papers",
    params(
        ("id" = String, Path, description = "Paper ObjectId")
    ),
    responses(
        (status = 200, description = "Single-element array with the paper or null"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn get_paper(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("📄 GET /allpapers/{}", id);

    let paper: Option<Paper> = store
        .find_paper(parse_object_id(&id)?)
        .await
        .inspect_err(|e| log::error!("❌ Failed to get paper {}: {}", id, e))?;

    if paper.is_none() {
        log::warn!("⚠️ Paper {} not found", id);
    }

    Ok(HttpResponse::Ok().json([paper]))
}

#[utoipa::path(
    get,
    path = "/allpapers",
    tag = "Papers",
    responses(
        (status = 200, description = "All papers")
    )
)]
pub async fn list_papers(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    log::info!("📚 GET /allpapers");

    let papers = store
        .list_papers()
        .await
        .inspect_err(|e| log::error!("❌ Failed to list papers: {}", e))?;

    Ok(HttpResponse::Ok().json(papers))
}

#[utoipa::path(
    post,
    path = "/allpapers",
    tag = "Papers",
    responses(
        (status = 200, description = "Insert result; status defaults to unpublished")
    )
)]
pub async fn submit_paper(
    store: web::Data<dyn Store>,
    request: web::Json<NewPaper>,
) -> AppResult<HttpResponse> {
    let paper = Paper::from(request.into_inner());
    log::info!(
        "📝 POST /allpapers - title: {}, category: {}, date: {}, status: {}",
        paper.title().unwrap_or("N/A"),
        paper.category().unwrap_or("N/A"),
        paper.published_date().unwrap_or("N/A"),
        paper.status().unwrap_or("N/A")
    );
    ensure_storable(&paper)?;

    let outcome = store
        .insert_paper(paper)
        .await
        .inspect_err(|e| log::error!("❌ Failed to submit paper: {}", e))?;

    Ok(HttpResponse::Ok().json(outcome))
}

async fn set_status(
    store: &dyn Store,
    id: &str,
    status: PaperStatus,
) -> AppResult<HttpResponse> {
    log::info!("🔁 PATCH /allpapers/{} - status: {}", id, status);

    let outcome = store
        .set_paper_status(parse_object_id(id)?, status)
        .await
        .inspect_err(|e| log::error!("❌ Failed to set status on {}: {}", id, e))?;

    if outcome.upserted_id.is_some() {
        log::warn!("⚠️ Paper {} did not exist, created a bare document", id);
    }

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    patch,
    path = "/allpapers/{id}/publish",
    tag = "Papers",
    params(
        ("id" = String, Path, description = "Paper ObjectId")
    ),
    responses(
        (status = 200, description = "Update result"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn publish_paper(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    set_status(store.get_ref(), &path, PaperStatus::Published).await
}

#[utoipa::path(
    patch,
    path = "/allpapers/{id}/unpublish",
    tag = "Papers",
    params(
        ("id" = String, Path, description = "Paper ObjectId")
    ),
    responses(
        (status = 200, description = "Update result"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn unpublish_paper(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    set_status(store.get_ref(), &path, PaperStatus::Unpublished).await
}

#[utoipa::path(
    get,
    path = "/unpublished",
    tag = "Papers",
    responses(
        (status = 200, description = "Papers waiting for an administrator")
    )
)]
pub async fn list_unpublished(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    log::info!("🕓 GET /unpublished");

    let papers = store
        .papers_with_status(PaperStatus::Unpublished)
        .await
        .inspect_err(|e| log::error!("❌ Failed to list unpublished papers: {}", e))?;

    Ok(HttpResponse::Ok().json(papers))
}

// ==================== DISCOVERY ====================

#[utoipa::path(
    get,
    path = "/search",
    tag = "Papers",
    params(TitleQuery),
    responses(
        (status = 200, description = "Papers whose title contains the fragment")
    )
)]
pub async fn search_papers(
    store: web::Data<dyn Store>,
    query: web::Query<TitleQuery>,
) -> AppResult<HttpResponse> {
    let fragment = query.title.as_deref().unwrap_or_default();
    log::info!("🔍 GET /search - title: {}", fragment);

    let papers = store
        .search_papers(fragment)
        .await
        .inspect_err(|e| log::error!("❌ Search for '{}' failed: {}", fragment, e))?;

    Ok(HttpResponse::Ok().json(papers))
}

#[utoipa::path(
    get,
    path = "/recent",
    tag = "Papers",
    responses(
        (status = 200, description = "All papers, newest published_date first")
    )
)]
pub async fn recent_papers(store: web::Data<dyn Store>) -> AppResult<HttpResponse> {
    log::info!("🆕 GET /recent");

    let papers = store
        .recent_papers()
        .await
        .inspect_err(|e| log::error!("❌ Failed to list recent papers: {}", e))?;

    Ok(HttpResponse::Ok().json(papers))
}

#[utoipa::path(
    get,
    path = "/category",
    tag = "Papers",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Papers in the category, or all of them for \"all\"")
    )
)]
pub async fn papers_by_category(
    store: web::Data<dyn Store>,
    query: web::Query<CategoryQuery>,
) -> AppResult<HttpResponse> {
    let category = paper_service::category_filter(query.category.as_deref());
    log::info!("🏷️  GET /category - {}", category.unwrap_or(paper_service::CATEGORY_WILDCARD));

    let papers = store
        .papers_in_category(category)
        .await
        .inspect_err(|e| log::error!("❌ Failed to list category: {}", e))?;

    Ok(HttpResponse::Ok().json(papers))
}
