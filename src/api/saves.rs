use actix_web::{web, HttpResponse};

use crate::{
    api::users::EmailQuery,
    database::Store,
    models::{ensure_storable, parse_object_id, NewSavedItem, SavedItem},
    utils::AppResult,
};

/// POST /saves - Salva um paper nos favoritos do usuário
#[utoipa::path(
    post,
    path = "/saves",
    tag = "Saves",
    responses(
        (status = 200, description = "Insert result"),
        (status = 400, description = "Body without user_email")
    )
)]
pub async fn save_item(
    store: web::Data<dyn Store>,
    request: web::Json<NewSavedItem>,
) -> AppResult<HttpResponse> {
    let item = SavedItem::from(request.into_inner());
    log::info!(
        "🔖 POST /saves - user: {}, paper: {}",
        item.user_email,
        item.paper_id.as_deref().unwrap_or("N/A")
    );
    ensure_storable(&item)?;

    let outcome = store
        .insert_saved(item)
        .await
        .inspect_err(|e| log::error!("❌ Failed to save item: {}", e))?;

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/saves",
    tag = "Saves",
    params(EmailQuery),
    responses(
        (status = 200, description = "Saved items owned by the email")
    )
)]
pub async fn list_saved(
    store: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> AppResult<HttpResponse> {
    log::info!("📋 GET /saves - user: {}", query.email);

    let items = store
        .saved_for(&query.email)
        .await
        .inspect_err(|e| log::error!("❌ Failed to list saves for {}: {}", query.email, e))?;

    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    delete,
    path = "/saves/{id}",
    tag = "Saves",
    params(
        ("id" = String, Path, description = "Saved item ObjectId")
    ),
    responses(
        (status = 200, description = "Delete result"),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_saved(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("🗑️  DELETE /saves/{}", id);

    let outcome = store
        .delete_saved(parse_object_id(&id)?)
        .await
        .inspect_err(|e| log::error!("❌ Failed to delete saved item {}: {}", id, e))?;

    Ok(HttpResponse::Ok().json(outcome))
}
