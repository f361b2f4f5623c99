use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::MySqlPool;

use crate::core::Result;
use crate::modules::preferences::services::PreferenceService;

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub view_key: String,
    pub payload: serde_json::Value,
    pub updated_at: String,
}

/// GET /preferences/{view_key}
///
/// Returns the saved payload for a view, or 200 with a null payload when
/// nothing has been saved yet (a missing preference is not an error).
pub async fn get_preference(
    view_key: web::Path<String>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = PreferenceService::with_pool(pool.get_ref().clone());

    match service.get(&view_key).await? {
        Some(pref) => Ok(HttpResponse::Ok().json(PreferenceResponse {
            view_key: pref.view_key,
            payload: pref.payload,
            updated_at: pref.updated_at.to_string(),
        })),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({
            "view_key": view_key.into_inner(),
            "payload": null,
        }))),
    }
}

/// PUT /preferences/{view_key}
pub async fn save_preference(
    view_key: web::Path<String>,
    payload: web::Json<serde_json::Value>,
    pool: web::Data<MySqlPool>,
) -> Result<HttpResponse> {
    let service = PreferenceService::with_pool(pool.get_ref().clone());
    service.save(&view_key, payload.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/preferences")
            .route("/{view_key}", web::get().to(get_preference))
            .route("/{view_key}", web::put().to(save_preference)),
    );
}
