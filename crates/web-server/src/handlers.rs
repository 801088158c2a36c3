use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_types::{normalize, normalize_all, Resource, Row};
use database::QueryDescriptor;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Envelope for `GET /animals`.
#[derive(Debug, Serialize)]
pub struct AnimalsEnvelope {
    pub animals: Vec<Row>,
}

/// Envelope for every sub-resource listing.
#[derive(Debug, Serialize)]
pub struct ItemsEnvelope {
    pub items: Vec<Row>,
}

/// The consolidated view of one animal's latest records. Parts with no data
/// are omitted, so an animal with no history serializes as `{}`.
///
/// Replaces the older flat summary (`ultima_avaliacao`, `score_corporal`,
/// `indice_saude`, `observacoes`): those now come from `latest_assessment`,
/// the newest `animal_avaliacoes` row with its `data`, `score`, `nota` and
/// `observacao`.
#[derive(Debug, Default, Serialize)]
pub struct AnimalSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_weighing: Option<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_immunization: Option<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_assessment: Option<Row>,
}

/// # GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "API Kaniu rodando 🚀" }))
}

/// # GET /health
/// Reports whether the data source can currently serve reads.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.data_source.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok", "database": "up" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed.");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": "down" })),
            )
        }
    }
}

/// # GET /animals
pub async fn list_animals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnimalsEnvelope>, AppError> {
    let query = QueryDescriptor::new(Resource::Animals).limit(state.max_animals);
    let rows = state.data_source.fetch(&query).await?;
    Ok(Json(AnimalsEnvelope {
        animals: normalize_all(rows),
    }))
}

/// # GET /animals/:animal_id
pub async fn get_animal(
    Path(animal_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Row>, AppError> {
    let query = QueryDescriptor::new(Resource::Animals).by_key(animal_id);
    let animal = state
        .data_source
        .fetch_one(&query)
        .await?
        .ok_or_else(|| AppError::NotFound("Animal não encontrado".to_string()))?;
    Ok(Json(normalize(animal)))
}

/// # GET /animals/:animal_id/resumo
/// Latest weighing, immunization and assessment, read one after the other.
pub async fn get_animal_summary(
    Path(animal_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnimalSummary>, AppError> {
    let latest = |resource: Resource| {
        QueryDescriptor::new(resource)
            .by_key(animal_id.as_str())
            .newest_first()
    };

    let summary = AnimalSummary {
        latest_weighing: state.data_source.fetch_one(&latest(Resource::Weighings)).await?,
        latest_immunization: state
            .data_source
            .fetch_one(&latest(Resource::Immunizations))
            .await?,
        latest_assessment: state.data_source.fetch_one(&latest(Resource::Assessments)).await?,
    };
    Ok(Json(summary))
}

/// # GET /animals/:animal_id/:resource
/// Lists one kind of sub-record (`eventos`, `avaliacoes`, `pesagens`,
/// `imunizacoes`, `tratamentos`, `arquivos`), most recent first.
pub async fn list_animal_records(
    Path((animal_id, segment)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ItemsEnvelope>, AppError> {
    let resource: Resource = segment.parse()?;
    if !Resource::ANIMAL_CHILDREN.contains(&resource) {
        return Err(AppError::NotFound(format!("Unknown sub-resource: {segment}")));
    }

    let query = QueryDescriptor::new(resource).by_key(animal_id).newest_first();
    let items = state.data_source.fetch(&query).await?;
    Ok(Json(ItemsEnvelope { items }))
}
