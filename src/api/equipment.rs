//! Equipment endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, EquipmentQuery, UpdateEquipment},
        Equipment, EquipmentDetails, EquipmentStatus, UsageLog,
    },
};

use super::CurrentUser;

/// Manual status override request
#[derive(Deserialize, ToSchema)]
pub struct OverrideStatusRequest {
    pub status: EquipmentStatus,
}

/// List equipment with optional search and status filter (public)
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID with its manager resolved (public)
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EquipmentDetails>> {
    let details = state.services.equipment.get_details(&id).await?;
    Ok(Json(details))
}

/// Usage history of one equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}/logs",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Usage logs, most recent first", body = Vec<UsageLog>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_usage_logs(
    State(state): State<crate::AppState>,
    CurrentUser(_actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<UsageLog>>> {
    let logs = state.services.usage_logs.list_for_equipment(&id).await?;
    Ok(Json(logs))
}

/// Register new equipment (ADMIN)
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid request or duplicate code"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(&actor, data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment identity fields (ADMIN)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(&actor, &id, data).await?;
    Ok(Json(equipment))
}

/// Manual status override: AVAILABLE, BROKEN or MAINTENANCE (ADMIN)
#[utoipa::path(
    put,
    path = "/equipment/{id}/status",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = OverrideStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Equipment),
        (status = 400, description = "Status cannot be set manually"),
        (status = 403, description = "Caller is not an admin"),
        (status = 422, description = "Equipment is currently checked out")
    )
)]
pub async fn override_status(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<OverrideStatusRequest>,
) -> AppResult<Json<Equipment>> {
    let equipment = state
        .services
        .equipment
        .override_status(&actor, &id, request.status)
        .await?;
    Ok(Json(equipment))
}

/// Liquidate equipment (ADMIN)
#[utoipa::path(
    post,
    path = "/equipment/{id}/liquidate",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment liquidated", body = Equipment),
        (status = 403, description = "Caller is not an admin"),
        (status = 422, description = "Equipment still booked or checked out")
    )
)]
pub async fn liquidate_equipment(
    State(state): State<crate::AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.liquidate(&actor, &id).await?;
    Ok(Json(equipment))
}
