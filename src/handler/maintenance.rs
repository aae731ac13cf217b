use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::maintenancedb::MaintenanceExt,
    dtos::{
        maintenancedtos::{
            CreateMaintenanceDto, MaintenanceDetailResponseDto, MaintenanceListResponseDto,
            MaintenanceQueryDto, MaintenanceResponseDto, UpdateMaintenanceDto,
        },
        userdtos::Response,
    },
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn maintenance_handler() -> Router {
    Router::new()
        .route("/", get(get_requests).post(create_request))
        .route("/:request_id", get(get_request).put(update_request))
        .route(
            "/:request_id",
            delete(delete_request).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager])
            })),
        )
}

pub async fn get_requests(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Query(query): Query<MaintenanceQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant_id = if caller.user.role == UserRole::Tenant {
        Some(caller.user.id)
    } else {
        None
    };

    let requests = app_state
        .db_client
        .get_maintenance_requests(tenant_id, query.status, query.priority)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MaintenanceListResponseDto {
        status: "success".to_string(),
        results: requests.len(),
        requests,
    }))
}

pub async fn get_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let request = app_state
        .db_client
        .get_maintenance_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Maintenance request not found"))?;

    if caller.user.role == UserRole::Tenant && request.tenant_id != caller.user.id {
        return Err(HttpError::forbidden(
            ErrorMessage::PermissionDenied.to_string(),
        ));
    }

    Ok(Json(MaintenanceDetailResponseDto {
        status: "success".to_string(),
        request,
    }))
}

pub async fn create_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateMaintenanceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let tenant_id = if caller.user.role == UserRole::Tenant {
        caller.user.id
    } else {
        body.tenant_id
            .ok_or_else(|| HttpError::bad_request("tenant_id is required"))?
    };

    let request = app_state
        .db_client
        .save_maintenance_request(tenant_id, &body.title, &body.description, body.priority)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(MaintenanceResponseDto {
        status: "success".to_string(),
        message: "Maintenance request submitted".to_string(),
        request,
    }))
}

pub async fn update_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<UpdateMaintenanceDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let request = if caller.user.role == UserRole::Tenant {
        let existing = app_state
            .db_client
            .get_maintenance_request(request_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
            .ok_or_else(|| HttpError::not_found("Maintenance request not found"))?;

        if existing.tenant_id != caller.user.id {
            return Err(HttpError::forbidden(
                ErrorMessage::PermissionDenied.to_string(),
            ));
        }

        app_state
            .db_client
            .update_maintenance_request_details(
                request_id,
                body.title.as_deref(),
                body.description.as_deref(),
            )
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    } else {
        app_state
            .db_client
            .update_maintenance_request(
                request_id,
                body.title.as_deref(),
                body.description.as_deref(),
                body.priority,
                body.status,
                body.staff_notes.as_deref(),
            )
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
    };

    let request = request.ok_or_else(|| HttpError::not_found("Maintenance request not found"))?;

    Ok(Json(MaintenanceResponseDto {
        status: "success".to_string(),
        message: "Maintenance request updated".to_string(),
        request,
    }))
}

pub async fn delete_request(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(request_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_maintenance_request(request_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Maintenance request not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Maintenance request deleted".to_string(),
    }))
}
