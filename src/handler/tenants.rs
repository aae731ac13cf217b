use std::sync::Arc;

use axum::{
    extract::Path,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::{AssignUnitOutcome, UserExt},
    dtos::{
        tenantdtos::{
            AssignUnitDto, CreateTenantDto, CreateTenantResponseDto, TenantDetailResponseDto,
            TenantListResponseDto, TenantResponseDto, UpdateTenantDto,
        },
        userdtos::{FilterUserDto, Response},
    },
    error::HttpError,
    middleware::role_check,
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

const DEFAULT_TENANT_PASSWORD: &str = "password123";

pub fn tenants_handler() -> Router {
    Router::new()
        .route("/", get(get_tenants).post(create_tenant))
        .route("/:tenant_id", get(get_tenant).put(update_tenant))
        .route("/:tenant_id/assign-unit", post(assign_unit))
        .route("/:tenant_id/remove-unit", post(remove_unit))
        .layer(middleware::from_fn(|state, req, next| {
            role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
        }))
}

pub async fn create_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateTenantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let email = match body.email {
        Some(email) => email,
        None => app_state
            .db_client
            .next_tenant_email()
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?,
    };

    let hashed = password::hash(DEFAULT_TENANT_PASSWORD)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let tenant = app_state
        .db_client
        .save_user(
            &email,
            &hashed,
            &body.name,
            UserRole::Tenant,
            body.phone.as_deref(),
            body.address.as_deref(),
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::bad_request("A user with this email already exists")
            }
            other => HttpError::server_error(other.to_string()),
        })?;

    let response = CreateTenantResponseDto {
        status: "success".to_string(),
        message: "Tenant created successfully".to_string(),
        login_email: tenant.email.clone(),
        login_password: DEFAULT_TENANT_PASSWORD.to_string(),
        tenant: FilterUserDto::filter_user(&tenant),
    };

    Ok(Json(response))
}

pub async fn get_tenants(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tenants = app_state
        .db_client
        .get_tenants()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(TenantListResponseDto {
        status: "success".to_string(),
        results: tenants.len(),
        tenants,
    }))
}

pub async fn get_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let tenant = app_state
        .db_client
        .get_tenant(tenant_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Tenant not found"))?;

    Ok(Json(TenantDetailResponseDto {
        status: "success".to_string(),
        tenant,
    }))
}

pub async fn update_tenant(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(tenant_id): Path<Uuid>,
    Json(body): Json<UpdateTenantDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let tenant = app_state
        .db_client
        .update_tenant(
            tenant_id,
            body.name.as_deref(),
            body.phone.as_deref(),
            body.address.as_deref(),
            body.email.as_deref(),
        )
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::bad_request("A user with this email already exists")
            }
            other => HttpError::server_error(other.to_string()),
        })?
        .ok_or_else(|| HttpError::not_found("Tenant not found"))?;

    Ok(Json(TenantResponseDto {
        status: "success".to_string(),
        message: "Tenant updated successfully".to_string(),
        tenant: FilterUserDto::filter_user(&tenant),
    }))
}

pub async fn assign_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(tenant_id): Path<Uuid>,
    Json(body): Json<AssignUnitDto>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = app_state
        .db_client
        .assign_tenant_to_unit(tenant_id, body.unit_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let tenant = match outcome {
        AssignUnitOutcome::Assigned(tenant) => tenant,
        AssignUnitOutcome::UnitNotFound => {
            return Err(HttpError::not_found("Unit not found"));
        }
        AssignUnitOutcome::UnitOccupied => {
            return Err(HttpError::bad_request("Unit is already occupied"));
        }
        AssignUnitOutcome::TenantNotFound => {
            return Err(HttpError::not_found("Tenant not found"));
        }
    };

    Ok(Json(TenantResponseDto {
        status: "success".to_string(),
        message: "Unit assigned successfully".to_string(),
        tenant: FilterUserDto::filter_user(&tenant),
    }))
}

pub async fn remove_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .remove_tenant_from_unit(tenant_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Tenant not found"))?;

    Ok(Json(Response {
        status: "success",
        message: "Unit removed successfully".to_string(),
    }))
}
