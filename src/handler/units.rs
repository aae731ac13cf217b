use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::unitdb::{NewUnit, UnitChanges, UnitExt},
    dtos::{
        unitdtos::{
            CreateUnitDto, UnitDetailResponseDto, UnitListResponseDto, UnitQueryDto,
            UnitResponseDto, UpdateUnitDto,
        },
        userdtos::Response,
    },
    error::HttpError,
    middleware::role_check,
    models::usermodel::UserRole,
    AppState,
};

pub fn units_handler() -> Router {
    Router::new()
        .route("/", get(get_units))
        .route(
            "/",
            post(create_unit).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager, UserRole::Staff])
            })),
        )
        .route("/:unit_id", get(get_unit))
        .route(
            "/:unit_id",
            put(update_unit).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager])
            })),
        )
        .route(
            "/:unit_id",
            delete(delete_unit).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Manager])
            })),
        )
}

pub async fn get_units(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<UnitQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let units = app_state
        .db_client
        .get_units(query.building.as_deref(), query.floor, query.status)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = UnitListResponseDto {
        status: "success".to_string(),
        results: units.len(),
        units,
    };

    Ok(Json(response))
}

pub async fn get_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(unit_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let unit = app_state
        .db_client
        .get_unit(unit_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Unit not found"))?;

    Ok(Json(UnitDetailResponseDto {
        status: "success".to_string(),
        unit,
    }))
}

pub async fn create_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateUnitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let unit = app_state
        .db_client
        .save_unit(NewUnit {
            unit_number: body.unit_number,
            floor: body.floor,
            building: body.building,
            unit_type: body.unit_type,
            rent_amount: body.rent_amount,
            bedrooms: body.bedrooms,
            bathrooms: body.bathrooms,
            area_sqft: body.area_sqft,
            description: body.description,
            amenities: body.amenities,
            images: body.images,
            maintenance_status: body.maintenance_status,
        })
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                HttpError::bad_request("A unit with this number already exists in the building")
            }
            other => HttpError::server_error(other.to_string()),
        })?;

    Ok(Json(UnitResponseDto {
        status: "success".to_string(),
        message: "Unit created successfully".to_string(),
        unit,
    }))
}

pub async fn update_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(unit_id): Path<Uuid>,
    Json(body): Json<UpdateUnitDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let unit = app_state
        .db_client
        .update_unit(
            unit_id,
            UnitChanges {
                unit_number: body.unit_number,
                floor: body.floor,
                building: body.building,
                unit_type: body.unit_type,
                rent_amount: body.rent_amount,
                maintenance_status: body.maintenance_status,
                bedrooms: body.bedrooms,
                bathrooms: body.bathrooms,
                area_sqft: body.area_sqft,
                description: body.description,
                amenities: body.amenities,
                images: body.images,
            },
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Unit not found"))?;

    Ok(Json(UnitResponseDto {
        status: "success".to_string(),
        message: "Unit updated successfully".to_string(),
        unit,
    }))
}

pub async fn delete_unit(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(unit_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let occupied = app_state
        .db_client
        .unit_has_tenants(unit_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if occupied {
        return Err(HttpError::bad_request(
            "Cannot delete a unit that still has tenants assigned",
        ));
    }

    let deleted = app_state
        .db_client
        .delete_unit(unit_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Unit not found"));
    }

    Ok(Json(Response {
        status: "success",
        message: "Unit deleted successfully".to_string(),
    }))
}
