use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    db::dashboarddb::DashboardExt,
    dtos::dashboarddtos::{
        PropertyDashboardDto, PropertyStatsDto, TenantDashboardDto, TenantStatsDto,
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::usermodel::UserRole,
    AppState,
};

pub fn dashboard_handler() -> Router {
    Router::new().route("/", get(get_dashboard))
}

pub async fn get_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(caller): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    if caller.user.role == UserRole::Tenant {
        tenant_dashboard(&app_state, caller).await
    } else {
        property_dashboard(&app_state).await
    }
}

async fn property_dashboard(app_state: &AppState) -> Result<axum::response::Response, HttpError> {
    let db = &app_state.db_client;

    let (
        total_units,
        occupied_units,
        total_tenants,
        total_bills,
        unpaid_bills,
        total_payments,
        pending_maintenance,
        recent_bills,
        recent_payments,
    ) = tokio::try_join!(
        db.count_units(),
        db.count_occupied_units(),
        db.count_tenants(),
        db.count_bills(),
        db.unpaid_bill_totals(None),
        db.completed_payment_totals(None),
        db.count_pending_maintenance(None),
        db.recent_bills(None),
        db.recent_payments(None),
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = PropertyDashboardDto {
        status: "success".to_string(),
        stats: PropertyStatsDto {
            total_units,
            occupied_units,
            available_units: total_units - occupied_units,
            total_tenants,
            total_bills,
            unpaid_bills: unpaid_bills.into(),
            total_payments: total_payments.into(),
            pending_maintenance,
        },
        recent_bills,
        recent_payments,
    };

    Ok(Json(response).into_response())
}

async fn tenant_dashboard(
    app_state: &AppState,
    caller: JWTAuthMiddeware,
) -> Result<axum::response::Response, HttpError> {
    let db = &app_state.db_client;
    let tenant_id = caller.user.id;

    let (unpaid_bills, total_payments, pending_maintenance, unit, recent_bills, recent_payments) =
        tokio::try_join!(
            db.unpaid_bill_totals(Some(tenant_id)),
            db.completed_payment_totals(Some(tenant_id)),
            db.count_pending_maintenance(Some(tenant_id)),
            db.tenant_unit(tenant_id),
            db.recent_bills(Some(tenant_id)),
            db.recent_payments(Some(tenant_id)),
        )
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let response = TenantDashboardDto {
        status: "success".to_string(),
        stats: TenantStatsDto {
            unpaid_bills: unpaid_bills.into(),
            total_payments: total_payments.into(),
            pending_maintenance,
            unit,
        },
        recent_bills,
        recent_payments,
    };

    Ok(Json(response).into_response())
}
