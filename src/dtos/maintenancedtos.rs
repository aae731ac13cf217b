use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenancemodel::{
    MaintenanceRequest, MaintenanceWithTenant, RequestPriority, RequestStatus,
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateMaintenanceDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub priority: Option<RequestPriority>,
    // Only honored for manager/staff callers; tenants always file for themselves
    pub tenant_id: Option<Uuid>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateMaintenanceDto {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub priority: Option<RequestPriority>,
    pub status: Option<RequestStatus>,
    pub staff_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceQueryDto {
    pub status: Option<RequestStatus>,
    pub priority: Option<RequestPriority>,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceListResponseDto {
    pub status: String,
    pub requests: Vec<MaintenanceWithTenant>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceDetailResponseDto {
    pub status: String,
    pub request: MaintenanceWithTenant,
}

#[derive(Debug, Serialize)]
pub struct MaintenanceResponseDto {
    pub status: String,
    pub message: String,
    pub request: MaintenanceRequest,
}
