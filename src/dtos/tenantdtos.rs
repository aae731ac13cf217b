use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::usermodel::{TenantWithLease, TenantWithUnit};

use super::userdtos::FilterUserDto;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateTenantDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateTenantDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignUnitDto {
    pub unit_id: Uuid,
}

/// Issued credentials are echoed once at creation so the office can hand
/// them to the tenant.
#[derive(Debug, Serialize)]
pub struct CreateTenantResponseDto {
    pub status: String,
    pub message: String,
    pub tenant: FilterUserDto,
    pub login_email: String,
    pub login_password: String,
}

#[derive(Debug, Serialize)]
pub struct TenantListResponseDto {
    pub status: String,
    pub tenants: Vec<TenantWithLease>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct TenantDetailResponseDto {
    pub status: String,
    pub tenant: TenantWithUnit,
}

#[derive(Debug, Serialize)]
pub struct TenantResponseDto {
    pub status: String,
    pub message: String,
    pub tenant: FilterUserDto,
}
