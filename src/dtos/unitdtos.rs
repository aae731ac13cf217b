use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::unitmodel::{Unit, UnitMaintenanceStatus, UnitStatus, UnitWithTenant};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateUnitDto {
    #[validate(length(min = 1, message = "Unit number is required"))]
    pub unit_number: String,
    pub floor: i32,
    #[validate(length(min = 1, message = "Building is required"))]
    pub building: String,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub rent_amount: Option<BigDecimal>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<BigDecimal>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub maintenance_status: Option<UnitMaintenanceStatus>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUnitDto {
    #[validate(length(min = 1, message = "Unit number cannot be empty"))]
    pub unit_number: Option<String>,
    pub floor: Option<i32>,
    #[validate(length(min = 1, message = "Building cannot be empty"))]
    pub building: Option<String>,
    #[serde(rename = "type")]
    pub unit_type: Option<String>,
    pub rent_amount: Option<BigDecimal>,
    pub maintenance_status: Option<UnitMaintenanceStatus>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub area_sqft: Option<BigDecimal>,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnitQueryDto {
    pub building: Option<String>,
    pub floor: Option<i32>,
    pub status: Option<UnitStatus>,
}

#[derive(Debug, Serialize)]
pub struct UnitListResponseDto {
    pub status: String,
    pub units: Vec<UnitWithTenant>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct UnitDetailResponseDto {
    pub status: String,
    pub unit: UnitWithTenant,
}

#[derive(Debug, Serialize)]
pub struct UnitResponseDto {
    pub status: String,
    pub message: String,
    pub unit: Unit,
}
