use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "unit_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    Available,
    Occupied,
}

impl UnitStatus {
    pub fn to_str(&self) -> &str {
        match self {
            UnitStatus::Available => "available",
            UnitStatus::Occupied => "occupied",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "unit_maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UnitMaintenanceStatus {
    None,
    Scheduled,
    InProgress,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Unit {
    pub id: Uuid,
    pub unit_number: String,
    pub floor: i32,
    pub building: String,
    pub unit_type: Option<String>,
    pub rent_amount: BigDecimal,
    pub status: UnitStatus,
    pub maintenance_status: UnitMaintenanceStatus,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqft: BigDecimal,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Unit row joined with its occupying tenant, if any.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct UnitWithTenant {
    pub id: Uuid,
    pub unit_number: String,
    pub floor: i32,
    pub building: String,
    pub unit_type: Option<String>,
    pub rent_amount: BigDecimal,
    pub status: UnitStatus,
    pub maintenance_status: UnitMaintenanceStatus,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area_sqft: BigDecimal,
    pub description: Option<String>,
    pub amenities: Option<String>,
    pub images: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tenant_id: Option<Uuid>,
    pub tenant_name: Option<String>,
    pub tenant_email: Option<String>,
    pub tenant_phone: Option<String>,
}
