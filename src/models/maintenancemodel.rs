use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    pub staff_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maintenance request joined with the submitting tenant and their unit.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct MaintenanceWithTenant {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    pub staff_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: Option<String>,
    pub unit_number: Option<String>,
    pub building: Option<String>,
    pub floor: Option<i32>,
}
