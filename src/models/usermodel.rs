use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Manager,
    Staff,
    Tenant,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Manager => "manager",
            UserRole::Staff => "staff",
            UserRole::Tenant => "tenant",
        }
    }

    /// Manager and staff share most back-office permissions.
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Staff)
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub unit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row joined with the unit it occupies, for listings and detail views.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct UserWithUnit {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub unit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub unit_number: Option<String>,
    pub floor: Option<i32>,
    pub building: Option<String>,
}

/// Tenant profile joined with lease details for the tenant detail view.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct TenantWithUnit {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub unit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub unit_number: Option<String>,
    pub building: Option<String>,
    pub floor: Option<i32>,
    pub unit_type: Option<String>,
    pub rent_amount: Option<bigdecimal::BigDecimal>,
}

/// Tenant listing row with per-tenant billing aggregates.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct TenantWithLease {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub unit_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub unit_number: Option<String>,
    pub floor: Option<i32>,
    pub building: Option<String>,
    pub rent_amount: Option<bigdecimal::BigDecimal>,
    pub total_bills: i64,
    pub unpaid_amount: bigdecimal::BigDecimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_str_values_match_database_enum() {
        assert_eq!(UserRole::Manager.to_str(), "manager");
        assert_eq!(UserRole::Staff.to_str(), "staff");
        assert_eq!(UserRole::Tenant.to_str(), "tenant");
    }

    #[test]
    fn tenant_is_not_privileged() {
        assert!(UserRole::Manager.is_privileged());
        assert!(UserRole::Staff.is_privileged());
        assert!(!UserRole::Tenant.is_privileged());
    }
}
