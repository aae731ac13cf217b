use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "bill_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Unpaid,
    Paid,
    Overdue,
}

impl BillStatus {
    pub fn to_str(&self) -> &str {
        match self {
            BillStatus::Unpaid => "unpaid",
            BillStatus::Paid => "paid",
            BillStatus::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Bill {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub bill_type: String,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bill row joined with tenant and unit context for listings.
#[derive(Debug, Serialize, sqlx::FromRow, Clone)]
pub struct BillWithTenant {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub bill_type: String,
    pub amount: BigDecimal,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: Option<String>,
    pub unit_number: Option<String>,
    pub building: Option<String>,
}

/// A tenant with a unit, as seen by the monthly bill generator.
#[derive(Debug, sqlx::FromRow, Clone)]
pub struct RentRollEntry {
    pub tenant_id: Uuid,
    pub rent_amount: BigDecimal,
    pub unit_number: String,
    pub building: String,
}
