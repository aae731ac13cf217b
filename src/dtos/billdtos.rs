use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::billmodel::{Bill, BillStatus, BillWithTenant};

#[derive(Serialize, Deserialize, Validate, Debug, Default)]
pub struct BillQueryDto {
    pub tenant_id: Option<Uuid>,
    pub status: Option<BillStatus>,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<i32>,
    #[validate(range(min = 2000, max = 2100, message = "Year is out of range"))]
    pub year: Option<i32>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateBillDto {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Bill type cannot be empty"))]
    pub bill_type: Option<String>,
    pub amount: Option<BigDecimal>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<BillStatus>,
}

#[derive(Debug, Serialize)]
pub struct BillListResponseDto {
    pub status: String,
    pub bills: Vec<BillWithTenant>,
    pub results: usize,
}

#[derive(Debug, Serialize)]
pub struct BillDetailResponseDto {
    pub status: String,
    pub bill: BillWithTenant,
}

#[derive(Debug, Serialize)]
pub struct BillResponseDto {
    pub status: String,
    pub message: String,
    pub bill: Bill,
}

#[derive(Debug, Serialize)]
pub struct GenerateBillsResponseDto {
    pub status: String,
    pub message: String,
    pub created: usize,
    pub total_tenants: usize,
}
