use bigdecimal::BigDecimal;
use serde::Serialize;

use crate::db::dashboarddb::CountTotal;
use crate::models::{
    billmodel::BillWithTenant, paymentmodel::PaymentWithContext, unitmodel::Unit,
};

#[derive(Debug, Serialize)]
pub struct MoneyTotalDto {
    pub count: i64,
    pub total: BigDecimal,
}

impl From<CountTotal> for MoneyTotalDto {
    fn from(value: CountTotal) -> Self {
        MoneyTotalDto {
            count: value.count,
            total: value.total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStatsDto {
    pub total_units: i64,
    pub occupied_units: i64,
    pub available_units: i64,
    pub total_tenants: i64,
    pub total_bills: i64,
    pub unpaid_bills: MoneyTotalDto,
    pub total_payments: MoneyTotalDto,
    pub pending_maintenance: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantStatsDto {
    pub unpaid_bills: MoneyTotalDto,
    pub total_payments: MoneyTotalDto,
    pub pending_maintenance: i64,
    pub unit: Option<Unit>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDashboardDto {
    pub status: String,
    pub stats: PropertyStatsDto,
    pub recent_bills: Vec<BillWithTenant>,
    pub recent_payments: Vec<PaymentWithContext>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDashboardDto {
    pub status: String,
    pub stats: TenantStatsDto,
    pub recent_bills: Vec<BillWithTenant>,
    pub recent_payments: Vec<PaymentWithContext>,
}
