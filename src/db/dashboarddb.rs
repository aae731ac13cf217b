use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::{
    billmodel::BillWithTenant, paymentmodel::PaymentWithContext, unitmodel::Unit,
};

/// Count + monetary sum pair for aggregate cards.
#[derive(Debug, sqlx::FromRow)]
pub struct CountTotal {
    pub count: i64,
    pub total: BigDecimal,
}

#[async_trait]
pub trait DashboardExt {
    async fn count_units(&self) -> Result<i64, sqlx::Error>;

    async fn count_occupied_units(&self) -> Result<i64, sqlx::Error>;

    async fn count_tenants(&self) -> Result<i64, sqlx::Error>;

    async fn count_bills(&self) -> Result<i64, sqlx::Error>;

    /// Unpaid bill count and outstanding sum; scoped to one tenant when given.
    async fn unpaid_bill_totals(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<CountTotal, sqlx::Error>;

    /// Completed payment count and collected sum; scoped to one tenant when given.
    async fn completed_payment_totals(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<CountTotal, sqlx::Error>;

    async fn count_pending_maintenance(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<i64, sqlx::Error>;

    async fn recent_bills(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<BillWithTenant>, sqlx::Error>;

    async fn recent_payments(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<PaymentWithContext>, sqlx::Error>;

    async fn tenant_unit(&self, tenant_id: Uuid) -> Result<Option<Unit>, sqlx::Error>;
}

#[async_trait]
impl DashboardExt for DBClient {
    async fn count_units(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM units")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_occupied_units(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM units WHERE status = 'occupied'::unit_status")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_tenants(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'tenant'::user_role")
            .fetch_one(&self.pool)
            .await
    }

    async fn count_bills(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await
    }

    async fn unpaid_bill_totals(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<CountTotal, sqlx::Error> {
        sqlx::query_as::<_, CountTotal>(
            r#"
            SELECT COUNT(*) AS count, COALESCE(SUM(amount), 0) AS total
            FROM bills
            WHERE status = 'unpaid'::bill_status
              AND ($1::uuid IS NULL OR tenant_id = $1)
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn completed_payment_totals(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<CountTotal, sqlx::Error> {
        sqlx::query_as::<_, CountTotal>(
            r#"
            SELECT COUNT(*) AS count, COALESCE(SUM(p.amount), 0) AS total
            FROM payments p
            JOIN bills b ON p.bill_id = b.id
            WHERE p.status = 'completed'::payment_status
              AND ($1::uuid IS NULL OR b.tenant_id = $1)
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_pending_maintenance(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE status = 'pending'::request_status
              AND ($1::uuid IS NULL OR tenant_id = $1)
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn recent_bills(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<BillWithTenant>, sqlx::Error> {
        sqlx::query_as::<_, BillWithTenant>(
            r#"
            SELECT b.id, b.tenant_id, b.bill_type, b.amount, b.description, b.due_date,
                   b.status, b.created_at, b.updated_at,
                   u.name AS tenant_name, u.email AS tenant_email, u.phone AS tenant_phone,
                   un.unit_number, un.building
            FROM bills b
            JOIN users u ON b.tenant_id = u.id
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE ($1::uuid IS NULL OR b.tenant_id = $1)
            ORDER BY b.created_at DESC
            LIMIT 10
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn recent_payments(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<PaymentWithContext>, sqlx::Error> {
        sqlx::query_as::<_, PaymentWithContext>(
            r#"
            SELECT p.id, p.bill_id, p.amount, p.payment_method, p.transaction_id,
                   p.paymongo_link_id, p.status, p.created_at, p.updated_at,
                   b.tenant_id, b.bill_type, b.amount AS bill_amount,
                   b.description AS bill_description,
                   u.name AS tenant_name, u.email AS tenant_email,
                   un.unit_number, un.building
            FROM payments p
            JOIN bills b ON p.bill_id = b.id
            JOIN users u ON b.tenant_id = u.id
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE ($1::uuid IS NULL OR b.tenant_id = $1)
            ORDER BY p.created_at DESC
            LIMIT 10
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn tenant_unit(&self, tenant_id: Uuid) -> Result<Option<Unit>, sqlx::Error> {
        sqlx::query_as::<_, Unit>(
            r#"
            SELECT un.id, un.unit_number, un.floor, un.building, un.unit_type, un.rent_amount,
                   un.status, un.maintenance_status, un.bedrooms, un.bathrooms, un.area_sqft,
                   un.description, un.amenities, un.images, un.created_at, un.updated_at
            FROM units un
            JOIN users u ON un.id = u.unit_id
            WHERE u.id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }
}
