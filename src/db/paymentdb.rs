use async_trait::async_trait;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::paymentmodel::{Payment, PaymentStatus, PaymentWithContext};

const PAYMENT_COLUMNS: &str = "id, bill_id, amount, payment_method, transaction_id, \
     paymongo_link_id, status, created_at, updated_at";

#[async_trait]
pub trait PaymentExt {
    async fn get_payments(
        &self,
        tenant_id: Option<Uuid>,
        bill_id: Option<Uuid>,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentWithContext>, sqlx::Error>;

    async fn get_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentWithContext>, sqlx::Error>;

    /// The pending gateway payment for a bill, if one is already open.
    async fn get_pending_gateway_payment(
        &self,
        bill_id: Uuid,
    ) -> Result<Option<Payment>, sqlx::Error>;

    async fn save_gateway_payment(
        &self,
        bill_id: Uuid,
        amount: &BigDecimal,
        link_id: &str,
    ) -> Result<Payment, sqlx::Error>;

    /// Records a manual payment and settles the bill in one transaction.
    async fn save_manual_payment(
        &self,
        bill_id: Uuid,
        amount: &BigDecimal,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error>;

    /// Marks a gateway payment completed and its bill paid, atomically.
    async fn complete_gateway_payment(
        &self,
        payment_id: Uuid,
        bill_id: Uuid,
    ) -> Result<(), sqlx::Error>;

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error>;
}

#[async_trait]
impl PaymentExt for DBClient {
    async fn get_payments(
        &self,
        tenant_id: Option<Uuid>,
        bill_id: Option<Uuid>,
        status: Option<PaymentStatus>,
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
              AND ($2::uuid IS NULL OR p.bill_id = $2)
              AND ($3::payment_status IS NULL OR p.status = $3)
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(bill_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_payment(
        &self,
        payment_id: Uuid,
    ) -> Result<Option<PaymentWithContext>, sqlx::Error> {
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
            WHERE p.id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_pending_gateway_payment(
        &self,
        bill_id: Uuid,
    ) -> Result<Option<Payment>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE bill_id = $1
              AND status = 'pending'::payment_status
              AND payment_method = 'paymongo'::payment_method
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(bill_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_gateway_payment(
        &self,
        bill_id: Uuid,
        amount: &BigDecimal,
        link_id: &str,
    ) -> Result<Payment, sqlx::Error> {
        sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments
                (bill_id, amount, payment_method, transaction_id, paymongo_link_id, status)
            VALUES ($1, $2, 'paymongo'::payment_method, $3, $3, 'pending'::payment_status)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(bill_id)
        .bind(amount)
        .bind(link_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_manual_payment(
        &self,
        bill_id: Uuid,
        amount: &BigDecimal,
        transaction_id: &str,
    ) -> Result<Payment, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (bill_id, amount, payment_method, transaction_id, status)
            VALUES ($1, $2, 'manual'::payment_method, $3, 'completed'::payment_status)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(bill_id)
        .bind(amount)
        .bind(transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE bills SET status = 'paid'::bill_status, updated_at = NOW() WHERE id = $1",
        )
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(payment)
    }

    async fn complete_gateway_payment(
        &self,
        payment_id: Uuid,
        bill_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE payments SET status = 'completed'::payment_status, updated_at = NOW() WHERE id = $1",
        )
        .bind(payment_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE bills SET status = 'paid'::bill_status, updated_at = NOW() WHERE id = $1",
        )
        .bind(bill_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_payment_status(
        &self,
        payment_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let payment = sqlx::query_as::<_, Payment>(&format!(
            r#"
            UPDATE payments
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(payment_id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        // A completed payment settles the owning bill in the same transaction.
        if let Some(ref payment) = payment {
            if payment.status == PaymentStatus::Completed {
                sqlx::query(
                    "UPDATE bills SET status = 'paid'::bill_status, updated_at = NOW() WHERE id = $1",
                )
                .bind(payment.bill_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(payment)
    }
}
