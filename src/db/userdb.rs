use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::usermodel::{TenantWithLease, TenantWithUnit, User, UserRole, UserWithUnit};

const USER_COLUMNS: &str =
    "id, email, password, name, role, phone, address, unit_id, created_at, updated_at";

/// Auto-assigned tenant login for the nth draw: the first address is
/// unsuffixed, later ones carry the draw number.
pub fn tenant_email_for(n: i64) -> String {
    if n <= 1 {
        "tenant@rentora.ph".to_string()
    } else {
        format!("tenant{}@rentora.ph", n)
    }
}

/// Outcome of the transactional unit-assignment claim.
#[derive(Debug)]
pub enum AssignUnitOutcome {
    Assigned(User),
    UnitNotFound,
    UnitOccupied,
    TenantNotFound,
}

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Lists users joined with their unit. When `role` is `None`, tenant
    /// accounts are excluded, matching the back-office user directory.
    async fn get_users(
        &self,
        role: Option<UserRole>,
        search: Option<&str>,
    ) -> Result<Vec<UserWithUnit>, sqlx::Error>;

    async fn save_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, sqlx::Error>;

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<(), sqlx::Error>;

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error>;

    /// Draws the next auto-assigned tenant login from `tenant_email_seq`:
    /// the first is unsuffixed, then tenant2@, tenant3@, ...
    async fn next_tenant_email(&self) -> Result<String, sqlx::Error>;

    async fn get_tenants(&self) -> Result<Vec<TenantWithLease>, sqlx::Error>;

    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantWithUnit>, sqlx::Error>;

    async fn update_tenant(
        &self,
        tenant_id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    /// Claims a unit for a tenant atomically: the unit row is locked for
    /// the duration of the occupancy check and both writes.
    async fn assign_tenant_to_unit(
        &self,
        tenant_id: Uuid,
        unit_id: Uuid,
    ) -> Result<AssignUnitOutcome, sqlx::Error>;

    /// Clears the tenant's unit and flips it back to available. Returns
    /// `None` when the tenant does not exist.
    async fn remove_tenant_from_unit(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<()>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::uuid IS NULL OR id = $1)
              AND ($2::text IS NULL OR email = $2)
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_users(
        &self,
        role: Option<UserRole>,
        search: Option<&str>,
    ) -> Result<Vec<UserWithUnit>, sqlx::Error> {
        sqlx::query_as::<_, UserWithUnit>(
            r#"
            SELECT u.id, u.email, u.name, u.role, u.phone, u.address, u.unit_id, u.created_at,
                   un.unit_number, un.floor, un.building
            FROM users u
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE ($1::user_role IS NULL OR u.role = $1)
              AND ($1::user_role IS NOT NULL OR u.role <> 'tenant'::user_role)
              AND ($2::text IS NULL OR u.name ILIKE '%' || $2 || '%' OR u.email ILIKE '%' || $2 || '%')
            ORDER BY u.created_at DESC
            "#,
        )
        .bind(role)
        .bind(search)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: UserRole,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password, name, role, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(password)
        .bind(name)
        .bind(role)
        .bind(phone)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(password)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn next_tenant_email(&self) -> Result<String, sqlx::Error> {
        // Tenants created with an explicit email (or seeded data) may
        // already hold an address the sequence has not reached yet, so
        // keep drawing until the candidate is free.
        loop {
            let n: i64 = sqlx::query_scalar("SELECT nextval('tenant_email_seq')")
                .fetch_one(&self.pool)
                .await?;

            let email = tenant_email_for(n);

            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                    .bind(&email)
                    .fetch_one(&self.pool)
                    .await?;

            if !taken {
                return Ok(email);
            }
        }
    }

    async fn get_tenants(&self) -> Result<Vec<TenantWithLease>, sqlx::Error> {
        sqlx::query_as::<_, TenantWithLease>(
            r#"
            SELECT u.id, u.email, u.name, u.phone, u.address, u.unit_id, u.created_at,
                   un.unit_number, un.floor, un.building, un.rent_amount,
                   COUNT(b.id) AS total_bills,
                   COALESCE(SUM(b.amount) FILTER (WHERE b.status = 'unpaid'::bill_status), 0) AS unpaid_amount
            FROM users u
            LEFT JOIN units un ON u.unit_id = un.id
            LEFT JOIN bills b ON u.id = b.tenant_id
            WHERE u.role = 'tenant'::user_role
            GROUP BY u.id, un.unit_number, un.floor, un.building, un.rent_amount
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Option<TenantWithUnit>, sqlx::Error> {
        sqlx::query_as::<_, TenantWithUnit>(
            r#"
            SELECT u.id, u.email, u.name, u.phone, u.address, u.unit_id, u.created_at,
                   un.unit_number, un.building, un.floor, un.unit_type, un.rent_amount
            FROM users u
            LEFT JOIN units un ON u.unit_id = un.id
            WHERE u.id = $1 AND u.role = 'tenant'::user_role
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_tenant(
        &self,
        tenant_id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                email = COALESCE($5, email),
                updated_at = NOW()
            WHERE id = $1 AND role = 'tenant'::user_role
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(name)
        .bind(phone)
        .bind(address)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn assign_tenant_to_unit(
        &self,
        tenant_id: Uuid,
        unit_id: Uuid,
    ) -> Result<AssignUnitOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Lock the unit row so no concurrent claim can slip between the
        // occupancy check and the writes below.
        let unit_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM units WHERE id = $1 FOR UPDATE")
                .bind(unit_id)
                .fetch_optional(&mut *tx)
                .await?;

        if unit_exists.is_none() {
            return Ok(AssignUnitOutcome::UnitNotFound);
        }

        let occupant: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM users WHERE unit_id = $1 AND role = 'tenant'::user_role LIMIT 1",
        )
        .bind(unit_id)
        .fetch_optional(&mut *tx)
        .await?;

        if occupant.is_some() {
            return Ok(AssignUnitOutcome::UnitOccupied);
        }

        let tenant = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET unit_id = $1, updated_at = NOW()
            WHERE id = $2 AND role = 'tenant'::user_role
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(unit_id)
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(tenant) = tenant else {
            return Ok(AssignUnitOutcome::TenantNotFound);
        };

        sqlx::query(
            "UPDATE units SET status = 'occupied'::unit_status, updated_at = NOW() WHERE id = $1",
        )
        .bind(unit_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AssignUnitOutcome::Assigned(tenant))
    }

    async fn remove_tenant_from_unit(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<()>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let unit_id: Option<Option<Uuid>> = sqlx::query_scalar(
            "SELECT unit_id FROM users WHERE id = $1 AND role = 'tenant'::user_role",
        )
        .bind(tenant_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(unit_id) = unit_id else {
            return Ok(None);
        };

        sqlx::query("UPDATE users SET unit_id = NULL, updated_at = NOW() WHERE id = $1")
            .bind(tenant_id)
            .execute(&mut *tx)
            .await?;

        if let Some(unit_id) = unit_id {
            sqlx::query(
                "UPDATE units SET status = 'available'::unit_status, updated_at = NOW() WHERE id = $1",
            )
            .bind(unit_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_email_numbering() {
        assert_eq!(tenant_email_for(1), "tenant@rentora.ph");
        assert_eq!(tenant_email_for(2), "tenant2@rentora.ph");
        assert_eq!(tenant_email_for(15), "tenant15@rentora.ph");
    }
}
