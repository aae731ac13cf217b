//! One-shot demo data loader. Run with `cargo run --bin seed`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use bigdecimal::BigDecimal;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::str::FromStr;
use uuid::Uuid;

const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        tracing::info!("Users already exist, skipping seed");
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|e| format!("password hashing failed: {}", e))?
        .to_string();

    let mut tx = pool.begin().await?;

    let units = [
        ("101", 1, "A", "studio", "18000.00"),
        ("102", 1, "A", "1br", "22000.00"),
        ("201", 2, "A", "2br", "30000.00"),
        ("101", 1, "B", "studio", "17500.00"),
        ("202", 2, "B", "2br", "31000.00"),
    ];

    let mut unit_ids = Vec::with_capacity(units.len());
    for (number, floor, building, unit_type, rent) in units {
        let unit_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO units (unit_number, floor, building, unit_type, rent_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(number)
        .bind(floor)
        .bind(building)
        .bind(unit_type)
        .bind(BigDecimal::from_str(rent)?)
        .fetch_one(&mut *tx)
        .await?;
        unit_ids.push(unit_id);
    }

    let accounts = [
        ("manager@rentora.ph", "Maria Santos", "manager"),
        ("staff@rentora.ph", "Jose Ramirez", "staff"),
        ("tenant@rentora.ph", "Ana Dela Cruz", "tenant"),
    ];

    let mut tenant_id = None;
    for (email, name, role) in accounts {
        let user_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, password, name, role)
            VALUES ($1, $2, $3, $4::user_role)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(&hashed)
        .bind(name)
        .bind(role)
        .fetch_one(&mut *tx)
        .await?;

        if role == "tenant" {
            tenant_id = Some(user_id);
        }
    }

    // The demo tenant holds the first auto-assigned address; advance the
    // sequence so the next draw yields tenant2@rentora.ph.
    sqlx::query("SELECT setval('tenant_email_seq', 1)")
        .execute(&mut *tx)
        .await?;

    // Give the demo tenant the first unit.
    let tenant_id = tenant_id.expect("tenant account was seeded above");
    sqlx::query("UPDATE users SET unit_id = $1 WHERE id = $2")
        .bind(unit_ids[0])
        .bind(tenant_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE units SET status = 'occupied'::unit_status WHERE id = $1")
        .bind(unit_ids[0])
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO maintenance_requests (tenant_id, title, description, priority)
        VALUES ($1, $2, $3, 'medium'::request_priority)
        "#,
    )
    .bind(tenant_id)
    .bind("Leaking kitchen faucet")
    .bind("The kitchen faucet has been dripping since last week.")
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Seed complete");
    tracing::info!("Manager: manager@rentora.ph / {}", DEMO_PASSWORD);
    tracing::info!("Staff: staff@rentora.ph / {}", DEMO_PASSWORD);
    tracing::info!("Tenant: tenant@rentora.ph / {}", DEMO_PASSWORD);

    Ok(())
}
