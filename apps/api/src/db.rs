use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates all tables if they do not exist and seeds the default admin user.
///
/// `updated_at` has no automatic refresh in Postgres; UPDATE statements set
/// it explicitly.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS packages (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            title TEXT,
            slug TEXT UNIQUE NOT NULL,
            country TEXT NOT NULL,
            days INT NOT NULL,
            image TEXT,
            price DOUBLE PRECISION,
            stars INT DEFAULT 4,
            description TEXT,
            itinerary TEXT,
            inclusion TEXT,
            included TEXT,
            excluded TEXT,
            summary TEXT,
            images TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admin_users (
            id SERIAL PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            email TEXT UNIQUE NOT NULL,
            password TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enquiries (
            id SERIAL PRIMARY KEY,
            tour TEXT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            mobile TEXT,
            living_country TEXT,
            nationality TEXT,
            destination TEXT,
            arrival_date DATE,
            departure_date DATE,
            adults INT,
            children INT,
            flight_status TEXT,
            holiday_reason TEXT,
            message TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL,
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS testimonials (
            id SERIAL PRIMARY KEY,
            quote TEXT NOT NULL,
            author_name TEXT NOT NULL,
            author_location TEXT,
            image TEXT,
            gallery_images TEXT,
            sort_order INT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS email_settings (
            id INT PRIMARY KEY DEFAULT 1,
            host TEXT,
            port INT DEFAULT 587,
            secure BOOLEAN DEFAULT FALSE,
            username TEXT,
            password TEXT,
            from_email TEXT,
            from_name TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    seed_default_admin(pool).await?;

    info!("Database schema initialized");
    Ok(())
}

/// Inserts the default admin account on first boot so the panel is reachable.
async fn seed_default_admin(pool: &PgPool) -> Result<()> {
    let existing: Option<(i32,)> =
        sqlx::query_as("SELECT id FROM admin_users WHERE username = $1")
            .bind("admin")
            .fetch_optional(pool)
            .await?;

    if existing.is_none() {
        sqlx::query("INSERT INTO admin_users (username, email, password) VALUES ($1, $2, $3)")
            .bind("admin")
            .bind("admin@wayline.travel")
            .bind("admin123")
            .execute(pool)
            .await?;
        info!("Seeded default admin user");
    }

    Ok(())
}
