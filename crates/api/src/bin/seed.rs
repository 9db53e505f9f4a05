//! First-boot account seeding.
//!
//! Creates the default `admin` and `student` logins (and the demo student's
//! profile) when they are missing. Safe to run repeatedly.

use anyhow::{anyhow, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostel_api::auth::password::hash_password;
use hostel_api::config::DatabaseConfig;
use hostel_core::roles::{ROLE_ADMIN, ROLE_STUDENT};
use hostel_db::models::student::CreateStudent;
use hostel_db::models::user::{CreateUser, User};
use hostel_db::repositories::{StudentRepo, UserRepo};
use hostel_db::DbPool;

const DEMO_STUDENT_CODE: &str = "STU001";
const DEMO_STUDENT_NAME: &str = "John Doe";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hostel_seed=info,hostel_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let pool = hostel_db::create_pool(&db_config.url, 2)
        .await
        .context("Failed to connect to database")?;
    hostel_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    ensure_user(&pool, "admin", "admin123", ROLE_ADMIN, None, "Administrator").await?;

    let student = ensure_user(
        &pool,
        "student",
        "student123",
        ROLE_STUDENT,
        Some(DEMO_STUDENT_CODE),
        DEMO_STUDENT_NAME,
    )
    .await?;
    ensure_student_profile(&pool, &student).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn ensure_user(
    pool: &DbPool,
    username: &str,
    password: &str,
    role: &str,
    student_code: Option<&str>,
    display_name: &str,
) -> anyhow::Result<User> {
    if let Some(existing) = UserRepo::find_by_username(pool, username).await? {
        tracing::info!(username, "User already present, skipping");
        return Ok(existing);
    }

    let password_hash =
        hash_password(password).map_err(|e| anyhow!("Password hashing failed: {e}"))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
            role: role.to_string(),
            student_code: student_code.map(str::to_string),
            display_name: Some(display_name.to_string()),
            email: None,
        },
    )
    .await
    .with_context(|| format!("Failed to create user '{username}'"))?;
    tracing::info!(username, role, user_id = user.id, "User created");
    Ok(user)
}

async fn ensure_student_profile(pool: &DbPool, user: &User) -> anyhow::Result<()> {
    if StudentRepo::find_by_user_id(pool, user.id).await?.is_some() {
        return Ok(());
    }
    if StudentRepo::find_by_code(pool, DEMO_STUDENT_CODE).await?.is_some() {
        tracing::warn!(
            student_code = DEMO_STUDENT_CODE,
            "Student code already used by another profile; demo profile not linked"
        );
        return Ok(());
    }

    let student = StudentRepo::create(
        pool,
        &CreateStudent {
            student_code: DEMO_STUDENT_CODE.to_string(),
            name: DEMO_STUDENT_NAME.to_string(),
            email: None,
            phone: None,
            room_id: None,
            user_id: user.id,
            photo_url: None,
            guardian_name: None,
            address: None,
            year: None,
            branch: None,
        },
    )
    .await
    .context("Failed to create demo student profile")?;
    tracing::info!(student_id = student.id, "Demo student profile created");
    Ok(())
}
