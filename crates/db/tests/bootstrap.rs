use hostel_db::models::mess_menu::UpsertMessMenu;
use hostel_db::repositories::MessMenuRepo;
use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    hostel_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "rooms",
        "students",
        "attendance_records",
        "leaves",
        "complaints",
        "maintenance_requests",
        "fees",
        "mess_menus",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Posting a day twice replaces its menu instead of adding a row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mess_menu_upsert_keeps_one_row_per_day(pool: PgPool) {
    let menu = |breakfast: &str| UpsertMessMenu {
        day: "monday".to_string(),
        breakfast: breakfast.to_string(),
        lunch: "Rice".to_string(),
        dinner: "Roti".to_string(),
    };

    MessMenuRepo::upsert(&pool, "monday", &menu("Idli")).await.unwrap();
    let replaced = MessMenuRepo::upsert(&pool, "monday", &menu("Poha")).await.unwrap();

    assert_eq!(replaced.breakfast, "Poha");
    assert_eq!(MessMenuRepo::list(&pool).await.unwrap().len(), 1);
}
