use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must carry `created_at` as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_created_at(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let result: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = 'created_at'",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();

        let (data_type,) = result.unwrap_or_else(|| panic!("Table {table} is missing created_at"));
        assert_eq!(
            data_type, "timestamp with time zone",
            "Table {table}.created_at should be timestamptz, got {data_type}"
        );
    }
}

/// The uniqueness guards the settlement engine depends on must exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settlement_unique_constraints_exist(pool: PgPool) {
    for name in [
        "uq_goal_completions_user_campaign_goal_period",
        "uq_lucky_numbers_campaign_number",
    ] {
        let found: Option<(String,)> = sqlx::query_as(
            "SELECT constraint_name
             FROM information_schema.table_constraints
             WHERE constraint_type = 'UNIQUE' AND constraint_name = $1",
        )
        .bind(name)
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(found.is_some(), "missing unique constraint {name}");
    }
}
