//! Integration tests for best-effort notification emission.

use std::sync::Arc;

use loyalty_core::coupon::ReviewDecision;
use loyalty_core::notification::{coupon_reviewed, draw_winner};
use loyalty_db::models::profile::CreateProfile;
use loyalty_db::repositories::{NotificationRepo, ProfileRepo};
use loyalty_events::bus::EVENT_NOTIFICATION_CREATED;
use loyalty_events::{EventBus, NotificationEmitter};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool) -> i64 {
    ProfileRepo::create(
        pool,
        &CreateProfile {
            full_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: "user".to_string(),
            store_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn emit_writes_row_and_publishes_event(pool: PgPool) {
    let user = seed_user(&pool).await;
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let emitter = NotificationEmitter::new(pool.clone(), bus);

    let stored = emitter
        .emit(&coupon_reviewed(user, 1, 1, ReviewDecision::Approved, 10))
        .await
        .expect("notification should be written");
    assert_eq!(stored.notification_type, "coupon_approved");
    assert_eq!(stored.channel, "in_app");
    assert!(!stored.is_read);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.event_type, EVENT_NOTIFICATION_CREATED);
    assert_eq!(event.source_entity_id, Some(stored.id));
    assert_eq!(event.user_id, Some(user));

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_write_is_swallowed(pool: PgPool) {
    let emitter = NotificationEmitter::new(pool.clone(), Arc::new(EventBus::default()));

    // No profile 424242: the foreign key rejects the insert.
    let result = emitter.emit(&draw_winner(424_242, 1, 1, 7)).await;
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn emit_all_counts_successful_writes(pool: PgPool) {
    let user = seed_user(&pool).await;
    let emitter = NotificationEmitter::new(pool.clone(), Arc::new(EventBus::default()));

    let written = emitter
        .emit_all(&[
            draw_winner(user, 1, 10, 4),
            draw_winner(424_242, 1, 11, 5),
            draw_winner(user, 1, 12, 6),
        ])
        .await;
    assert_eq!(written, 2);

    let rows = NotificationRepo::list_for_user(&pool, user, false, 50, 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|n| n.notification_type == "draw_winner"));
}
