//! Integration tests for the planner repositories.
//!
//! Exercises the repository layer against a real database:
//! - Available pool excludes targets assigned to the campaign day
//! - One campaign day per date, one assignment per target per day
//! - Version-checked moves and progress updates
//! - Delete returns the removed row

use assert_matches::assert_matches;
use blitz_core::types::CampaignDate;
use blitz_core::waves::WaveNumber;
use blitz_db::models::status::CampaignDayStatus;
use blitz_db::models::target::CreateTarget;
use blitz_db::models::wave_assignment::{CreateWaveAssignment, UpdateAssignmentProgress};
use blitz_db::repositories::{CampaignDayRepo, TargetRepo, WaveAssignmentRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_target(handle: &str, location: Option<&str>) -> CreateTarget {
    CreateTarget {
        handle: handle.to_string(),
        display_name: None,
        location: location.map(str::to_string),
        follower_count: None,
        bio: None,
    }
}

fn date(day: u32) -> CampaignDate {
    CampaignDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn wave(n: i64) -> WaveNumber {
    WaveNumber::new(n).unwrap()
}

fn new_assignment(campaign_day_id: i64, target_id: i64, n: i64) -> CreateWaveAssignment {
    CreateWaveAssignment {
        campaign_day_id,
        target_id,
        wave_number: wave(n),
        timezone_code: "ET".to_string(),
    }
}

fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_target_defaults_follower_count(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("alice", Some("Austin, TX")))
        .await
        .unwrap();

    assert_eq!(target.handle, "alice");
    assert_eq!(target.follower_count, 0);
    assert_eq!(target.location.as_deref(), Some("Austin, TX"));

    let found = TargetRepo::find_by_id(&pool, target.id).await.unwrap();
    assert_eq!(found.map(|t| t.id), Some(target.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_handle_violates_unique(pool: PgPool) {
    TargetRepo::create(&pool, &new_target("dup", None)).await.unwrap();
    let err = TargetRepo::create(&pool, &new_target("dup", None))
        .await
        .unwrap_err();

    assert_eq!(unique_violation(&err).as_deref(), Some("uq_targets_handle"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_is_newest_first(pool: PgPool) {
    let first = TargetRepo::create(&pool, &new_target("first", None)).await.unwrap();
    let second = TargetRepo::create(&pool, &new_target("second", None)).await.unwrap();

    let recent = TargetRepo::list_recent(&pool, 10, 0).await.unwrap();
    let ids: Vec<i64> = recent.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let capped = TargetRepo::list_recent(&pool, 1, 0).await.unwrap();
    assert_eq!(capped.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_available_pool_excludes_assigned_targets(pool: PgPool) {
    let a = TargetRepo::create(&pool, &new_target("a", None)).await.unwrap();
    let b = TargetRepo::create(&pool, &new_target("b", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(2)).await.unwrap();
    let other_day = CampaignDayRepo::create(&pool, date(3)).await.unwrap();

    WaveAssignmentRepo::create(&pool, &new_assignment(day.id, a.id, 1))
        .await
        .unwrap();

    let available = TargetRepo::list_available_for_day(&pool, day.id, 100)
        .await
        .unwrap();
    assert_eq!(available.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b.id]);

    let assigned = TargetRepo::list_assigned_for_day(&pool, day.id).await.unwrap();
    assert_eq!(assigned.iter().map(|t| t.id).collect::<Vec<_>>(), vec![a.id]);

    // Assignments in other days do not affect availability.
    let other = TargetRepo::list_available_for_day(&pool, other_day.id, 100)
        .await
        .unwrap();
    assert_eq!(other.len(), 2);
}

// ---------------------------------------------------------------------------
// Campaign days
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campaign_day_starts_in_planning(pool: PgPool) {
    let day = CampaignDayRepo::create(&pool, date(4)).await.unwrap();
    assert_eq!(day.status_id, CampaignDayStatus::Planning.id());

    let by_date = CampaignDayRepo::find_by_date(&pool, date(4)).await.unwrap();
    assert_eq!(by_date.map(|d| d.id), Some(day.id));
    assert!(CampaignDayRepo::find_by_date(&pool, date(5))
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_one_campaign_day_per_date(pool: PgPool) {
    CampaignDayRepo::create(&pool, date(6)).await.unwrap();
    let err = CampaignDayRepo::create(&pool, date(6)).await.unwrap_err();

    assert_eq!(
        unique_violation(&err).as_deref(),
        Some("uq_campaign_days_campaign_date")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_status_and_list(pool: PgPool) {
    let older = CampaignDayRepo::create(&pool, date(7)).await.unwrap();
    let newer = CampaignDayRepo::create(&pool, date(8)).await.unwrap();

    let updated = CampaignDayRepo::update_status(&pool, older.id, CampaignDayStatus::Active.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status_id, CampaignDayStatus::Active.id());

    let listed = CampaignDayRepo::list(&pool, 10, 0).await.unwrap();
    assert_eq!(
        listed.iter().map(|d| d.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    let missing = CampaignDayRepo::update_status(&pool, 999_999, 2).await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Wave assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignment_defaults(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("t", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(9)).await.unwrap();

    let assignment = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 3))
        .await
        .unwrap();

    assert_eq!(assignment.wave_number, wave(3));
    assert_eq!(assignment.wave_status, "pending");
    assert_eq!(assignment.outcome, "unknown");
    assert_eq!(assignment.version, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_target_assigned_once_per_day(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("once", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(10)).await.unwrap();

    WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 1))
        .await
        .unwrap();
    let err = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 2))
        .await
        .unwrap_err();

    assert_eq!(
        unique_violation(&err).as_deref(),
        Some("uq_wave_assignments_campaign_day_target")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_resets_status_and_bumps_version(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("mover", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(11)).await.unwrap();
    let created = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 1))
        .await
        .unwrap();

    let progressed = WaveAssignmentRepo::update_progress(
        &pool,
        created.id,
        &UpdateAssignmentProgress {
            wave_status: Some("posted".to_string()),
            outcome: Some("dm_opened".to_string()),
            expected_version: 1,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(progressed.wave_status, "posted");
    assert_eq!(progressed.version, 2);

    let moved = WaveAssignmentRepo::move_to_wave(&pool, created.id, wave(4), 2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.wave_number, wave(4));
    assert_eq!(moved.wave_status, "pending");
    assert_eq!(moved.outcome, "dm_opened");
    assert_eq!(moved.version, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_version_does_not_update(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("stale", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(12)).await.unwrap();
    let created = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 1))
        .await
        .unwrap();

    WaveAssignmentRepo::move_to_wave(&pool, created.id, wave(2), 1)
        .await
        .unwrap()
        .unwrap();
    let stale = WaveAssignmentRepo::move_to_wave(&pool, created.id, wave(3), 1)
        .await
        .unwrap();
    assert!(stale.is_none());

    let current = WaveAssignmentRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.wave_number, wave(2));
    assert_eq!(current.version, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_wave_status_rejected_by_check(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("checked", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(13)).await.unwrap();
    let created = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 1))
        .await
        .unwrap();

    let result = WaveAssignmentRepo::update_progress(
        &pool,
        created.id,
        &UpdateAssignmentProgress {
            wave_status: Some("sent".to_string()),
            outcome: None,
            expected_version: 1,
        },
    )
    .await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_returns_row_and_frees_target(pool: PgPool) {
    let target = TargetRepo::create(&pool, &new_target("freed", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(14)).await.unwrap();
    let created = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, target.id, 2))
        .await
        .unwrap();

    let removed = WaveAssignmentRepo::delete(&pool, created.id).await.unwrap();
    assert_eq!(removed.map(|a| a.id), Some(created.id));
    assert!(WaveAssignmentRepo::delete(&pool, created.id)
        .await
        .unwrap()
        .is_none());

    let available = TargetRepo::list_available_for_day(&pool, day.id, 100)
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_by_day_and_links(pool: PgPool) {
    let a = TargetRepo::create(&pool, &new_target("la", None)).await.unwrap();
    let b = TargetRepo::create(&pool, &new_target("lb", None)).await.unwrap();
    let day = CampaignDayRepo::create(&pool, date(15)).await.unwrap();

    let first = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, a.id, 1))
        .await
        .unwrap();
    let second = WaveAssignmentRepo::create(&pool, &new_assignment(day.id, b.id, 4))
        .await
        .unwrap();

    let listed = WaveAssignmentRepo::list_by_campaign_day(&pool, day.id)
        .await
        .unwrap();
    assert_eq!(
        listed.iter().map(|x| x.id).collect::<Vec<_>>(),
        vec![first.id, second.id]
    );

    let links = WaveAssignmentRepo::list_links(&pool).await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].handle, "la");
    assert_eq!(links[1].wave_number, wave(4));
    assert_eq!(links[0].campaign_date, date(15));
}
