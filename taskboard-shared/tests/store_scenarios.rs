/// End-to-end scenarios against the in-memory store
///
/// Run with: cargo test --test store_scenarios

use taskboard_shared::error::BoardError;
use taskboard_shared::gamification::AchievementId;
use taskboard_shared::models::notification::{NotificationKind, MAX_NOTIFICATIONS};
use taskboard_shared::models::task::Column;
use taskboard_shared::models::user::{CreateUser, Role};
use taskboard_shared::store::Store;

/// Store seeded with one user per role
async fn seeded_store() -> Store {
    let store = Store::new();
    for (username, role) in [
        ("admin", Role::Admin),
        ("maria", Role::Member),
        ("juan", Role::Guest),
    ] {
        store
            .add_user(CreateUser {
                username: username.to_string(),
                email: format!("{}@taskboard.local", username),
                role,
                password_hash: "test_hash".to_string(),
            })
            .await
            .expect("Failed to seed user");
    }
    store
}

#[tokio::test]
async fn test_member_completes_first_task() {
    let store = seeded_store().await;

    let project = store.create_project("maria", "Sprint1").await.unwrap();
    let dashboard = store.dashboard("maria").await.unwrap();
    assert_eq!(dashboard.active_project.unwrap().id, project.id);
    assert_eq!(dashboard.points, 50);

    let task = store.add_task("maria", "Fix bug").await.unwrap();
    let dashboard = store.dashboard("maria").await.unwrap();
    assert_eq!(dashboard.tasks.as_ref().unwrap().todo.len(), 1);
    assert_eq!(dashboard.points, 60);

    store
        .move_task("maria", &task.id, Column::Todo, Column::Done)
        .await
        .unwrap();

    let dashboard = store.dashboard("maria").await.unwrap();
    let columns = dashboard.tasks.unwrap();
    assert!(columns.todo.is_empty());
    assert_eq!(columns.done.len(), 1);
    assert_eq!(columns.done[0].id, task.id);
    assert_eq!(dashboard.points, 80);
    assert_eq!(dashboard.level, 1);

    let ids: Vec<AchievementId> = dashboard.achievements.iter().map(|a| a.id).collect();
    assert!(ids.contains(&AchievementId::FirstTask));
    assert!(ids.contains(&AchievementId::ProjectCreator));
}

#[tokio::test]
async fn test_guest_cannot_add_task() {
    let store = seeded_store().await;

    let result = store.add_task("juan", "Sneaky task").await;
    assert!(matches!(result, Err(BoardError::Permission(_))));

    let dashboard = store.dashboard("juan").await.unwrap();
    assert_eq!(dashboard.points, 0);
    assert_eq!(dashboard.stats.total_tasks, 0);
    assert!(!dashboard.permissions.can_edit_tasks);
    assert!(!dashboard.permissions.can_manage_projects);
    assert!(store.notifications("juan").await.unwrap().notifications.is_empty());
}

#[tokio::test]
async fn test_move_from_wrong_column_is_not_found() {
    let store = seeded_store().await;
    store.create_project("maria", "Sprint1").await.unwrap();
    let task = store.add_task("maria", "Fix bug").await.unwrap();

    let result = store
        .move_task("maria", &task.id, Column::InProgress, Column::Done)
        .await;
    assert!(matches!(result, Err(BoardError::NotFound(_))));

    let dashboard = store.dashboard("maria").await.unwrap();
    let columns = dashboard.tasks.unwrap();
    assert_eq!(columns.todo.len(), 1);
    assert!(columns.in_progress.is_empty());
    assert!(columns.done.is_empty());
    assert_eq!(dashboard.points, 60);
}

#[tokio::test]
async fn test_notification_log_keeps_latest_fifty() {
    let store = seeded_store().await;
    for i in 0..60 {
        store
            .notify("maria", format!("event {}", i), NotificationKind::Info)
            .await
            .unwrap();
    }

    let summary = store.notifications("maria").await.unwrap();
    assert_eq!(summary.notifications.len(), MAX_NOTIFICATIONS);
    assert_eq!(summary.notifications[0].message, "event 59");
    assert_eq!(summary.notifications[49].message, "event 10");
    assert_eq!(summary.unread_count, 50);

    let marked = store.mark_all_notifications_read("maria").await.unwrap();
    assert_eq!(marked, 50);
    assert_eq!(store.notifications("maria").await.unwrap().unread_count, 0);
}

#[tokio::test]
async fn test_points_never_decrease_and_achievements_stay_unique() {
    let store = seeded_store().await;
    store.create_project("admin", "Ops").await.unwrap();

    let mut last_points = 0;
    let mut task_ids = Vec::new();
    for i in 0..12 {
        let task = store.add_task("admin", &format!("chore {}", i)).await.unwrap();
        task_ids.push(task.id);
    }

    for id in &task_ids {
        store.move_task("admin", id, Column::Todo, Column::Done).await.unwrap();
        store.add_comment("admin", id, "done").await.unwrap();
        // bounce back and forth: completion is re-awarded, achievements are not
        store.move_task("admin", id, Column::Done, Column::InProgress).await.unwrap();
        store.move_task("admin", id, Column::InProgress, Column::Done).await.unwrap();

        let dashboard = store.dashboard("admin").await.unwrap();
        assert!(dashboard.points >= last_points);
        assert_eq!(dashboard.level, dashboard.points / 100 + 1);
        last_points = dashboard.points;
    }

    let dashboard = store.dashboard("admin").await.unwrap();
    let mut ids: Vec<&str> = dashboard.achievements.iter().map(|a| a.id.as_str()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before);

    // 50 + 12 * (10 + 20 + 5 + 20)
    assert_eq!(dashboard.points, 710);
    for expected in ["first_task", "task_master", "project_creator", "level_5", "productive"] {
        assert!(ids.contains(&expected), "missing {}", expected);
    }
}

#[tokio::test]
async fn test_moves_preserve_task_count() {
    let store = seeded_store().await;
    store.create_project("maria", "Sprint1").await.unwrap();

    let a = store.add_task("maria", "a").await.unwrap();
    let b = store.add_task("maria", "b").await.unwrap();
    store.add_task("maria", "c").await.unwrap();

    let moves = [
        (&a.id, Column::Todo, Column::InProgress),
        (&b.id, Column::Todo, Column::Done),
        (&a.id, Column::InProgress, Column::Done),
        (&b.id, Column::Done, Column::Todo),
        (&a.id, Column::Todo, Column::Done),
    ];
    for (id, from, to) in moves {
        let _ = store.move_task("maria", id, from, to).await;
        let stats = store.dashboard("maria").await.unwrap().stats;
        assert_eq!(stats.total_tasks, 3);
    }
}

#[tokio::test]
async fn test_rankings_sorted_and_stable() {
    let store = seeded_store().await;

    // admin: 1 project, maria: 1 project -> tie at 50, registration order wins
    store.create_project("admin", "Ops").await.unwrap();
    store.create_project("maria", "Sprint1").await.unwrap();

    let rankings = store.rankings("juan").await.unwrap();
    let names: Vec<&str> = rankings.rankings.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["admin", "maria", "juan"]);
    assert_eq!(rankings.current_user.unwrap().rank, 3);

    let task = store.add_task("maria", "Fix bug").await.unwrap();
    store.move_task("maria", &task.id, Column::Todo, Column::Done).await.unwrap();

    let leaderboard = store.leaderboard().await;
    assert_eq!(leaderboard[0].username, "maria");
    assert_eq!(leaderboard[0].monthly_score, 60);
    assert_eq!(leaderboard[0].weekly_completed, 1);
    for pair in leaderboard.windows(2) {
        assert!(pair[0].monthly_score >= pair[1].monthly_score);
        assert_eq!(pair[1].rank, pair[0].rank + 1);
    }
}

#[tokio::test]
async fn test_select_project_ignores_foreign_ids() {
    let store = seeded_store().await;
    store.create_project("admin", "Ops").await.unwrap();
    let first = store.create_project("maria", "Sprint1").await.unwrap();
    let second = store.create_project("maria", "Sprint2").await.unwrap();

    assert!(!store.select_project("maria", "proj_7_1234").await.unwrap());
    assert_eq!(
        store.dashboard("maria").await.unwrap().active_project.unwrap().id,
        first.id
    );

    assert!(store.select_project("maria", &second.id).await.unwrap());
    let task = store.add_task("maria", "Plan").await.unwrap();
    assert!(task.id.contains(&second.id));

    // another user's project id is ignored
    assert!(!store.select_project("admin", &second.id).await.unwrap());
}
