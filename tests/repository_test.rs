mod common;

use chrono::{Duration, TimeZone, Utc};
use incubator::{
    domain::*,
    error::AppError,
    repository::*,
};

fn sample_event(title: &str, days_from_now: i64) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        description: "An evening of pitches".to_string(),
        date: Utc::now() + Duration::days(days_from_now),
        time: "18:00".to_string(),
        location: "Innovation Hub".to_string(),
        capacity: 2,
        status: EventStatus::Upcoming,
        category: "Competition".to_string(),
        image: None,
        registration_url: None,
    }
}

fn sample_member(name: &str, email: &str, department: &str) -> NewTeamMember {
    NewTeamMember {
        name: name.to_string(),
        email: email.to_string(),
        avatar: None,
        role: "Coordinator".to_string(),
        department: department.to_string(),
        bio: String::new(),
        linkedin: None,
        twitter: None,
    }
}

#[tokio::test]
async fn test_event_crud() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteEventRepository::new(pool.clone());

    // Test Create
    let event = repo.create(sample_event("Pitch Night", 10)).await?;
    assert_eq!(event.title, "Pitch Night");
    assert_eq!(event.status, EventStatus::Upcoming);
    assert_eq!(event.attendees, 0);

    // Test Find by ID
    let found = repo.find_by_id(event.id).await?;
    assert_eq!(found.map(|e| e.id), Some(event.id));

    // Test Update
    let updated = repo.update(event.id, EventChanges {
        location: Some("Main Auditorium".to_string()),
        image: Some(Some("/uploads/event/eventImage-1-2.png".to_string())),
        ..Default::default()
    }).await?;
    assert_eq!(updated.location, "Main Auditorium");
    assert_eq!(updated.title, "Pitch Night");
    assert_eq!(updated.image.as_deref(), Some("/uploads/event/eventImage-1-2.png"));

    // Test Delete
    repo.delete(event.id).await?;
    assert!(repo.find_by_id(event.id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_event_list_filters_and_order() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteEventRepository::new(pool.clone());

    let later = repo.create(sample_event("Demo Day", 30)).await?;
    let sooner = repo.create(sample_event("Workshop", 3)).await?;
    let mut past = sample_event("Kickoff", -5);
    past.status = EventStatus::Completed;
    past.category = "Social".to_string();
    let past = repo.create(past).await?;

    let all = repo.list(&EventFilter::default()).await?;
    let ids: Vec<_> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![past.id, sooner.id, later.id]);

    let upcoming = repo.list(&EventFilter {
        status: Some(EventStatus::Upcoming),
        ..Default::default()
    }).await?;
    assert_eq!(upcoming.len(), 2);

    let social = repo.list(&EventFilter {
        category: Some("Social".to_string()),
        ..Default::default()
    }).await?;
    assert_eq!(social.len(), 1);
    assert_eq!(social[0].id, past.id);

    Ok(())
}

#[tokio::test]
async fn test_event_registrations() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteEventRepository::new(pool.clone());
    let event = repo.create(sample_event("Pitch Night", 10)).await?;

    repo.register(event.id, NewRegistration {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }).await?;

    let duplicate = repo.register(event.id, NewRegistration {
        name: "Ada again".to_string(),
        email: "ada@example.com".to_string(),
    }).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let event = repo.find_by_id(event.id).await?.unwrap();
    assert_eq!(event.attendees, 1);
    assert_eq!(repo.list_registrations(event.id).await?.len(), 1);

    // Registrations go with the event
    repo.delete(event.id).await?;
    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM event_registrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(remaining.0, 0);

    Ok(())
}

#[tokio::test]
async fn test_registration_refused_once_full_or_closed() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteEventRepository::new(pool.clone());
    let event = repo.create(sample_event("Pitch Night", 10)).await?;

    for (name, email) in [("Ada", "ada@example.com"), ("Bob", "bob@example.com")] {
        repo.register(event.id, NewRegistration {
            name: name.to_string(),
            email: email.to_string(),
        }).await?;
    }

    let third = repo.register(event.id, NewRegistration {
        name: "Cy".to_string(),
        email: "cy@example.com".to_string(),
    }).await;
    assert!(matches!(third, Err(AppError::BadRequest(_))));

    let mut open_ended = sample_event("Open Mic", 5);
    open_ended.capacity = 0;
    open_ended.status = EventStatus::Cancelled;
    let cancelled = repo.create(open_ended).await?;
    let refused = repo.register(cancelled.id, NewRegistration {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }).await;
    assert!(matches!(refused, Err(AppError::BadRequest(_))));
    assert_eq!(repo.list_registrations(cancelled.id).await?.len(), 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_respect_capacity() -> anyhow::Result<()> {
    let db_path = std::env::temp_dir().join(format!("incubator-race-{}.db", uuid::Uuid::new_v4()));
    let pool = common::file_pool(&db_path, 10).await?;
    let ctx = std::sync::Arc::new(incubator::service::ServiceContext::new(pool.clone()));

    let mut event = sample_event("Founder Dinner", 3);
    event.capacity = 1;
    let event_id = ctx.event_repo.create(event).await?.id;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let ctx = ctx.clone();
        tasks.push(tokio::spawn(async move {
            ctx.event_service.register(event_id, NewRegistration {
                name: format!("Guest {}", i),
                email: format!("guest{}@example.com", i),
            }).await
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        match task.await? {
            Ok(_) => accepted += 1,
            Err(AppError::BadRequest(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    let attendees = ctx.event_repo.find_by_id(event_id).await?.unwrap().attendees;
    pool.close().await;
    let _ = std::fs::remove_file(&db_path);

    assert_eq!(accepted, 1);
    assert_eq!(attendees, 1);

    Ok(())
}

#[tokio::test]
async fn test_team_member_owns_user() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteTeamRepository::new(pool.clone());

    let member = repo.create(sample_member("Grace Hopper", "grace@example.com", "Leadership")).await?;
    assert_eq!(member.user.name, "Grace Hopper");
    assert_eq!(member.user.email, "grace@example.com");
    assert_eq!(member.bio, "");

    let user = repo.find_user_by_email("grace@example.com").await?;
    assert_eq!(user.map(|u| u.id), Some(member.user_id));

    // Updates reach both rows
    let updated = repo.update(member.id, TeamMemberChanges {
        name: Some("Grace B. Hopper".to_string()),
        role: Some("President".to_string()),
        ..Default::default()
    }).await?;
    assert_eq!(updated.user.name, "Grace B. Hopper");
    assert_eq!(updated.role, "President");
    assert_eq!(updated.user.email, "grace@example.com");

    assert_eq!(repo.count_in_department("Leadership").await?, 1);
    assert_eq!(repo.count_in_department("leadership").await?, 0);

    repo.delete(member.id).await?;
    assert!(repo.find_by_id(member.id).await?.is_none());
    assert!(repo.find_user_by_email("grace@example.com").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_team_list_by_department() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteTeamRepository::new(pool.clone());

    let first = repo.create(sample_member("A", "a@example.com", "Marketing")).await?;
    let second = repo.create(sample_member("B", "b@example.com", "Finance")).await?;
    let third = repo.create(sample_member("C", "c@example.com", "Marketing")).await?;

    let all: Vec<_> = repo.list(None).await?.into_iter().map(|m| m.id).collect();
    assert_eq!(all, vec![first.id, second.id, third.id]);

    let marketing: Vec<_> = repo.list(Some("Marketing")).await?.into_iter().map(|m| m.id).collect();
    assert_eq!(marketing, vec![first.id, third.id]);

    Ok(())
}

#[tokio::test]
async fn test_department_crud() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteDepartmentRepository::new(pool.clone());

    repo.create(NewDepartment { name: "Marketing".to_string(), description: None }).await?;
    let events = repo.create(NewDepartment {
        name: "Events".to_string(),
        description: Some("Workshops".to_string()),
    }).await?;

    let names: Vec<_> = repo.list().await?.into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Events", "Marketing"]);

    assert!(repo.find_by_name("Events").await?.is_some());

    let updated = repo.update(events.id, DepartmentChanges {
        description: Some(None),
        ..Default::default()
    }).await?;
    assert_eq!(updated.name, "Events");
    assert!(updated.description.is_none());

    repo.delete(events.id).await?;
    assert!(matches!(repo.delete(events.id).await, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_timeline_tasks_keep_order() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteTimelineRepository::new(pool.clone());

    let task = |title: &str, completed: bool| NewTask { title: title.to_string(), completed };
    let item = repo.create(NewTimelineItem {
        title: "Demo day".to_string(),
        description: "Final showcase".to_string(),
        status: TimelineStatus::Pending,
        due_date: Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap(),
        order: 2,
        completed_at: None,
        tasks: vec![task("Book venue", true), task("Invite judges", false), task("Print badges", false)],
    }).await?;

    let titles: Vec<_> = item.tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Book venue", "Invite judges", "Print badges"]);
    assert!(item.tasks[0].completed);

    // Replacing the task list
    let updated = repo.update(item.id, TimelineItemChanges {
        tasks: Some(vec![task("Rehearse", false)]),
        ..Default::default()
    }).await?;
    assert_eq!(updated.tasks.len(), 1);
    assert_eq!(updated.tasks[0].title, "Rehearse");
    assert_eq!(updated.order, 2);

    repo.delete(item.id).await?;
    let tasks: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM timeline_tasks")
        .fetch_one(&pool)
        .await?;
    assert_eq!(tasks.0, 0);

    Ok(())
}

#[tokio::test]
async fn test_suggestions_by_email() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteSuggestionRepository::new(pool.clone());

    let new = |title: &str, email: Option<&str>| NewSuggestion {
        title: title.to_string(),
        description: "Details".to_string(),
        category: "Technology".to_string(),
        submitter_name: None,
        submitter_email: email.map(str::to_string),
    };

    let first = repo.create(new("Campus app", Some("sam@example.com"))).await?;
    repo.create(new("Anonymous idea", None)).await?;
    let second = repo.create(new("Food delivery", Some("sam@example.com"))).await?;
    repo.create(new("Other", Some("Sam@example.com"))).await?;

    let found: Vec<_> = repo.find_by_email("sam@example.com").await?.into_iter().map(|s| s.id).collect();
    assert_eq!(found, vec![second.id, first.id]);
    assert!(repo.find_by_email("nobody@example.com").await?.is_empty());

    let reviewed = repo.update(first.id, SuggestionChanges {
        status: Some(SuggestionStatus::UnderReview),
        admin_notes: Some(Some("Promising".to_string())),
        ..Default::default()
    }).await?;
    assert_eq!(reviewed.status, SuggestionStatus::UnderReview);
    assert_eq!(reviewed.admin_notes.as_deref(), Some("Promising"));

    let pending = repo.list(&SuggestionFilter {
        status: Some(SuggestionStatus::Pending),
        ..Default::default()
    }).await?;
    assert_eq!(pending.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_club_info_keys_are_unique() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteClubInfoRepository::new(pool.clone());

    let mission = repo.create(NewClubInfo {
        key: "mission".to_string(),
        value: "Build things".to_string(),
        description: None,
    }).await?;
    repo.create(NewClubInfo {
        key: "contact".to_string(),
        value: "hello@example.com".to_string(),
        description: None,
    }).await?;

    let duplicate = repo.create(NewClubInfo {
        key: "mission".to_string(),
        value: "Again".to_string(),
        description: None,
    }).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let keys: Vec<_> = repo.list().await?.into_iter().map(|i| i.key).collect();
    assert_eq!(keys, vec!["contact", "mission"]);

    let updated = repo.update(mission.id, ClubInfoChanges {
        value: Some("Ship things".to_string()),
        ..Default::default()
    }).await?;
    assert_eq!(updated.value, "Ship things");
    assert_eq!(repo.find_by_id(mission.id).await?.map(|i| i.value), Some("Ship things".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_announcement_order() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqliteAnnouncementRepository::new(pool.clone());

    let new = |title: &str, priority: i64, is_active: bool| NewAnnouncement {
        title: title.to_string(),
        content: "Body".to_string(),
        is_active,
        priority,
    };

    let old_low = repo.create(new("Old low", 0, true)).await?;
    let high = repo.create(new("High", 5, true)).await?;
    let new_low = repo.create(new("New low", 0, true)).await?;
    let hidden = repo.create(new("Hidden", 9, false)).await?;

    let all: Vec<_> = repo.list(None).await?.into_iter().map(|a| a.id).collect();
    assert_eq!(all, vec![hidden.id, high.id, new_low.id, old_low.id]);

    let active: Vec<_> = repo.list(Some(true)).await?.into_iter().map(|a| a.id).collect();
    assert_eq!(active, vec![high.id, new_low.id, old_low.id]);

    Ok(())
}

#[tokio::test]
async fn test_page_views() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let repo = SqlitePageViewRepository::new(pool.clone());

    for page in ["/", "/events", "/", "/team", "/"] {
        repo.record(NewPageView {
            page: page.to_string(),
            referrer: None,
            user_agent: Some("test".to_string()),
        }).await?;
    }

    assert_eq!(repo.count().await?, 5);
    assert_eq!(repo.count_since(Utc::now() - Duration::days(1)).await?, 5);
    assert_eq!(repo.count_since(Utc::now() + Duration::days(1)).await?, 0);

    let top = repo.top_pages(2).await?;
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].page, "/");
    assert_eq!(top[0].views, 3);

    Ok(())
}
