mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Pitch your startup to a panel of founders",
        "date": "2025-03-01",
        "time": "18:00",
        "location": "Innovation Hub",
        "capacity": "50",
        "category": "Competition"
    })
}

fn member_body(name: &str, email: &str, department: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "role": "Coordinator",
        "department": department
    })
}

fn id_of(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap().to_string()
}

fn ids_of(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_and_info() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let (status, body) = app.get("/api").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Incubator API");
    assert!(body["resources"].as_array().unwrap().contains(&json!("suggestions")));
    assert_eq!(body["uploads"]["maxFileSize"], 5 * 1024 * 1024);
    assert!(body["uploads"]["extensions"].as_array().unwrap().contains(&json!("webp")));

    Ok(())
}

#[tokio::test]
async fn test_create_with_missing_fields_writes_nothing() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let cases = [
        ("/api/admin/events", "events", "capacity"),
        ("/api/admin/team", "team_members", "department"),
        ("/api/admin/departments", "departments", "name"),
        ("/api/admin/timeline", "timeline_items", "dueDate"),
        ("/api/admin/suggestions", "idea_suggestions", "category"),
        ("/api/admin/club-info", "club_info", "value"),
        ("/api/admin/announcements", "announcements", "content"),
        ("/api/analytics/page-view", "page_views", "page"),
    ];

    for (uri, table, field) in cases {
        let (status, body) = app.post(uri, json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Missing required fields"), "{}: {}", uri, error);
        assert!(error.contains(field), "{}: {}", uri, error);
        assert_eq!(app.count(table).await, 0, "{}", table);
    }

    // No orphaned user either
    assert_eq!(app.count("users").await, 0);

    // A blank string counts as missing
    let mut body = event_body("Pitch Night");
    body["title"] = json!("   ");
    let (status, body) = app.post("/api/admin/events", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields: title");
    assert_eq!(app.count("events").await, 0);

    Ok(())
}

#[tokio::test]
async fn test_non_object_body_is_rejected() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (status, body) = app.post("/api/admin/departments", json!(["Marketing"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    Ok(())
}

#[tokio::test]
async fn test_create_event_coerces_input() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (status, body) = app.post("/api/admin/events", event_body("Pitch Night")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let event = &body["data"];
    assert!(event["id"].is_string());
    assert!(event["createdAt"].is_string());
    assert_eq!(event["title"], "Pitch Night");
    assert_eq!(event["capacity"], 50);
    assert_eq!(event["status"], "UPCOMING");
    assert_eq!(event["attendees"], 0);
    assert_eq!(event["date"], "2025-03-01T00:00:00Z");
    assert!(event["image"].is_null());

    // Invalid numbers are rejected rather than stored
    let mut bad = event_body("Broken");
    bad["capacity"] = json!("fifty");
    let (status, body) = app.post("/api/admin/events", bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("capacity"));
    assert_eq!(app.count("events").await, 1);

    Ok(())
}

#[tokio::test]
async fn test_update_is_partial() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (_, created) = app.post("/api/admin/events", event_body("Pitch Night")).await;
    let id = id_of(&created);

    let (status, body) = app
        .put(&format!("/api/admin/events/{}", id), json!({ "status": "ongoing", "capacity": 75 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ONGOING");
    assert_eq!(body["data"]["capacity"], 75);
    assert_eq!(body["data"]["title"], "Pitch Night");
    assert_eq!(body["data"]["location"], "Innovation Hub");

    // Present but blank required field
    let (status, _) = app
        .put(&format!("/api/admin/events/{}", id), json!({ "title": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for blank in [json!(""), json!(null)] {
        let (status, body) = app
            .put(&format!("/api/admin/events/{}", id), json!({ "capacity": blank }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: capacity");
    }
    let (_, body) = app.get(&format!("/api/events/{}", id)).await;
    assert_eq!(body["data"]["capacity"], 75);

    Ok(())
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() -> anyhow::Result<()> {
    let app = common::test_app().await?;
    let missing = uuid::Uuid::new_v4();

    for entity in ["events", "team", "departments", "timeline", "suggestions", "club-info", "announcements"] {
        let uri = format!("/api/admin/{}/{}", entity, missing);

        let (status, body) = app.put(&uri, json!({ "title": "x" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        assert_eq!(body["success"], false);

        let (status, _) = app.delete(&uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }

    let (status, _) = app.delete("/api/admin/events/not-a-uuid").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/api/events/{}", missing)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_events_sorted_by_date() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let mut later = event_body("Demo Day");
    later["date"] = json!("2025-06-01");
    let mut sooner = event_body("Workshop");
    sooner["date"] = json!("2025-02-01T16:30:00Z");

    let (_, later) = app.post("/api/admin/events", later).await;
    let (_, sooner) = app.post("/api/admin/events", sooner).await;

    let (status, body) = app.get("/api/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![id_of(&sooner), id_of(&later)]);

    let (status, _) = app.get("/api/events?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_announcements_sorted_by_priority_then_newest() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let post = |title: &'static str, priority: i64, active: bool| {
        json!({ "title": title, "content": "Body", "priority": priority, "isActive": active })
    };

    let (status, old_low) = app.post("/api/admin/announcements", post("Old", 0, true)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(old_low["data"]["isActive"], true);
    let (_, high) = app.post("/api/admin/announcements", post("High", 3, true)).await;
    let (_, new_low) = app.post("/api/admin/announcements", post("New", 0, true)).await;
    let (_, hidden) = app.post("/api/admin/announcements", post("Hidden", 10, false)).await;

    let (_, body) = app.get("/api/admin/announcements").await;
    assert_eq!(
        ids_of(&body),
        vec![id_of(&hidden), id_of(&high), id_of(&new_low), id_of(&old_low)]
    );

    // The public feed only shows active announcements
    let (_, body) = app.get("/api/announcements").await;
    assert_eq!(ids_of(&body), vec![id_of(&high), id_of(&new_low), id_of(&old_low)]);

    let (_, body) = app.get("/api/admin/announcements?active=false").await;
    assert_eq!(ids_of(&body), vec![id_of(&hidden)]);

    Ok(())
}

#[tokio::test]
async fn test_department_in_use_cannot_be_deleted() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (status, department) = app
        .post("/api/admin/departments", json!({ "name": "Marketing" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let department_id = id_of(&department);

    let (status, _) = app
        .post("/api/admin/departments", json!({ "name": "Marketing" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, member) = app
        .post("/api/admin/team", member_body("Lin", "lin@example.com", "Marketing"))
        .await;

    let (status, body) = app.delete(&format!("/api/admin/departments/{}", department_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Marketing"));
    assert_eq!(app.count("departments").await, 1);

    // Once nobody refers to it, it can go
    app.delete(&format!("/api/admin/team/{}", id_of(&member))).await;
    let (status, body) = app.delete(&format!("/api/admin/departments/{}", department_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], department_id.as_str());
    assert_eq!(app.count("departments").await, 0);

    Ok(())
}

#[tokio::test]
async fn test_team_member_lifecycle() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let mut body = member_body("Ada Lovelace", "ada@example.com", "Leadership");
    body["image"] = json!("/uploads/team/teamImage-1-1.png");
    let (status, created) = app.post("/api/admin/team", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["user"]["name"], "Ada Lovelace");
    assert_eq!(created["data"]["user"]["avatar"], "/uploads/team/teamImage-1-1.png");
    assert_eq!(created["data"]["bio"], "");
    assert_eq!(app.count("users").await, 1);
    let id = id_of(&created);

    // Same email again is a conflict and leaves no extra user behind
    let (status, _) = app
        .post("/api/admin/team", member_body("Impostor", "ada@example.com", "Finance"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(app.count("users").await, 1);
    assert_eq!(app.count("team_members").await, 1);

    // Malformed email
    let (status, _) = app
        .post("/api/admin/team", member_body("Bad", "not-an-email", "Finance"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.count("users").await, 1);

    let (status, updated) = app
        .put(&format!("/api/admin/team/{}", id), json!({ "role": "President", "linkedin": "https://linkedin.com/in/ada" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["role"], "President");
    assert_eq!(updated["data"]["user"]["email"], "ada@example.com");

    let (_, listed) = app.get("/api/team?department=Leadership").await;
    assert_eq!(ids_of(&listed), vec![id.clone()]);

    // Deleting the member deletes its user
    let (status, _) = app.delete(&format!("/api/admin/team/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.count("team_members").await, 0);
    assert_eq!(app.count("users").await, 0);

    Ok(())
}

#[tokio::test]
async fn test_timeline_completed_on_create() -> anyhow::Result<()> {
    let app = common::test_app().await?;
    let before = Utc::now();

    let (status, body) = app
        .post("/api/admin/timeline", json!({
            "title": "Recruit founding team",
            "description": "Fill the board",
            "dueDate": "2025-01-15",
            "status": "completed",
            "order": "1",
            "tasks": [
                { "title": "Post on club fair" },
                { "title": "Interview applicants", "completed": "true" },
                { "title": "Announce board" }
            ]
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let item = &body["data"];
    assert_eq!(item["status"], "COMPLETED");
    assert_eq!(item["order"], 1);
    assert_eq!(item["dueDate"], "2025-01-15T00:00:00Z");

    let completed_at: DateTime<Utc> = item["completedAt"].as_str().unwrap().parse()?;
    assert!(completed_at >= before);
    assert!(completed_at <= Utc::now());

    let titles: Vec<_> = item["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Post on club fair", "Interview applicants", "Announce board"]);
    assert_eq!(item["tasks"][1]["completed"], true);
    assert_eq!(item["tasks"][0]["completed"], false);

    // Reopening clears the completion time
    let (status, body) = app
        .put(&format!("/api/admin/timeline/{}", id_of(&body)), json!({ "status": "IN_PROGRESS" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["completedAt"].is_null());
    assert_eq!(body["data"]["tasks"].as_array().unwrap().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_timeline_sorted_by_order() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let item = |title: &str, order: i64| json!({
        "title": title, "description": "d", "dueDate": "2025-05-01", "order": order
    });
    let (_, third) = app.post("/api/admin/timeline", item("Demo day", 3)).await;
    let (_, first) = app.post("/api/admin/timeline", item("Kickoff", 1)).await;
    let (_, second) = app.post("/api/admin/timeline", item("Build", 2)).await;

    let (_, body) = app.get("/api/timeline").await;
    assert_eq!(ids_of(&body), vec![id_of(&first), id_of(&second), id_of(&third)]);

    let (_, body) = app.get("/api/timeline?status=pending").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_suggestion_lookup_by_email() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let submit = |title: &str, email: Option<&str>| {
        let mut body = json!({
            "title": title,
            "description": "An idea",
            "category": "Technology",
            "status": "APPROVED",
            "adminNotes": "sneaky"
        });
        if let Some(email) = email {
            body["submitterEmail"] = json!(email);
        }
        body
    };

    let (status, first) = app.post("/api/suggestions", submit("Campus app", Some("kim@example.com"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["status"], "PENDING");
    assert!(first["data"]["adminNotes"].is_null());

    app.post("/api/suggestions", submit("Anonymous", None)).await;
    let (_, second) = app.post("/api/suggestions", submit("Food delivery", Some("kim@example.com"))).await;
    app.post("/api/suggestions", submit("Someone else", Some("KIM@example.com"))).await;

    let (status, body) = app.get("/api/suggestions?email=kim@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids_of(&body), vec![id_of(&second), id_of(&first)]);

    let (status, body) = app.get("/api/suggestions?email=nobody@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    // No trimming or case folding on the lookup
    let (status, body) = app.get("/api/suggestions?email=%20kim@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = app.get("/api/suggestions").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/suggestions?email=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Admin review
    let (status, body) = app
        .put(&format!("/api/admin/suggestions/{}", id_of(&first)), json!({ "status": "under review", "adminNotes": "Shortlisted" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "UNDER_REVIEW");
    assert_eq!(body["data"]["adminNotes"], "Shortlisted");

    let (_, body) = app.get("/api/admin/suggestions?status=PENDING").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_club_info_and_departments_sorted_by_name() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    app.post("/api/admin/club-info", json!({ "key": "mission", "value": "Build" })).await;
    app.post("/api/admin/club-info", json!({ "key": "contact", "value": "hello@example.com" })).await;
    let (status, _) = app.post("/api/admin/club-info", json!({ "key": "mission", "value": "Again" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = app.get("/api/club-info").await;
    let keys: Vec<_> = body["data"].as_array().unwrap().iter().map(|i| i["key"].clone()).collect();
    assert_eq!(keys, vec![json!("contact"), json!("mission")]);

    app.post("/api/admin/departments", json!({ "name": "Marketing" })).await;
    app.post("/api/admin/departments", json!({ "name": "Events" })).await;
    let (_, body) = app.get("/api/departments").await;
    let names: Vec<_> = body["data"].as_array().unwrap().iter().map(|d| d["name"].clone()).collect();
    assert_eq!(names, vec![json!("Events"), json!("Marketing")]);

    Ok(())
}

#[tokio::test]
async fn test_event_registration() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let mut body = event_body("Small Workshop");
    body["capacity"] = json!(1);
    let (_, event) = app.post("/api/admin/events", body).await;
    let register_uri = format!("/api/events/{}/register", id_of(&event));

    let (status, _) = app.post(&register_uri, json!({ "name": "Ada", "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post(&register_uri, json!({ "name": "Ada", "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "event is full");

    let (_, body) = app.get(&format!("/api/events/{}", id_of(&event))).await;
    assert_eq!(body["data"]["attendees"], 1);

    // Unlimited capacity; duplicate email conflicts
    let (_, open) = app.post("/api/admin/events", event_body("Open House")).await;
    let open_id = id_of(&open);
    app.put(&format!("/api/admin/events/{}", open_id), json!({ "capacity": 0 })).await;
    let register_uri = format!("/api/events/{}/register", open_id);
    app.post(&register_uri, json!({ "name": "Ada", "email": "ada@example.com" })).await;
    let (status, _) = app.post(&register_uri, json!({ "name": "Ada", "email": "ada@example.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.post(&register_uri, json!({ "name": "Bob", "email": "bob" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Cancelled events are closed
    app.put(&format!("/api/admin/events/{}", open_id), json!({ "status": "CANCELLED" })).await;
    let (status, _) = app.post(&register_uri, json!({ "name": "Cy", "email": "cy@example.com" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app.get(&format!("/api/admin/events/{}/registrations", open_id)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_login() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    let (status, body) = app
        .post("/api/auth/login", json!({ "username": "admin", "password": "hunter2" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");

    let (status, body) = app
        .post("/api/auth/login", json!({ "username": "admin", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    Ok(())
}

#[tokio::test]
async fn test_page_views_and_stats() -> anyhow::Result<()> {
    let app = common::test_app().await?;

    for page in ["/", "/events", "/"] {
        let (status, body) = app
            .post("/api/analytics/page-view", json!({ "page": page, "referrer": "https://example.com" }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["page"], page);
    }

    app.post("/api/admin/events", event_body("Pitch Night")).await;
    app.post("/api/suggestions", json!({ "title": "Idea", "description": "d", "category": "c" })).await;

    let (status, body) = app.get("/api/admin/stats").await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["data"];
    assert_eq!(stats["totalEvents"], 1);
    assert_eq!(stats["upcomingEvents"], 1);
    assert_eq!(stats["suggestions"], 1);
    assert_eq!(stats["pendingSuggestions"], 1);
    assert_eq!(stats["pageViews"], 3);
    assert_eq!(stats["pageViewsLast7Days"], 3);
    assert_eq!(stats["topPages"][0]["page"], "/");
    assert_eq!(stats["topPages"][0]["views"], 2);

    Ok(())
}
