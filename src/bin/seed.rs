use incubator::{
    domain::{
        EventStatus, NewAnnouncement, NewClubInfo, NewDepartment, NewEvent, NewSuggestion,
        NewTask, NewTeamMember, NewTimelineItem, TimelineStatus,
    },
    service::ServiceContext,
};
use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{
        internet::en::SafeEmail,
        lorem::en::{Paragraph, Sentence},
        name::en::Name,
    },
    Fake,
};
use sqlx::sqlite::SqlitePoolOptions;

/// Fill a database with sample club content for local development
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    /// SQLite connection string
    #[arg(long, default_value = "sqlite://incubator.db?mode=rwc")]
    database_url: String,

    /// Number of random idea suggestions to generate
    #[arg(long, default_value_t = 12)]
    suggestions: usize,
}

const CATEGORIES: &[&str] = &["Technology", "Social Impact", "Sustainability", "Education", "Health"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("🌱 Starting database seeding...");

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    // Run migrations first
    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let ctx = ServiceContext::new(db_pool);

    // Departments
    println!("🏢 Creating departments...");
    let departments = [
        ("Leadership", "Board and club coordination"),
        ("Marketing", "Outreach, social media and branding"),
        ("Events", "Workshops, pitch nights and speaker series"),
        ("Finance", "Budget, sponsorships and grants"),
    ];
    for (name, description) in departments {
        ctx.department_service.create(NewDepartment {
            name: name.to_string(),
            description: Some(description.to_string()),
        }).await?;
    }
    println!("  ✅ Created {} departments", departments.len());

    // Team
    println!("👥 Creating team members...");
    let roles = [
        ("President", "Leadership"),
        ("Vice President", "Leadership"),
        ("Marketing Lead", "Marketing"),
        ("Events Coordinator", "Events"),
        ("Treasurer", "Finance"),
    ];
    for (role, department) in roles {
        let name: String = Name().fake();
        let email: String = SafeEmail().fake();
        ctx.team_service.create(NewTeamMember {
            name,
            email,
            avatar: None,
            role: role.to_string(),
            department: department.to_string(),
            bio: Sentence(8..14).fake(),
            linkedin: None,
            twitter: None,
        }).await?;
    }
    println!("  ✅ Created {} team members", roles.len());

    // Events
    println!("📅 Creating events...");
    let now = Utc::now();
    let events = [
        ("Startup Pitch Night", 14, "18:00", "Innovation Hub", 80, EventStatus::Upcoming, "Competition"),
        ("Lean Canvas Workshop", 7, "16:30", "Room 204", 30, EventStatus::Upcoming, "Workshop"),
        ("Founder Fireside Chat", -10, "19:00", "Main Auditorium", 150, EventStatus::Completed, "Speaker"),
        ("Hackathon Kickoff", 30, "09:00", "Engineering Building", 0, EventStatus::Upcoming, "Hackathon"),
    ];
    for (title, days, time, location, capacity, status, category) in events {
        ctx.event_repo.create(NewEvent {
            title: title.to_string(),
            description: Paragraph(1..3).fake(),
            date: now + Duration::days(days),
            time: time.to_string(),
            location: location.to_string(),
            capacity,
            status,
            category: category.to_string(),
            image: None,
            registration_url: None,
        }).await?;
    }
    println!("  ✅ Created {} events", events.len());

    // Timeline
    println!("🗺️  Creating timeline...");
    let milestones = [
        ("Recruit founding team", TimelineStatus::Completed, -60, vec!["Post on club fair", "Interview applicants"]),
        ("Launch idea incubator", TimelineStatus::InProgress, 20, vec!["Open suggestion form", "Pick first cohort"]),
        ("Demo day", TimelineStatus::Pending, 90, vec!["Book venue", "Invite judges", "Prepare pitches"]),
    ];
    for (order, (title, status, days, tasks)) in milestones.into_iter().enumerate() {
        ctx.timeline_service.create(NewTimelineItem {
            title: title.to_string(),
            description: Sentence(6..12).fake(),
            status,
            due_date: now + Duration::days(days),
            order: order as i64,
            completed_at: None,
            tasks: tasks
                .into_iter()
                .map(|task| NewTask {
                    title: task.to_string(),
                    completed: status == TimelineStatus::Completed,
                })
                .collect(),
        }).await?;
    }
    println!("  ✅ Created timeline");

    // Announcements
    println!("📢 Creating announcements...");
    ctx.announcement_repo.create(NewAnnouncement {
        title: "Applications open for the spring cohort".to_string(),
        content: Paragraph(2..4).fake(),
        is_active: true,
        priority: 10,
    }).await?;
    ctx.announcement_repo.create(NewAnnouncement {
        title: "Welcome to the new website".to_string(),
        content: Paragraph(1..2).fake(),
        is_active: true,
        priority: 0,
    }).await?;
    ctx.announcement_repo.create(NewAnnouncement {
        title: "Fall meetup recap".to_string(),
        content: Paragraph(1..2).fake(),
        is_active: false,
        priority: 0,
    }).await?;
    println!("  ✅ Created 3 announcements");

    // Club info
    println!("ℹ️  Creating club info...");
    let info = [
        ("mission", "Help students turn ideas into ventures", Some("Shown on the home page")),
        ("contact_email", "hello@incubator.example.edu", None),
        ("meeting_time", "Thursdays 18:00", Some("Weekly general meeting")),
    ];
    for (key, value, description) in info {
        ctx.club_info_repo.create(NewClubInfo {
            key: key.to_string(),
            value: value.to_string(),
            description: description.map(str::to_string),
        }).await?;
    }
    println!("  ✅ Created {} club info entries", info.len());

    // Suggestions
    println!("💡 Creating {} idea suggestions...", args.suggestions);
    for i in 0..args.suggestions {
        let anonymous = i % 4 == 3;
        ctx.suggestion_repo.create(NewSuggestion {
            title: Sentence(3..6).fake(),
            description: Paragraph(1..3).fake(),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            submitter_name: if anonymous { None } else { Some(Name().fake()) },
            submitter_email: if anonymous { None } else { Some(SafeEmail().fake()) },
        }).await?;
    }

    println!("✨ Seeding complete!");
    Ok(())
}
