use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::domain::*;
use crate::error::{AppError, Result};

pub mod event_repository;
pub mod team_repository;
pub mod department_repository;
pub mod timeline_repository;
pub mod suggestion_repository;
pub mod club_info_repository;
pub mod announcement_repository;
pub mod page_view_repository;

pub use event_repository::SqliteEventRepository;
pub use team_repository::SqliteTeamRepository;
pub use department_repository::SqliteDepartmentRepository;
pub use timeline_repository::SqliteTimelineRepository;
pub use suggestion_repository::SqliteSuggestionRepository;
pub use club_info_repository::SqliteClubInfoRepository;
pub use announcement_repository::SqliteAnnouncementRepository;
pub use page_view_repository::SqlitePageViewRepository;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewEvent) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    /// Ordered by date ascending.
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>>;
    async fn update(&self, id: Uuid, changes: EventChanges) -> Result<Event>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// Refused with `BadRequest` unless the event is open and below a
    /// positive capacity at the moment of insertion.
    async fn register(&self, event_id: Uuid, registration: NewRegistration) -> Result<EventRegistration>;
    async fn list_registrations(&self, event_id: Uuid) -> Result<Vec<EventRegistration>>;
}

/// Team members and the users they own. Every write touches both tables
/// inside one transaction.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, member: NewTeamMember) -> Result<TeamMember>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TeamMember>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Ordered by creation time ascending.
    async fn list(&self, department: Option<&str>) -> Result<Vec<TeamMember>>;
    async fn update(&self, id: Uuid, changes: TeamMemberChanges) -> Result<TeamMember>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn count_in_department(&self, department: &str) -> Result<i64>;
}

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, department: NewDepartment) -> Result<Department>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Department>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Department>>;
    /// Ordered by name ascending.
    async fn list(&self) -> Result<Vec<Department>>;
    async fn update(&self, id: Uuid, changes: DepartmentChanges) -> Result<Department>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait TimelineRepository: Send + Sync {
    async fn create(&self, item: NewTimelineItem) -> Result<TimelineItem>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TimelineItem>>;
    /// Ordered by `order` ascending.
    async fn list(&self, status: Option<TimelineStatus>) -> Result<Vec<TimelineItem>>;
    async fn update(&self, id: Uuid, changes: TimelineItemChanges) -> Result<TimelineItem>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait SuggestionRepository: Send + Sync {
    async fn create(&self, suggestion: NewSuggestion) -> Result<IdeaSuggestion>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdeaSuggestion>>;
    /// Ordered by creation time descending.
    async fn list(&self, filter: &SuggestionFilter) -> Result<Vec<IdeaSuggestion>>;
    /// Exact, case-sensitive match on the submitter email.
    async fn find_by_email(&self, email: &str) -> Result<Vec<IdeaSuggestion>>;
    async fn update(&self, id: Uuid, changes: SuggestionChanges) -> Result<IdeaSuggestion>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ClubInfoRepository: Send + Sync {
    async fn create(&self, info: NewClubInfo) -> Result<ClubInfo>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ClubInfo>>;
    /// Ordered by key ascending.
    async fn list(&self) -> Result<Vec<ClubInfo>>;
    async fn update(&self, id: Uuid, changes: ClubInfoChanges) -> Result<ClubInfo>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    /// Ordered by priority descending, then newest first.
    async fn list(&self, active: Option<bool>) -> Result<Vec<Announcement>>;
    async fn update(&self, id: Uuid, changes: AnnouncementChanges) -> Result<Announcement>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait PageViewRepository: Send + Sync {
    async fn record(&self, view: NewPageView) -> Result<PageView>;
    async fn count(&self) -> Result<i64>;
    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64>;
    async fn top_pages(&self, limit: i64) -> Result<Vec<PageCount>>;
}

pub(crate) fn parse_id(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| AppError::Database(e.to_string()))
}

pub(crate) fn utc(naive: NaiveDateTime) -> DateTime<Utc> {
    DateTime::from_naive_utc_and_offset(naive, Utc)
}

pub(crate) fn bool_to_int(value: bool) -> i32 {
    if value { 1 } else { 0 }
}
