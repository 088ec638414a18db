pub mod department_service;
pub mod event_service;
pub mod stats_service;
pub mod team_service;
pub mod timeline_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::repository::*;
use department_service::DepartmentService;
use event_service::EventService;
use stats_service::StatsService;
use team_service::TeamService;
use timeline_service::TimelineService;

pub struct ServiceContext {
    pub event_repo: Arc<dyn EventRepository>,
    pub team_repo: Arc<dyn TeamRepository>,
    pub department_repo: Arc<dyn DepartmentRepository>,
    pub timeline_repo: Arc<dyn TimelineRepository>,
    pub suggestion_repo: Arc<dyn SuggestionRepository>,
    pub club_info_repo: Arc<dyn ClubInfoRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub page_view_repo: Arc<dyn PageViewRepository>,
    pub event_service: Arc<EventService>,
    pub team_service: Arc<TeamService>,
    pub department_service: Arc<DepartmentService>,
    pub timeline_service: Arc<TimelineService>,
    pub stats_service: Arc<StatsService>,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool) -> Self {
        // Create repositories
        let event_repo: Arc<dyn EventRepository> = Arc::new(SqliteEventRepository::new(db_pool.clone()));
        let team_repo: Arc<dyn TeamRepository> = Arc::new(SqliteTeamRepository::new(db_pool.clone()));
        let department_repo: Arc<dyn DepartmentRepository> =
            Arc::new(SqliteDepartmentRepository::new(db_pool.clone()));
        let timeline_repo: Arc<dyn TimelineRepository> =
            Arc::new(SqliteTimelineRepository::new(db_pool.clone()));
        let suggestion_repo = Arc::new(SqliteSuggestionRepository::new(db_pool.clone()));
        let club_info_repo = Arc::new(SqliteClubInfoRepository::new(db_pool.clone()));
        let announcement_repo = Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));
        let page_view_repo: Arc<dyn PageViewRepository> =
            Arc::new(SqlitePageViewRepository::new(db_pool.clone()));

        // Create services
        let event_service = Arc::new(EventService::new(event_repo.clone()));
        let team_service = Arc::new(TeamService::new(team_repo.clone()));
        let department_service = Arc::new(DepartmentService::new(
            department_repo.clone(),
            team_repo.clone(),
        ));
        let timeline_service = Arc::new(TimelineService::new(timeline_repo.clone()));
        let stats_service = Arc::new(StatsService::new(db_pool, page_view_repo.clone()));

        Self {
            event_repo,
            team_repo,
            department_repo,
            timeline_repo,
            suggestion_repo,
            club_info_repo,
            announcement_repo,
            page_view_repo,
            event_service,
            team_service,
            department_service,
            timeline_service,
            stats_service,
        }
    }
}
