pub mod event;
pub mod team;
pub mod timeline;
pub mod suggestion;
pub mod club_info;
pub mod announcement;
pub mod page_view;

pub use event::*;
pub use team::*;
pub use timeline::*;
pub use suggestion::*;
pub use club_info::*;
pub use announcement::*;
pub use page_view::*;
