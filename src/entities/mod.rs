pub mod actor;
pub mod cast_member;
pub mod content;
pub mod director;
pub mod dub;
pub mod episode;
pub mod genre;
pub mod season;
pub mod subtitle;
