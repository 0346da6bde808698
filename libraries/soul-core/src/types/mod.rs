//! Playlist domain types

mod group;
mod ids;
mod playlist;
mod track;

pub use group::{Group, GroupKey, GroupType, GroupingInfo};
pub use ids::TrackId;
pub use playlist::PlaylistType;
pub use track::Track;
