//! UI Components
//!
//! Leptos components rendering the song list.

mod add_song_form;
mod error_banner;
mod recent_log;
mod song_list;
mod song_row;
mod title_editor;

pub use add_song_form::AddSongForm;
pub use error_banner::ErrorBanner;
pub use recent_log::RecentLog;
pub use song_list::SongList;
pub use song_row::SongRow;
pub use title_editor::TitleEditor;
