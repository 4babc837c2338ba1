//! Display-ready payloads for the standings screens.
//!
//! This module stops at text: abbreviations, records and error codes that a
//! renderer can lay out. The terminal printer in [`render`] is the only
//! renderer shipped with the crate.

pub mod abbreviations;
pub mod render;
pub mod views;

pub use abbreviations::{CLUB_NAMES, division_name, is_known_club, team_abbreviation};
pub use render::render_payload;
pub use views::{
    DisplayMode, DisplayPayload, DivisionRow, DivisionView, ErrorCode, PayloadOptions, RankingView,
    RecordView, payload_for_mode,
};
