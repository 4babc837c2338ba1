use chrono::{DateTime, Local};
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::Write;

use super::views::{DisplayMode, DisplayPayload};
use crate::error::AppError;

const TEXT_COLOR: Color = Color::AnsiValue(231);
const HEADER_COLOR: Color = Color::AnsiValue(51);
const HIGHLIGHT_COLOR: Color = Color::AnsiValue(226);
const ERROR_COLOR: Color = Color::AnsiValue(196);

fn title(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Favorite => "FAVORITE TEAM",
        DisplayMode::Record => "TEAM RECORD",
        DisplayMode::Division => "DIVISION",
        DisplayMode::TopTeams => "TOP TEAMS",
    }
}

/// Prints one screen to `out`.
///
/// `last_update` adds a footer with the time of the cached snapshot.
pub fn render_payload<W: Write>(
    out: &mut W,
    mode: DisplayMode,
    payload: &DisplayPayload,
    last_update: Option<DateTime<Local>>,
) -> Result<(), AppError> {
    queue!(
        out,
        SetForegroundColor(HEADER_COLOR),
        SetAttribute(Attribute::Bold),
        Print(format!("MLB {}\n", title(mode))),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(TEXT_COLOR),
    )?;

    match payload {
        DisplayPayload::Favorite { abbreviation } => {
            queue!(out, Print(format!("{abbreviation}\n")))?;
        }
        DisplayPayload::Record(view) => {
            queue!(
                out,
                Print(format!("{:<4}", view.abbreviation)),
                SetForegroundColor(HIGHLIGHT_COLOR),
                Print(format!("{}-{}\n", view.wins, view.losses)),
                SetForegroundColor(TEXT_COLOR),
            )?;
        }
        DisplayPayload::Division(view) => {
            if let Some(name) = &view.name {
                queue!(
                    out,
                    SetForegroundColor(HEADER_COLOR),
                    Print(format!("{name}\n")),
                )?;
            }
            for row in &view.rows {
                let color = if row.highlighted {
                    HIGHLIGHT_COLOR
                } else {
                    TEXT_COLOR
                };
                queue!(
                    out,
                    SetForegroundColor(color),
                    Print(format!("{:<4}{:>7}\n", row.abbreviation, row.record)),
                )?;
            }
            queue!(out, SetForegroundColor(TEXT_COLOR))?;
        }
        DisplayPayload::Ranking(view) => {
            for (position, abbreviation) in view.abbreviations.iter().enumerate() {
                queue!(out, Print(format!("{:>2}. {abbreviation}\n", position + 1)))?;
            }
        }
        DisplayPayload::Error(code) => {
            queue!(
                out,
                SetForegroundColor(ERROR_COLOR),
                Print(format!("{code}\n")),
            )?;
        }
    }

    if let Some(updated) = last_update {
        queue!(
            out,
            SetForegroundColor(HEADER_COLOR),
            Print(format!("Updated {}\n", updated.format("%Y-%m-%d %H:%M"))),
        )?;
    }

    queue!(out, ResetColor)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::views::{DivisionRow, DivisionView, ErrorCode, RankingView, RecordView};
    use chrono::TimeZone;

    fn render(mode: DisplayMode, payload: &DisplayPayload) -> String {
        let mut out = Vec::new();
        render_payload(&mut out, mode, payload, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_record_screen() {
        let text = render(
            DisplayMode::Record,
            &DisplayPayload::Record(RecordView {
                abbreviation: "NYY".to_string(),
                wins: 94,
                losses: 68,
            }),
        );

        assert!(text.contains("MLB TEAM RECORD"));
        assert!(text.contains("NYY"));
        assert!(text.contains("94-68"));
    }

    #[test]
    fn test_ranking_screen_is_numbered() {
        let text = render(
            DisplayMode::TopTeams,
            &DisplayPayload::Ranking(RankingView {
                abbreviations: vec!["LAD".to_string(), "NYY".to_string()],
            }),
        );

        assert!(text.contains(" 1. LAD"));
        assert!(text.contains(" 2. NYY"));
    }

    #[test]
    fn test_division_and_error_screens() {
        let text = render(
            DisplayMode::Division,
            &DisplayPayload::Division(DivisionView {
                name: Some("American League East".to_string()),
                rows: vec![DivisionRow {
                    abbreviation: "NYY".to_string(),
                    record: "94-68".to_string(),
                    highlighted: true,
                }],
            }),
        );
        assert!(text.contains("American League East"));
        assert!(text.contains("NYY"));
        assert!(text.contains("94-68"));

        let text = render(DisplayMode::Record, &DisplayPayload::Error(ErrorCode::Timeout));
        assert!(text.contains("TMO"));
    }

    #[test]
    fn test_footer_shows_last_update() {
        let updated = Local.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let mut out = Vec::new();
        render_payload(
            &mut out,
            DisplayMode::Favorite,
            &DisplayPayload::Favorite {
                abbreviation: "SEA".to_string(),
            },
            Some(updated),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Updated 2025-06-01 09:30"));
    }
}
