//! Askama templates for the HTML boards.

use askama::Template;

use super::board::BoardEntry;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Index page listing configured stations.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<StationLinkView>,
}

/// Departure board for one station.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub title: String,
    pub station_id: String,
    pub rows: Vec<BoardRowView>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Link to a station board.
#[derive(Debug, Clone)]
pub struct StationLinkView {
    pub station_id: String,
    pub name: String,
}

/// One row of a departure board.
#[derive(Debug, Clone)]
pub struct BoardRowView {
    /// Scheduled time as HH:MM in the provider's offset.
    pub time: String,
    /// Delay in whole minutes, e.g. "+2". Empty when on time.
    pub delay: String,
    pub line: String,
    pub product: String,
    pub direction: String,
    pub cancelled: bool,
    pub reachable: bool,
}

impl BoardRowView {
    /// Create from a board entry.
    pub fn from_entry(entry: &BoardEntry) -> Self {
        let d = &entry.departure;
        let minutes = d.delay_minutes();

        let delay = match minutes {
            0 => String::new(),
            m if m > 0 => format!("+{m}"),
            m => m.to_string(),
        };

        Self {
            time: d.when.format("%H:%M").to_string(),
            delay,
            line: d.line_name.clone(),
            product: d.product.clone(),
            direction: d.direction.clone(),
            cancelled: d.cancelled,
            reachable: entry.reachable,
        }
    }

    /// CSS class for the row.
    pub fn css_class(&self) -> &'static str {
        if self.cancelled {
            "cancelled"
        } else if self.reachable {
            "reachable"
        } else {
            "unreachable"
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::Departure;

    fn entry(delay: i64, reachable: bool) -> BoardEntry {
        BoardEntry {
            departure: Departure {
                when: DateTime::parse_from_rfc3339("2026-10-19T10:02:00+02:00").unwrap(),
                delay,
                line_name: "M4".into(),
                line_number: None,
                product: "tram".into(),
                direction: "S Hackescher Markt".into(),
                cancelled: false,
            },
            reachable,
        }
    }

    #[test]
    fn row_on_time() {
        let row = BoardRowView::from_entry(&entry(0, true));
        assert_eq!(row.time, "10:02");
        assert_eq!(row.delay, "");
        assert_eq!(row.css_class(), "reachable");
    }

    #[test]
    fn row_delayed() {
        let row = BoardRowView::from_entry(&entry(150, false));
        assert_eq!(row.delay, "+2");
        assert_eq!(row.css_class(), "unreachable");
    }

    #[test]
    fn row_early() {
        let row = BoardRowView::from_entry(&entry(-60, true));
        assert_eq!(row.delay, "-1");
    }

    #[test]
    fn cancelled_row_is_struck_through() {
        let mut cancelled = entry(120, false);
        cancelled.departure.cancelled = true;
        let row = BoardRowView::from_entry(&cancelled);
        assert_eq!(row.css_class(), "cancelled");

        let page = BoardTemplate {
            title: "S+U Alexanderplatz".into(),
            station_id: "900000100003".into(),
            rows: vec![row],
        };
        let html = page.render().unwrap();
        assert!(html.contains(r#"<tr class="cancelled">"#));
        assert!(html.contains(">cancelled</td>"));
        assert!(!html.contains("+2"));
    }

    #[test]
    fn board_renders_rows() {
        let page = BoardTemplate {
            title: "S+U Alexanderplatz".into(),
            station_id: "900000100003".into(),
            rows: vec![BoardRowView::from_entry(&entry(120, true))],
        };

        let html = page.render().unwrap();
        assert!(html.contains("S+U Alexanderplatz"));
        assert!(html.contains("10:02"));
        assert!(html.contains("+2"));
        assert!(html.contains("S Hackescher Markt"));
    }

    #[test]
    fn empty_board_renders_placeholder() {
        let page = BoardTemplate {
            title: "Nowhere".into(),
            station_id: "1".into(),
            rows: vec![],
        };

        assert!(page.render().unwrap().contains("No departures"));
    }
}
