//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::StationId;
use crate::fetcher::DepartureFetcher;
use crate::provider::TransitProvider;

use super::board::{BoardEntry, shape_board};
use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router<P: TransitProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index_page::<P>))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations::<P>))
        .route("/api/departures/:station_id", get(departures::<P>))
        .route("/board/:station_id", get(board_page::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page linking to every board.
async fn index_page<P: TransitProvider + 'static>(State(state): State<AppState<P>>) -> Response {
    let names = resolve_names(state.fetchers()).await;

    let stations = state
        .fetchers()
        .iter()
        .zip(names)
        .map(|(f, name)| StationLinkView {
            station_id: f.station_id().to_string(),
            name: name.unwrap_or_else(|| f.station_id().to_string()),
        })
        .collect();

    Html(
        IndexTemplate { stations }
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// List configured stations with their names.
async fn list_stations<P: TransitProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Json<StationsResponse> {
    let names = resolve_names(state.fetchers()).await;

    let stations = state
        .fetchers()
        .iter()
        .zip(names)
        .map(|(f, name)| StationSummary {
            station_id: f.station_id().to_string(),
            name,
            direction_station_id: f
                .config()
                .direction_station_id
                .as_ref()
                .map(|d| d.to_string()),
        })
        .collect();

    Json(StationsResponse { stations })
}

/// Departure board as JSON.
async fn departures<P: TransitProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(station_id): Path<String>,
) -> Result<Json<BoardResponse>, AppError> {
    let board = load_board(&state, &station_id).await?;

    Ok(Json(BoardResponse {
        station_id: board.station_id.to_string(),
        station_name: board.name,
        generated_at: board.generated_at.to_rfc3339(),
        departures: board.entries.iter().map(BoardDeparture::from).collect(),
    }))
}

/// Departure board as HTML.
async fn board_page<P: TransitProvider + 'static>(
    State(state): State<AppState<P>>,
    Path(station_id): Path<String>,
) -> Response {
    let board = match load_board(&state, &station_id).await {
        Ok(board) => board,
        Err(e) => return e.into_html(),
    };

    let page = BoardTemplate {
        title: board
            .name
            .unwrap_or_else(|| board.station_id.to_string()),
        station_id: board.station_id.to_string(),
        rows: board.entries.iter().map(BoardRowView::from_entry).collect(),
    };

    Html(
        page.render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// A shaped board ready for rendering.
struct LoadedBoard {
    station_id: StationId,
    name: Option<String>,
    entries: Vec<BoardEntry>,
    generated_at: DateTime<Utc>,
}

/// Fetch departures and the station name for a configured station.
///
/// A failed name lookup only drops the name; a failed departure fetch
/// fails the request.
async fn load_board<P: TransitProvider>(
    state: &AppState<P>,
    raw_id: &str,
) -> Result<LoadedBoard, AppError> {
    let station_id = StationId::parse_normalized(raw_id).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let fetcher = state
        .fetcher(&station_id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {station_id} is not configured"),
        })?;

    let now = Utc::now();
    let (name, list) = futures::join!(fetcher.station_name(), fetcher.fetch_departures_at(now));

    let list = list.map_err(|e| AppError::Upstream {
        message: e.to_string(),
    })?;

    let name = match name {
        Ok(name) => Some(name),
        Err(e) => {
            warn!(station = %station_id, error = %e, "station name lookup failed");
            None
        }
    };

    Ok(LoadedBoard {
        entries: shape_board(&list, fetcher.config(), now),
        station_id,
        name,
        generated_at: now,
    })
}

/// Resolve all station names concurrently. Failed lookups yield `None`.
async fn resolve_names<P: TransitProvider>(fetchers: &[DepartureFetcher<P>]) -> Vec<Option<String>> {
    let lookups: Vec<_> = fetchers.iter().map(|f| f.station_name()).collect();
    let results = join_all(lookups).await;

    fetchers
        .iter()
        .zip(results)
        .map(|(f, result)| match result {
            Ok(name) => Some(name),
            Err(e) => {
                warn!(station = %f.station_id(), error = %e, "station name lookup failed");
                None
            }
        })
        .collect()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { message: String },
}

impl AppError {
    fn parts(&self) -> (StatusCode, &str) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
        }
    }

    /// Render as an HTML error page.
    fn into_html(self) -> Response {
        let (status, message) = self.parts();
        warn!(%status, message, "request failed");

        let page = ErrorTemplate {
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: message.to_string(),
        };

        let body = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));
        (status, Html(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        warn!(%status, message, "request failed");

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        let cases = [
            (AppError::BadRequest { message: "x".into() }, StatusCode::BAD_REQUEST),
            (AppError::NotFound { message: "x".into() }, StatusCode::NOT_FOUND),
            (AppError::Upstream { message: "x".into() }, StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn html_error_keeps_status() {
        let err = AppError::NotFound {
            message: "station 1 is not configured".into(),
        };
        assert_eq!(err.into_html().status(), StatusCode::NOT_FOUND);
    }

    mod handlers {
        use super::*;
        use crate::config::FetcherConfig;
        use crate::hafas::MockHafasClient;

        fn id(s: &str) -> StationId {
            StationId::parse(s).unwrap()
        }

        /// Alexanderplatz without buses, plus a station the mock data lacks.
        fn state() -> AppState<MockHafasClient> {
            let provider = MockHafasClient::new("data/mock_stations").unwrap();

            // Mock data is static, so show everything regardless of the clock.
            let alex = FetcherConfig::new(id("900000100003"))
                .with_delay(0)
                .with_max_departures(20, 20)
                .exclude_type("bus");
            let unknown = FetcherConfig::new(id("1"));

            AppState::new(vec![
                DepartureFetcher::new(alex, provider.clone()),
                DepartureFetcher::new(unknown, provider),
            ])
        }

        #[tokio::test]
        async fn departures_are_filtered_and_sorted() {
            let Json(board) = departures(State(state()), Path("900000100003".into()))
                .await
                .unwrap();

            assert_eq!(board.station_name.as_deref(), Some("S+U Alexanderplatz"));
            let lines: Vec<_> = board
                .departures
                .iter()
                .map(|d| d.line_name.as_str())
                .collect();
            assert_eq!(lines, ["U8", "U2", "U5", "M4", "U2", "S7"]);
        }

        #[tokio::test]
        async fn cancelled_departure_is_flagged_and_unreachable() {
            let Json(board) = departures(State(state()), Path("900000100003".into()))
                .await
                .unwrap();

            let cancelled: Vec<_> = board.departures.iter().map(|d| d.cancelled).collect();
            assert_eq!(cancelled, [false, false, false, false, true, false]);

            let trip = &board.departures[4];
            assert_eq!(trip.line_name, "U2");
            assert!(trip.when.starts_with("2026-10-19T10:09"));
            assert!(!trip.reachable);
        }

        #[tokio::test]
        async fn unconfigured_station_is_not_found() {
            let result = departures(State(state()), Path("900000023201".into())).await;
            assert!(matches!(result, Err(AppError::NotFound { .. })));
        }

        #[tokio::test]
        async fn invalid_station_is_bad_request() {
            let result = departures(State(state()), Path(" ".into())).await;
            assert!(matches!(result, Err(AppError::BadRequest { .. })));
        }

        #[tokio::test]
        async fn provider_failure_is_upstream_error() {
            let result = departures(State(state()), Path("1".into())).await;
            assert!(matches!(result, Err(AppError::Upstream { .. })));
        }

        #[tokio::test]
        async fn stations_include_failed_lookups() {
            let Json(response) = list_stations(State(state())).await;

            assert_eq!(response.stations.len(), 2);
            assert_eq!(
                response.stations[0].name.as_deref(),
                Some("S+U Alexanderplatz")
            );
            assert_eq!(response.stations[1].station_id, "1");
            assert_eq!(response.stations[1].name, None);
        }

        #[tokio::test]
        async fn board_page_renders() {
            let response = board_page(State(state()), Path("900000100003".into())).await;
            assert_eq!(response.status(), StatusCode::OK);

            let response = board_page(State(state()), Path("42".into())).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }
}
