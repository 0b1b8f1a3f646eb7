use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use common::{game::Game, Board, GameError, Move, Ring};
use serde::{Deserialize, Serialize};

/// The one live game, shared across requests. The mutex serializes all
/// operations against it, there is no per-request concurrency to manage
/// beyond that.
pub type SharedGame = Arc<Mutex<Game>>;

pub fn router(game: SharedGame) -> Router {
    Router::new()
        .route("/start", post(start))
        .route("/state", get(state))
        .route("/move", post(move_ring))
        .route("/solve", post(solve))
        .route("/undo", post(undo))
        .with_state(game)
}

#[derive(Deserialize)]
struct StartRequest {
    rings: u32,
}

#[derive(Deserialize)]
struct MoveRequest {
    src: i64,
    dst: i64,
}

#[derive(Serialize)]
struct StateResponse {
    rings: Ring,
    board: Board,
    solved: bool,
}

/// The (success, message) result shape of `move` and `undo`. Also doubles
/// as the error body of the other endpoints, with `ok` always false there.
#[derive(Serialize)]
struct AckResponse {
    ok: bool,
    message: String,
}

struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = AckResponse {
            ok: false,
            message: self.0.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn lock(game: &SharedGame) -> std::sync::MutexGuard<'_, Game> {
    game.lock().expect("game mutex poisoned")
}

fn state_of(game: &Game) -> Result<StateResponse, GameError> {
    Ok(StateResponse {
        rings: game.rings()?,
        board: game.board()?.clone(),
        solved: game.is_solved()?,
    })
}

/// Wire peg indices are signed so that a negative index reports
/// `InvalidPeg` like any other out-of-range value instead of failing
/// JSON extraction.
fn peg_index(raw: i64) -> Result<usize, GameError> {
    usize::try_from(raw).map_err(|_| GameError::InvalidPeg)
}

fn ack(result: Result<&'static str, GameError>) -> Json<AckResponse> {
    let response = match result {
        Ok(message) => AckResponse {
            ok: true,
            message: message.to_owned(),
        },
        Err(err) => AckResponse {
            ok: false,
            message: err.to_string(),
        },
    };
    Json(response)
}

async fn start(
    State(game): State<SharedGame>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StateResponse>, ApiError> {
    let mut game = lock(&game);

    let rings = Ring::try_from(request.rings).map_err(|_| GameError::InvalidConfiguration)?;
    game.start(rings)?;
    log::info!("started a new game with {rings} rings");

    Ok(Json(state_of(&game)?))
}

async fn state(State(game): State<SharedGame>) -> Result<Json<StateResponse>, ApiError> {
    let game = lock(&game);
    Ok(Json(state_of(&game)?))
}

async fn move_ring(
    State(game): State<SharedGame>,
    Json(request): Json<MoveRequest>,
) -> Json<AckResponse> {
    let mut game = lock(&game);

    let result = peg_index(request.src)
        .and_then(|src| Ok(Move { src, dst: peg_index(request.dst)? }))
        .and_then(|mv| game.move_ring(mv));

    match &result {
        Ok(()) => log::debug!("moved ring from peg {} to peg {}", request.src, request.dst),
        Err(err) => log::debug!(
            "rejected move from peg {} to peg {}: {err}",
            request.src,
            request.dst
        ),
    }

    ack(result.map(|()| "move ok"))
}

async fn solve(State(game): State<SharedGame>) -> Result<Json<Vec<Board>>, ApiError> {
    let game = lock(&game);

    let trace = game.solve()?;
    log::info!("computed a {} move solution", trace.len() - 1);

    Ok(Json(trace))
}

async fn undo(State(game): State<SharedGame>) -> Json<AckResponse> {
    let mut game = lock(&game);
    ack(game.undo().map(|()| "undo ok"))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        router(Arc::new(Mutex::new(Game::new())))
    }

    async fn request(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn start_game(app: &Router, rings: u32) {
        let (status, _) = request(app, Method::POST, "/start", Some(json!({ "rings": rings }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_start_returns_the_initial_board() {
        let app = app();

        let (status, body) =
            request(&app, Method::POST, "/start", Some(json!({ "rings": 3 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rings"], 3);
        assert_eq!(body["board"], json!([[3, 2, 1], [], []]));
        assert_eq!(body["solved"], false);
    }

    #[tokio::test]
    async fn test_start_rejects_bad_ring_counts() {
        let app = app();

        for rings in [0, 21, 100_000] {
            let (status, body) =
                request(&app, Method::POST, "/start", Some(json!({ "rings": rings }))).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["ok"], false);
            assert_eq!(body["message"], "ring count must be between 1 and 20");
        }
    }

    #[tokio::test]
    async fn test_state_fails_before_start() {
        let app = app();

        let (status, body) = request(&app, Method::GET, "/state", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "no game in progress, start one first");
    }

    #[tokio::test]
    async fn test_move_and_state_round_trip() {
        let app = app();
        start_game(&app, 3).await;

        let (status, body) =
            request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 2 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "message": "move ok" }));

        let (_, body) = request(&app, Method::GET, "/state", None).await;
        assert_eq!(body["board"], json!([[3, 2], [], [1]]));
    }

    #[tokio::test]
    async fn test_illegal_move_reports_failure_and_changes_nothing() {
        let app = app();
        start_game(&app, 3).await;

        request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 2 }))).await;
        let (status, body) =
            request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 2 }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "cannot place a ring on a smaller one");

        let (_, body) = request(&app, Method::GET, "/state", None).await;
        assert_eq!(body["board"], json!([[3, 2], [], [1]]));
    }

    #[tokio::test]
    async fn test_negative_and_out_of_range_pegs_are_invalid() {
        let app = app();
        start_game(&app, 3).await;

        for (src, dst) in [(-1, 2), (0, 3), (7, -7)] {
            let (status, body) =
                request(&app, Method::POST, "/move", Some(json!({ "src": src, "dst": dst }))).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["ok"], false);
            assert_eq!(body["message"], "peg index out of range, pegs are numbered 0 to 2");
        }
    }

    #[tokio::test]
    async fn test_undo_round_trip() {
        let app = app();
        start_game(&app, 3).await;

        let (_, body) = request(&app, Method::POST, "/undo", None).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["message"], "nothing to undo");

        request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 2 }))).await;
        let (_, body) = request(&app, Method::POST, "/undo", None).await;
        assert_eq!(body, json!({ "ok": true, "message": "undo ok" }));

        let (_, body) = request(&app, Method::GET, "/state", None).await;
        assert_eq!(body["board"], json!([[3, 2, 1], [], []]));
    }

    #[tokio::test]
    async fn test_solve_returns_the_trace_without_touching_the_game() {
        let app = app();
        start_game(&app, 3).await;
        request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 1 }))).await;

        let (status, body) = request(&app, Method::POST, "/solve", None).await;
        assert_eq!(status, StatusCode::OK);

        let trace = body.as_array().unwrap();
        assert_eq!(trace.len(), 8);
        assert_eq!(trace[0], json!([[3, 2, 1], [], []]));
        assert_eq!(trace[7], json!([[], [], [3, 2, 1]]));

        // the player's position must survive the solve request
        let (_, body) = request(&app, Method::GET, "/state", None).await;
        assert_eq!(body["board"], json!([[3, 2], [1], []]));
    }

    #[tokio::test]
    async fn test_solved_flag_in_state() {
        let app = app();
        start_game(&app, 1).await;

        request(&app, Method::POST, "/move", Some(json!({ "src": 0, "dst": 2 }))).await;

        let (_, body) = request(&app, Method::GET, "/state", None).await;
        assert_eq!(body["solved"], true);
        assert_eq!(body["board"], json!([[], [], [1]]));
    }
}
