use std::collections::HashMap;
use std::sync::Arc;

use axum::{http::StatusCode, http::Uri, response::IntoResponse, Extension, Json, Router};
use lastgame_server::clients::ChessComClient;
use lastgame_server::config::Config;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Build a reqwest client for tests.
pub fn client() -> Client {
    Client::new()
}

/// Bind an ephemeral local port, returning the listener and its `http://` root.
async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");
    (listener, format!("http://{addr}"))
}

fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
}

/// Canned archive API responses keyed by request path; anything else is a 404.
async fn fake_api(
    Extension(responses): Extension<Arc<HashMap<String, Value>>>,
    uri: Uri,
) -> impl IntoResponse {
    match responses.get(uri.path()) {
        Some(body) => (StatusCode::OK, Json(body.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))),
    }
}

fn side(username: &str, rating: i64, result: &str) -> Value {
    json!({
        "username": username,
        "rating": rating,
        "result": result,
        "@id": format!("https://api.chess.com/pub/player/{}", username.to_lowercase()),
    })
}

/// Two months for "hikaru": an older blitz game, then a sparse rapid game with null
/// fields, a blitz win and a later bullet draw.
/// "ghost" exists but has no archives.
fn fixture(api_root: &str) -> HashMap<String, Value> {
    let month = |m: &str| format!("{api_root}/player/hikaru/games/2024/{m}");

    let mut responses = HashMap::new();
    responses.insert(
        "/pub/player/hikaru/games/archives".to_string(),
        json!({ "archives": [month("01"), month("02")] }),
    );
    responses.insert(
        "/pub/player/hikaru/games/2024/01".to_string(),
        json!({ "games": [{
            "url": "https://www.chess.com/game/live/100",
            "end_time": 1_706_000_000,
            "time_class": "blitz",
            "rules": "chess",
            "rated": true,
            "white": side("Hikaru", 3200, "win"),
            "black": side("OldFoe", 2800, "timeout"),
        }]}),
    );
    responses.insert(
        "/pub/player/hikaru/games/2024/02".to_string(),
        json!({ "games": [
            {
                "url": null,
                "end_time": 1_707_000_000,
                "time_class": "rapid",
                "rules": null,
                "rated": null,
                "pgn": null,
                "white": { "username": "Hikaru", "rating": null, "result": "win" },
                "black": { "username": null, "rating": null, "result": null },
            },
            {
                "url": "https://www.chess.com/game/live/200",
                "end_time": 1_708_000_000,
                "time_class": "blitz",
                "rules": "chess",
                "rated": true,
                "pgn": "[Event \"Live Chess\"]\n[Result \"1-0\"]\n\n1. e4 e5 2. Nf3 {book} Nc6 3. Bb5 1-0\n",
                "white": side("Hikaru", 3210, "win"),
                "black": side("Foe", 3000, "resigned"),
            },
            {
                "url": "https://www.chess.com/game/live/300",
                "end_time": 1_708_100_000,
                "time_class": "bullet",
                "rules": "chess",
                "rated": false,
                "white": side("Speedy", 3100, "agreed"),
                "black": side("Hikaru", 3300, "agreed"),
            }
        ]}),
    );
    responses.insert(
        "/pub/player/ghost/games/archives".to_string(),
        json!({ "archives": [] }),
    );
    responses.insert(
        "/pub/leaderboards".to_string(),
        json!({
            "live_blitz": [
                { "username": "Hikaru", "score": 3300, "rank": 1, "url": "https://www.chess.com/member/Hikaru" },
                { "username": "Foe", "score": 3000, "rank": 2 }
            ],
            "daily": []
        }),
    );
    responses
}

/// Start a fake archive API and the real HTTP host pointed at it.
/// Returns the host's root URL.
pub async fn start(config: Config) -> String {
    let (api_listener, api_base) = bind().await;
    let api_root = format!("{api_base}/pub");
    let fake = Router::new()
        .fallback(fake_api)
        .layer(Extension(Arc::new(fixture(&api_root))));
    serve(api_listener, fake);

    let client = ChessComClient::with_base_url(&api_root).expect("Failed to build client");
    let config = Config {
        chess_com_api_url: api_root,
        ..config
    };

    let (app_listener, app_base) = bind().await;
    serve(app_listener, lastgame_server::app(Arc::new(client), config));
    app_base
}
