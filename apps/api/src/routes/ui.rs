use axum::response::Html;

/// GET /
/// Serves the embedded single-page application shell. The page is static —
/// all behavior goes through the JSON API.
pub async fn ui_handler() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
