use axum::response::Html;

/// The single-page frontend, embedded at build time and served at `/`.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../../assets/index.html"))
}
