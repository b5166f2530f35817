use axum::{Router, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{
        about, create_item, delete_item, favicon, show_default_list, show_delete_list, show_list,
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let public_dir = state.public_dir.clone();

    let router = Router::new()
        .route("/", get(show_default_list).post(create_item))
        .route("/favicon.ico", get(favicon))
        .route("/about", get(about))
        .route("/delete", get(show_delete_list).post(delete_item))
        .route("/{list_name}", get(show_list));

    let router = match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
