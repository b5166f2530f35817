use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::{error, info, warn};

use crate::{
    error::AppResult,
    models::{
        DEFAULT_LIST_NAME, DeleteItemForm, NewItemForm, TodoItem, form_list_name,
        is_default_list, normalize_list_name, parse_item_id,
    },
    state::AppState,
    views::{AboutPage, ListPage, render},
};

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub async fn show_default_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let items = state.repo.default_items().await?;

    render(&ListPage {
        list_title: DEFAULT_LIST_NAME,
        items: &items,
    })
}

pub async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn about() -> AppResult<Html<String>> {
    render(&AboutPage::default())
}

/// Renders a named list. An unknown name creates the list and redirects to
/// it, so the follow-up request renders the stored document.
pub async fn show_list(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
) -> AppResult<Response> {
    resolve_list(&state, &raw_name).await
}

/// `/delete` only takes posts for item removal; a plain GET opens the list
/// named "Delete" like any other segment.
pub async fn show_delete_list(State(state): State<AppState>) -> AppResult<Response> {
    resolve_list(&state, "delete").await
}

async fn resolve_list(state: &AppState, raw_name: &str) -> AppResult<Response> {
    let name = normalize_list_name(raw_name);

    // "Today" names the default list, which has no list document.
    if is_default_list(&name) {
        return Ok(Redirect::to("/").into_response());
    }

    match state.repo.find_list(&name).await? {
        Some(list) => Ok(render(&ListPage {
            list_title: &list.name,
            items: &list.items,
        })?
        .into_response()),
        None => {
            state.repo.create_list(&name).await?;
            info!(list = %name, "created list");
            Ok(Redirect::to(&list_path(&name)).into_response())
        }
    }
}

pub async fn create_item(
    State(state): State<AppState>,
    Form(form): Form<NewItemForm>,
) -> AppResult<Redirect> {
    let item = TodoItem::new(form.new_item)?;
    let list_name = form_list_name(&form.list);

    if is_default_list(&list_name) {
        state.repo.add_default_item(item).await?;
        return Ok(Redirect::to("/"));
    }

    state.repo.push_item(&list_name, item).await?;
    Ok(Redirect::to(&list_path(&list_name)))
}

/// Default-list deletions always redirect home; failures are only logged.
pub async fn delete_item(
    State(state): State<AppState>,
    Form(form): Form<DeleteItemForm>,
) -> AppResult<Redirect> {
    let list_name = form_list_name(&form.list_name);

    if is_default_list(&list_name) {
        match remove_default_item(&state, &form.check_item).await {
            Ok(true) => info!(id = %form.check_item, "deleted todo item"),
            Ok(false) => warn!(id = %form.check_item, "todo item not found"),
            Err(err) => error!(id = %form.check_item, error = %err, "failed to delete todo item"),
        }
        return Ok(Redirect::to("/"));
    }

    let id = parse_item_id(&form.check_item)?;
    if !state.repo.pull_item(&list_name, id).await? {
        warn!(list = %list_name, "delete targeted a missing list");
    }

    Ok(Redirect::to(&list_path(&list_name)))
}

async fn remove_default_item(state: &AppState, raw_id: &str) -> AppResult<bool> {
    let id = parse_item_id(raw_id)?;
    state.repo.remove_default_item(id).await
}

pub fn list_path(name: &str) -> String {
    format!("/{}", utf8_percent_encode(name, PATH_SEGMENT))
}
