//! Page handlers

use axum::{
    extract::{Query, State},
    response::Html,
};

use crate::models::{Page, PageQuery, PageState, PredictionForm};
use crate::views;
use crate::AppState;

/// `GET /?page=home|predict|emergency`
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let page_state = PageState::from_query(query.page.as_deref());
    tracing::debug!("Rendering page {}", page_state.page.slug());

    let body = match page_state.page {
        Page::Home => views::home(),
        Page::PredictionForm => views::prediction_form(&state.options, &PredictionForm::default(), None),
        Page::Emergency => views::emergency(),
    };

    Html(views::layout(page_state, &body))
}
