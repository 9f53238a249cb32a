use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Query, State},
    response::Html,
};
use color_eyre::eyre::Context;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::http_server::{
    error::{ClientError, Report},
    state::GatewayState,
};
use crate::ports::pages::Page;
use crate::ports::users::{LoginRequest, RegistrationRequest};
use crate::services::downstream::DownstreamError;
use crate::services::main_screen::MainScreenContext;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const PLANS_UNAVAILABLE: &str = "Could not fetch subscription plans";
const REGISTRATION_FAILED: &str = "Failed to register user";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub language: Option<String>,
    pub subscription_plan: String,
}

#[derive(Debug, Deserialize)]
pub struct MainScreenQuery {
    pub user_id: String,
}

/// Turn a downstream rejection into a fixed client error; anything else stays a fault.
fn translate_rejection(err: DownstreamError, client_error: impl FnOnce() -> ClientError) -> Report {
    if err.is_rejection() {
        log::info!("Downstream rejection translated for client: {err}");
        client_error().into()
    } else {
        err.into()
    }
}

fn render(state: &GatewayState, page: Page, context: &Value) -> Result<Html<String>, Report> {
    let html = state
        .pages
        .render(page, context)
        .wrap_err_with(|| format!("Failed to render {}", page.template()))?;
    Ok(Html(html))
}

pub async fn index(State(state): State<Arc<GatewayState>>) -> Result<Html<String>, Report> {
    render(&state, Page::Index, &json!({}))
}

#[tracing::instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Form(form): Form<LoginForm>,
) -> Result<Html<String>, Report> {
    let request = LoginRequest {
        email: form.email,
        password: form.password,
    };

    let identity = state
        .users
        .login(&request)
        .await
        .map_err(|e| translate_rejection(e, || ClientError::bad_request(INVALID_CREDENTIALS)))?;

    let context = serde_json::to_value(MainScreenContext::for_user(identity.id))?;
    render(&state, Page::MainScreen, &context)
}

pub async fn registration_form(
    State(state): State<Arc<GatewayState>>,
) -> Result<Html<String>, Report> {
    render(&state, Page::UserRegistration, &json!({}))
}

pub async fn subscription_plans(
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<Value>, Report> {
    let plans = state
        .users
        .subscription_plans()
        .await
        .map_err(|e| translate_rejection(e, || ClientError::internal(PLANS_UNAVAILABLE)))?;
    Ok(Json(plans))
}

#[tracing::instrument(skip_all, fields(email = %form.email))]
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Form(form): Form<RegistrationForm>,
) -> Result<Html<String>, Report> {
    let request = RegistrationRequest {
        name: form.name,
        email: form.email,
        password: form.password,
        language: form.language,
        subscription_plan: form.subscription_plan,
    };

    let identity = state
        .users
        .register(&request)
        .await
        .map_err(|e| translate_rejection(e, || ClientError::internal(REGISTRATION_FAILED)))?;

    let context = serde_json::to_value(MainScreenContext::for_user(identity.id))?;
    render(&state, Page::MainScreen, &context)
}

pub async fn main_screen(
    State(state): State<Arc<GatewayState>>,
    Query(query): Query<MainScreenQuery>,
) -> Result<Html<String>, Report> {
    let context = state.main_screen.load(&query.user_id).await?;
    let context = serde_json::to_value(context)?;
    render(&state, Page::MainScreen, &context)
}
