//! HTTP-level tests: routes, session gating, the submission round-trip.

mod common;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use regex::Regex;

use dao_portal::handlers;
use dao_portal::models::proposal::ProposalQuery;
use dao_portal::state::{AppState, WalletStatus};

use common::{ACCOUNT, MockApi, sample_proposal, test_state};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new($state))
                .configure(handlers::configure)
                .default_service(web::to(handlers::not_found)),
        )
        .await
    };
}

fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

fn location(resp: &ServiceResponse) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn csrf_token(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("csrf token in page")
}

async fn body_string(resp: ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Connects `ACCOUNT` through the login form; yields the session cookie and a CSRF token.
macro_rules! connect {
    ($app:expr) => {{
        let resp =
            test::call_service(&$app, test::TestRequest::get().uri("/connect").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = session_cookie(&resp).expect("session cookie");
        let token = csrf_token(&body_string(resp).await);

        let req = test::TestRequest::post()
            .uri("/connect")
            .cookie(cookie.clone())
            .set_form([
                ("address", ACCOUNT),
                ("next", "/submit/ban-name"),
                ("csrf_token", token.as_str()),
            ])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/submit/ban-name");
        let cookie = session_cookie(&resp).unwrap_or(cookie);
        (cookie, token)
    }};
}

#[actix_rt::test]
async fn test_root_redirects_to_proposals() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/proposals");
}

#[actix_rt::test]
async fn test_submit_page_shows_login_without_account() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let req = test::TestRequest::get().uri("/submit/ban-name").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("class=\"LogIn\""));
    assert!(html.contains("name=\"next\" value=\"/submit/ban-name\""));
    assert!(!html.contains("SubmitForm"));
}

#[actix_rt::test]
async fn test_submit_page_shows_loading_before_wallet_probe() {
    let state = AppState::new(common::test_config(), Arc::new(MockApi::default()));
    assert_eq!(state.wallet_status(), WalletStatus::default());
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/submit/ban-name").to_request();
    let html = body_string(test::call_service(&app, req).await).await;
    assert!(html.contains("data-loading=\"true\""));
    assert!(!html.contains("LogIn"));
}

#[actix_rt::test]
async fn test_submit_round_trip_lands_on_new_proposal() {
    let api = Arc::new(MockApi::default());
    let state = test_state(api.clone());
    let cache = state.cache.clone();
    let app = init_app!(state);
    let (cookie, token) = connect!(app);

    let req = test::TestRequest::get()
        .uri("/submit/ban-name")
        .cookie(cookie.clone())
        .to_request();
    let html = body_string(test::call_service(&app, req).await).await;
    assert!(html.contains("SubmitForm"));
    assert!(html.contains("data-check-url=\"/api/submit/ban-name/check\""));
    assert!(html.contains("src=\"/static/ban_name.js\""));
    assert!(!html.contains("data-prevent-navigation"));

    let req = test::TestRequest::post()
        .uri("/submit/ban-name")
        .cookie(cookie.clone())
        .set_form([
            ("name", "  carol  "),
            ("description", "Impersonates a well known community member"),
            ("co_authors", ""),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/proposal?id=42&new=true");
    assert!(cache.contains("42"));
    assert_eq!(api.calls.lock().unwrap().create[0].name, "carol");

    let req = test::TestRequest::get()
        .uri("/proposal?id=42&new=true")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("data-new=\"true\""));
    assert!(html.contains("data-proposal-id=\"42\""));
    // Served from the cache.
    assert_eq!(api.proposal_calls(), 0);
}

#[actix_rt::test]
async fn test_submit_duplicate_rerenders_with_form_error() {
    let api = Arc::new(MockApi::default());
    let app = init_app!(test_state(api.clone()));
    let (cookie, token) = connect!(app);

    let req = test::TestRequest::post()
        .uri("/submit/ban-name")
        .cookie(cookie)
        .set_form([
            ("name", "Alice"),
            ("description", "Impersonates a well known community member"),
            ("co_authors", ""),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_string(resp).await;
    assert!(html.contains("class=\"ErrorMessage\""));
    assert!(html.contains("value=\"Alice\""));
    assert!(html.contains("data-prevent-navigation=\"true\""));
    // Editable again.
    assert!(!html.contains(" disabled"));
    assert_eq!(api.create_calls(), 0);
}

#[actix_rt::test]
async fn test_submit_invalid_fields_skip_pipeline() {
    let api = Arc::new(MockApi::default());
    let app = init_app!(test_state(api.clone()));
    let (cookie, token) = connect!(app);

    let req = test::TestRequest::post()
        .uri("/submit/ban-name")
        .cookie(cookie)
        .set_form([
            ("name", "a"),
            ("description", "short"),
            ("co_authors", ""),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let html = body_string(test::call_service(&app, req).await).await;
    assert!(html.contains("Field__Message--error"));
    assert_eq!(api.ban_name_calls(), 0);
}

#[actix_rt::test]
async fn test_submit_keeps_only_address_co_authors() {
    let api = Arc::new(MockApi::default());
    let app = init_app!(test_state(api.clone()));
    let (cookie, token) = connect!(app);

    let co_authors = format!("not-an-address, {}", ACCOUNT.to_uppercase().replace("0X", "0x"));
    let req = test::TestRequest::post()
        .uri("/submit/ban-name")
        .cookie(cookie)
        .set_form([
            ("name", "carol"),
            ("description", "Impersonates a well known community member"),
            ("co_authors", co_authors.as_str()),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.create[0].co_authors, Some(vec![ACCOUNT.to_string()]));
}

#[actix_rt::test]
async fn test_connect_ignores_backslash_next() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/connect").to_request()).await;
    let cookie = session_cookie(&resp).expect("session cookie");
    let token = csrf_token(&body_string(resp).await);

    let req = test::TestRequest::post()
        .uri("/connect")
        .cookie(cookie)
        .set_form([
            ("address", ACCOUNT),
            ("next", "/\\evil.example"),
            ("csrf_token", token.as_str()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/proposals");
}

#[actix_rt::test]
async fn test_submit_rejects_bad_csrf() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let (cookie, _token) = connect!(app);

    let req = test::TestRequest::post()
        .uri("/submit/ban-name")
        .cookie(cookie)
        .set_form([("name", "carol"), ("description", "x"), ("csrf_token", "nope")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_unknown_proposal_is_404() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let req = test::TestRequest::get().uri("/proposal?id=missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_proposal_fetched_when_not_cached() {
    let api = Arc::new(MockApi {
        proposals: vec![sample_proposal("7")],
        ..MockApi::default()
    });
    let app = init_app!(test_state(api.clone()));

    let req = test::TestRequest::get().uri("/proposal?id=7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(!html.contains("data-new=\"true\""));
    assert_eq!(api.proposal_calls(), 1);
}

#[actix_rt::test]
async fn test_proposal_list_renders_cards() {
    let api = Arc::new(MockApi {
        proposals: vec![sample_proposal("1"), sample_proposal("2")],
        ..MockApi::default()
    });
    let app = init_app!(test_state(api));

    let req = test::TestRequest::get().uri("/proposals?order=ASC").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Ban name proposal 1"));
    assert!(html.contains("Ban name proposal 2"));
    assert!(html.contains("Downwards"));
}

#[actix_rt::test]
async fn test_proposal_list_clamps_huge_page() {
    let api = Arc::new(MockApi::default());
    let app = init_app!(test_state(api.clone()));

    let req = test::TestRequest::get().uri("/proposals?page=4294967295").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let query = api.calls.lock().unwrap().last_query.clone().expect("list queried");
    assert_eq!(query.page, ProposalQuery::MAX_PAGE);
    assert!(query.offset() > u64::from(u32::MAX) / 1000);
}

#[actix_rt::test]
async fn test_aliased_detail_ids_are_not_cached() {
    let api = Arc::new(MockApi {
        proposals: vec![sample_proposal("42")],
        resolve_aliases: true,
        ..MockApi::default()
    });
    let state = test_state(api.clone());
    let cache = state.cache.clone();
    let app = init_app!(state);

    for uri in ["/proposal?id=42%2F", "/proposal?id=42%2F.", "/proposal?id=42%3Fx"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{uri}");
    }
    assert!(cache.is_empty());

    let req = test::TestRequest::get().uri("/proposal?id=").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_live_check_endpoint() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let req = test::TestRequest::post()
        .uri("/api/submit/ban-name/check")
        .set_json(serde_json::json!({
            "name": "al ice",
            "description": "",
            "fields": ["name", "description"]
        }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["errors"]["name"], "error.ban_name.name_invalid");
    // Empty fields are not flagged while typing.
    assert!(body["errors"].get("description").is_none());
    assert!(body["messages"]["name"].is_string());
}

#[actix_rt::test]
async fn test_profile_requires_address() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));

    let req = test::TestRequest::get().uri("/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/connect");

    let req = test::TestRequest::get().uri("/profile?address=nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_unknown_route_is_404() {
    let app = init_app!(test_state(Arc::new(MockApi::default())));
    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
