// Integration tests for the session gate and OAuth callback flow
use actix_web::http::StatusCode;
use actix_web::{test, web, App};

use portico::handlers::{health, oauth_callback, profile, userinfo};
use portico::models::UserInfo;
use portico::testing::constants::{TEST_EMAIL, TEST_SUB};
use portico::testing::TestFixtures;
use portico::{AuthCookies, PorticoSettings};

fn test_app(
    settings: PorticoSettings,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(settings))
        .route("/auth/callback", web::get().to(oauth_callback))
        .route("/auth/userinfo", web::get().to(userinfo))
        .route("/profile", web::get().to(profile))
        .route("/ping", web::get().to(health))
}

fn with_session_cookies(mut req: test::TestRequest) -> test::TestRequest {
    for (name, value) in TestFixtures::session_cookies() {
        req = req.cookie(actix_web::cookie::Cookie::new(name, value));
    }
    req
}

#[actix_web::test]
async fn test_ping() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let req = test::TestRequest::get().uri("/ping").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_protected_page_redirects_anonymous_visitor_to_sign_in() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let req = test::TestRequest::get().uri("/profile").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "/signin?redirect_uri=%2Fprofile"
    );
}

#[actix_web::test]
async fn test_protected_page_returns_session_for_signed_in_user() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let req = with_session_cookies(test::TestRequest::get().uri("/profile")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let session: AuthCookies = test::read_body_json(resp).await;
    assert_eq!(session.access_token.as_deref(), Some("access-token-value"));
    assert_eq!(session.id_token.as_deref(), Some("id-token-value"));
    let info = session.user_data.expect("user data should be decoded");
    assert_eq!(info.email.as_deref(), Some(TEST_EMAIL));
}

#[actix_web::test]
async fn test_userinfo_returns_attributes_for_signed_in_user() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let req = with_session_cookies(test::TestRequest::get().uri("/auth/userinfo")).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let info: UserInfo = test::read_body_json(resp).await;
    assert_eq!(info.sub.as_deref(), Some(TEST_SUB));
    assert_eq!(info.email.as_deref(), Some(TEST_EMAIL));
    assert_eq!(info.given_name.as_deref(), Some("Test"));
}

#[actix_web::test]
async fn test_userinfo_is_unauthorized_without_session() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let req = test::TestRequest::get().uri("/auth/userinfo").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_callback_round_trip_lands_on_embedded_destination() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    // The destination embedded at sign-in time comes back out of the state
    // parameter on the callback
    let state = TestFixtures::state_token("/changeemail");
    let req = test::TestRequest::get()
        .uri(&format!("/auth/callback?code=abc123&state={state}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/changeemail");
}

#[actix_web::test]
async fn test_callback_without_usable_state_lands_on_default() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    for query in [
        "/auth/callback",
        "/auth/callback?code=abc123",
        "/auth/callback?code=abc123&state=noseparator",
        "/auth/callback?code=abc123&state=r1-zzzz",
    ] {
        let req = test::TestRequest::get().uri(query).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get("Location").unwrap(),
            "/profile",
            "query {query} should fall back to the default redirect"
        );
    }
}

#[actix_web::test]
async fn test_callback_refuses_to_leave_the_application() {
    let app = test::init_service(test_app(TestFixtures::settings())).await;

    let state = TestFixtures::state_token("https://evil.example.com/phish");
    let req = test::TestRequest::get()
        .uri(&format!("/auth/callback?state={state}"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(resp.headers().get("Location").unwrap(), "/profile");
}
