use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_dir: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server_in(data_dir: &str) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = data_dir.to_string();

    let app: Router = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_dir: data_dir.to_string() })
}

// Use isolated data directories per test run
async fn start_server() -> anyhow::Result<TestApp> {
    start_server_in(&format!("target/test-data/{}", Uuid::new_v4())).await
}

fn survey_id(body: &Value) -> String {
    let msg = body["success"].as_str().expect("success message");
    msg.strip_prefix("New survey created: ").expect("id suffix").to_string()
}

async fn create(c: &reqwest::Client, app: &TestApp, body: Value) -> anyhow::Result<reqwest::Response> {
    Ok(c.post(app.url("/survey/new")).json(&body).send().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(app.url("/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_tea_and_coffee_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create(&c, &app, json!({"questions": "[\"Do you like tea?\", \"Do you like coffee?\"]"})).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id = survey_id(&res.json::<Value>().await?);

    let res = c.post(app.url(&format!("/survey/{}/take", id)))
        .json(&json!({"responses": "[true, false]"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"success": "Responses successfully recorded."}));

    let res = c.get(app.url(&format!("/survey/{}/results", id))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!([
            {"question": "Do you like tea?", "responses": {"true": 1, "false": 0}},
            {"question": "Do you like coffee?", "responses": {"true": 0, "false": 1}}
        ])
    );

    let res = c.post(app.url(&format!("/survey/{}/take", id)))
        .json(&json!({"responses": "[false, true]"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let body = c.get(app.url(&format!("/survey/{}/results", id))).send().await?.json::<Value>().await?;
    assert_eq!(body[0]["responses"], json!({"true": 1, "false": 1}));
    assert_eq!(body[1]["responses"], json!({"true": 1, "false": 1}));
    Ok(())
}

#[tokio::test]
async fn e2e_native_arrays_are_accepted() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create(&c, &app, json!({"questions": ["One?", "Two?"]})).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id = survey_id(&res.json::<Value>().await?);

    let res = c.post(app.url(&format!("/survey/{}/take", id)))
        .json(&json!({"responses": [true, true]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let body = c.get(app.url(&format!("/survey/{}/results", id))).send().await?.json::<Value>().await?;
    assert_eq!(body[1]["responses"], json!({"true": 1, "false": 0}));
    Ok(())
}

#[tokio::test]
async fn e2e_form_encoded_body() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(app.url("/survey/new"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("questions=%5B%22Form%3F%22%5D")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let id = survey_id(&res.json::<Value>().await?);

    let res = c.post(app.url(&format!("/survey/{}/take", id)))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("responses=%5Bfalse%5D")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let body = c.get(app.url(&format!("/survey/{}/results", id))).send().await?.json::<Value>().await?;
    assert_eq!(body, json!([{"question": "Form?", "responses": {"true": 0, "false": 1}}]));
    Ok(())
}

#[tokio::test]
async fn e2e_create_validation_errors() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let cases = [
        (json!({}), "Please provide list of questions for new survey"),
        (json!({"questions": "[]"}), "Empty question list not allowed"),
        (json!({"questions": "[\"ok\", \"\"]"}), "Blank questions not allowed."),
    ];
    for (body, expected) in cases {
        let res = create(&c, &app, body).await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert_eq!(res.json::<Value>().await?["error"], expected);
    }

    // malformed JSON inside the string field
    let res = create(&c, &app, json!({"questions": "[\"unterminated"})).await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert!(err["error"].as_str().unwrap_or_default().starts_with("invalid JSON"));

    // body that is not JSON at all
    let res = c.post(app.url("/survey/new"))
        .header("content-type", "application/json")
        .body("not json")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert!(res.json::<Value>().await?["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn e2e_rejected_take_leaves_results_unchanged() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create(&c, &app, json!({"questions": "[\"a\", \"b\"]"})).await?;
    let id = survey_id(&res.json::<Value>().await?);

    for bad in ["[true]", "[true, false, true]", "[true, 1]", "[\"true\", false]"] {
        let res = c.post(app.url(&format!("/survey/{}/take", id)))
            .json(&json!({"responses": bad}))
            .send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
        assert!(res.json::<Value>().await?["error"].is_string());
    }

    let body = c.get(app.url(&format!("/survey/{}/results", id))).send().await?.json::<Value>().await?;
    assert_eq!(body[0]["responses"], json!({"true": 0, "false": 0}));
    assert_eq!(body[1]["responses"], json!({"true": 0, "false": 0}));
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_survey_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let missing = Uuid::new_v4();

    let res = c.get(app.url(&format!("/survey/{}/results", missing))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let err = res.json::<Value>().await?;
    assert!(err["error"].as_str().unwrap_or_default().contains(&missing.to_string()));

    let res = c.post(app.url(&format!("/survey/{}/take", missing)))
        .json(&json!({"responses": "[true]"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_surveys_survive_restart() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = create(&c, &app, json!({"questions": "[\"Persist?\"]"})).await?;
    let id = survey_id(&res.json::<Value>().await?);
    c.post(app.url(&format!("/survey/{}/take", id)))
        .json(&json!({"responses": "[true]"}))
        .send().await?;

    // a second server over the same data directory sees the same state
    let restarted = start_server_in(&app.data_dir).await?;
    let body = c.get(restarted.url(&format!("/survey/{}/results", id))).send().await?.json::<Value>().await?;
    assert_eq!(body, json!([{"question": "Persist?", "responses": {"true": 1, "false": 0}}]));
    Ok(())
}

#[tokio::test]
async fn e2e_run_uses_the_config_it_is_given() -> anyhow::Result<()> {
    // a plain file where the data directory should be makes startup fail
    // before binding, but only if `run` honours the caller's config
    let blocker = std::env::temp_dir().join(format!("survey_run_{}", Uuid::new_v4()));
    tokio::fs::write(&blocker, b"not a directory").await?;

    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = blocker.to_string_lossy().into_owned();
    let res = tokio::time::timeout(std::time::Duration::from_secs(5), server::run(cfg)).await;
    assert!(matches!(res, Ok(Err(_))), "run must fail on the given data dir");

    let _ = tokio::fs::remove_file(&blocker).await;
    Ok(())
}
