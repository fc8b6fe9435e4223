use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bounceback::api::{AppState, router};
use bounceback::config::Config;
use bounceback::storage::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "bounceback-test-boundary";

struct TestApp {
    router: Router,
    uploads: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.uploads).ok();
    }
}

fn spawn_app() -> TestApp {
    let uploads =
        std::env::temp_dir().join(format!("bounceback-api-test-{}", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.storage.use_memory_storage = true;
    config.uploads.root_path = uploads.display().to_string();

    let state = AppState::new(Arc::new(MemoryStore::new()), config, None);
    TestApp {
        router: router(Arc::new(state)),
        uploads,
    }
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json, cookie)
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref());
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn multipart_request(
    uri: &str,
    cookie: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .unwrap()
}

async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let (status, body, cookie) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "username": username, "password": password }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    cookie.expect("login sets a session cookie")
}

async fn admin_cookie(app: &TestApp) -> String {
    login(app, "admin", "admin123").await
}

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app();
    let (status, body, _) = send(&app, get("/api/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["backend"], "memory");
}

#[tokio::test]
async fn test_login_validation_and_failure() {
    let app = spawn_app();

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/auth/login", None, &json!({ "username": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({ "username": "admin", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_establishes_session() {
    let app = spawn_app();
    let cookie = admin_cookie(&app).await;

    let (status, body, _) = send(&app, get("/api/auth/me", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");

    let (status, _, _) = send(&app, get("/api/auth/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(
        &app,
        json_request("POST", "/api/auth/logout", Some(&cookie), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, get("/api/auth/me", Some(&cookie))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_role_claims() {
    let app = spawn_app();
    let payload = json!({
        "username": "priya",
        "password": "pw12345",
        "mobile": "9876500000",
        "role": "admin"
    });

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/auth/register", None, &payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "user");

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/auth/register", None, &payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already exists");

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "username": "priya2", "password": "pw", "mobile": "9876500000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Mobile number already registered");
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let app = spawn_app();

    let (status, _, _) = send(&app, get("/api/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            &json!({ "username": "student", "password": "pw", "mobile": "9111111111" }),
        ),
    )
    .await;
    let student = login(&app, "student", "pw").await;

    let (status, _, _) = send(&app, get("/api/users", Some(&student))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/videos",
            Some(&student),
            &json!({ "title": "x", "class": 10, "subject": "Maths", "youtubeUrl": "u" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Public reads on the same paths stay open.
    let (status, _, _) = send(&app, get("/api/videos", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_question_paper_upload_flow() {
    let app = spawn_app();
    let admin = admin_cookie(&app).await;

    let (status, body, _) = send(
        &app,
        multipart_request(
            "/api/question-papers",
            &admin,
            &[
                ("title", "Mathematics Phase 1"),
                ("class", "10"),
                ("subject", "Mathematics"),
                ("year", "2024"),
                ("phase", "Phase 1"),
            ],
            Some(("maths.pdf", "application/pdf", b"%PDF-1.4 test")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let paper = &body["data"];
    let id = paper["id"].as_str().unwrap().to_string();
    let file_url = paper["fileUrl"].as_str().unwrap().to_string();
    assert!(file_url.starts_with("/uploads/papers/"));
    assert!(file_url.ends_with(".pdf"));
    assert_eq!(paper["phase"], "Phase 1");

    let (_, body, _) = send(&app, get("/api/question-papers?class=10", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body, _) = send(
        &app,
        get("/api/question-papers?class=10&subject=Science", None),
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (_, body, _) = send(&app, get("/api/question-papers?class=&year=", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, _) = send(&app, get("/api/question-papers?year=recent", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = send(
        &app,
        get(&format!("/api/question-papers/download/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fileUrl"], file_url.as_str());

    let response = app
        .router
        .clone()
        .oneshot(get(&file_url, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"%PDF-1.4 test");

    let (status, body, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/question-papers/{id}"),
            Some(&admin),
            &json!({ "phase": "Board Exam" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["phase"], "Board Exam");
    assert_eq!(body["data"]["title"], "Mathematics Phase 1");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/question-papers/{id}"))
        .header(header::COOKIE, &admin)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, get(&format!("/api/question-papers/{id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_note_upload_requires_pdf() {
    let app = spawn_app();
    let admin = admin_cookie(&app).await;
    let fields = [("title", "Cell Biology"), ("class", "10"), ("subject", "Biology")];

    let (status, body, _) = send(
        &app,
        multipart_request("/api/notes", &admin, &fields, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "PDF file is required");

    let (status, _, _) = send(
        &app,
        multipart_request(
            "/api/notes",
            &admin,
            &fields,
            Some(("cells.txt", "text/plain", b"not a pdf")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = send(
        &app,
        multipart_request(
            "/api/notes",
            &admin,
            &fields,
            Some(("cells.pdf", "application/pdf", b"%PDF-1.7")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], Value::Null);
    assert!(
        body["data"]["fileUrl"]
            .as_str()
            .unwrap()
            .starts_with("/uploads/notes/")
    );
}

#[tokio::test]
async fn test_video_crud() {
    let app = spawn_app();
    let admin = admin_cookie(&app).await;

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/videos",
            Some(&admin),
            &json!({
                "title": "Algebra Basics",
                "class": 9,
                "subject": "Mathematics",
                "youtubeUrl": "https://www.youtube.com/watch?v=NcQUiqpGfXQ",
                "duration": "15"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["thumbnailUrl"], Value::Null);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/videos",
            Some(&admin),
            &json!({ "title": "Bad", "class": 4, "subject": "Maths", "youtubeUrl": "u" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/videos/{id}"),
            Some(&admin),
            &json!({ "duration": null, "views": 10 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["duration"], Value::Null);
    assert_eq!(body["data"]["views"], 10);

    let (_, body, _) = send(&app, get("/api/videos?class=9&subject=Mathematics", None)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, _) = send(
        &app,
        json_request("PUT", "/api/videos/missing", Some(&admin), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_feedback_enrollments_and_stats() {
    let app = spawn_app();

    for rating in [5, 3] {
        let (status, _, _) = send(
            &app,
            json_request(
                "POST",
                "/api/feedback",
                None,
                &json!({ "name": "Asha", "message": "Great classes", "rating": rating }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/feedback",
            None,
            &json!({ "name": "Asha", "message": "Too high", "rating": 9 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/enrollments",
            None,
            &json!({
                "name": "John Doe",
                "class": "10",
                "phone": "9876543210",
                "whatsapp": "9876543210",
                "address": "123 Main St, City"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let enrollment_id = body["data"]["id"].as_str().unwrap().to_string();

    let admin = admin_cookie(&app).await;

    let (status, body, _) = send(&app, get("/api/stats", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalFeedback"], 2);
    assert_eq!(body["data"]["totalEnrollments"], 1);
    assert_eq!(body["data"]["totalUsers"], 1);
    assert_eq!(body["data"]["totalPapers"], 0);

    let (status, body, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/enrollments/{enrollment_id}"),
            Some(&admin),
            &json!({ "address": "7 Hill Road" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["address"], "7 Hill Road");
    assert_eq!(body["data"]["name"], "John Doe");

    let (_, body, _) = send(&app, get("/api/enrollments", Some(&admin))).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_listing_hides_passwords_and_protects_admin() {
    let app = spawn_app();
    let admin = admin_cookie(&app).await;

    let (status, body, _) = send(&app, get("/api/users", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password").is_none());

    let admin_id = users[0]["id"].as_str().unwrap();
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/users/{admin_id}"))
        .header(header::COOKIE, &admin)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = spawn_app();

    let (status, body, _) = send(
        &app,
        json_request("POST", "/api/feedback", None, &json!({ "name": "Asha" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("message"));

    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/enrollments",
            None,
            &json!({
                "name": "John Doe",
                "class": 10,
                "phone": "9876543210",
                "whatsapp": "9876543210",
                "address": "123 Main St, City"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let admin = admin_cookie(&app).await;
    let (status, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/videos",
            Some(&admin),
            &json!({ "title": "Algebra", "class": "ten", "subject": "Maths", "youtubeUrl": "u" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_updates_reject_blank_text() {
    let app = spawn_app();
    let admin = admin_cookie(&app).await;

    let (_, body, _) = send(
        &app,
        json_request(
            "POST",
            "/api/videos",
            Some(&admin),
            &json!({ "title": "Algebra", "class": 9, "subject": "Maths", "youtubeUrl": "u" }),
        ),
    )
    .await;
    let video_id = body["data"]["id"].as_str().unwrap().to_string();

    for patch in [json!({ "title": "" }), json!({ "subject": "  " })] {
        let (status, _, _) = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/videos/{video_id}"),
                Some(&admin),
                &patch,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (_, body, _) = send(
        &app,
        multipart_request(
            "/api/notes",
            &admin,
            &[("title", "Cells"), ("class", "10"), ("subject", "Biology")],
            Some(("cells.pdf", "application/pdf", b"%PDF-1.7")),
        ),
    )
    .await;
    let note_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/notes/{note_id}"),
            Some(&admin),
            &json!({ "title": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body, _) = send(&app, get(&format!("/api/notes/{note_id}"), None)).await;
    assert_eq!(body["data"]["title"], "Cells");
}
