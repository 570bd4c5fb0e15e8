use httpmock::{Method::GET, Method::POST, MockServer};
use plantcare_core::client::{ChatTurn, ClientError, ImageUpload, PlantCareClient};
use plantcare_core::config::ClientConfig;
use plantcare_core::message::MessageRole;
use plantcare_interaction::HttpPlantCareClient;
use serde_json::json;
use tempfile::TempDir;

fn client_for(server: &MockServer) -> HttpPlantCareClient {
    let config = ClientConfig::default().with_base_url(format!("{}/", server.base_url()));
    HttpPlantCareClient::new(config).expect("client should build")
}

fn write_image(dir: &TempDir) -> String {
    let path = dir.path().join("img1.jpg");
    std::fs::write(&path, b"fake-jpeg-bytes").unwrap();
    format!("file://{}", path.display())
}

#[tokio::test(flavor = "current_thread")]
async fn chat_posts_message_and_history() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat").json_body(json!({
                "message": "¿Cada cuánto regar?",
                "history": [
                    {"role": "user", "content": "Hola"},
                    {"role": "assistant", "content": "¡Hola! ¿En qué te ayudo?"}
                ]
            }));
            then.status(200).json_body(json!({
                "success": true,
                "response": "Riega cada 5 días."
            }));
        })
        .await;

    let history = vec![
        ChatTurn {
            role: MessageRole::User,
            content: "Hola".to_string(),
        },
        ChatTurn {
            role: MessageRole::Assistant,
            content: "¡Hola! ¿En qué te ayudo?".to_string(),
        },
    ];
    let reply = client_for(&server)
        .chat("¿Cada cuánto regar?", &history)
        .await
        .expect("chat should succeed");

    mock.assert_async().await;
    assert_eq!(reply.answer(), Some("Riega cada 5 días."));
}

#[tokio::test(flavor = "current_thread")]
async fn chat_reports_service_failure_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200)
                .json_body(json!({"success": false, "error": "quota exceeded"}));
        })
        .await;

    let reply = client_for(&server).chat("hola", &[]).await.unwrap();

    assert!(!reply.success);
    assert_eq!(reply.answer(), None);
    assert_eq!(reply.error.as_deref(), Some("quota exceeded"));
}

#[tokio::test(flavor = "current_thread")]
async fn analyze_uploads_multipart_with_user_actions() {
    let temp_dir = TempDir::new().unwrap();
    let image_ref = write_image(&temp_dir);
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/analyze-plant")
                .body_contains("name=\"user_actions\"")
                .body_contains("Riego cada 3 días")
                .body_contains("filename=\"plant_image.jpg\"")
                .body_contains("fake-jpeg-bytes");
            then.status(200).json_body(json!({
                "success": true,
                "plant_name": "Monstera deliciosa",
                "health_score": 7.5,
                "diagnosis": {"summary": "Exceso de riego"},
                "recommendations": ["Reducir riego"],
                "model_version": "v2"
            }));
        })
        .await;

    let result = client_for(&server)
        .analyze_plant(&ImageUpload::jpeg(image_ref), "Riego cada 3 días")
        .await
        .expect("analysis should succeed");

    mock.assert_async().await;
    assert!(result.success);
    assert_eq!(result.plant_name(), Some("Monstera deliciosa"));
    assert_eq!(result.health_score, Some(7.5));
    assert_eq!(result.extra.get("model_version"), Some(&json!("v2")));
}

#[tokio::test(flavor = "current_thread")]
async fn analyze_maps_503_to_unavailable() {
    let temp_dir = TempDir::new().unwrap();
    let image_ref = write_image(&temp_dir);
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/analyze-plant");
            then.status(503)
                .json_body(json!({"detail": "Vision model not loaded"}));
        })
        .await;

    let err = client_for(&server)
        .analyze_plant(&ImageUpload::jpeg(image_ref), "Sin descripción")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Unavailable("Vision model not loaded".to_string())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn other_statuses_map_to_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(500).body("internal error");
        })
        .await;

    let err = client_for(&server).chat("hola", &[]).await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).body("<html>proxy</html>");
        })
        .await;

    let err = client_for(&server).chat("hola", &[]).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test(flavor = "current_thread")]
async fn connection_refused_is_transport_error() {
    let client =
        HttpPlantCareClient::new(ClientConfig::default().with_base_url("http://127.0.0.1:1/"))
            .unwrap();

    let err = client.chat("hola", &[]).await.unwrap_err();

    assert!(err.is_transport());
}

#[tokio::test(flavor = "current_thread")]
async fn missing_image_is_image_error() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/analyze-plant");
            then.status(200).json_body(json!({"success": true}));
        })
        .await;

    let err = client_for(&server)
        .analyze_plant(&ImageUpload::jpeg("file:///nonexistent/plant.jpg"), "x")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Image(_)));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test(flavor = "current_thread")]
async fn health_and_capabilities_return_raw_json() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).json_body(json!({"status": "healthy"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/capabilities");
            then.status(200)
                .json_body(json!({"chat": true, "image_analysis": false}));
        })
        .await;

    let client = client_for(&server);

    assert_eq!(client.health().await.unwrap()["status"], "healthy");
    assert_eq!(
        client.capabilities().await.unwrap()["image_analysis"],
        json!(false)
    );
}
