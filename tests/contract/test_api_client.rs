use insiderci::api::{ApiConfig, HttpApiClient, InsiderApi, SubmitSchema};
use insiderci::models::ComponentRequest;
use insiderci::InsiderError;
use mockito::Server;
use serde_json::json;
use std::io::Write;

fn client_for(server: &Server) -> HttpApiClient {
    HttpApiClient::new(ApiConfig {
        sast_base_url: server.url(),
        upload_base_url: server.url(),
        submit_schema: SubmitSchema::Auto,
    })
}

#[tokio::test]
async fn test_authenticate_returns_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"token": "jwt-token", "user": {"id": 1}}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let token = client
        .authenticate("ci@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(token, "jwt-token");
}

#[tokio::test]
async fn test_authenticate_rejected_credentials_never_yield_a_token() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth")
        .with_status(401)
        .with_body("invalid credentials")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .authenticate("ci@example.com", "wrong")
        .await
        .unwrap_err();

    match err {
        InsiderError::AuthenticationFailed { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_without_token_field_is_malformed() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth")
        .with_status(200)
        .with_body(json!({"user": "ci@example.com"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .authenticate("ci@example.com", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, InsiderError::MalformedAuthResponse(_)));
}

#[tokio::test]
async fn test_list_technologies_decodes_catalog() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/technologies")
        .with_status(200)
        .with_body(
            json!([
                {"id": 1, "name": "Java", "technology": "java", "enabled": true},
                {"id": 4, "name": "Node JS", "technology": "javascript", "enabled": true}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let profiles = client.list_technologies("jwt-token").await.unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Java");
    assert_eq!(profiles[1].id, 4);
}

#[tokio::test]
async fn test_list_technologies_tolerates_non_ok_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/technologies")
        .with_status(500)
        .with_body(json!([{"id": 1, "name": "Java"}]).to_string())
        .create_async()
        .await;

    // Non-OK is logged but does not abort resolution on its own.
    let client = client_for(&server);
    let profiles = client.list_technologies("jwt-token").await.unwrap();
    assert_eq!(profiles.len(), 1);
}

#[tokio::test]
async fn test_list_technologies_unparsable_body_aborts() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/technologies")
        .with_status(200)
        .with_body("<html>login page</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.list_technologies("jwt-token").await.unwrap_err();
    assert!(matches!(err, InsiderError::Decode(_)));
}

#[tokio::test]
async fn test_create_component_returns_id() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/component/ci")
        .with_status(200)
        .with_body(json!({"id": 311, "message": "Component created"}).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let created = client
        .create_component(
            "jwt-token",
            &ComponentRequest {
                name: "acme-billing".to_string(),
                technology: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, 311);
}

#[tokio::test]
async fn test_create_component_failure_is_fatal() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/component/ci")
        .with_status(400)
        .with_body("name already taken")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .create_component(
            "jwt-token",
            &ComponentRequest {
                name: "acme-billing".to_string(),
                technology: 1,
            },
        )
        .await
        .unwrap_err();

    match err {
        InsiderError::ComponentCreationFailed { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("name already taken"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

fn temp_package() -> tempfile::NamedTempFile {
    let mut package = tempfile::NamedTempFile::new().unwrap();
    package.write_all(b"PK\x03\x04fake-zip-bytes").unwrap();
    package
}

#[tokio::test]
async fn test_submit_package_decodes_nested_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sast/9")
        .with_status(200)
        .with_body(json!({"sastCreated": {"id": 55, "status": 1}}).to_string())
        .create_async()
        .await;

    let package = temp_package();
    let client = client_for(&server);
    let job = client
        .submit_package("jwt-token", 9, package.path())
        .await
        .unwrap();
    assert_eq!(job.id, 55);
    assert!(job.status.is_running());
}

#[tokio::test]
async fn test_submit_package_decodes_upload_map() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sast/9")
        .with_status(200)
        .with_body(json!({"package.zip": {"ID": "813"}}).to_string())
        .create_async()
        .await;

    let package = temp_package();
    let client = client_for(&server);
    let job = client
        .submit_package("jwt-token", 9, package.path())
        .await
        .unwrap();
    assert_eq!(job.id, 813);
    assert!(job.status.is_running());
}

#[tokio::test]
async fn test_submit_rejection_surfaces_message_envelope() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sast/9")
        .with_status(422)
        .with_body(json!({"message": "unsupported package extension"}).to_string())
        .create_async()
        .await;

    let package = temp_package();
    let client = client_for(&server);
    let err = client
        .submit_package("jwt-token", 9, package.path())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "unsupported package extension");
}

#[tokio::test]
async fn test_submit_rejection_surfaces_raw_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/sast/9")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let package = temp_package();
    let client = client_for(&server);
    let err = client
        .submit_package("jwt-token", 9, package.path())
        .await
        .unwrap_err();
    assert!(matches!(err, InsiderError::SubmissionRejected(_)));
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn test_fetch_analysis_decodes_snapshot() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/sast/55/component/9/ci")
        .with_status(200)
        .with_body(
            json!({
                "id": 55,
                "status": 2,
                "securityScore": 91,
                "vulnerabilities": [],
                "dra": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let job = client.fetch_analysis("jwt-token", 55, 9).await.unwrap();
    assert_eq!(job.id, 55);
    assert!(job.status.is_succeeded());
    assert_eq!(job.security_score, 91);
}

#[tokio::test]
async fn test_fetch_analysis_non_ok_aborts() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/sast/55/component/9/ci")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_analysis("jwt-token", 55, 9).await.unwrap_err();

    match err {
        InsiderError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("internal error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
