//! Integration tests for the Discord webhook client
//!
//! A wiremock server stands in for Discord. Broken transports use a raw
//! TCP listener.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web, App};
use discord_relay::config::{Config, DiscordConfig};
use discord_relay::models::{Embed, EmbedField, OutboundMessage};
use discord_relay::routes;
use discord_relay::services::{DeliveryError, DiscordClient, WebhookDelivery};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::incident_body;

const WEBHOOK_PATH: &str = "/api/webhooks/123/abcXYZ";

fn message() -> OutboundMessage {
    OutboundMessage::single(
        "CT".to_string(),
        Embed {
            title: "T".to_string(),
            description: "D".to_string(),
            color: 65280,
            fields: vec![EmbedField::new("N", "V")],
        },
    )
}

/// URL on localhost with nothing listening behind it
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}{}", addr, WEBHOOK_PATH)
}

/// URL of a server that sends 200 headers, then hangs up partway through the body
async fn truncated_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
            .await;
        let _ = socket.shutdown().await;
        // Drain until the client hangs up so unread bytes do not turn the FIN into a reset
        while let Ok(n) = socket.read(&mut buf).await {
            if n == 0 {
                break;
            }
        }
    });

    format!("http://{}{}", addr, WEBHOOK_PATH)
}

// =============================================================================
// Client
// =============================================================================

#[tokio::test]
async fn test_posts_json_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "content": "CT",
            "embeds": [{
                "title": "T",
                "description": "D",
                "color": 65280,
                "fields": [{"name": "N", "value": "V"}]
            }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DiscordClient::new(None).unwrap();
    let url = format!("{}{}", mock_server.uri(), WEBHOOK_PATH);

    let receipt = client.deliver(&url, &message()).await.unwrap();

    assert_eq!(receipt.http_status, 204);
    assert!(receipt.is_success());
}

#[tokio::test]
async fn test_remote_error_status_is_not_a_delivery_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Unknown Webhook", "code": 10015})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DiscordClient::new(None).unwrap();
    let url = format!("{}{}", mock_server.uri(), WEBHOOK_PATH);

    let receipt = client.deliver(&url, &message()).await.unwrap();

    assert_eq!(receipt.http_status, 404);
    assert!(!receipt.is_success());
}

#[tokio::test]
async fn test_refused_connection_is_delivery_error() {
    let client = DiscordClient::new(Some(Duration::from_secs(5))).unwrap();

    let result = client.deliver(&closed_port_url(), &message()).await;

    assert!(matches!(
        result,
        Err(DeliveryError::Connect(_)) | Err(DeliveryError::Request(_))
    ));
}

#[tokio::test]
async fn test_truncated_response_body_is_delivery_error() {
    let client = DiscordClient::new(Some(Duration::from_secs(5))).unwrap();

    let result = client.deliver(&truncated_body_url().await, &message()).await;

    assert!(matches!(result, Err(DeliveryError::Request(_))));
}

#[tokio::test]
async fn test_slow_response_times_out_when_configured() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let client = DiscordClient::new(Some(Duration::from_millis(200))).unwrap();
    let url = format!("{}{}", mock_server.uri(), WEBHOOK_PATH);

    let result = client.deliver(&url, &message()).await;

    assert!(matches!(result, Err(DeliveryError::Timeout)));
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = DiscordClient::new(None).unwrap();
    let url = format!("{}{}", mock_server.uri(), WEBHOOK_PATH);

    let receipt = client.deliver(&url, &message()).await.unwrap();
    assert_eq!(receipt.http_status, 500);
}

// =============================================================================
// Through the HTTP API
// =============================================================================

async fn post_incident_via_client(webhook_url: String) -> (StatusCode, String) {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        discord: DiscordConfig {
            webhook_url: Some(webhook_url),
            timeout: Some(Duration::from_secs(5)),
        },
    };
    let client = DiscordClient::new(config.discord.timeout).unwrap();
    let delivery: web::Data<dyn WebhookDelivery> =
        web::Data::from(Arc::new(client) as Arc<dyn WebhookDelivery>);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config))
            .app_data(delivery)
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/incident")
        .set_json(incident_body("open"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[actix_web::test]
async fn test_incident_reaches_discord() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) =
        post_incident_via_client(format!("{}{}", mock_server.uri(), WEBHOOK_PATH)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Notification sent to Discord");

    let received = mock_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["embeds"][0]["color"], 16711680);
}

#[actix_web::test]
async fn test_discord_rejection_still_reports_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let (status, body) =
        post_incident_via_client(format!("{}{}", mock_server.uri(), WEBHOOK_PATH)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Notification sent to Discord");
}

#[actix_web::test]
async fn test_unreachable_discord_reports_generic_500() {
    let (status, body) = post_incident_via_client(closed_port_url()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error sending notification to Discord");
}

#[actix_web::test]
async fn test_truncated_discord_response_reports_generic_500() {
    let (status, body) = post_incident_via_client(truncated_body_url().await).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error sending notification to Discord");
}
