// ABOUTME: Integration tests for the reqwest-backed Netlify client and URL probe.
// ABOUTME: Runs against a wiremock server standing in for the provider API.

use deploy_wait::error::Error;
use deploy_wait::provider::{DeployProvider, HttpProbe, NetlifyClient, ProbeError, UrlProbe};
use deploy_wait::types::{DeployId, SiteId};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = concat!("deploy-wait/", env!("CARGO_PKG_VERSION"));

fn client(server: &MockServer) -> NetlifyClient {
    NetlifyClient::new(server.uri(), "test-token", Duration::from_secs(5)).unwrap()
}

mod deploys {
    use super::*;

    #[tokio::test]
    async fn list_sends_bearer_token_and_parses_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "d2", "name": "mysite", "commit_ref": "abc123", "context": "deploy-preview", "state": "building"},
                {"id": "d1", "name": "mysite", "commit_ref": null, "state": "ready", "branch": "main"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let deploys = client(&server)
            .list_deploys(&SiteId::new("site-1"))
            .await
            .unwrap()
            .expect("list should be present");

        assert_eq!(deploys.len(), 2);
        assert_eq!(deploys[0].id.as_str(), "d2");
        assert_eq!(deploys[0].context.as_deref(), Some("deploy-preview"));
        assert_eq!(deploys[1].commit_ref, None);
    }

    #[tokio::test]
    async fn null_body_is_reported_as_absent_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let deploys = client(&server)
            .list_deploys(&SiteId::new("site-1"))
            .await
            .unwrap();

        assert!(deploys.is_none());
    }

    #[tokio::test]
    async fn empty_body_is_reported_as_absent_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let deploys = client(&server)
            .list_deploys(&SiteId::new("site-1"))
            .await
            .unwrap();

        assert!(deploys.is_none());
    }

    #[tokio::test]
    async fn error_status_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server)
            .list_deploys(&SiteId::new("site-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(ref msg) if msg.contains("401")));
        assert!(!err.to_string().contains("test-token"));
    }

    #[tokio::test]
    async fn get_fetches_single_deploy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys/d2"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(
                {"id": "d2", "name": "mysite", "commit_ref": "abc123", "state": "ready"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let deploy = client(&server)
            .get_deploy(&SiteId::new("site-1"), &DeployId::new("d2"))
            .await
            .unwrap();

        assert_eq!(deploy.state, "ready");
        assert!(deploy.is_ready());
    }

    #[tokio::test]
    async fn unresponsive_endpoint_hits_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client =
            NetlifyClient::new(server.uri(), "test-token", Duration::from_millis(200)).unwrap();
        let err = client
            .list_deploys(&SiteId::new("site-1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Http(_)));
    }

    #[tokio::test]
    async fn malformed_record_is_a_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sites/site-1/deploys/d2"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"state\": 5}"))
            .mount(&server)
            .await;

        let err = client(&server)
            .get_deploy(&SiteId::new("site-1"), &DeployId::new("d2"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }
}

mod probe {
    use super::*;

    fn probe() -> HttpProbe {
        HttpProbe::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn head_success_is_available() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        probe().probe(&format!("{}/", server.uri())).await.unwrap();
    }

    #[tokio::test]
    async fn not_found_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = probe().probe(&server.uri()).await.unwrap_err();

        assert_eq!(err, ProbeError::Status(404));
    }

    #[tokio::test]
    async fn slow_response_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let err = HttpProbe::new(Duration::from_millis(200))
            .unwrap()
            .probe(&server.uri())
            .await
            .unwrap_err();

        assert!(matches!(err, ProbeError::Transport(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Nothing listens on port 1
        let err = probe().probe("http://127.0.0.1:1/").await.unwrap_err();

        assert!(matches!(err, ProbeError::Transport(_)));
    }
}
