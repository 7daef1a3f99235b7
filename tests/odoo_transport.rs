//! XML-RPC over HTTP against a mock Odoo server.

use std::sync::Arc;

use odoo_mcp_server::core::odoo::{
    Domain, HttpRpcTransport, OdooClient, OdooConfig, OdooError, SearchOptions,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml")
        .set_body_string(body.to_string())
}

fn uid_response(uid: i64) -> ResponseTemplate {
    xml(&format!(
        "<?xml version='1.0'?><methodResponse><params><param><value><int>{uid}</int></value></param></params></methodResponse>"
    ))
}

fn fault_response(code: i64, message: &str) -> ResponseTemplate {
    xml(&format!(
        "<?xml version='1.0'?><methodResponse><fault><value><struct>\
         <member><name>faultCode</name><value><int>{code}</int></value></member>\
         <member><name>faultString</name><value><string>{message}</string></value></member>\
         </struct></value></fault></methodResponse>"
    ))
}

fn client(server: &MockServer) -> OdooClient {
    let config = OdooConfig::new(server.uri(), "demo", "admin", "admin");
    let transport = Arc::new(HttpRpcTransport::new(&config).unwrap());
    OdooClient::with_transport(config, transport)
}

#[tokio::test]
async fn test_authenticate_and_search_read() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/common"))
        .and(body_string_contains("<methodName>authenticate</methodName>"))
        .respond_with(uid_response(7))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/object"))
        .and(body_string_contains("res.partner"))
        .respond_with(xml(
            "<?xml version='1.0'?><methodResponse><params><param><value><array><data>\
             <value><struct>\
             <member><name>id</name><value><int>3</int></value></member>\
             <member><name>name</name><value><string>Azure Interior</string></value></member>\
             <member><name>parent_id</name><value><boolean>0</boolean></value></member>\
             </struct></value>\
             </data></array></value></param></params></methodResponse>",
        ))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let options = || SearchOptions::fields(&["name", "parent_id"]).limit(5);
    let records = client
        .search_read("res.partner", &Domain::new(), options())
        .await
        .unwrap();
    client
        .search_read("res.partner", &Domain::new(), options())
        .await
        .unwrap();

    assert_eq!(client.uid().await.unwrap(), 7);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Azure Interior");
    assert_eq!(records[0]["parent_id"], false);
}

#[tokio::test]
async fn test_access_denied_fault_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/common"))
        .respond_with(uid_response(7))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/object"))
        .respond_with(fault_response(3, "Access Denied"))
        .mount(&server)
        .await;

    let err = client(&server)
        .search_count("account.move", &Domain::new())
        .await
        .unwrap_err();

    assert!(matches!(err, OdooError::Authentication(_)), "got {err:?}");
}

#[tokio::test]
async fn test_other_fault_is_remote_error_with_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/common"))
        .respond_with(uid_response(7))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/object"))
        .respond_with(fault_response(1, "The move is not balanced."))
        .mount(&server)
        .await;

    let err = client(&server)
        .search_count("account.move", &Domain::new())
        .await
        .unwrap_err();

    match err {
        OdooError::Remote { message, .. } => assert_eq!(message, "The move is not balanced."),
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/common"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).authenticate().await.unwrap_err();

    assert!(matches!(err, OdooError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc/2/common"))
        .respond_with(xml(
            "<?xml version='1.0'?><methodResponse><params><param><value><boolean>0</boolean></value></param></params></methodResponse>",
        ))
        .mount(&server)
        .await;

    let err = client(&server).authenticate().await.unwrap_err();

    assert!(matches!(err, OdooError::Authentication(_)), "got {err:?}");
}
