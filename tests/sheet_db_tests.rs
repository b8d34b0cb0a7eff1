use sitefinder::dal::{tab_range, RangeUpdate, SheetError, SheetsClient, TableStore};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SheetsClient {
    SheetsClient::new(server.uri(), "sheet-1".to_string(), "token-abc".to_string())
}

#[tokio::test]
async fn get_values_reads_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/sheet-1/values/Blacklist_Rules!A:Z"))
        .and(header("authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Blacklist_Rules!A1:C3",
            "majorDimension": "ROWS",
            "values": [
                ["rule_type", "match_value", "enabled"],
                ["EXACT_DOMAIN", "manta.com", "TRUE"],
                ["DOMAIN_CONTAINS"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let values = client_for(&server)
        .get_values("Blacklist_Rules!A:Z")
        .await
        .unwrap();

    assert_eq!(values.len(), 3);
    assert_eq!(values[1], vec!["EXACT_DOMAIN", "manta.com", "TRUE"]);
    assert_eq!(values[2], vec!["DOMAIN_CONTAINS"]);
}

#[tokio::test]
async fn get_values_without_values_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Companies_Enrichment!A1:P1000",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    let values = client_for(&server)
        .get_values("Companies_Enrichment!A:P")
        .await
        .unwrap();

    assert!(values.is_empty());
}

#[tokio::test]
async fn batch_update_posts_raw_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spreadsheets/sheet-1/values:batchUpdate"))
        .and(header("authorization", "Bearer token-abc"))
        .and(body_json(serde_json::json!({
            "valueInputOption": "RAW",
            "data": [
                {"range": "Companies_Enrichment!L2:L2", "values": [["https://acme.co"]]},
                {"range": "Companies_Enrichment!O2:P2", "values": [["FOUND", "picked=acme.co"]]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "spreadsheetId": "sheet-1",
            "totalUpdatedRows": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updates = vec![
        RangeUpdate {
            range: "Companies_Enrichment!L2:L2".to_string(),
            values: vec![vec!["https://acme.co".to_string()]],
        },
        RangeUpdate {
            range: "Companies_Enrichment!O2:P2".to_string(),
            values: vec![vec!["FOUND".to_string(), "picked=acme.co".to_string()]],
        },
    ];

    client_for(&server).batch_update(updates).await.unwrap();
}

#[tokio::test]
async fn error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let result = client_for(&server).get_values("Companies_Enrichment!A:P").await;

    match result {
        Err(SheetError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(body, "PERMISSION_DENIED");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn quoted_tab_names_reach_the_values_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spreadsheets/sheet-1/values/'Q1%20Leads'!A:P"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "'Q1 Leads'!A1:P2",
            "values": [["Recipient (Company)"], ["Acme"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let values = client_for(&server)
        .get_values(&tab_range("Q1 Leads", "A:P"))
        .await
        .unwrap();

    assert_eq!(values[1], vec!["Acme"]);
}
