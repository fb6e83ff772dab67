// HTTP client behaviour against a mock bookkeeping service

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use billbook::api::{BookkeepingApi, HttpBookkeepingApi};
use billbook::config::ApiConfig;
use billbook::inventory::StockLedger;
use billbook::invoices::{InvoiceDraft, InvoiceDraftBuilder, InvoiceId, InvoiceService};
use billbook::catalog::{ClientId, ProductId, Unit};
use billbook::taxes::{TaxPolicy, TaxTier};
use billbook::AppError;
use helpers::*;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpBookkeepingApi {
    HttpBookkeepingApi::new(&ApiConfig::new(format!("{}/api/", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_list_clients_and_products() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "c-1", "name": "Acme Traders", "gstin": "29ABCDE1234F1Z5",
              "address": { "city": "Bengaluru" } }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p-1", "name": "Cement", "hsnCode": "2523", "unit": "KG",
              "price": 12.5, "stock": 40, "taxRate": 28 }
        ])))
        .mount(&server)
        .await;

    let api = api_for(&server);

    let clients = api.list_clients().await.unwrap();
    assert_eq!(clients[0].id, ClientId::new("c-1"));
    assert_eq!(clients[0].address.city, "Bengaluru");

    let products = api.list_products().await.unwrap();
    assert_eq!(products[0].id, ProductId::new("p-1"));
    assert_eq!(products[0].unit, Unit::Kg);
    assert_eq!(products[0].price, dec!(12.5));
    assert_eq!(products[0].tax_tier().unwrap(), Some(TaxTier::Central28));
}

#[tokio::test]
async fn test_adjust_stock_sends_delta() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/products/p-1/stock"))
        .and(body_json(json!({ "delta": -3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stock": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let level = api_for(&server)
        .adjust_stock(&ProductId::new("p-1"), -3)
        .await
        .unwrap();
    assert_eq!(level.stock, 2);
}

#[tokio::test]
async fn test_rejection_message_is_kept_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/products/p-1/stock"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Insufficient stock" })),
        )
        .mount(&server)
        .await;

    match api_for(&server).adjust_stock(&ProductId::new("p-1"), -10).await {
        Err(AppError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Insufficient stock");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/clients"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance window"))
        .mount(&server)
        .await;

    match api_for(&server).list_clients().await {
        Err(AppError::Rejected { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_response_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).list_products().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let api = HttpBookkeepingApi::new(&ApiConfig::new("http://127.0.0.1:1/api")).unwrap();

    let err = api.list_clients().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invoice_pdf_bytes() {
    let server = MockServer::start().await;
    let pdf = b"%PDF-1.4 fake".to_vec();

    Mock::given(method("GET"))
        .and(path("/api/invoices/inv-7/pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(pdf.clone()),
        )
        .mount(&server)
        .await;

    let bytes = api_for(&server).invoice_pdf(&InvoiceId::new("inv-7")).await.unwrap();
    assert_eq!(bytes, pdf);
}

#[tokio::test]
async fn test_submit_invoice_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "inv-1",
            "invoiceNumber": "INV-2024-0001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = InvoiceService::new(Arc::new(api_for(&server)), InvoiceDraftBuilder::default());

    let mut draft = InvoiceDraft::new(TaxPolicy::PerLine);
    draft.select_client(ClientId::new("c-1"));
    draft
        .add_line(Some(&product("a", dec!(100), 10)), dec!(2), Some(TaxTier::Central18))
        .unwrap();

    let created = service.submit(&mut draft).await.unwrap();
    assert_eq!(created.id, InvoiceId::new("inv-1"));
    assert_eq!(created.invoice_number, "INV-2024-0001");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["client"], "c-1");
    assert_eq!(body["status"], "draft");
    assert_eq!(body["taxPolicy"], "per_line");
    assert_eq!(body["items"][0]["product"], "a");
    assert_eq!(body["items"][0]["saleType"], "Central - 18%");
    assert!(body["items"][0]["taxAmount"].is_number());
}

#[tokio::test]
async fn test_rejected_invoice_maps_to_submission_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Client not found" })),
        )
        .mount(&server)
        .await;

    let service = InvoiceService::new(Arc::new(api_for(&server)), InvoiceDraftBuilder::default());

    let mut draft = InvoiceDraft::new(TaxPolicy::PerInvoice);
    draft.select_client(ClientId::new("missing"));
    draft.select_invoice_tier(TaxTier::Central5).unwrap();
    draft
        .add_line(Some(&product("a", dec!(100), 10)), dec!(1), None)
        .unwrap();

    match service.submit(&mut draft).await {
        Err(AppError::Submission(message)) => assert_eq!(message, "Client not found"),
        other => panic!("Expected Submission, got {:?}", other),
    }
    assert_eq!(draft.line_items().len(), 1);
}

#[tokio::test]
async fn test_stock_ledger_over_http_surfaces_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/products/a/stock"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Stock changed by another user"
        })))
        .mount(&server)
        .await;

    let ledger = StockLedger::new(Arc::new(api_for(&server)));

    match ledger.adjust(&product("a", dec!(10), 5), -2).await {
        Err(AppError::InvalidAdjustment { reason, .. }) => {
            assert_eq!(reason, "Stock changed by another user");
        }
        other => panic!("Expected InvalidAdjustment, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ids_with_reserved_characters_stay_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/products/SKU%2F12%3Fv/stock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stock": 4 })))
        .expect(1)
        .mount(&server)
        .await;

    let level = api_for(&server)
        .adjust_stock(&ProductId::new("SKU/12?v"), 1)
        .await
        .unwrap();
    assert_eq!(level.stock, 4);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}
