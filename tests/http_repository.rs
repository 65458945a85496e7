use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Mutex;

use invoice_desk::domain::invoice::{
  InvoiceFormModel, InvoiceRepository, InvoiceSource, LineItemKey, PersistablePayload,
  RepositoryError,
};
use invoice_desk::infrastructure::api::HttpInvoiceRepository;
use invoice_desk::infrastructure::config::ApiConfig;

/// Request bodies the fake API received, in arrival order
#[derive(Default)]
struct Received {
  bodies: Mutex<Vec<(String, Value)>>,
}

async fn list() -> HttpResponse {
  HttpResponse::Ok().json(json!([
    { "id": 1, "name": "First", "createdAt": "2026-01-02", "items": [] },
    { "id": "2", "name": null, "createdAt": "Fri Oct 16 2026 00:00:00 GMT+0200", "items": null }
  ]))
}

async fn get(path: web::Path<String>) -> HttpResponse {
  match path.as_str() {
    "7" => HttpResponse::Ok().json(json!({
      "id": "7",
      "number": 7,
      "name": "Seventh",
      "createdAt": "2026-10-16T00:00:00.000Z",
      "validUntil": "2026-10-30",
      "recipient": { "id": "r1", "companyName": "Acme", "nip": 5260001122u64 },
      "sender": { "companyName": "Acme Corp" },
      "items": [{
        "id": "i1", "name": "Hosting", "amount": "2", "unit": "pcs", "tax": 23, "price": 10.5
      }]
    })),
    "garbled" => HttpResponse::Ok().content_type("application/json").body("{not json"),
    "boom" => HttpResponse::InternalServerError().finish(),
    _ => HttpResponse::NotFound().finish(),
  }
}

async fn create(body: web::Json<Value>, received: web::Data<Received>) -> HttpResponse {
  let mut saved = body.into_inner();
  received
    .bodies
    .lock()
    .unwrap()
    .push(("POST".to_string(), saved.clone()));
  saved["id"] = json!("100");
  HttpResponse::Created().json(saved)
}

async fn update(
  path: web::Path<String>,
  body: web::Json<Value>,
  received: web::Data<Received>,
) -> HttpResponse {
  if path.as_str() == "locked" {
    return HttpResponse::ServiceUnavailable().finish();
  }
  let saved = body.into_inner();
  received
    .bodies
    .lock()
    .unwrap()
    .push((format!("PUT {}", path), saved.clone()));
  HttpResponse::Ok().json(saved)
}

async fn remove(path: web::Path<String>) -> HttpResponse {
  match path.as_str() {
    "7" => HttpResponse::Ok().body("deleted"),
    _ => HttpResponse::NotFound().finish(),
  }
}

/// Starts the fake invoice API on an ephemeral port
fn fake_api() -> (String, ServerHandle, web::Data<Received>) {
  let received = web::Data::new(Received::default());
  let data = received.clone();

  let server = HttpServer::new(move || {
    App::new().app_data(data.clone()).service(
      web::scope("/api/Invoices")
        .route("/", web::get().to(list))
        .route("/", web::post().to(create))
        .route("/{id}", web::get().to(get))
        .route("/{id}", web::put().to(update))
        .route("/{id}", web::delete().to(remove)),
    )
  })
  .workers(1)
  .bind(("127.0.0.1", 0))
  .unwrap();

  let addr = server.addrs()[0];
  let server = server.run();
  let handle = server.handle();
  actix_web::rt::spawn(server);

  (format!("http://{}/api/Invoices/", addr), handle, received)
}

fn repository(base_url: &str) -> HttpInvoiceRepository {
  HttpInvoiceRepository::new(&ApiConfig {
    base_url: base_url.to_string(),
    connect_timeout_seconds: 2,
    mock: false,
  })
  .unwrap()
}

fn payload(id: Option<&str>) -> PersistablePayload {
  let mut model = InvoiceFormModel::initialize(InvoiceSource::Blank);
  model.set_field("name", "Invoice 1").unwrap();
  model.set_field("number", "12").unwrap();
  model.set_field("createdAt", "2026-10-16").unwrap();
  model.set_field("validUntil", "").unwrap();
  model.set_field("recipient.companyName", "Acme").unwrap();
  model.set_field("recipient.nip", "123").unwrap();
  model.set_field("sender.companyName", "Acme Corp").unwrap();
  let first = model.items().iter().next().unwrap().key.to_string();
  model
    .set_field(&format!("items.{}.name", first), "Hosting")
    .unwrap();
  model
    .set_field(&format!("items.{}.price", first), "10.50")
    .unwrap();
  model
    .set_field(&format!("items.{}.amount", first), "two")
    .unwrap();

  let mut payload = model.to_persistable_payload();
  payload.id = id.map(str::to_string);
  payload
}

#[actix_web::test]
async fn test_list_decodes_lenient_records() {
  let (base_url, handle, _) = fake_api();

  let invoices = repository(&base_url).list_invoices().await.unwrap();

  assert_eq!(invoices.len(), 2);
  assert_eq!(invoices[0].id.as_deref(), Some("1"));
  assert_eq!(invoices[0].created_at, NaiveDate::from_ymd_opt(2026, 1, 2));
  assert_eq!(invoices[1].name, "");
  assert_eq!(invoices[1].created_at, NaiveDate::from_ymd_opt(2026, 10, 16));
  assert!(invoices[1].items.is_empty());

  handle.stop(false).await;
}

#[actix_web::test]
async fn test_get_hydrates_invoice() {
  let (base_url, handle, _) = fake_api();

  let invoice = repository(&base_url).get_invoice("7").await.unwrap();

  assert_eq!(invoice.number, Some(7));
  assert_eq!(invoice.created_at, NaiveDate::from_ymd_opt(2026, 10, 16));
  assert_eq!(invoice.valid_until, NaiveDate::from_ymd_opt(2026, 10, 30));
  assert_eq!(invoice.recipient.id.as_deref(), Some("r1"));
  assert_eq!(invoice.recipient.tax_id.as_deref(), Some("5260001122"));
  assert_eq!(invoice.sender.company_name, "Acme Corp");
  assert_eq!(invoice.items[0].key, LineItemKey::server("i1"));
  assert_eq!(invoice.items[0].tax, "23");
  assert_eq!(invoice.items[0].price, "10.5");

  handle.stop(false).await;
}

#[actix_web::test]
async fn test_status_mapping() {
  let (base_url, handle, _) = fake_api();
  let repository = repository(&base_url);

  assert_eq!(
    repository.get_invoice("missing").await,
    Err(RepositoryError::NotFound("missing".to_string()))
  );

  let error = repository.get_invoice("boom").await.unwrap_err();
  assert_eq!(
    error,
    RepositoryError::Status {
      status: 500,
      reason: "Internal Server Error".to_string()
    }
  );
  assert_eq!(
    error.to_string(),
    "Network response was not ok Internal Server Error (500)"
  );

  assert!(matches!(
    repository.get_invoice("garbled").await,
    Err(RepositoryError::Decode(_))
  ));

  // Only a missing invoice on GET is NotFound
  assert!(matches!(
    repository.delete_invoice("missing").await,
    Err(RepositoryError::Status { status: 404, .. })
  ));
  assert!(matches!(
    repository.edit_invoice("locked", &payload(Some("locked"))).await,
    Err(RepositoryError::Status { status: 503, .. })
  ));

  handle.stop(false).await;
}

#[actix_web::test]
async fn test_delete_ignores_body() {
  let (base_url, handle, _) = fake_api();

  repository(&base_url).delete_invoice("7").await.unwrap();

  handle.stop(false).await;
}

#[actix_web::test]
async fn test_create_sends_wire_payload() {
  let (base_url, handle, received) = fake_api();

  let created = repository(&base_url)
    .add_invoice(&payload(None))
    .await
    .unwrap();

  assert_eq!(created.id.as_deref(), Some("100"));
  assert_eq!(created.number, Some(12));

  let bodies = received.bodies.lock().unwrap();
  let (method, body) = &bodies[0];
  assert_eq!(method, "POST");
  assert!(body.get("id").is_none());
  assert!(body.get("validUntil").is_none());
  assert_eq!(body["name"], "Invoice 1");
  assert_eq!(body["number"], 12);
  assert_eq!(body["createdAt"], "2026-10-16");
  assert_eq!(body["recipient"]["companyName"], "Acme");
  assert_eq!(body["recipient"]["nip"], "123");
  // the untouched second row is not sent
  assert_eq!(body["items"].as_array().unwrap().len(), 1);
  assert!(body["items"][0].get("id").is_none());
  assert_eq!(body["items"][0]["name"], "Hosting");
  assert_eq!(body["items"][0]["price"], 10.5);
  assert_eq!(body["items"][0]["amount"], "two");

  drop(bodies);
  handle.stop(false).await;
}

#[actix_web::test]
async fn test_edit_puts_to_invoice_url() {
  let (base_url, handle, received) = fake_api();

  let saved = repository(&base_url)
    .edit_invoice("7", &payload(Some("7")))
    .await
    .unwrap();

  assert_eq!(saved.id.as_deref(), Some("7"));
  let bodies = received.bodies.lock().unwrap();
  assert_eq!(bodies[0].0, "PUT 7");
  assert_eq!(bodies[0].1["id"], "7");

  drop(bodies);
  handle.stop(false).await;
}

#[actix_web::test]
async fn test_unreachable_api_is_transport_error() {
  let repository = repository("http://127.0.0.1:1/api/Invoices/");

  assert!(matches!(
    repository.list_invoices().await,
    Err(RepositoryError::Transport(_))
  ));
}
