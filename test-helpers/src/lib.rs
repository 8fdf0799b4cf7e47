use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::{Server, Service};
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use client::ApiClient;
use serde_json::{Value, json};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub mod mock;

pub use mock::{Fields, RecordingHandle, fields_client, fields_options};

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub address: String,
    pub client: ApiClient<Fields>,
    hits: HitCounter,
}

impl TestApp {
    /// Number of requests the fixture server has seen for a path.
    pub fn hits(&self, path: &str) -> usize {
        self.hits.get(path)
    }
}

/// Requests received per path, shared with the server workers.
#[derive(Clone, Default)]
struct HitCounter(Arc<Mutex<HashMap<String, usize>>>);

impl HitCounter {
    fn record(&self, path: &str) {
        if let Ok(mut hits) = self.0.lock() {
            *hits.entry(path.to_string()).or_default() += 1;
        }
    }

    fn get(&self, path: &str) -> usize {
        self.0
            .lock()
            .map(|hits| hits.get(path).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

/// Build the fixture server, but not await it.
fn build(listener: TcpListener, hits: HitCounter) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let hits = hits.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                hits.record(req.path());
                srv.call(req)
            })
            .route("/okay", web::get().to(okay))
            .route("/error", web::get().to(error))
            .route("/echo", web::route().to(echo))
            .route("/slow/{ms}", web::get().to(slow))
            .route("/status/{code}", web::get().to(status))
            .route("/not-json", web::get().to(not_json))
            .route("/headers", web::get().to(headers))
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

async fn okay() -> HttpResponse {
    HttpResponse::Ok().json(json!({"status": "success", "date": "2024-01-01"}))
}

async fn error() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "error",
        "error": "boom",
        "errorCode": "E1"
    }))
}

/// Reflects the method and the parsed request body back to the caller.
async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let received: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String("<unparseable>".into()))
    };
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    HttpResponse::Ok().json(json!({
        "status": "success",
        "method": req.method().as_str(),
        "body": received,
        "contentType": content_type
    }))
}

async fn slow(path: web::Path<u64>) -> HttpResponse {
    let ms = path.into_inner();
    actix_web::rt::time::sleep(Duration::from_millis(ms)).await;
    HttpResponse::Ok().json(json!({"status": "success", "date": format!("slow-{ms}")}))
}

async fn status(path: web::Path<u16>) -> HttpResponse {
    let code = path.into_inner();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::OK);
    HttpResponse::build(status)
        .json(json!({"status": "success", "date": format!("status-{code}")}))
}

async fn not_json() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body("definitely not json")
}

async fn headers(req: HttpRequest) -> HttpResponse {
    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    HttpResponse::Ok().json(json!({
        "status": "success",
        "date": authorization
    }))
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .finish();
    let _ = LogTracer::init();
    let _ = subscriber.try_init();
}

/// Spawn the fixture server on an OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let hits = HitCounter::default();

    let server = build(listener, hits.clone()).unwrap();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{port}");
    TestApp {
        port,
        client: fields_client(&address),
        address,
        hits,
    }
}

/// A base URL nothing is listening on.
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
