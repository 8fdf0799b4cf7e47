use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use client::{ApiClient, ErrorClassifier, Method, TransportOptions};
use serde_json::{Value, json};
use test_helpers::{
    Fields, fields_client, fields_options, spawn_app, unreachable_address,
};

#[tokio::test]
async fn success_body_runs_success_mapper() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get("/okay", None).await;

    assert!(result.has_succeeded());
    assert_eq!(result.status_code(), Some(200));
    assert_eq!(result.error_message(), None);
    assert_eq!(
        result.extension(),
        &Fields {
            date: Some("2024-01-01".into()),
            error_code: None,
        }
    );
    assert_eq!(
        result.raw_body(),
        Some(&json!({"status": "success", "date": "2024-01-01"}))
    );

    Ok(())
}

#[tokio::test]
async fn error_body_runs_error_mapper() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get("/error", None).await;

    assert!(!result.has_succeeded());
    assert_eq!(result.status_code(), Some(200));
    assert_eq!(result.error_message(), Some("boom"));
    assert_eq!(result.extension().error_code.as_deref(), Some("E1"));
    assert_eq!(result.extension().date, None);

    Ok(())
}

#[tokio::test]
async fn connection_refused_is_a_request_error() -> anyhow::Result<()> {
    let client = fields_client(&unreachable_address());

    let result = client.get("/okay", None).await;

    assert!(!result.has_succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.raw_body(), None);
    assert!(
        result
            .error_message()
            .is_some_and(|m| m.starts_with("Request error - ")),
        "unexpected message: {:?}",
        result.error_message()
    );
    assert_eq!(result.extension(), &Fields::default());

    Ok(())
}

#[tokio::test]
async fn malformed_url_surfaces_as_transport_failure() -> anyhow::Result<()> {
    let client = fields_client("not a url");

    let result = client.get("", None).await;

    assert!(!result.has_succeeded());
    assert_eq!(result.status_code(), None);
    assert!(
        result
            .error_message()
            .is_some_and(|m| m.starts_with("Request error - "))
    );

    Ok(())
}

#[tokio::test]
async fn get_never_sends_a_body() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .call(Method::Get, "/echo", Some(&json!({"ignored": true})), None)
        .await;

    assert!(result.has_succeeded());
    let echoed = result.raw_body().unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["body"], Value::Null);
    assert_eq!(echoed["contentType"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn verbs_send_json_bodies() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let body = json!({"name": "alice", "count": 3});

    let results = [
        ("POST", app.client.post("/echo", &body, None).await),
        ("PUT", app.client.put("/echo", &body, None).await),
        ("PATCH", app.client.patch("/echo", &body, None).await),
        ("DELETE", app.client.delete("/echo", &body, None).await),
    ];

    for (method, result) in results {
        assert!(result.has_succeeded(), "{method} failed");
        let echoed = result.raw_body().unwrap();
        assert_eq!(echoed["method"], method);
        assert_eq!(echoed["body"], body);
        assert_eq!(echoed["contentType"], "application/json");
    }
    assert_eq!(app.hits("/echo"), 4);

    Ok(())
}

#[tokio::test]
async fn non_2xx_with_success_body_is_success() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get("/status/500", None).await;

    assert!(result.has_succeeded());
    assert_eq!(result.status_code(), Some(500));
    assert_eq!(result.extension().date.as_deref(), Some("status-500"));

    Ok(())
}

#[tokio::test]
async fn unparseable_body_is_a_failure() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app.client.get("/not-json", None).await;

    assert!(!result.has_succeeded());
    assert_eq!(result.status_code(), Some(200));
    assert_eq!(result.raw_body(), None);
    assert!(
        result
            .error_message()
            .is_some_and(|m| m.starts_with("Request error - could not parse"))
    );

    Ok(())
}

#[tokio::test]
async fn unencodable_body_never_reaches_the_network() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut body = BTreeMap::new();
    body.insert(vec![1u8], 1u8);

    let result = app.client.post("/echo", &body, None).await;

    assert!(!result.has_succeeded());
    assert!(
        result
            .error_message()
            .is_some_and(|m| m.contains("could not encode request body"))
    );
    assert_eq!(app.hits("/echo"), 0);

    Ok(())
}

#[tokio::test]
async fn static_headers_are_sent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = ApiClient::new(
        fields_options(&app.address)
            .transport_options(
                TransportOptions::default().header("authorization", "static"),
            )
            .build()?,
    );

    let result = client.get("/headers", None).await;

    assert_eq!(result.extension().date.as_deref(), Some("static"));

    Ok(())
}

#[tokio::test]
async fn transport_supplier_runs_for_every_call() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let refreshes = Rc::new(Cell::new(0));
    let client = {
        let refreshes = refreshes.clone();
        ApiClient::new(
            fields_options(&app.address)
                .transport_supplier(move || {
                    refreshes.set(refreshes.get() + 1);
                    TransportOptions::default().header(
                        "authorization",
                        format!("token-{}", refreshes.get()),
                    )
                })
                .build()?,
        )
    };

    let first = client.get("/headers", None).await;
    let second = client.get("/headers", None).await;

    assert_eq!(first.extension().date.as_deref(), Some("token-1"));
    assert_eq!(second.extension().date.as_deref(), Some("token-2"));
    assert_eq!(refreshes.get(), 2);

    Ok(())
}

#[tokio::test]
async fn custom_classifier_field_names() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = ApiClient::new(
        fields_options(&app.address)
            .classifier(ErrorClassifier {
                status_field: "method".into(),
                error_value: "POST".into(),
                message_field: "contentType".into(),
                code_field: "missing".into(),
            })
            .build()?,
    );

    let posted = client.post("/echo", &json!({}), None).await;
    let fetched = client.get("/echo", None).await;

    assert!(!posted.has_succeeded());
    assert_eq!(posted.error_message(), Some("application/json"));
    assert_eq!(posted.extension().error_code, None);
    assert!(fetched.has_succeeded());

    Ok(())
}
