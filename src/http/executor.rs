use std::time::Instant;

use chrono::Utc;
use reqwest::Client;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::builder::build_request;
use crate::error::AppError;
use crate::event::Event;
use crate::state::request_state::RequestState;
use crate::state::response_state::{ResponseBody, ResponseState};

pub async fn execute(
    client: Client,
    request: RequestState,
    tx: UnboundedSender<Event>,
    cancel: CancellationToken,
) {
    let result = tokio::select! {
        res = do_execute(client, request) => res,
        _ = cancel.cancelled() => Err(AppError::Cancelled),
    };
    let _ = tx.send(Event::Response(result));
}

async fn do_execute(client: Client, state: RequestState) -> Result<ResponseState, AppError> {
    let start = Instant::now();

    let request = build_request(&client, &state).build()?;
    let response = client.execute(request).await.map_err(|e| {
        if e.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Http(e)
        }
    })?;

    let status = response.status();
    let status_code = status.as_u16();
    let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let bytes = response.bytes().await?;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let size_bytes = bytes.len();

    let body = if content_type.contains("application/json") {
        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(json) => ResponseBody::Text(serde_json::to_string_pretty(&json)?),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(&bytes).into_owned()),
        }
    } else if bytes.is_empty() {
        ResponseBody::Empty
    } else {
        match std::str::from_utf8(&bytes) {
            Ok(text) => ResponseBody::Text(text.to_string()),
            Err(_) => ResponseBody::Binary(bytes.to_vec()),
        }
    };

    Ok(ResponseState {
        status: status_code,
        status_text,
        headers,
        body,
        size_bytes,
        elapsed_ms,
        received_at: Utc::now(),
        scroll_offset: 0,
    })
}
