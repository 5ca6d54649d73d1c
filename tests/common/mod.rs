#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use qc_relay::api::{Transport, UpstreamReply};
use qc_relay::config::RelaySettings;
use qc_relay::relay::{ExtractionError, Relay};

/// What the mock upstream does when called.
#[derive(Clone)]
pub enum Scripted {
    Reply { status: u16, body: String },
    Unreachable(String),
}

/// Transport double that counts calls and remembers the last request.
pub struct MockTransport {
    script: Scripted,
    calls: AtomicUsize,
    last: Mutex<Option<(String, Value)>>,
}

impl MockTransport {
    pub fn new(script: Scripted) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn replying(status: u16, body: impl Into<String>) -> Arc<Self> {
        Self::new(Scripted::Reply { status, body: body.into() })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(String, Value)> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<UpstreamReply, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((url.to_string(), body.clone()));
        match &self.script {
            Scripted::Reply { status, body } => Ok(UpstreamReply {
                status: *status,
                body: body.clone(),
            }),
            Scripted::Unreachable(reason) => Err(ExtractionError::UpstreamUnreachable(reason.clone())),
        }
    }
}

/// Wrap model text in a minimal `generateContent` envelope.
pub fn gemini_envelope(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub fn settings_with_key(key: Option<&str>) -> RelaySettings {
    RelaySettings {
        api_base_url: "http://upstream.test/v1beta".to_string(),
        api_key: key.map(str::to_string),
        ..RelaySettings::default()
    }
}

pub fn relay_with(transport: Arc<MockTransport>, key: Option<&str>) -> Relay {
    Relay::new(settings_with_key(key), transport)
}

pub const SAMPLE_ROWS: &str = r#"[{"variety":"Rolled Oats 800gm","batch_code":"AK19K26R800D","mfg_date":"26-11-2025","expiry_date":"25-11-2026","mrp":"405","defects_status":"No","total_dispatch_ctn":"5","party_name":"Dautal Trading"},{"variety":"Muesli 500gm","batch_code":"MU01","mfg_date":"01-10-2025","expiry_date":"30-09-2026","mrp":"299","defects_status":"No","total_dispatch_ctn":"12","party_name":""}]"#;
