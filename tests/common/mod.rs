//! Shared test fixtures: survey builders, a scripted `SurveyApi` and a canned
//! HTTP server for exercising the real client.

#![allow(dead_code)]

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use sensequery::api::models::{
    Category, RespondentDetailField, SubmissionPayload, SurveyConfig, SurveyPayload,
};
use sensequery::api::{SurveyApi, SurveyError};
use sensequery::survey::SurveyKey;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn survey(
    question: &str,
    categories: &[(&str, &str)],
    fields: &[(&str, &str)],
    thank_you: &str,
) -> SurveyPayload {
    SurveyPayload {
        config: SurveyConfig {
            question: question.to_string(),
            categories: categories
                .iter()
                .map(|(label, value)| Category {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            thank_you_message: thank_you.to_string(),
        },
        respondent_details: fields
            .iter()
            .map(|(label, value)| RespondentDetailField {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

/// In-memory API answering from queues of scripted results
#[derive(Default)]
pub struct ScriptedApi {
    fetches: Mutex<VecDeque<Result<SurveyPayload, SurveyError>>>,
    submits: Mutex<VecDeque<Result<(), SurveyError>>>,
    fetch_calls: AtomicUsize,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(payload: SurveyPayload) -> Arc<Self> {
        Arc::new(Self::new().then_fetch(Ok(payload)))
    }

    pub fn then_fetch(self, result: Result<SurveyPayload, SurveyError>) -> Self {
        self.fetches.lock().unwrap().push_back(result);
        self
    }

    pub fn then_submit(self, result: Result<(), SurveyError>) -> Self {
        self.submits.lock().unwrap().push_back(result);
        self
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SurveyApi for ScriptedApi {
    async fn fetch_survey_config(&self, _key: &SurveyKey) -> Result<SurveyPayload, SurveyError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let mut fetches = self.fetches.lock().unwrap();
        // The last scripted result keeps answering once the queue is drained
        if fetches.len() > 1 {
            fetches.pop_front().unwrap()
        } else {
            fetches.front().cloned().unwrap_or_else(|| {
                Err(SurveyError::FetchTransport("Service Unavailable".into()))
            })
        }
    }

    async fn submit_response(&self, payload: &SubmissionPayload) -> Result<(), SurveyError> {
        self.submissions.lock().unwrap().push(payload.clone());
        self.submits.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Canned response served once, in order
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::raw(200, body.to_string())
    }

    pub fn status(status: u16) -> Self {
        Self::raw(status, String::new())
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[derive(Default)]
struct ServerState {
    responses: Mutex<VecDeque<Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Local hyper server answering requests from a queue of canned responses
///
/// Requests beyond the queue get a 500.
pub struct CannedServer {
    pub base_url: String,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl CannedServer {
    pub async fn start(responses: Vec<Canned>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(ServerState {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        });

        let server_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            let builder = Builder::new(TokioExecutor::new());
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let state = Arc::clone(&server_state);
                let builder = builder.clone();
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| handle_request(req, Arc::clone(&state)));
                    let _ = builder.serve_connection(io, service).await;
                });
            }
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for CannedServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<ServerState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or_default().to_string();
            (name.as_str().to_string(), value)
        })
        .collect();
    let body = req.into_body().collect().await?.to_bytes().to_vec();

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });

    let canned = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Canned::status(500));

    let mut response = Response::new(Full::new(Bytes::from(canned.body)));
    *response.status_mut() = StatusCode::from_u16(canned.status).unwrap();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, "application/json".parse().unwrap());
    Ok(response)
}
