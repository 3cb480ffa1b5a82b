//! Shared fixtures for integration tests.
//!
//! [`ScriptedTransport`] answers GETs from a per-path script and records
//! every path it was asked for. Responses can be immediate or gated behind
//! a oneshot channel so tests decide the completion order.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use repolens::app::{Dispatcher, Store};
use repolens::transport::{Transport, TransportResponse};
use repolens::TransportError;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Reply = Result<TransportResponse, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, path: &str, scripted: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(scripted);
    }

    /// Queues an immediate reply for the next GET of `path`.
    pub fn reply(&self, path: &str, reply: Reply) {
        self.push(path, Scripted::Ready(reply));
    }

    /// Queues a reply for `path` that completes when the returned sender fires.
    pub fn gate(&self, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Scripted::Gated(rx));
        tx
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Reply> {
        self.calls.lock().unwrap().push(path.to_string());
        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        Box::pin(async move {
            match next {
                Some(Scripted::Ready(reply)) => reply,
                Some(Scripted::Gated(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Network("gate dropped".to_string()))),
                None => Err(TransportError::Status { status: 404 }),
            }
        })
    }
}

/// Yields to spawned worker tasks until `transport` has seen `count` calls.
pub async fn wait_for_calls(transport: &ScriptedTransport, count: usize) {
    for _ in 0..1_000 {
        if transport.call_count() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("expected {count} transport calls, saw {:?}", transport.calls());
}

pub fn dispatcher(transport: &Arc<ScriptedTransport>) -> Dispatcher {
    let transport: Arc<dyn Transport> = transport.clone();
    Dispatcher::new(Store::new("octocat"), transport)
}

pub fn repo_json(id: u64, full_name: &str) -> Value {
    let (owner, name) = full_name.split_once('/').unwrap_or(("owner", full_name));
    json!({
        "id": id,
        "node_id": format!("R_{id}"),
        "name": name,
        "full_name": full_name,
        "private": false,
        "owner": {
            "login": owner,
            "id": id * 10,
            "avatar_url": format!("https://avatars.example/{owner}.png"),
            "html_url": format!("https://example.com/{owner}"),
            "type": "User",
            "site_admin": false
        },
        "html_url": format!("https://example.com/{full_name}"),
        "description": null
    })
}

pub fn page(repos: &[(u64, &str)]) -> TransportResponse {
    TransportResponse::new(Value::Array(
        repos.iter().map(|(id, name)| repo_json(*id, name)).collect(),
    ))
}

pub fn next_link(since: u64) -> String {
    format!(
        "<https://api.github.com/repositories?since={since}>; rel=\"next\", \
         <https://api.github.com/repositories{{?since}}>; rel=\"first\""
    )
}

pub fn search_hits(repos: &[(u64, &str)]) -> TransportResponse {
    let items: Vec<Value> = repos.iter().map(|(id, name)| repo_json(*id, name)).collect();
    TransportResponse::new(json!({ "total_count": items.len(), "incomplete_results": false, "items": items }))
}

pub fn names(items: &[repolens::domain::RepositorySummary]) -> Vec<&str> {
    items.iter().map(|r| r.full_name.as_str()).collect()
}
