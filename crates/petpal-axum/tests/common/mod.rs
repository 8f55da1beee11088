//! Shared fakes and helpers for petpal-axum route tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use petpal_axum::{AxumContext, ContextDeps, CorsConfig, create_router};
use petpal_core::map::SeededJitter;
use petpal_core::ports::{
    FacilitySearchPort, GatewayError, GatewayResult, HealthAdvisorPort,
};
use petpal_core::{Coordinate, FacilityCandidate, PlaceReference, Settings};
use serde_json::Value;
use tower::ServiceExt;

/// Advisor answering every question with the same text.
pub struct CannedAdvisor(pub Option<String>);

#[async_trait]
impl HealthAdvisorPort for CannedAdvisor {
    async fn advise(&self, _pet_type: &str, _symptoms: &str) -> GatewayResult<Option<String>> {
        Ok(self.0.clone())
    }
}

/// Advisor that is always unreachable.
pub struct OfflineAdvisor;

#[async_trait]
impl HealthAdvisorPort for OfflineAdvisor {
    async fn advise(&self, _pet_type: &str, _symptoms: &str) -> GatewayResult<Option<String>> {
        Err(GatewayError::Network {
            message: "connection refused".to_string(),
        })
    }
}

/// Search port returning a fixed set of places and recording queries.
#[derive(Default)]
pub struct FixedSearch {
    pub titles: Vec<&'static str>,
    pub queries: Mutex<Vec<(Coordinate, String)>>,
}

impl FixedSearch {
    pub fn with_titles(titles: Vec<&'static str>) -> Self {
        Self {
            titles,
            queries: Mutex::default(),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .map(|(_, q)| q.clone())
            .collect()
    }

    pub fn centers(&self) -> Vec<Coordinate> {
        self.queries.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }
}

#[async_trait]
impl FacilitySearchPort for FixedSearch {
    async fn search(
        &self,
        center: Coordinate,
        query: &str,
    ) -> GatewayResult<Vec<FacilityCandidate>> {
        self.queries
            .lock()
            .unwrap()
            .push((center, query.to_string()));
        let mut candidates: Vec<FacilityCandidate> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                FacilityCandidate::with_place(PlaceReference {
                    title: (*title).to_string(),
                    uri: format!("https://maps.google.com/?cid={i}"),
                })
            })
            .collect();
        candidates.push(FacilityCandidate::unresolved());
        Ok(candidates)
    }
}

/// Router over the seeded registry with the given fakes.
pub fn test_app(
    advisor: Arc<dyn HealthAdvisorPort>,
    search: Arc<dyn FacilitySearchPort>,
) -> Router {
    let ctx = AxumContext::assemble(
        &Settings::with_defaults(),
        ContextDeps {
            advisor,
            search,
            jitter: Arc::new(SeededJitter::new(7, 0.015)),
        },
    )
    .unwrap();
    create_router(ctx, &CorsConfig::AllowAll)
}

/// Send a request and decode the JSON response body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}
