#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo};
use axum_test::TestServer;
use chrono::Utc;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

use shorturl::application::services::LinkService;
use shorturl::domain::entities::{NewShortLink, ShortLink};
use shorturl::domain::notification::Notification;
use shorturl::domain::repositories::ShortLinkRepository;
use shorturl::error::AppError;
use shorturl::routes::app_router;
use shorturl::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

/// Repository double keeping links in memory.
#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    links: Mutex<HashMap<String, ShortLink>>,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, short_code: &str, original_url: &str) {
        let mut links = self.links.lock().unwrap();
        let id = links.len() as i64 + 1;
        links.insert(
            short_code.to_string(),
            ShortLink {
                id,
                original_url: original_url.to_string(),
                short_code: short_code.to_string(),
                creator_ip: String::new(),
                creator_user_agent: String::new(),
                hits: 0,
                created_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, short_code: &str) -> Option<ShortLink> {
        self.links.lock().unwrap().get(short_code).cloned()
    }

    pub fn all(&self) -> Vec<ShortLink> {
        self.links.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Short code already exists",
                serde_json::json!({ "short_code": new_link.short_code }),
            ));
        }

        let link = ShortLink {
            id: links.len() as i64 + 1,
            original_url: new_link.original_url,
            short_code: new_link.short_code.clone(),
            creator_ip: new_link.creator_ip,
            creator_user_agent: new_link.creator_user_agent,
            hits: 0,
            created_at: Utc::now(),
        };
        links.insert(new_link.short_code, link.clone());
        Ok(link)
    }

    async fn find_original_url(&self, short_code: &str) -> Result<Option<String>, AppError> {
        Ok(self.get(short_code).map(|l| l.original_url))
    }

    async fn increment_hits(&self, short_code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(short_code) {
            Some(link) => {
                link.hits += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.get(short_code))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<ShortLink>, AppError> {
        let mut links = self.all();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }

    async fn total_hits(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().values().map(|l| l.hits).sum())
    }
}

/// Repository double whose every call fails as if the database were down.
pub struct FailingRepository;

fn unavailable() -> AppError {
    AppError::unavailable("Database unavailable", serde_json::json!({}))
}

#[async_trait]
impl ShortLinkRepository for FailingRepository {
    async fn insert(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Err(unavailable())
    }

    async fn find_original_url(&self, _short_code: &str) -> Result<Option<String>, AppError> {
        Err(unavailable())
    }

    async fn increment_hits(&self, _short_code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _short_code: &str) -> Result<Option<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn list(&self, _limit: i64, _offset: i64) -> Result<Vec<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn total_hits(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

pub fn create_test_state(
    repository: Arc<dyn ShortLinkRepository>,
    behind_proxy: bool,
) -> (AppState, mpsc::Receiver<Notification>) {
    let (tx, rx) = mpsc::channel(100);

    let link_service = Arc::new(LinkService::new(
        repository,
        BASE_URL,
        Duration::from_secs(5),
    ));

    let state = AppState::new(link_service, tx, behind_proxy, Some("ams".to_string()));

    (state, rx)
}

pub fn test_app(state: AppState) -> TestServer {
    let app: Router = app_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

/// Waits until `check` holds, polling for up to one second.
pub async fn eventually(check: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
