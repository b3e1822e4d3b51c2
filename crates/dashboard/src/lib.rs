//! HTTP surface: the dashboard page and the `/data` JSON feed.

use axum::{extract::State, http::StatusCode, response::Html, routing::get, Json, Router};
use pulse_core::{DataResponse, PulseError};
use pulse_system::SnapshotBuilder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<SnapshotBuilder>,
}

impl AppState {
    pub fn new(builder: Arc<SnapshotBuilder>) -> Self {
        Self { builder }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/data", get(data))
        .route("/health", get(|| async { "ok" }))
        .with_state(app_state)
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app_state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(app_state))
        .with_graceful_shutdown(shutdown)
        .await
}

// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// GET /data (fresh sample on every call)
async fn data(
    State(app): State<AppState>,
) -> Result<Json<DataResponse>, (StatusCode, Json<serde_json::Value>)> {
    debug!("GET /data");
    app.builder.build_response().await.map(Json).map_err(internal_error)
}

fn internal_error(err: PulseError) -> (StatusCode, Json<serde_json::Value>) {
    error!("Failed to build /data response: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pulse_core::{
        HostIdentity, HostSnapshot, HostStatus, LoadAverage, MemoryUsage, NetworkTotals,
        ProcessEntry, Result, SwapUsage, Temperature, Uptime,
    };
    use pulse_system::{Sampler, HISTORY_CAPACITY};
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Fixed readings; fails while `broken` is set.
    #[derive(Default)]
    struct StubSampler {
        broken: AtomicBool,
    }

    impl Sampler for StubSampler {
        fn sample(&self) -> Result<HostSnapshot> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(PulseError::System("statvfs: I/O error".into()));
            }
            Ok(HostSnapshot {
                identity: HostIdentity {
                    hostname: "stub".into(),
                    ip:       None,
                    os:       "Linux 6.8.0".into(),
                },
                status:      HostStatus::Online,
                uptime:      Uptime(59),
                temperature: Temperature::Celsius(48.0),
                load_avg:    LoadAverage::default(),
                memory:      MemoryUsage { total: 4 << 30, used: 1 << 30, available: 3 << 30 },
                swap:        SwapUsage::default(),
                disks:       IndexMap::new(),
                network:     NetworkTotals::default(),
                cpu_count:   2,
                cpu_percent: 3.0,
                processes:   (0..15)
                    .map(|pid| ProcessEntry {
                        pid,
                        name:           format!("worker-{pid}"),
                        username:       None,
                        cpu_percent:    pid as f32,
                        memory_percent: 1.0,
                        status:         "running".into(),
                    })
                    .collect(),
            })
        }
    }

    async fn spawn_server(sampler: Arc<StubSampler>) -> (SocketAddr, Arc<SnapshotBuilder>) {
        let builder = Arc::new(SnapshotBuilder::new(sampler));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::new(Arc::clone(&builder));
        tokio::spawn(serve(listener, state, std::future::pending()));
        (addr, builder)
    }

    #[tokio::test]
    async fn data_grows_history_on_every_call() {
        let (addr, _) = spawn_server(Arc::new(StubSampler::default())).await;
        let url = format!("http://{addr}/data");

        for expected in 1..=3usize {
            let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
            let server = &body["servers"][0];
            assert_eq!(body["labels"].as_array().unwrap().len(), expected);
            assert_eq!(server["ram"].as_array().unwrap().len(), expected);
            assert_eq!(server["ram"][0], 1.0);
            assert_eq!(server["ram_free"], 3.0);
            assert_eq!(server["ram_total"], 4.0);
            assert_eq!(server["temperature"], 48.0);
            assert_eq!(server["uptime"], "0:00:59");
        }
    }

    #[tokio::test]
    async fn data_lists_top_ten_processes() {
        let (addr, _) = spawn_server(Arc::new(StubSampler::default())).await;
        let body: serde_json::Value = reqwest::get(format!("http://{addr}/data"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let procs = body["processes"].as_array().unwrap();
        assert_eq!(procs.len(), 10);
        assert_eq!(procs[0]["pid"], 14);
        assert_eq!(procs[9]["pid"], 5);
        assert!(procs[0]["username"].is_null());
    }

    #[tokio::test]
    async fn failed_sample_is_500_and_leaves_history_alone() {
        let sampler = Arc::new(StubSampler::default());
        let (addr, builder) = spawn_server(Arc::clone(&sampler)).await;
        let url = format!("http://{addr}/data");

        reqwest::get(&url).await.unwrap().error_for_status().unwrap();
        sampler.broken.store(true, Ordering::SeqCst);

        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("statvfs"));
        assert_eq!(builder.history().len(), 1);
    }

    #[tokio::test]
    async fn history_caps_at_capacity_over_http() {
        let (addr, _) = spawn_server(Arc::new(StubSampler::default())).await;
        let url = format!("http://{addr}/data");

        let mut body = serde_json::Value::Null;
        for _ in 0..HISTORY_CAPACITY + 3 {
            body = reqwest::get(&url).await.unwrap().json().await.unwrap();
        }
        assert_eq!(body["labels"].as_array().unwrap().len(), HISTORY_CAPACITY);
        assert_eq!(body["servers"][0]["cpu"].as_array().unwrap().len(), HISTORY_CAPACITY);
    }

    #[tokio::test]
    async fn index_and_health() {
        let (addr, builder) = spawn_server(Arc::new(StubSampler::default())).await;

        let page = reqwest::get(format!("http://{addr}/")).await.unwrap().text().await.unwrap();
        assert!(page.contains("fetch('/data')"));
        assert!(page.contains("disk.device"));
        assert!(page.contains("server.ram_total"));

        let health = reqwest::get(format!("http://{addr}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(health, "ok");

        // Neither route samples the host.
        assert!(builder.history().is_empty());
    }
}
