use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use shortlist::catalog::{AssessmentRecord, MockCatalogStore};
use shortlist::gateway::{AppState, create_router_with_state};
use shortlist::recommend::Recommender;
use shortlist::rerank::{RerankerConfig, ScriptedModel, ScriptedReply};

pub struct TestServerConfig {
    pub catalog: Vec<AssessmentRecord>,
    pub store_failure: Option<String>,
    pub reply: ScriptedReply,
    pub rerank_timeout: Duration,
    pub enforce_balance: bool,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            catalog: super::fixtures::mixed_catalog(25),
            store_failure: None,
            reply: ScriptedReply::Text("[0, 1, 2, 3, 4]".to_string()),
            rerank_timeout: Duration::from_secs(5),
            enforce_balance: false,
        }
    }
}

impl TestServerConfig {
    pub fn with_reply(mut self, reply: ScriptedReply) -> Self {
        self.reply = reply;
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<AssessmentRecord>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_store_failure(mut self, message: &str) -> Self {
        self.store_failure = Some(message.to_string());
        self
    }

    pub fn with_rerank_timeout(mut self, timeout: Duration) -> Self {
        self.rerank_timeout = timeout;
        self
    }
}

pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

/// Serves the real router on an ephemeral port with mock collaborators.
pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let store = match config.store_failure {
        Some(message) => MockCatalogStore::failing(message),
        None => MockCatalogStore::from_records(&config.catalog),
    };
    let model = ScriptedModel::new(config.reply);
    let reranker_config = RerankerConfig::new("scripted")
        .with_timeout(config.rerank_timeout)
        .with_enforce_balance(config.enforce_balance);

    let recommender = Recommender::new(store, model, reranker_config)?;
    let app = create_router_with_state(AppState::new(recommender));

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(TestServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        handle,
    })
}
