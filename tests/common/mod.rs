//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use config_store::config::ServiceConfig;
use config_store::http::HttpServer;
use config_store::lifecycle::Shutdown;
use sdk_rust::ConfigStoreClient;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server backed by a private data directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: ConfigStoreClient,
    pub shutdown: Shutdown,
    data_dir: TempDir,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral port with filesystem storage.
pub async fn start_server() -> TestServer {
    let data_dir = tempfile::tempdir().unwrap();

    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.storage.data_dir = data_dir.path().to_path_buf();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        client: ConfigStoreClient::new(&format!("http://{}", addr)),
        shutdown,
        data_dir,
    }
}
