// Boots the mesh server once per integration test binary and hands out its URLs.
use std::{
    // `Arc` lets the server thread and the test thread share the URL slot.
    sync::{Arc, OnceLock},
    // Poll intervals for the startup handshake.
    time::Duration,
};

// Base URL every test in this binary talks to, set after the port is bound.
static SERVER_URL: OnceLock<String> = OnceLock::new();
// Guards the bootstrap so parallel tests share one server.
static SERVER_READY: OnceLock<()> = OnceLock::new();

// Start the mesh server on first use and return its `http://` base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        // Slot the server thread fills once the OS has picked a port.
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // A dedicated OS thread keeps the server (and its simulation loop) alive
        // after the `#[tokio::test]` runtime that triggered startup has finished.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Port 0 lets the OS choose, so a local dev server on 3010 is untouched.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{}", addr));
                // Serves with env defaults: demo seed on, MESH_ONLY start mode.
                mesh_server::run(listener).await.expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

// WebSocket URL of the mesh update stream on the shared server.
pub fn ws_url() -> String {
    let base_url = ensure_server();
    // Same host and port, `ws://` scheme.
    format!(
        "ws://{}/ws",
        base_url
            .strip_prefix("http://")
            .expect("base url should use http://")
    )
}

// Block until the server thread publishes its URL and the socket accepts connections.
fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        // Short sleep instead of spinning while the runtime starts.
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    // Raw TCP probing needs host:port without the scheme.
    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    // Up to ~2 s for the listener to start accepting.
    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
