//! Local stand-in for remote services, used by adapter tests.

use std::net::SocketAddr;

/// Serve `router` on an ephemeral localhost port from a dedicated thread and
/// return its base URL (`http://127.0.0.1:PORT`).
pub(crate) fn serve(router: axum::Router) -> String {
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("stub runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind stub listener");
            tx.send(listener.local_addr().expect("local addr"))
                .expect("report stub address");
            axum::serve(listener, router).await.expect("stub server");
        });
    });

    let addr = rx.recv().expect("stub server address");
    format!("http://{addr}")
}
