use std::fs;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use eventlink::server::web::{router, serve_on};

#[tokio::test]
async fn serves_assets_and_falls_back_to_index() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<html>eventlink</html>").unwrap();
    fs::create_dir_all(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets/app.js"), "console.log('hi')").unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(serve_on(listener, router(dir.path()), async move {
        let _ = stopped.await;
    }));

    let asset = reqwest::get(format!("{}/assets/app.js", base)).await.unwrap();
    assert_eq!(asset.status(), 200);
    assert_eq!(asset.text().await.unwrap(), "console.log('hi')");

    // client-side route
    let page = reqwest::get(format!("{}/GroupDetailsPage?id=1", base)).await.unwrap();
    assert!(page.status().is_success());
    assert_eq!(page.text().await.unwrap(), "<html>eventlink</html>");

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
