pub mod catalog;
pub mod mock;
pub mod telemetry;

use catalog::{Catalog, Config};
use payloads::APIClient;
use reqwest::StatusCode;
use std::net::TcpListener;
use std::rc::Rc;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    pub port: u16,
    pub client: APIClient,
    /// Data served by the stub; changes are visible to the next request.
    pub catalog: Catalog,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A separate client for the same server, shareable with loaders.
    pub fn shared_client(&self) -> Rc<APIClient> {
        Rc::new(
            APIClient::new(self.address()).expect("Failed to build client"),
        )
    }
}

pub async fn spawn_app_on_port(port: u16, catalog: Catalog) -> TestApp {
    let subscriber = telemetry::test_subscriber("error,test_helpers=info");
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
    };

    let server = catalog::build(&mut config, catalog.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: APIClient::new(format!("http://127.0.0.1:{}", config.port))
            .unwrap(),
        catalog,
    }
}

/// Use OS-assigned port for parallel testing. The catalog starts empty.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0, Catalog::default()).await
}

/// Like [`spawn_app`], with the sample records from [`mock::seed`].
pub async fn spawn_seeded_app() -> TestApp {
    let catalog = Catalog::default();
    mock::seed(&catalog);
    spawn_app_on_port(0, catalog).await
}

/// A client pointed at a port nothing listens on, so every request fails
/// at the transport level.
pub fn unreachable_client() -> Rc<APIClient> {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to reserve a port");
    Rc::new(
        APIClient::new(format!("http://127.0.0.1:{port}"))
            .expect("Failed to build client"),
    )
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
