use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use clones_core::{ErrorKind, PluginError};
use clones_github::{GitHubApi, GitHubSettings, SnapshotSource};

const OWNER: &str = "Green-Software-Foundation";
const REPO: &str = "if";

#[derive(Clone, Debug)]
struct Recorded {
    path: String,
    authorization: Option<String>,
}

/// Serves canned JSON bodies keyed by request path, one request per connection.
struct FakeGitHub {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeGitHub {
    async fn start(routes: Vec<(&str, u16, &str)>) -> Self {
        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_owned(), (status, body.to_owned())))
            .collect();
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                let recorded = recorded.clone();

                tokio::spawn(async move {
                    let mut buffer = Vec::new();
                    let mut chunk = [0_u8; 1024];
                    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
                        match stream.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(read) => buffer.extend_from_slice(&chunk[..read]),
                        }
                    }

                    let head = String::from_utf8_lossy(&buffer).to_string();
                    let path = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_owned();
                    let authorization = head
                        .lines()
                        .find(|line| line.to_ascii_lowercase().starts_with("authorization:"))
                        .map(|line| line["authorization:".len()..].trim().to_owned());
                    recorded.lock().unwrap().push(Recorded {
                        path: path.clone(),
                        authorization,
                    });

                    let (status, body) = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or((404, r#"{"message":"Not Found"}"#.to_owned()));
                    let reason = match status {
                        200 => "OK",
                        401 => "Unauthorized",
                        404 => "Not Found",
                        500 => "Internal Server Error",
                        _ => "Unknown",
                    };
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason,
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    fn api(&self, token: Option<&str>) -> GitHubApi {
        let settings = GitHubSettings {
            token: token.map(str::to_owned),
            ..GitHubSettings::default()
        }
        .base_url(format!("http://{}/", self.addr))
        .request_timeout(Duration::from_secs(5));

        GitHubApi::new(settings).unwrap()
    }

    fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.path.clone())
            .collect()
    }
}

fn happy_routes() -> Vec<(&'static str, u16, &'static str)> {
    vec![
        ("/user", 200, r#"{"login":"octocat"}"#),
        ("/users/Green-Software-Foundation", 200, r#"{"login":"Green-Software-Foundation"}"#),
        (
            "/repos/Green-Software-Foundation/if/traffic/clones",
            200,
            r#"{"count":19,"uniques":5,"clones":[
                {"timestamp":"2024-07-05T00:00:00Z","count":12,"uniques":3},
                {"timestamp":"2024-07-06T00:00:00Z","count":7,"uniques":2}
            ]}"#,
        ),
        ("/repos/Green-Software-Foundation/if", 200, r#"{"size":120,"name":"if"}"#),
    ]
}

#[tokio::test]
async fn fetches_clones_and_size_in_order() {
    let server = FakeGitHub::start(happy_routes()).await;
    let api = server.api(Some("mock-token"));

    let snapshot = api.get_repo_clones_and_size(OWNER, REPO).await.unwrap();

    assert_eq!(snapshot.clones.len(), 2);
    assert_eq!(snapshot.clones[0].count, 12);
    assert_eq!(snapshot.clones[1].timestamp, "2024-07-06T00:00:00Z");
    assert!((snapshot.size - 120.0 / 1_000_000.0).abs() < f64::EPSILON);

    assert_eq!(
        server.paths(),
        vec![
            "/user",
            "/users/Green-Software-Foundation",
            "/repos/Green-Software-Foundation/if/traffic/clones",
            "/repos/Green-Software-Foundation/if",
        ]
    );
    let requests = server.requests.lock().unwrap().clone();
    assert!(
        requests
            .iter()
            .all(|request| request.authorization.as_deref() == Some("token mock-token"))
    );
}

#[tokio::test]
async fn missing_token_sends_no_request() {
    let server = FakeGitHub::start(happy_routes()).await;
    let source = SnapshotSource::github(server.api(None));

    let error = source.fetch(OWNER, REPO).await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AuthorizationMissing);
    assert_eq!(error.host_name(), "AuthorizationError");
    assert!(server.paths().is_empty());
}

#[tokio::test]
async fn rejected_token_is_authorization_invalid_and_not_echoed() {
    let mut routes = happy_routes();
    routes[0] = ("/user", 401, r#"{"message":"Bad credentials"}"#);
    let server = FakeGitHub::start(routes).await;

    let error = server
        .api(Some("leaky-token"))
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AuthorizationInvalid);
    assert_eq!(
        error.message(),
        "Provided token is invalid. Error fetching data from GitHub API. Status: 401, Message: Unauthorized"
    );
    assert!(!error.message().contains("leaky-token"));
    assert_eq!(server.paths(), vec!["/user"]);
}

#[tokio::test]
async fn unknown_owner_is_owner_not_found() {
    let routes = happy_routes()
        .into_iter()
        .filter(|(path, _, _)| !path.starts_with("/users/"))
        .collect();
    let server = FakeGitHub::start(routes).await;

    let error = server
        .api(Some("mock-token"))
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::OwnerNotFound);
    assert!(error.message().starts_with("Owner: Green-Software-Foundation was not found"));
    assert_eq!(server.paths().len(), 2);
}

#[tokio::test]
async fn owner_lookup_server_error_is_api_request_failed() {
    let mut routes = happy_routes();
    routes[1] = ("/users/Green-Software-Foundation", 500, "{}");
    let server = FakeGitHub::start(routes).await;

    let error = server
        .api(Some("mock-token"))
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(
        error,
        PluginError::ApiRequestFailed(
            "Error fetching owner: Green-Software-Foundation from GitHub API. Error fetching data from GitHub API. Status: 500, Message: Internal Server Error".to_owned()
        )
    );
}

#[tokio::test]
async fn clone_failure_names_owner_and_repo() {
    let mut routes = happy_routes();
    routes[2] = ("/repos/Green-Software-Foundation/if/traffic/clones", 500, "{}");
    let server = FakeGitHub::start(routes).await;

    let error = server
        .api(Some("mock-token"))
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiRequestFailed);
    assert!(error.message().starts_with(
        "Error fetching clones from GitHub API for owner: Green-Software-Foundation and repo: if."
    ));
    assert!(error.message().contains("Status: 500"));
    // size is never requested once clones fail
    assert_eq!(server.paths().len(), 3);
}

#[tokio::test]
async fn malformed_size_body_is_api_request_failed() {
    let mut routes = happy_routes();
    routes[3] = ("/repos/Green-Software-Foundation/if", 200, r#"{"name":"if"}"#);
    let server = FakeGitHub::start(routes).await;

    let error = server
        .api(Some("mock-token"))
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::ApiRequestFailed);
    assert!(error.message().starts_with(
        "Error fetching size from GitHub API for owner: Green-Software-Foundation and repo: if. Request error:"
    ));
}

#[tokio::test]
async fn unreachable_api_reports_no_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = GitHubSettings::with_token("mock-token")
        .base_url(format!("http://{}/", addr))
        .request_timeout(Duration::from_secs(5));
    let error = GitHubApi::new(settings)
        .unwrap()
        .get_repo_clones_and_size(OWNER, REPO)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::AuthorizationInvalid);
    assert!(
        error
            .message()
            .contains("No response received from GitHub API.")
    );
}
