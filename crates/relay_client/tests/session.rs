use std::fs;

use pretty_assertions::assert_eq;
use relay_client::commands::{run, Commands};
use relay_client::{ApiClient, ClientSession};
use relay_engine::{RecordStore, SAVED_MARKER};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    server: MockServer,
    dir: TempDir,
}

impl Fixture {
    async fn new() -> Self {
        relay_logging::initialize_for_tests();
        Self {
            server: MockServer::start().await,
            dir: TempDir::new().unwrap(),
        }
    }

    fn records_path(&self) -> std::path::PathBuf {
        self.dir.path().join("saved.ron")
    }

    fn session(&self) -> ClientSession {
        let records = RecordStore::open(self.records_path()).unwrap();
        ClientSession::new(records, self.dir.path().join("out")).quiet()
    }

    fn api(&self) -> ApiClient {
        ApiClient::new(&self.server.uri()).unwrap()
    }
}

#[tokio::test]
async fn completed_download_saves_record_and_file() {
    let fx = Fixture::new().await;
    let frames = concat!(
        "{\"status\":\"progress\",\"size\":11,\"downloaded\":6,\"progress\":55}\n",
        "{\"status\":\"progress\",\"size\":11,\"downloaded\":11,\"progress\":100}\n",
        "{\"status\":\"completed\",\"content\":\"<p>hi</p>\\n\"}\n",
    );
    Mock::given(method("GET"))
        .and(path("/download"))
        .and(query_param("url", "https://example.com/a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(frames, "application/json"))
        .mount(&fx.server)
        .await;

    let mut session = fx.session();
    run(
        Commands::Download {
            url: "https://example.com/a".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;

    let view = session.view();
    assert_eq!(view.error, None);
    assert_eq!(view.download, None);

    assert_eq!(session.delivered().len(), 1);
    let delivered = &session.delivered()[0];
    let name = delivered.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("downloaded-") && name.ends_with(".html"), "{name}");
    assert_eq!(fs::read_to_string(delivered).unwrap(), "<p>hi</p>\n");

    let records = RecordStore::open(fx.records_path()).unwrap();
    assert_eq!(records.get("https://example.com/a"), Some(SAVED_MARKER));
}

#[tokio::test]
async fn error_frame_surfaces_message_and_saves_nothing() {
    let fx = Fixture::new().await;
    let frames = concat!(
        "{\"status\":\"progress\",\"size\":null,\"downloaded\":3,\"progress\":0}\n",
        "{\"status\":\"error\",\"error\":\"Failed to fetch content. Error: reset\"}\n",
    );
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(frames, "application/json"))
        .mount(&fx.server)
        .await;

    let mut session = fx.session();
    run(
        Commands::Download {
            url: "https://example.com/b".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;

    assert_eq!(
        session.view().error.as_deref(),
        Some("Failed to download content: Failed to fetch content. Error: reset")
    );
    assert!(session.delivered().is_empty());
    assert!(RecordStore::open(fx.records_path()).unwrap().is_empty());
}

#[tokio::test]
async fn server_500_is_reported_as_http_error() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(
            "{\"error\":\"Failed to fetch content. Status code: 404\"}",
            "application/json",
        ))
        .mount(&fx.server)
        .await;

    let mut session = fx.session();
    run(
        Commands::Download {
            url: "https://example.com/c".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;

    assert_eq!(
        session.view().error.as_deref(),
        Some("Failed to download content: HTTP error! Status: 500")
    );
}

#[tokio::test]
async fn stream_without_terminal_frame_is_a_failure() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "{\"status\":\"progress\",\"size\":10,\"downloaded\":5,\"progress\":50}\n{\"status\":\"comp",
            "application/json",
        ))
        .mount(&fx.server)
        .await;

    let mut session = fx.session();
    run(
        Commands::Download {
            url: "https://example.com/d".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;

    assert_eq!(
        session.view().error.as_deref(),
        Some("Failed to download content: stream ended before completion")
    );
    assert!(session.delivered().is_empty());
}

#[tokio::test]
async fn urls_lookup_handles_found_and_missing_keywords() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/urls"))
        .and(query_param("keyword", "rust"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[\"https://a.example\",\"https://b.example\"]", "application/json"),
        )
        .mount(&fx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/urls"))
        .and(query_param("keyword", "cobol"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "{\"error\":\"Keyword not found\"}",
            "application/json",
        ))
        .mount(&fx.server)
        .await;

    let mut session = fx.session();
    run(
        Commands::Urls {
            keyword: "rust".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;
    assert_eq!(
        session.view().urls,
        vec!["https://a.example", "https://b.example"]
    );

    run(
        Commands::Urls {
            keyword: "cobol".to_string(),
        },
        &fx.api(),
        &mut session,
    )
    .await;
    assert_eq!(session.view().error.as_deref(), Some("Keyword not found"));
}

#[tokio::test]
async fn keywords_and_saved_listing() {
    let fx = Fixture::new().await;
    Mock::given(method("GET"))
        .and(path("/keywords"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[\"rust\",\"http\"]", "application/json"))
        .mount(&fx.server)
        .await;

    {
        let mut records = RecordStore::open(fx.records_path()).unwrap();
        records.mark_saved("https://saved.example").unwrap();
    }

    let mut session = fx.session();
    run(Commands::Keywords, &fx.api(), &mut session).await;
    assert_eq!(session.view().keywords, vec!["rust", "http"]);

    run(Commands::Saved, &fx.api(), &mut session).await;
    assert_eq!(session.view().saved, vec!["https://saved.example"]);
}
