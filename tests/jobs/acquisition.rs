use chrono::{Datelike, Utc};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sqldaily::acquisition::{acquire_tip, fallback_tip, save_tip};

use crate::helpers::{scrape_client, source};

#[tokio::test]
async fn the_first_source_with_a_tip_wins() {
    let server = MockServer::start().await;

    Mock::given(path("/first"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><article><h2>Tip from the first source</h2></article></body></html>",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/second"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><article><h2>Tip from the second source</h2></article></body></html>",
        ))
        .expect(0)
        .named("Second source, never consulted")
        .mount(&server)
        .await;

    let sources = [
        source("First", format!("{}/first", server.uri()), "article h2"),
        source("Second", format!("{}/second", server.uri()), "article h2"),
    ];

    let tip = acquire_tip(&scrape_client(), &sources).await;

    assert_eq!(tip, "Tip from the first source");
}

#[tokio::test]
async fn a_failing_source_falls_through_to_the_next() {
    let server = MockServer::start().await;

    Mock::given(path("/first"))
        .and(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/second"))
        .and(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<div class='tip-title'>Tip from the second source</div>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sources = [
        source("First", format!("{}/first", server.uri()), "article h2"),
        source("Second", format!("{}/second", server.uri()), ".tip-title"),
    ];

    let tip = acquire_tip(&scrape_client(), &sources).await;

    assert_eq!(tip, "Tip from the second source");
}

#[tokio::test]
async fn a_page_without_the_expected_element_falls_through_to_the_next() {
    let server = MockServer::start().await;

    Mock::given(path("/first"))
        .and(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Nothing to see here</p></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/second"))
        .and(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<article><h2>Tip from the second source</h2></article>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sources = [
        source("First", format!("{}/first", server.uri()), "article h2"),
        source("Second", format!("{}/second", server.uri()), "article h2"),
    ];

    let tip = acquire_tip(&scrape_client(), &sources).await;

    assert_eq!(tip, "Tip from the second source");
}

#[tokio::test]
async fn an_unreachable_source_falls_through_to_the_next() {
    let dead_server = MockServer::start().await;
    let dead_uri = dead_server.uri();
    drop(dead_server);

    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<article><h2>Tip from the live source</h2></article>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sources = [
        source("Dead", dead_uri, "article h2"),
        source("Live", server.uri(), "article h2"),
    ];

    let tip = acquire_tip(&scrape_client(), &sources).await;

    assert_eq!(tip, "Tip from the live source");
}

#[tokio::test]
async fn when_every_source_fails_the_rotation_serves_the_tip_of_the_day() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let sources = [
        source("First", format!("{}/first", server.uri()), "article h2"),
        source("Second", format!("{}/second", server.uri()), ".tip-title"),
    ];

    let tip = acquire_tip(&scrape_client(), &sources).await;

    assert_eq!(tip, fallback_tip(Utc::now().ordinal()));
}

#[tokio::test]
async fn rerunning_on_the_same_day_writes_the_same_tip_file() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sources = [source("Only", server.uri(), "article h2")];
    let dir = tempfile::tempdir().unwrap();
    let tip_path = dir.path().join("content").join("daily_tip.txt");

    let client = scrape_client();
    let first_run = acquire_tip(&client, &sources).await;
    save_tip(&first_run, &tip_path).unwrap();
    let second_run = acquire_tip(&client, &sources).await;
    save_tip(&second_run, &tip_path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&tip_path).unwrap(),
        fallback_tip(Utc::now().ordinal())
    );
}
