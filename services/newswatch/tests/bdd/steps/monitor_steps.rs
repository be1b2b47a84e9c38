//! BDD step definitions for the change detection loop

use std::sync::Arc;

use cucumber::{given, then, when};

use newswatch::config::{Config, TargetConfig, TelegramConfig};
use newswatch::detector::fingerprint;
use newswatch::io::HttpClient;
use newswatch::build_monitor;

use crate::world::{NewswatchWorld, PageReply, TEST_API_BASE, TEST_PAGE_URL, TEST_TOKEN};

fn news_page(text: &str) -> String {
    format!(
        r#"<html><body><nav>Home</nav><div class="news-content"><p>{}</p></div></body></html>"#,
        text
    )
}

#[given(expr = "a monitor watching a page for chat {string}")]
fn monitor_for_chat(world: &mut NewswatchWorld, chat_id: String) {
    let config = Config {
        target: TargetConfig {
            url: TEST_PAGE_URL.to_string(),
            ..TargetConfig::default()
        },
        telegram: TelegramConfig {
            bot_token: TEST_TOKEN.to_string(),
            chat_ids: vec![chat_id.clone()],
            api_base_url: TEST_API_BASE.to_string(),
        },
    };
    let http: Arc<dyn HttpClient> = world.http.clone();
    let monitor = build_monitor(&config, http).expect("valid config");
    world.chat_ids = vec![chat_id];
    world.monitor = Some(monitor);
}

#[given(expr = "the page shows {string}")]
async fn page_shows(world: &mut NewswatchWorld, text: String) {
    world.http.push_reply(PageReply::Html(news_page(&text))).await;
}

#[given("the page is unreachable")]
async fn page_unreachable(world: &mut NewswatchWorld) {
    world.http.push_reply(PageReply::Unreachable).await;
}

#[given(expr = "the page responds with status {int}")]
async fn page_status(world: &mut NewswatchWorld, status: u16) {
    world.http.push_reply(PageReply::Status(status)).await;
}

#[given("the page has no news section")]
async fn page_without_section(world: &mut NewswatchWorld) {
    world
        .http
        .push_reply(PageReply::Html(
            "<html><body><div class=\"other\">Hello</div></body></html>".to_string(),
        ))
        .await;
}

#[when("a check cycle runs")]
async fn one_cycle(world: &mut NewswatchWorld) {
    let monitor = world.monitor.as_mut().expect("monitor not set");
    world.last_event = monitor.check_for_updates().await;
}

#[when(expr = "{int} check cycles run")]
async fn several_cycles(world: &mut NewswatchWorld, cycles: usize) {
    let monitor = world.monitor.as_mut().expect("monitor not set");
    for _ in 0..cycles {
        world.last_event = monitor.check_for_updates().await;
    }
}

#[when("the monitor announces its start")]
async fn announce(world: &mut NewswatchWorld) {
    let monitor = world.monitor.as_ref().expect("monitor not set");
    world.last_event = Some(monitor.announce_start().await);
}

#[then(expr = "the event should contain {string}")]
fn event_contains(world: &mut NewswatchWorld, expected: String) {
    let event = world.last_event.as_ref().expect("no event emitted");
    assert!(
        event.message().contains(&expected),
        "event '{}' does not contain '{}'",
        event,
        expected
    );
}

#[then("no event should have been emitted")]
fn no_event(world: &mut NewswatchWorld) {
    assert!(
        world.last_event.is_none(),
        "unexpected event: {:?}",
        world.last_event
    );
}

#[then(expr = "{int} message(s) containing {string} should have been sent")]
async fn messages_containing(world: &mut NewswatchWorld, count: usize, needle: String) {
    let texts = world.http.sent_texts().await;
    let matching = texts.iter().filter(|t| t.contains(&needle)).count();
    assert_eq!(matching, count, "sent messages: {:?}", texts);
}

#[then(expr = "no message containing {string} should have been sent")]
async fn no_message_containing(world: &mut NewswatchWorld, needle: String) {
    let texts = world.http.sent_texts().await;
    assert!(
        texts.iter().all(|t| !t.contains(&needle)),
        "sent messages: {:?}",
        texts
    );
}

#[then(expr = "{int} message(s) should have been sent in total")]
async fn messages_total(world: &mut NewswatchWorld, count: usize) {
    let texts = world.http.sent_texts().await;
    assert_eq!(texts.len(), count, "sent messages: {:?}", texts);
}

#[then("every event message should carry a timestamp")]
async fn events_are_stamped(world: &mut NewswatchWorld) {
    let texts = world.http.sent_texts().await;
    let events: Vec<&String> = texts
        .iter()
        .filter(|t| !t.starts_with("Error fetching the page"))
        .collect();
    assert!(!events.is_empty());
    for text in events {
        assert!(text.starts_with('['), "{}", text);
        assert_eq!(&text[20..22], "] ", "{}", text);
    }
}

#[then(expr = "the stored fingerprint should be the fingerprint of {string}")]
fn stored_fingerprint(world: &mut NewswatchWorld, text: String) {
    let monitor = world.monitor.as_ref().expect("monitor not set");
    assert_eq!(monitor.state().last_fingerprint(), Some(&fingerprint(&text)));
}

#[then("no fingerprint should be stored")]
fn no_fingerprint(world: &mut NewswatchWorld) {
    let monitor = world.monitor.as_ref().expect("monitor not set");
    assert!(monitor.state().last_fingerprint().is_none());
}
