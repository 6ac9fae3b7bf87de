use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use imgprobe::{CrawlError, CrawlSummary, Crawler, Notifier, NotifyError, Reporter};
use imgprobe_fetch::effects::mock::MockClient;
use imgprobe_fetch::{FetchPhase, ProbeOptions, Prober};
use imgprobe_fs::Store;
use imgprobe_source::{ListSource, Source};
use tempfile::TempDir;

const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

type Log = Arc<Mutex<Vec<String>>>;

#[derive(Default, Clone)]
struct Recorder(Log);

impl Recorder {
    fn events(&self) -> Vec<String> { self.0.lock().unwrap().clone() }
}

impl Reporter for Recorder {
    fn attempt(&mut self, identifier: &str) {
        self.0.lock().unwrap().push(format!("attempt {identifier}"));
    }

    fn hit(&mut self, identifier: &str, hits: u64) {
        self.0.lock().unwrap().push(format!("hit {identifier} {hits}"));
    }

    fn miss(&mut self, identifier: &str, hits: u64) {
        self.0.lock().unwrap().push(format!("miss {identifier} {hits}"));
    }

    fn finish(&mut self, summary: Option<&CrawlSummary>) {
        let tag = if summary.is_some() { "finish" } else { "abort" };
        self.0.lock().unwrap().push(tag.to_owned());
    }
}

#[derive(Default, Clone)]
struct Notifications {
    log:  Log,
    fail: bool,
}

impl Notifier for Notifications {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.log.lock().unwrap().push(format!("{title}: {body}"));
        if self.fail {
            return Err(NotifyError::Other("no notification daemon".into()));
        }
        Ok(())
    }
}

/// A list source that remembers whether it was released.
struct Tracked {
    inner:    ListSource,
    released: Arc<AtomicBool>,
}

impl Tracked {
    fn new(ids: &[&str]) -> (Self, Arc<AtomicBool>) {
        let released = Arc::new(AtomicBool::new(false));
        let source = Self {
            inner:    ListSource::new(ids.iter().copied()),
            released: released.clone(),
        };
        (source, released)
    }
}

impl Source for Tracked {
    fn has_more(&mut self) -> bool { self.inner.has_more() }

    fn take_next(&mut self) -> Option<String> { self.inner.take_next() }

    fn release(&mut self) {
        self.inner.release();
        self.released.store(true, Ordering::SeqCst);
    }
}

fn crawler(client: MockClient, root: &std::path::Path) -> Crawler<MockClient> {
    let prober =
        Prober::new(client).with_options(ProbeOptions::default().base_url("https://img.test/"));
    Crawler::new(prober, Store::new(root))
}

#[tokio::test]
async fn hit_and_removed_identifier() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("build/images");
    let client = MockClient::new()
        .serve("/realImage1.png", PNG)
        .redirect("/removedImage.png", "/removed.png", b"<html>".as_slice());
    let reporter = Recorder::default();
    let notifier = Notifications::default();

    let mut crawler = crawler(client, &out)
        .with_reporter(reporter.clone())
        .with_notifier(notifier.clone());
    let (mut source, released) = Tracked::new(&["realImage1", "removedImage"]);

    let summary = crawler.run(&mut source).await.unwrap();

    assert_eq!(summary, CrawlSummary {
        attempts:    2,
        hits:        1,
        misses:      1,
        interrupted: false,
    });
    assert_eq!(std::fs::read(out.join("realImage1.png")).unwrap(), PNG);
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    assert_eq!(reporter.events(), [
        "attempt realImage1",
        "hit realImage1 1",
        "attempt removedImage",
        "miss removedImage 1",
        "finish",
    ]);
    assert_eq!(*notifier.log.lock().unwrap(), ["New image found: realImage1"]);
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn saved_extension_follows_content() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new().serve("/photo.png", JPEG);
    let mut crawler = crawler(client, dir.path());
    let mut source = ListSource::new(["photo"]);

    crawler.run(&mut source).await.unwrap();

    assert!(dir.path().join("photo.jpg").is_file());
    assert!(!dir.path().join("photo.png").exists());
}

#[tokio::test]
async fn unrecognized_content_stops_the_crawl() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new()
        .serve("/page.png", b"<!DOCTYPE html>".as_slice())
        .serve("/later.png", PNG);
    let reporter = Recorder::default();
    let mut crawler = crawler(client.clone(), dir.path()).with_reporter(reporter.clone());
    let (mut source, released) = Tracked::new(&["page", "later"]);

    let err = crawler.run(&mut source).await.unwrap_err();

    let CrawlError::Fetch { identifier, source: cause } = &err else {
        panic!("expected a fetch error, got {err:?}");
    };
    assert_eq!(identifier, "page");
    assert_eq!(cause.phase(), FetchPhase::Classification);
    assert_eq!(client.requested(), ["/page.png"]);
    assert_eq!(reporter.events(), ["attempt page", "abort"]);
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn transport_failure_stops_the_crawl() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new().fail_execute("/down.png").serve("/next.png", PNG);
    let mut crawler = crawler(client.clone(), dir.path());
    let mut source = ListSource::new(["down", "next"]);

    let err = crawler.run(&mut source).await.unwrap_err();

    assert!(matches!(
        &err,
        CrawlError::Fetch { source, .. } if source.phase() == FetchPhase::Execution
    ));
    assert_eq!(client.requested(), ["/down.png"]);
}

#[tokio::test]
async fn write_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"").unwrap();

    let client = MockClient::new().serve("/a.png", PNG).serve("/b.png", PNG);
    let mut crawler = crawler(client.clone(), &blocker.join("images"));
    let (mut source, released) = Tracked::new(&["a", "b"]);

    let err = crawler.run(&mut source).await.unwrap_err();

    assert!(matches!(&err, CrawlError::Persist { identifier, .. } if identifier == "a"));
    assert_eq!(client.requested(), ["/a.png"]);
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn notification_failure_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new().serve("/a.png", PNG).serve("/b.png", PNG);
    let notifier = Notifications {
        fail: true,
        ..Default::default()
    };
    let mut crawler = crawler(client, dir.path()).with_notifier(notifier.clone());
    let mut source = ListSource::new(["a", "b"]);

    let summary = crawler.run(&mut source).await.unwrap();

    assert_eq!(summary.hits, 2);
    assert_eq!(notifier.log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_source_finishes_immediately() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new();
    let reporter = Recorder::default();
    let mut crawler = crawler(client.clone(), dir.path()).with_reporter(reporter.clone());
    let (mut source, released) = Tracked::new(&[]);

    let summary = crawler.run(&mut source).await.unwrap();

    assert_eq!(summary, CrawlSummary::default());
    assert!(client.requested().is_empty());
    assert_eq!(reporter.events(), ["finish"]);
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn shutdown_before_fetch_completes() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new().serve("/a.png", PNG);
    let mut crawler = crawler(client.clone(), dir.path());
    let (mut source, released) = Tracked::new(&["a"]);

    let summary = crawler
        .run_until(&mut source, std::future::ready(()))
        .await
        .unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.attempts, 0);
    assert!(client.requested().is_empty());
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn delay_follows_every_outcome() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new()
        .serve("/a.png", PNG)
        .redirect("/b.png", "/removed.png", b"".as_slice());
    let mut crawler = crawler(client, dir.path()).with_delay(Duration::from_secs(5));
    let mut source = ListSource::new(["a", "b"]);

    let start = tokio::time::Instant::now();
    let summary = crawler.run(&mut source).await.unwrap();

    assert_eq!(summary.attempts, 2);
    assert!(start.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn shutdown_interrupts_the_delay() {
    let dir = TempDir::new().unwrap();
    let client = MockClient::new().serve("/a.png", PNG).serve("/b.png", PNG);
    let mut crawler = crawler(client.clone(), dir.path()).with_delay(Duration::from_secs(60));
    let (mut source, released) = Tracked::new(&["a", "b"]);

    let start = tokio::time::Instant::now();
    let summary = crawler
        .run_until(&mut source, tokio::time::sleep(Duration::from_secs(30)))
        .await
        .unwrap();

    assert_eq!(summary, CrawlSummary {
        attempts:    1,
        hits:        1,
        misses:      0,
        interrupted: true,
    });
    assert!(start.elapsed() < Duration::from_secs(60));
    assert_eq!(client.requested(), ["/a.png"]);
    assert!(dir.path().join("a.png").is_file());
    assert!(released.load(Ordering::SeqCst));
}
