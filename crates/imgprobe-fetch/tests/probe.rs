use imgprobe_fetch::effects::mock::MockClient;
use imgprobe_fetch::{ContentKind, FetchError, FetchPhase, Outcome, ProbeOptions, Prober, SignatureTable};

const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe1, 0x00, 0x10];
const GIF: &[u8] = b"GIF89a\x01\x00";

fn prober(client: MockClient) -> Prober<MockClient> {
    Prober::new(client).with_options(ProbeOptions::default().base_url("https://img.test/"))
}

#[tokio::test]
async fn hit_carries_bytes_name_and_kind() {
    let prober = prober(MockClient::new().serve("/abCD123.png", JPEG));

    let outcome = prober.fetch("abCD123").await.unwrap();
    let Outcome::Found(hit) = outcome else {
        panic!("expected a hit, got {outcome:?}");
    };

    assert_eq!(hit.identifier, "abCD123");
    assert_eq!(hit.kind, ContentKind::Jpeg);
    assert_eq!(hit.file_name(), "abCD123.jpg");
    assert_eq!(hit.bytes.as_ref(), JPEG);
}

#[tokio::test]
async fn each_kind_is_classified() {
    let client = MockClient::new()
        .serve("/p.png", PNG)
        .serve("/j.png", JPEG)
        .serve("/g.png", GIF);
    let prober = prober(client);

    for (id, kind) in [("p", ContentKind::Png), ("j", ContentKind::Jpeg), ("g", ContentKind::Gif)] {
        match prober.fetch(id).await.unwrap() {
            Outcome::Found(hit) => {
                assert_eq!(hit.kind, kind);
                assert_eq!(hit.file_name(), format!("{id}.{}", kind.extension()));
            }
            Outcome::NotFound => panic!("{id} missed"),
        }
    }
}

#[tokio::test]
async fn removed_redirect_is_a_miss() {
    let client = MockClient::new()
        .redirect("/removedImage.png", "/removed.png", b"not an image".as_slice());
    let prober = prober(client);

    assert_eq!(prober.fetch("removedImage").await.unwrap(), Outcome::NotFound);
}

#[tokio::test]
async fn removed_redirect_skips_body() {
    // An empty body fails classification, so only an unread body can miss.
    let client = MockClient::new().redirect("/gone.png", "/removed.png", b"".as_slice());
    let prober = prober(client);

    assert_eq!(prober.fetch("gone").await.unwrap(), Outcome::NotFound);
}

#[tokio::test]
async fn filename_follows_resolved_path() {
    let client = MockClient::new().redirect("/short.png", "/CanonicalId.jpeg", GIF);
    let prober = prober(client);

    let Outcome::Found(hit) = prober.fetch("short").await.unwrap() else {
        panic!("expected a hit");
    };
    assert_eq!(hit.file_name(), "CanonicalId.gif");
}

#[tokio::test]
async fn unknown_signature_is_an_error() {
    let prober = prober(MockClient::new().serve("/html.png", b"<!DOCTYPE html>".as_slice()));

    let err = prober.fetch("html").await.unwrap_err();
    assert_eq!(err.phase(), FetchPhase::Classification);
    assert!(err.to_string().contains("3c21444f"), "{err}");
}

#[tokio::test]
async fn empty_body_is_an_error() {
    let prober = prober(MockClient::new().serve("/empty.png", Vec::new()));

    let err = prober.fetch("empty").await.unwrap_err();
    assert!(matches!(err, FetchError::UnrecognizedSignature { ref prefix, .. } if prefix.is_empty()));
}

#[tokio::test]
async fn each_phase_is_reported() {
    let client = MockClient::new()
        .reject_request("/bad.png")
        .fail_execute("/down.png")
        .fail_body("/cut.png");
    let prober = prober(client);

    assert_eq!(prober.fetch("bad").await.unwrap_err().phase(), FetchPhase::Construction);
    assert_eq!(prober.fetch("down").await.unwrap_err().phase(), FetchPhase::Execution);
    assert_eq!(prober.fetch("cut").await.unwrap_err().phase(), FetchPhase::BodyRead);
}

#[tokio::test]
async fn construction_failure_never_executes() {
    let client = MockClient::new().reject_request("/bad.png");
    let prober = prober(client);

    let _ = prober.fetch("bad").await;
    assert!(prober.client().requested().is_empty());
}

#[tokio::test]
async fn injected_signatures_are_used() {
    let table = SignatureTable::new(vec![(*b"RIFF", ContentKind::Png)]);
    let prober = prober(MockClient::new().serve("/webp.png", b"RIFF\0\0\0\0WEBP".as_slice()))
        .with_signatures(table);

    assert!(prober.fetch("webp").await.unwrap().is_hit());
}
