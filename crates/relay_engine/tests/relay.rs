use bytes::Bytes;
use futures_util::{stream, StreamExt};
use pretty_assertions::assert_eq;
use relay_core::{ProgressEvent, StreamEvent};
use relay_engine::{await_first_chunk, relay_frames, BodyStream, FailureKind, RelayError, UpstreamBody};

fn upstream(size: Option<u64>, chunks: Vec<Result<Bytes, RelayError>>) -> UpstreamBody {
    let chunks: BodyStream = Box::pin(stream::iter(chunks));
    UpstreamBody {
        size,
        content_type: Some("text/html; charset=utf-8".to_string()),
        chunks,
    }
}

async fn collect_events(body: UpstreamBody) -> Vec<StreamEvent> {
    let frames: Vec<Bytes> = relay_frames(body)
        .map(|frame| frame.expect("frame encodes"))
        .collect()
        .await;
    frames
        .iter()
        .map(|frame| {
            assert_eq!(frame.last(), Some(&b'\n'));
            serde_json::from_slice(frame).expect("valid frame")
        })
        .collect()
}

#[tokio::test]
async fn declared_length_yields_thirty_sixty_hundred() {
    let body = Bytes::from(vec![b'x'; 100]);
    let events = collect_events(upstream(
        Some(100),
        vec![
            Ok(body.slice(..30)),
            Ok(body.slice(30..60)),
            Ok(body.slice(60..)),
        ],
    ))
    .await;

    assert_eq!(
        events[..3].to_vec(),
        vec![
            StreamEvent::Progress(ProgressEvent { size: Some(100), downloaded: 30, progress: 30 }),
            StreamEvent::Progress(ProgressEvent { size: Some(100), downloaded: 60, progress: 60 }),
            StreamEvent::Progress(ProgressEvent { size: Some(100), downloaded: 100, progress: 100 }),
        ]
    );
    match &events[3] {
        StreamEvent::Completed { content } => assert_eq!(content.len(), 100),
        other => panic!("expected completed, got {other:?}"),
    }
    assert_eq!(events.len(), 4);
}

#[tokio::test]
async fn missing_length_reports_null_size_and_zero_percent() {
    let events = collect_events(upstream(
        None,
        vec![
            Ok(Bytes::from_static(b"<html>")),
            Ok(Bytes::from_static(b"<body>hi</body>")),
            Ok(Bytes::from_static(b"</html>")),
        ],
    ))
    .await;

    let progress: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            StreamEvent::Progress(progress) => Some(*progress),
            _ => None,
        })
        .collect();
    assert_eq!(progress.len(), 3);
    assert!(progress.iter().all(|p| p.size.is_none() && p.progress == 0));
    assert_eq!(
        events.last(),
        Some(&StreamEvent::Completed {
            content: "<html><body>hi</body></html>".to_string()
        })
    );
}

#[tokio::test]
async fn downloaded_deltas_sum_to_body_length_for_any_segmentation() {
    let body = "line one\nline two\n{\"status\":\"fake\"}\nend";
    let bytes = body.as_bytes();
    for step in [1, 3, 7, 16, bytes.len()] {
        let chunks: Vec<Result<Bytes, RelayError>> = bytes
            .chunks(step)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        let upstream = UpstreamBody {
            size: Some(bytes.len() as u64),
            content_type: None,
            chunks: Box::pin(stream::iter(chunks)),
        };
        let events = collect_events(upstream).await;

        let mut previous = 0;
        let mut total = 0;
        for event in &events {
            if let StreamEvent::Progress(progress) = event {
                total += progress.downloaded - previous;
                previous = progress.downloaded;
            }
        }
        assert_eq!(total, bytes.len() as u64, "step {step}");
        assert_eq!(
            events.last(),
            Some(&StreamEvent::Completed {
                content: body.to_string()
            }),
            "step {step}"
        );
    }
}

#[tokio::test]
async fn empty_body_completes_without_progress() {
    let events = collect_events(upstream(Some(0), Vec::new())).await;
    assert_eq!(
        events,
        vec![StreamEvent::Completed {
            content: String::new()
        }]
    );
}

#[tokio::test]
async fn mid_stream_failure_ends_with_error_frame() {
    let events = collect_events(upstream(
        Some(100),
        vec![
            Ok(Bytes::from_static(b"partial")),
            Err(RelayError::new(FailureKind::Network, "connection reset")),
            Ok(Bytes::from_static(b"never relayed")),
        ],
    ))
    .await;

    assert_eq!(events.len(), 2);
    assert!(matches!(
        events[0],
        StreamEvent::Progress(ProgressEvent { downloaded: 7, .. })
    ));
    assert_eq!(
        events[1],
        StreamEvent::Error {
            error: "Failed to fetch content. Error: connection reset".to_string()
        }
    );
}

#[tokio::test]
async fn first_chunk_failure_surfaces_before_any_frame() {
    let body = upstream(
        Some(10),
        vec![Err(RelayError::new(FailureKind::Network, "connection reset"))],
    );
    let err = await_first_chunk(body).await.expect_err("first item is an error");
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.message, "connection reset");
}

#[tokio::test]
async fn first_chunk_is_replayed_into_the_relay() {
    let body = upstream(
        Some(4),
        vec![Ok(Bytes::from_static(b"ab")), Ok(Bytes::from_static(b"cd"))],
    );
    let primed = await_first_chunk(body).await.expect("first chunk is data");
    let events = collect_events(primed).await;
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[2],
        StreamEvent::Completed {
            content: "abcd".to_string()
        }
    );
}

#[tokio::test]
async fn empty_upstream_still_completes_after_gate() {
    let primed = await_first_chunk(upstream(Some(0), Vec::new()))
        .await
        .expect("empty body is not a failure");
    assert_eq!(
        collect_events(primed).await,
        vec![StreamEvent::Completed {
            content: String::new()
        }]
    );
}
