use rallymedia::{extract_list, extract_session, fetch_envelope, ListKind};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_course_session_envelope() {
    // The shape a session-detail endpoint actually returns: the session
    // fields sit under `data`, and its media lists one wrapper deeper.
    let envelope = json!({
        "status": "ok",
        "data": {
            "id": 18,
            "sessionNumber": 4,
            "title": "Net play fundamentals",
            "metadata": {
                "videos": [
                    { "id": 301, "url": "https://cdn.example.com/clips/301.mp4", "durationSeconds": 95 },
                    { "id": 302, "url": "https://cdn.example.com/clips/302.mp4", "durationSeconds": 147 },
                ],
                "quizzes": [
                    { "id": 90, "question": "Where should the third shot land?" },
                ],
            },
        },
    });

    let session = extract_session(&envelope).expect("session payload not found");
    assert_eq!(session["sessionNumber"], json!(4));
    assert_eq!(session["title"], json!("Net play fundamentals"));

    let videos = extract_list(&envelope, ListKind::Videos);
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0]["id"], json!(301));

    let quizzes = extract_list(&envelope, ListKind::Quizzes);
    assert_eq!(quizzes.len(), 1);
}

#[test]
fn test_singular_video_envelope() {
    let envelope = json!({ "data": { "video": { "id": 7 } } });
    let videos = extract_list(&envelope, ListKind::Videos);
    assert_eq!(videos, vec![json!({ "id": 7 })]);
}

#[test]
fn test_envelope_without_media() {
    let envelope = json!({ "data": { "message": "no content" } });
    assert!(extract_list(&envelope, ListKind::Videos).is_empty());
    assert!(extract_list(&envelope, ListKind::Quizzes).is_empty());
    assert!(extract_session(&envelope).is_none());
}

#[tokio::test]
async fn test_fetch_and_extract() {
    let mock_server = MockServer::start().await;
    let body = json!({
        "data": {
            "metadata": {
                "videos": [ { "id": 11 }, { "id": 12 }, { "id": 13 } ],
            },
        },
    });

    Mock::given(method("GET"))
        .and(path("/sessions/18/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/sessions/18/videos", mock_server.uri());
    let envelope = fetch_envelope(url).await.unwrap();

    let videos = extract_list(&envelope, ListKind::Videos);
    assert_eq!(videos.len(), 3);
    assert_eq!(videos[2]["id"], json!(13));
}
