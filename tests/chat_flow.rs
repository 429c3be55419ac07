//! End-to-end controller behavior against a mocked message endpoint.

use chat_widget::chat::{ChatForm, HttpBackend, Message, Phase, Sender, Submission};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

#[tokio::test]
async fn test_reply_is_appended_after_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/message"))
        .and(body_json(json!({"text": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "hello"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut form = ChatForm::networked();
    form.on_input_change("hi");
    form.on_submit(&backend, "flow").await;

    assert_eq!(form.messages(), &[Message::user("hi"), Message::backend("hello")]);
    assert_eq!(form.draft(), "");
    assert_eq!(form.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_request_failure_leaves_only_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/message"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut form = ChatForm::networked();
    form.on_input_change("hi");
    form.on_submit(&backend, "flow").await;

    assert_eq!(form.messages(), &[Message::user("hi")]);
}

#[tokio::test]
async fn test_unreachable_backend_is_swallowed() {
    // Bind then drop a listener to get a port nobody is serving.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(format!("http://{addr}")).unwrap();
    let mut form = ChatForm::networked();
    form.on_input_change("anyone there?");
    form.on_submit(&backend, "flow").await;

    assert_eq!(form.messages(), &[Message::user("anyone there?")]);
    assert_eq!(form.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_blank_submit_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "unexpected"})))
        .expect(0)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut form = ChatForm::networked();
    for draft in ["", " ", "\n\t "] {
        form.on_input_change(draft);
        assert_eq!(form.on_submit(&backend, "flow").await, Submission::Ignored);
        assert_eq!(form.draft(), draft);
    }
    assert!(form.history().is_empty());
}

#[tokio::test]
async fn test_history_tracks_every_mutation_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ack"})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut form = ChatForm::networked();
    let inputs = ["one", "two", "two", "three"];
    for input in inputs {
        form.on_input_change(input);
        form.on_submit(&backend, "flow").await;
    }

    let expected: Vec<(Sender, String)> = inputs
        .iter()
        .flat_map(|text| {
            [
                (Sender::User, (*text).to_string()),
                (Sender::Backend, "ack".to_string()),
            ]
        })
        .collect();
    let actual: Vec<(Sender, String)> = form
        .messages()
        .iter()
        .map(|m| (m.sender().clone(), m.text().to_string()))
        .collect();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_local_echo_never_calls_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "unexpected"})))
        .expect(0)
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri()).unwrap();
    let mut form = ChatForm::local_echo();
    form.on_input_change("just me");
    assert_eq!(form.on_submit(&backend, "flow").await, Submission::Local);

    assert_eq!(form.messages(), &[Message::user("just me")]);
}
