use super::*;
use crossbeam_channel::bounded;
use game_core::{GuessOutcome, OptionMark, NETWORK_ERROR_MESSAGE};
use shared::{
    domain::Fact,
    protocol::{GenerateRequest, GenerateResponse},
};

struct Harness {
    app: FakeFactApp,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn harness() -> Harness {
    let (cmd_tx, cmd_rx) = bounded(4);
    let (ui_tx, ui_rx) = bounded(4);
    Harness {
        app: FakeFactApp::new(cmd_tx, ui_rx, "http://127.0.0.1:5000"),
        cmd_rx,
        ui_tx,
    }
}

fn rome_round() -> GenerateResponse {
    GenerateResponse {
        topic: "Rome".to_string(),
        level: Level::Easy,
        facts: vec![
            Fact::new("Rome sits on the Tiber.", true),
            Fact::new("Rome is in Portugal.", false),
            Fact::new("Rome has the Pantheon.", true),
        ],
        fake_index: 1,
    }
}

#[test]
fn blank_topic_queues_nothing() {
    let mut h = harness();
    h.app.topic_input = "   ".to_string();
    h.app.submit_configuration();

    assert!(h.cmd_rx.try_recv().is_err());
    assert_eq!(h.app.session.phase(), Phase::Idle);
}

#[test]
fn submit_queues_trimmed_generate_command() {
    let mut h = harness();
    h.app.topic_input = " Rome ".to_string();
    h.app.level = Level::Hard;
    h.app.submit_configuration();

    assert_eq!(
        h.cmd_rx.try_recv().ok(),
        Some(BackendCommand::Generate(GenerateRequest {
            topic: "Rome".to_string(),
            level: Level::Hard,
        }))
    );
    assert_eq!(h.app.session.phase(), Phase::Loading);

    h.app.submit_configuration();
    assert!(h.cmd_rx.try_recv().is_err(), "no second request while loading");
}

#[test]
fn generated_event_starts_round_and_plays_through() {
    let mut h = harness();
    h.app.topic_input = "Rome".to_string();
    h.app.submit_configuration();
    h.ui_tx
        .send(UiEvent::Generated(Ok(rome_round())))
        .expect("send");
    h.app.process_ui_events();
    assert_eq!(h.app.session.phase(), Phase::Presenting);

    h.app.session.select_fact(0);
    h.app.submit_guess();
    assert_eq!(
        h.app.session.feedback().map(|f| f.outcome),
        Some(GuessOutcome::Incorrect)
    );
    let marks: Vec<OptionMark> = h.app.session.options().iter().map(|o| o.mark).collect();
    assert_eq!(
        marks,
        vec![
            OptionMark::WrongResult,
            OptionMark::CorrectResult,
            OptionMark::Plain
        ]
    );

    h.app.play_again();
    assert_eq!(h.app.session.phase(), Phase::Idle);
    assert!(h.app.session.can_generate());
}

#[test]
fn service_error_event_is_shown_on_configuration_view() {
    let mut h = harness();
    h.app.topic_input = "Rome".to_string();
    h.app.submit_configuration();
    h.ui_tx
        .send(UiEvent::Generated(Err(GenerateError::service(
            500,
            Some("rate limited".to_string()),
        ))))
        .expect("send");
    h.app.process_ui_events();

    assert_eq!(h.app.session.phase(), Phase::Idle);
    assert_eq!(
        h.app.session.error_message(),
        Some("Error generating facts: rate limited")
    );
}

#[test]
fn disconnected_worker_returns_to_editable_configuration() {
    let mut h = harness();
    drop(h.cmd_rx);
    h.app.topic_input = "Rome".to_string();
    h.app.submit_configuration();

    assert_eq!(h.app.session.phase(), Phase::Idle);
    assert_eq!(h.app.session.error_message(), Some(NETWORK_ERROR_MESSAGE));
    assert!(h.app.status.contains("disconnected"));
}

#[test]
fn backend_startup_failure_releases_pending_request() {
    let mut h = harness();
    h.app.topic_input = "Rome".to_string();
    h.app.submit_configuration();
    h.ui_tx
        .send(UiEvent::BackendUnavailable(
            "Backend worker failed to start".to_string(),
        ))
        .expect("send");
    h.app.process_ui_events();

    assert_eq!(h.app.session.phase(), Phase::Idle);
    assert_eq!(h.app.status, "Backend worker failed to start");
}
