//! End-to-end lifecycle walkthroughs against the in-memory backends.
//!
//! Exercises the whole stack the way an application would: a service wired
//! from the memory store, a recording sink, and a manual clock, driven
//! through complete debates from proposal to concluding arguments.

use moogt_core::test_utils::{ManualClock, RecordingSink};
use moogt_core::{
    ArgumentKind, ArgumentPayload, ArgumentStore, Clock, DurationMs, GateError, MoogtId,
    MoogtRepository, MoogtState, MoogtStatus, Phase, Side, UserId,
};
use moogt_resolver::EndRequestReply;
use moogt_runtime::{MoogtService, ServiceError};
use moogt_scheduler::{FixedInactivityPolicy, TurnScheduler};
use moogt_store_memory::MemoryStore;
use std::sync::Arc;

struct World {
    service: MoogtService,
    store: Arc<MemoryStore>,
    sink: Arc<RecordingSink>,
    clock: Arc<ManualClock>,
}

fn world() -> World {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::new());
    let clock = Arc::new(ManualClock::new());
    let service = MoogtService::new(
        store.clone(),
        store.clone(),
        sink.clone(),
        clock.clone(),
    );
    World {
        service,
        store,
        sink,
        clock,
    }
}

fn ada() -> UserId {
    UserId::new("ada")
}

fn grace() -> UserId {
    UserId::new("grace")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// A complete debate: proposal to concluding arguments
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn full_debate_from_proposal_to_conclusions() {
    let w = world();
    let id = MoogtId::new("great-debate");

    // Ada proposes a bounded debate: 3-minute turns, 30 minutes overall.
    let proposal = MoogtState::new(
        id.clone(),
        ada(),
        "Static typing pays for itself",
        DurationMs::from_mins(3),
        w.clock.now(),
    )
    .with_opposition(grace())
    .with_max_duration(DurationMs::from_mins(30));
    w.service.propose(proposal).await.unwrap();

    let unstarted = w.store.load(&id).await.unwrap();
    assert_eq!(unstarted.phase(), Phase::Unstarted);

    // Grace accepts. The resolution is ada's opening word, so grace moves
    // first.
    let live = w.service.accept(&id, &grace()).await.unwrap();
    assert_eq!(live.phase(), Phase::Live);
    assert_eq!(live.next_side(), Side::Opposition);

    // Three orderly turns.
    w.clock.advance(DurationMs::from_mins(1));
    w.service
        .submit_argument(&id, &grace(), ArgumentKind::Normal, ArgumentPayload::text("Types slow prototyping"))
        .await
        .unwrap();
    w.clock.advance(DurationMs::from_mins(1));
    w.service
        .submit_argument(&id, &ada(), ArgumentKind::Normal, ArgumentPayload::text("Refactoring says otherwise"))
        .await
        .unwrap();
    w.clock.advance(DurationMs::from_mins(1));
    let receipt = w
        .service
        .submit_argument(&id, &grace(), ArgumentKind::Normal, ArgumentPayload::text("Tests cover that"))
        .await
        .unwrap();
    assert_eq!(receipt.state.next_side(), Side::Proposition);

    // Ada sleeps through one period; the sweep hands the turn back to
    // grace, and the idle stretch shows up as a marker in the feed.
    w.clock.advance(DurationMs::from_mins(4));
    let swept = w.service.evaluate_and_persist(&id).await.unwrap();
    assert_eq!(swept.next_side(), Side::Opposition);
    assert_eq!(swept.open_missed_turn().unwrap().consecutive_expired_turns_count, 1);

    let marker_count = w
        .store
        .list(&id)
        .await
        .unwrap()
        .iter()
        .filter(|r| r.kind == ArgumentKind::MissedTurnMarker)
        .count();
    assert_eq!(marker_count, 1);

    // Grace posts; the missed-turn run closes.
    let receipt = w
        .service
        .submit_argument(&id, &grace(), ArgumentKind::Normal, ArgumentPayload::text("Still here"))
        .await
        .unwrap();
    assert!(receipt.state.open_missed_turn().is_none());

    // The overall clock runs out with grace as the last poster, so the
    // moogt ends immediately — ada's opening word was answered.
    w.clock.advance(DurationMs::from_mins(25));
    let over = w.service.evaluate_and_persist(&id).await.unwrap();
    assert_eq!(over.phase(), Phase::Ended);
    assert!(over.has_status(MoogtStatus::Ended));

    // Normal turns are closed; each debater gets exactly one conclusion.
    let err = w
        .service
        .submit_argument(&id, &ada(), ArgumentKind::Normal, ArgumentPayload::text("One more"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Gate(GateError::AlreadyEnded)));

    w.service
        .submit_argument(&id, &ada(), ArgumentKind::Concluding, ArgumentPayload::text("Closing for"))
        .await
        .unwrap();
    w.service
        .submit_argument(&id, &grace(), ArgumentKind::Concluding, ArgumentPayload::text("Closing against"))
        .await
        .unwrap();
    let err = w
        .service
        .submit_argument(&id, &grace(), ArgumentKind::Concluding, ArgumentPayload::text("Encore"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Gate(GateError::DuplicateConcluding)
    ));

    // The notification log tells the same story.
    assert_eq!(w.sink.sent_with_verb("accepted your moogt").len(), 1);
    assert!(!w.sink.sent_with_verb("posted an argument").is_empty());
    assert_eq!(w.sink.sent_with_verb("ended").len(), 2);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Duration-over tie-break with the final word owed
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn final_word_honored_before_the_end() {
    let w = world();
    let id = MoogtId::new("tie-break");

    let mut proposal = MoogtState::new(
        id.clone(),
        ada(),
        "Brevity is a feature",
        DurationMs::from_mins(3),
        w.clock.now(),
    )
    .with_opposition(grace())
    .with_max_duration(DurationMs::from_mins(8));
    proposal.idle_timeout = DurationMs::from_mins(20);
    w.service.propose(proposal).await.unwrap();
    w.service.accept(&id, &grace()).await.unwrap();

    // Grace replies, ada rebuts. Ada is now the last poster when the
    // overall clock expires, so grace is owed the final word.
    w.clock.advance(DurationMs::from_mins(1));
    w.service
        .submit_argument(&id, &grace(), ArgumentKind::Normal, ArgumentPayload::text("Counterpoint"))
        .await
        .unwrap();
    w.clock.advance(DurationMs::from_mins(1));
    w.service
        .submit_argument(&id, &ada(), ArgumentKind::Normal, ArgumentPayload::text("Rebuttal"))
        .await
        .unwrap();

    w.clock.advance(DurationMs::from_mins(7));
    let pending = w.service.evaluate_and_persist(&id).await.unwrap();
    assert_eq!(pending.phase(), Phase::DurationOverPendingLastWord);
    assert!(!pending.has_ended);

    // Ada cannot steal the final word.
    let err = w
        .service
        .submit_argument(&id, &ada(), ArgumentKind::Normal, ArgumentPayload::text("Mine"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Gate(GateError::NotYourTurn)));

    // Grace's last word closes the moogt in the same submission.
    let receipt = w
        .service
        .submit_argument(&id, &grace(), ArgumentKind::Normal, ArgumentPayload::text("The last word"))
        .await
        .unwrap();
    assert_eq!(receipt.state.phase(), Phase::Ended);
    assert!(receipt.state.has_status(MoogtStatus::DurationOver));
    assert!(receipt.state.has_status(MoogtStatus::Ended));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Inactivity: auto-pause, manual resume, custom policy
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn auto_pause_then_resume_continues_the_debate() {
    let w = world();
    let id = MoogtId::new("sleepy");

    let proposal = MoogtState::new(
        id.clone(),
        ada(),
        "Meetings could be emails",
        DurationMs::from_mins(3),
        w.clock.now(),
    )
    .with_opposition(grace());
    w.service.propose(proposal).await.unwrap();
    w.service.accept(&id, &grace()).await.unwrap();

    // Nine idle minutes: three expired periods, one past the default
    // tolerance of two.
    w.clock.advance(DurationMs::from_mins(9));
    let paused = w.service.evaluate_and_persist(&id).await.unwrap();
    assert_eq!(paused.phase(), Phase::Paused);
    assert!(paused.has_status(MoogtStatus::AutoPaused));

    // Frozen: another hour changes nothing.
    w.clock.advance(DurationMs::from_hours(1));
    let still = w.service.evaluate_and_persist(&id).await.unwrap();
    assert_eq!(still, paused);

    // Resume and carry on. Odd period count means the turn flipped to ada.
    let resumed = w.service.resume(&id).await.unwrap();
    assert_eq!(resumed.phase(), Phase::Live);
    assert_eq!(resumed.next_side(), Side::Proposition);

    w.service
        .submit_argument(&id, &ada(), ArgumentKind::Normal, ArgumentPayload::text("Back to it"))
        .await
        .unwrap();
}

#[tokio::test]
async fn custom_inactivity_policy_raises_the_tolerance() {
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::new());
    let clock = Arc::new(ManualClock::new());
    let scheduler = TurnScheduler::new(Arc::new(FixedInactivityPolicy(DurationMs::from_hours(1))));
    let service = MoogtService::new(
        store.clone(),
        store.clone(),
        sink.clone(),
        clock.clone(),
    )
    .with_scheduler(scheduler);

    let id = MoogtId::new("patient");
    let proposal = MoogtState::new(
        id.clone(),
        ada(),
        "Patience is a virtue",
        DurationMs::from_mins(3),
        clock.now(),
    )
    .with_opposition(grace());
    service.propose(proposal).await.unwrap();
    service.accept(&id, &grace()).await.unwrap();

    // Nine missed periods would trip the default policy three times over,
    // but stay under an hour of tolerated inactivity.
    clock.advance(DurationMs::from_mins(27));
    let state = service.evaluate_and_persist(&id).await.unwrap();
    assert!(!state.is_paused);
    assert_eq!(
        state.open_missed_turn().unwrap().consecutive_expired_turns_count,
        9
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Breaking off early
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn consensual_end_after_a_declined_request() {
    let w = world();
    let id = MoogtId::new("armistice");

    let proposal = MoogtState::new(
        id.clone(),
        ada(),
        "We have argued enough",
        DurationMs::from_mins(3),
        w.clock.now(),
    )
    .with_opposition(grace());
    w.service.propose(proposal).await.unwrap();
    w.service.accept(&id, &grace()).await.unwrap();

    w.service.request_end(&id, &ada()).await.unwrap();
    let ongoing = w
        .service
        .respond_to_end_request(&id, &grace(), EndRequestReply::Disagree)
        .await
        .unwrap();
    assert_eq!(ongoing.phase(), Phase::Live);

    w.clock.advance(DurationMs::from_mins(1));
    w.service.request_end(&id, &ada()).await.unwrap();
    let ended = w
        .service
        .respond_to_end_request(&id, &grace(), EndRequestReply::Concede)
        .await
        .unwrap();
    assert_eq!(ended.phase(), Phase::Ended);
    assert_eq!(w.sink.sent_with_verb("conceded").len(), 1);
}
