//! Event dispatch — notifications and scheduler marker records.
//!
//! Runs strictly after the state transition is persisted. Every effect in
//! here is best-effort: a failed delivery or marker write is logged and
//! skipped, never propagated, so the already-saved transition stands.

use moogt_core::{
    ArgumentKind, ArgumentPayload, ArgumentStore, EndRequestStatus, MoogtEvent, MoogtState,
    NotificationSink, Side, UserId,
};

/// Deliver the side effects of one operation's event list.
///
/// `state` is the persisted successor state the events belong to; the
/// recipient sets (the other debater, both debaters, everyone but the
/// author) are derived from it.
pub(crate) async fn dispatch(
    notifier: &dyn NotificationSink,
    arguments: &dyn ArgumentStore,
    state: &MoogtState,
    events: &[MoogtEvent],
) {
    for event in events {
        match event {
            MoogtEvent::Started { moogt, .. } => {
                notify(notifier, &state.proposition, "accepted your moogt", moogt).await;
            }
            MoogtEvent::MissedTurnRecorded {
                moogt, side, at, ..
            } => {
                // Marker rows make expired periods visible in the argument
                // feed. One marker per idle run: when the feed already ends
                // on a marker, this sweep extended the same run (the count
                // lives on the aggregate's open record), so no new row.
                // Losing a marker loses a display row, nothing else.
                match arguments.latest_kind(moogt).await {
                    Ok(Some(ArgumentKind::MissedTurnMarker)) => {}
                    Ok(_) => {
                        if let Some(debater) = state.debater(*side) {
                            if let Err(err) = arguments
                                .create(
                                    moogt,
                                    debater,
                                    ArgumentKind::MissedTurnMarker,
                                    ArgumentPayload::default(),
                                    *at,
                                )
                                .await
                            {
                                tracing::warn!(moogt = %moogt, error = %err, "moogt.marker.failed");
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(moogt = %moogt, error = %err, "moogt.marker.failed");
                    }
                }
            }
            MoogtEvent::AutoPaused { moogt, .. } => {
                for debater in state.debaters() {
                    notify(notifier, &debater, "auto paused", moogt).await;
                }
            }
            MoogtEvent::ArgumentPosted { moogt, author, .. } => {
                for participant in participants(state) {
                    if participant != *author {
                        notify(notifier, &participant, "posted an argument", moogt).await;
                    }
                }
            }
            MoogtEvent::DurationOver { moogt, .. } => {
                for debater in state.debaters() {
                    notify(notifier, &debater, "ran out of time", moogt).await;
                }
            }
            MoogtEvent::Ended { moogt, .. } => {
                for debater in state.debaters() {
                    notify(notifier, &debater, "ended", moogt).await;
                }
            }
            MoogtEvent::BrokeOff { moogt, quitter, .. } => {
                if let Some(other) = other_debater(state, quitter) {
                    notify(notifier, &other, "broke off", moogt).await;
                }
            }
            MoogtEvent::EndRequested {
                moogt, requester, ..
            } => {
                if let Some(other) = other_debater(state, requester) {
                    notify(notifier, &other, "requested to end", moogt).await;
                }
            }
            MoogtEvent::EndRequestResolved { moogt, status, .. } => {
                let requester_side = Side::from_flag(state.end_requested_by_proposition);
                if let Some(requester) = state.debater(requester_side) {
                    let verb = match status {
                        EndRequestStatus::Concede => "conceded",
                        _ => "declined the end request",
                    };
                    notify(notifier, requester, verb, moogt).await;
                }
            }
            MoogtEvent::Paused { moogt, .. } => {
                for debater in state.debaters() {
                    notify(notifier, &debater, "paused", moogt).await;
                }
            }
            MoogtEvent::Resumed { moogt, .. } => {
                for debater in state.debaters() {
                    notify(notifier, &debater, "resumed", moogt).await;
                }
            }
            _ => {}
        }
    }
}

async fn notify(
    notifier: &dyn NotificationSink,
    recipient: &UserId,
    verb: &str,
    target: &moogt_core::MoogtId,
) {
    if let Err(err) = notifier.notify(recipient, verb, target).await {
        tracing::warn!(recipient = %recipient, verb, moogt = %target, error = %err, "moogt.notify.failed");
    }
}

fn participants(state: &MoogtState) -> Vec<UserId> {
    let mut out = state.debaters();
    out.extend(state.moderator.clone());
    out
}

fn other_debater(state: &MoogtState, user: &UserId) -> Option<UserId> {
    let side = state.side_of(user)?;
    state.debater(side.opponent()).cloned()
}
