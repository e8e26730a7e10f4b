//! The moogt service — engines wired to persistence, clock, and sink.

use crate::dispatch::dispatch;
use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use moogt_core::{
    ArgumentId, ArgumentKind, ArgumentPayload, ArgumentStore, Clock, EndError, MoogtEvent,
    MoogtId, MoogtRepository, MoogtState, NotificationSink, UserId,
};
use moogt_gate::{ArgumentGate, SubmitContext};
use moogt_resolver::{EndOutcome, EndRequestReply, EndResolver};
use moogt_scheduler::TurnScheduler;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Outcome of an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmitReceipt {
    /// Store-assigned identity of the new argument.
    pub argument: ArgumentId,
    /// The persisted successor state.
    pub state: MoogtState,
    /// Everything that happened, including sweep events processed on the
    /// way in.
    pub events: Vec<MoogtEvent>,
}

/// The service facade over the lifecycle engines.
///
/// Writes to one moogt are serialized two ways: an in-process per-id lock
/// (so concurrent calls through this service queue up) and the optimistic
/// `version` token on `save` (so an out-of-process writer is still caught).
/// Every operation follows the same shape: lock, load, compute the
/// successor state purely, save, then dispatch events best-effort.
pub struct MoogtService {
    repo: Arc<dyn MoogtRepository>,
    arguments: Arc<dyn ArgumentStore>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    scheduler: TurnScheduler,
    locks: LockMap,
}

/// Per-moogt write locks. Entries nobody holds are evicted on the next
/// acquisition, so the map tracks moogts with in-flight writes rather than
/// every moogt ever touched.
#[derive(Default)]
struct LockMap {
    inner: Mutex<HashMap<MoogtId, Arc<Mutex<()>>>>,
}

impl LockMap {
    async fn acquire(&self, id: &MoogtId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

impl MoogtService {
    /// Wire a service from its collaborators, with the default auto-pause
    /// policy.
    pub fn new(
        repo: Arc<dyn MoogtRepository>,
        arguments: Arc<dyn ArgumentStore>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            arguments,
            notifier,
            clock,
            scheduler: TurnScheduler::default(),
            locks: LockMap::default(),
        }
    }

    /// Replace the scheduler (custom inactivity policy).
    pub fn with_scheduler(mut self, scheduler: TurnScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Store a freshly proposed moogt.
    pub async fn propose(&self, state: MoogtState) -> Result<MoogtState, ServiceError> {
        if state.is_started() {
            return Err(ServiceError::AlreadyStarted(state.id.clone()));
        }
        self.repo.insert(state.clone()).await?;
        Ok(state)
    }

    /// The opposition accepts; turns begin.
    ///
    /// An open moogt (no invited opposition) is claimed by the acceptor.
    /// The resolution counts as the proposition's opening word, so the
    /// opposition moves first.
    pub async fn accept(&self, id: &MoogtId, actor: &UserId) -> Result<MoogtState, ServiceError> {
        let _guard = self.lock(id).await;
        let mut state = self.load(id).await?;
        if state.is_started() {
            return Err(ServiceError::AlreadyStarted(id.clone()));
        }
        if state.proposition == *actor {
            return Err(ServiceError::NotInvited);
        }
        match &state.opposition {
            Some(invited) if invited != actor => return Err(ServiceError::NotInvited),
            Some(_) => {}
            None => state.opposition = Some(actor.clone()),
        }

        let now = self.clock.now();
        let expected = state.version;
        state.start(now);
        state.version = self.repo.save(&state, expected).await?;

        let events = vec![MoogtEvent::Started {
            moogt: id.clone(),
            opposition: actor.clone(),
            at: now,
        }];
        self.dispatch(&state, &events).await;
        Ok(state)
    }

    /// Bring a moogt's turn accounting up to `now` and persist the result.
    ///
    /// The pull sweep: read paths call this before rendering. Idempotent —
    /// a second call at the same instant changes nothing.
    pub async fn evaluate_and_persist(&self, id: &MoogtId) -> Result<MoogtState, ServiceError> {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        let now = self.clock.now();

        let (mut next, events) = self.advance(&state, now);
        if next == state {
            return Ok(state);
        }
        next.version = self.repo.save(&next, state.version).await?;
        tracing::debug!(moogt = %id, events = events.len(), "moogt.sweep");
        self.dispatch(&next, &events).await;
        Ok(next)
    }

    /// Submit an argument: sweep, screen through the gate, persist the
    /// record and the successor state, dispatch.
    ///
    /// A rejection leaves the submission unpersisted, but sweep progress
    /// made on the way in is still saved — time elapsed whether or not the
    /// submission was valid.
    pub async fn submit_argument(
        &self,
        id: &MoogtId,
        actor: &UserId,
        kind: ArgumentKind,
        payload: ArgumentPayload,
    ) -> Result<SubmitReceipt, ServiceError> {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        let now = self.clock.now();
        let (swept, mut events) = self.advance(&state, now);

        let has_concluded = if kind == ArgumentKind::Concluding {
            match self.arguments.has_concluding_by(id, actor).await {
                Ok(has_concluded) => has_concluded,
                Err(err) => {
                    self.persist_sweep(&state, swept, &events).await;
                    return Err(err.into());
                }
            }
        } else {
            false
        };
        let ctx = SubmitContext::new(now).with_concluded(has_concluded);

        let admission = match ArgumentGate::submit(&swept, actor, kind, &payload, ctx) {
            Ok(admission) => admission,
            Err(err) => {
                self.persist_sweep(&state, swept, &events).await;
                return Err(err.into());
            }
        };

        // The state save is the unit of work: a failed save leaves no trace
        // of the submission. The record write follows; if it fails, the
        // accepted turn stands and the loss is surfaced to the caller.
        let mut next = admission.state;
        next.version = self.repo.save(&next, state.version).await?;

        let argument = match self.arguments.create(id, actor, kind, payload, now).await {
            Ok(argument) => argument,
            Err(err) => {
                tracing::error!(moogt = %id, author = %actor, error = %err, "moogt.argument.failed");
                self.dispatch(&next, &events).await;
                return Err(err.into());
            }
        };

        events.push(MoogtEvent::ArgumentPosted {
            moogt: id.clone(),
            argument: argument.clone(),
            author: actor.clone(),
            kind,
            at: now,
        });
        events.extend(admission.events);
        tracing::debug!(moogt = %id, author = %actor, ?kind, "moogt.submit");
        self.dispatch(&next, &events).await;

        Ok(SubmitReceipt {
            argument,
            state: next,
            events,
        })
    }

    /// A debater asks to end the moogt early.
    pub async fn request_end(
        &self,
        id: &MoogtId,
        actor: &UserId,
    ) -> Result<MoogtState, ServiceError> {
        self.apply_end(id, |state, now| EndResolver::request_end(state, actor, now))
            .await
    }

    /// The other debater answers a pending end request.
    pub async fn respond_to_end_request(
        &self,
        id: &MoogtId,
        actor: &UserId,
        reply: EndRequestReply,
    ) -> Result<MoogtState, ServiceError> {
        self.apply_end(id, |state, now| {
            EndResolver::respond_to_end_request(state, actor, reply, now)
        })
        .await
    }

    /// A debater withdraws unilaterally.
    pub async fn quit(&self, id: &MoogtId, actor: &UserId) -> Result<MoogtState, ServiceError> {
        self.apply_end(id, |state, now| EndResolver::quit(state, actor, now))
            .await
    }

    /// Freeze the idle clock. A no-op unless the moogt is live.
    pub async fn pause(&self, id: &MoogtId) -> Result<MoogtState, ServiceError> {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        if !state.is_started() || state.has_ended || state.is_paused {
            return Ok(state);
        }
        let now = self.clock.now();
        let mut next = state.clone();
        next.pause(now);
        next.version = self.repo.save(&next, state.version).await?;

        let events = vec![MoogtEvent::Paused {
            moogt: id.clone(),
            at: now,
        }];
        self.dispatch(&next, &events).await;
        Ok(next)
    }

    /// Unfreeze the idle clock, preserving remaining idle time exactly.
    /// A no-op unless the moogt is paused.
    pub async fn resume(&self, id: &MoogtId) -> Result<MoogtState, ServiceError> {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        if !state.is_paused || state.has_ended {
            return Ok(state);
        }
        let now = self.clock.now();
        let mut next = state.clone();
        next.resume(now);
        next.version = self.repo.save(&next, state.version).await?;

        let events = vec![MoogtEvent::Resumed {
            moogt: id.clone(),
            at: now,
        }];
        self.dispatch(&next, &events).await;
        Ok(next)
    }

    /// Soft-delete. The record stays in the repository; every subsequent
    /// service call answers `NotFound`.
    pub async fn delete(&self, id: &MoogtId) -> Result<(), ServiceError> {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        let mut next = state.clone();
        next.is_deleted = true;
        self.repo.save(&next, state.version).await?;
        Ok(())
    }

    // ---- internals ----

    async fn lock(&self, id: &MoogtId) -> OwnedMutexGuard<()> {
        self.locks.acquire(id).await
    }

    async fn load(&self, id: &MoogtId) -> Result<MoogtState, ServiceError> {
        let state = self.repo.load(id).await?;
        if state.is_deleted {
            return Err(ServiceError::NotFound(id.clone()));
        }
        Ok(state)
    }

    /// Sweep plus duration-expiry check, purely.
    fn advance(&self, state: &MoogtState, now: DateTime<Utc>) -> (MoogtState, Vec<MoogtEvent>) {
        let sweep = self.scheduler.evaluate(state, now);
        let mut next = sweep.state;
        let mut events = sweep.events;
        if let Some(outcome) = EndResolver::check_duration(&next, now) {
            next = outcome.state;
            events.extend(outcome.events);
        }
        (next, events)
    }

    /// Persist sweep progress discovered on a path that otherwise failed.
    async fn persist_sweep(&self, loaded: &MoogtState, mut swept: MoogtState, events: &[MoogtEvent]) {
        if swept == *loaded {
            return;
        }
        match self.repo.save(&swept, loaded.version).await {
            Ok(version) => {
                swept.version = version;
                self.dispatch(&swept, events).await;
            }
            Err(err) => {
                tracing::warn!(moogt = %loaded.id, error = %err, "moogt.sweep.save_failed");
            }
        }
    }

    async fn apply_end<F>(&self, id: &MoogtId, f: F) -> Result<MoogtState, ServiceError>
    where
        F: FnOnce(&MoogtState, DateTime<Utc>) -> Result<EndOutcome, EndError>,
    {
        let _guard = self.lock(id).await;
        let state = self.load(id).await?;
        let now = self.clock.now();
        let outcome = f(&state, now)?;

        let mut next = outcome.state;
        next.version = self.repo.save(&next, state.version).await?;
        self.dispatch(&next, &outcome.events).await;
        Ok(next)
    }

    async fn dispatch(&self, state: &MoogtState, events: &[MoogtEvent]) {
        dispatch(
            self.notifier.as_ref(),
            self.arguments.as_ref(),
            state,
            events,
        )
        .await;
    }
}
