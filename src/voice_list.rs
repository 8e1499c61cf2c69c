//! Getting the platform's voice list, which some browsers fill lazily.
//!
//! The wait is a race between a `voiceschanged` notification and a timer,
//! settled through a oneshot channel. Each wait registers its own listener and
//! timer and removes exactly those afterwards, so overlapping waits never
//! disturb each other or a handler someone else installed.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;

use crate::speech::SpeakError;
use crate::voice::VoiceMeta;

/// Voice enumeration plus the two wake-up sources the wait needs.
pub trait VoiceSource {
    type Voice: VoiceMeta;
    type Subscription;
    type Timer;

    fn voices(&self) -> Vec<Self::Voice>;

    fn subscribe_voices_changed(&self, notify: Box<dyn Fn()>) -> Result<Self::Subscription, SpeakError>;

    fn unsubscribe_voices_changed(&self, subscription: Self::Subscription);

    fn start_timer(&self, timeout_ms: i32, notify: Box<dyn Fn()>) -> Result<Self::Timer, SpeakError>;

    fn cancel_timer(&self, timer: Self::Timer);
}

/// How the voice-list wait ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitSettled {
    /// The list was already populated.
    Immediate,
    VoicesChanged,
    TimedOut,
}

/// Current voices, waiting up to `timeout_ms` for a lazily populated list.
///
/// Whichever of the notification and the timer fires first settles the wait;
/// the other is ignored. Both registrations are removed before returning. The
/// returned list may still be empty.
pub async fn voices_with_wait<S: VoiceSource>(
    source: &S,
    timeout_ms: i32,
) -> Result<(Vec<S::Voice>, WaitSettled), SpeakError> {
    let initial = source.voices();
    if !initial.is_empty() {
        return Ok((initial, WaitSettled::Immediate));
    }

    let (tx, rx) = oneshot::channel();
    let tx = Rc::new(RefCell::new(Some(tx)));
    let settle = move |how: WaitSettled| {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(how);
        }
    };
    let settle = Rc::new(settle);

    let timer = {
        let settle = settle.clone();
        source.start_timer(timeout_ms, Box::new(move || settle(WaitSettled::TimedOut)))?
    };
    let subscription = {
        let settle = settle.clone();
        match source.subscribe_voices_changed(Box::new(move || settle(WaitSettled::VoicesChanged))) {
            Ok(sub) => sub,
            Err(err) => {
                source.cancel_timer(timer);
                return Err(err);
            }
        }
    };

    // A dropped sender means both wake-ups are gone; treat it as a timeout.
    let how = rx.await.unwrap_or(WaitSettled::TimedOut);

    source.cancel_timer(timer);
    source.unsubscribe_voices_changed(subscription);

    let voices = source.voices();
    tracing::debug!(?how, count = voices.len(), "voice wait settled");
    Ok((voices, how))
}
