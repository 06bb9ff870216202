// File: src/session.rs
// Purpose: tokio driver that runs the success-hide timer for a Binding
//
// Effects from dispatch() are returned directly. Effects produced later by a
// timer (HideSuccess) arrive on the channel returned by FormSession::start.

use crate::binding::{Binding, UiEvent};
use crate::error::FormError;
use crate::render::UiEffect;
use crate::timer::TimerToken;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

struct Inner {
    binding: Binding,
    pending: Option<(TimerToken, JoinHandle<()>)>,
}

/// Owns a [`Binding`] and the task counting down the success message
#[derive(Clone)]
pub struct FormSession {
    inner: Arc<Mutex<Inner>>,
    timer_effects: mpsc::UnboundedSender<UiEffect>,
}

impl FormSession {
    /// Must be called inside a tokio runtime
    pub fn start(binding: Binding) -> (Self, mpsc::UnboundedReceiver<UiEffect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            inner: Arc::new(Mutex::new(Inner {
                binding,
                pending: None,
            })),
            timer_effects: tx,
        };
        (session, rx)
    }

    /// Runs the event through the binding and starts or aborts timer tasks
    /// for the timer effects it produced
    pub async fn dispatch(&self, event: UiEvent) -> Result<Vec<UiEffect>, FormError> {
        let mut inner = self.inner.lock().await;
        let effects = inner.binding.dispatch(event)?;

        for effect in &effects {
            match effect {
                UiEffect::CancelSuccessHide { token } => {
                    if let Some((pending, handle)) = inner.pending.take() {
                        if pending == *token {
                            handle.abort();
                            debug!(token = token.id(), "success timer aborted");
                        } else {
                            inner.pending = Some((pending, handle));
                        }
                    }
                }
                UiEffect::ScheduleSuccessHide { token, delay_ms } => {
                    let handle = self.spawn_timer(*token, Duration::from_millis(*delay_ms));
                    if let Some((_, previous)) = inner.pending.replace((*token, handle)) {
                        previous.abort();
                    }
                }
                _ => {}
            }
        }

        Ok(effects)
    }

    fn spawn_timer(&self, token: TimerToken, delay: Duration) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let tx = self.timer_effects.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut inner = inner.lock().await;
            if matches!(inner.pending, Some((pending, _)) if pending == token) {
                inner.pending = None;
            }
            for effect in inner.binding.timer_elapsed(token) {
                // Receiver dropped: nobody is rendering anymore
                if tx.send(effect).is_err() {
                    break;
                }
            }
        })
    }

    /// Token of the timer task still sleeping, if any
    pub async fn pending_timer(&self) -> Option<TimerToken> {
        self.inner.lock().await.pending.as_ref().map(|(token, _)| *token)
    }

    /// Runs `f` against the binding, e.g. to inspect state or unbind
    pub async fn with_binding<R>(&self, f: impl FnOnce(&mut Binding) -> R) -> R {
        let mut inner = self.inner.lock().await;
        f(&mut inner.binding)
    }
}
