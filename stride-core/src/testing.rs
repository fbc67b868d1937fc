//! In-memory transport fakes for tests
//!
//! All fakes share a [`Timeline`] so tests can assert the exact interleaving
//! of control point writes and waits.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal_async::delay::DelayNs;
use stride_protocol::Command;

use crate::cancel::CancellationFlag;
use crate::traits::{Ack, CommandSink, NotificationHandler, NotificationSource, SinkError};

/// One observable event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A control point write was attempted
    Write(Command),
    /// Virtual time advanced by this many milliseconds
    Wait(u32),
}

/// Shared log of writes and waits, plus a virtual clock
#[derive(Default)]
pub struct Timeline {
    steps: RefCell<Vec<Step>>,
    raw: RefCell<Vec<Vec<u8>>>,
    now_ms: Cell<u64>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every step, waits unmerged
    pub fn steps(&self) -> Vec<Step> {
        self.steps.borrow().clone()
    }

    /// Steps with consecutive waits merged into one
    pub fn collapsed(&self) -> Vec<Step> {
        let mut out: Vec<Step> = Vec::new();
        for step in self.steps.borrow().iter().copied() {
            match (out.last_mut(), step) {
                (Some(Step::Wait(total)), Step::Wait(ms)) => *total += ms,
                _ => out.push(step),
            }
        }
        out
    }

    /// Raw payloads as written to the control point
    pub fn raw_writes(&self) -> Vec<Vec<u8>> {
        self.raw.borrow().clone()
    }

    /// Virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn push(&self, step: Step) {
        self.steps.borrow_mut().push(step);
    }
}

/// Control point that records every write
pub struct FakeSink<'t> {
    timeline: &'t Timeline,
    failing: Vec<(Command, SinkError)>,
}

impl<'t> FakeSink<'t> {
    pub fn new(timeline: &'t Timeline) -> Self {
        Self {
            timeline,
            failing: Vec::new(),
        }
    }

    /// Fail every write of `command` with `error`
    pub fn failing_on(mut self, command: Command, error: SinkError) -> Self {
        self.failing.push((command, error));
        self
    }
}

impl CommandSink for FakeSink<'_> {
    async fn send(&mut self, payload: &[u8]) -> Result<Ack, SinkError> {
        let command = Command::parse(payload).map_err(|_| SinkError::Rejected)?;
        self.timeline.raw.borrow_mut().push(payload.to_vec());
        self.timeline.push(Step::Write(command));

        match self.failing.iter().find(|(c, _)| *c == command) {
            Some((_, error)) => Err(*error),
            None => Ok(Ack),
        }
    }
}

/// Delay that advances the virtual clock instead of sleeping
///
/// Yields once per call so joined futures get a turn.
pub struct FakeDelay<'t> {
    timeline: &'t Timeline,
    cancel_at: Option<(u64, &'t CancellationFlag)>,
}

impl<'t> FakeDelay<'t> {
    pub fn new(timeline: &'t Timeline) -> Self {
        Self {
            timeline,
            cancel_at: None,
        }
    }

    /// Raise `flag` once virtual time reaches `at_ms`
    pub fn cancel_at(mut self, at_ms: u64, flag: &'t CancellationFlag) -> Self {
        self.cancel_at = Some((at_ms, flag));
        self
    }

    async fn advance(&mut self, ms: u32) {
        self.timeline.push(Step::Wait(ms));
        let now = self.timeline.now_ms.get() + ms as u64;
        self.timeline.now_ms.set(now);

        if let Some((at_ms, flag)) = self.cancel_at {
            if now >= at_ms {
                flag.cancel();
            }
        }

        embassy_futures::yield_now().await;
    }
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.advance(ns / 1_000_000).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.advance(ms).await;
    }
}

/// Notification source that delivers payloads on demand
pub struct FakeSource<H> {
    handler: Option<H>,
    unsubscribed: bool,
    disconnect_after: Option<u32>,
    polls: u32,
}

impl<H> FakeSource<H> {
    pub fn new() -> Self {
        Self {
            handler: None,
            unsubscribed: false,
            disconnect_after: None,
            polls: 0,
        }
    }

    /// Report the link down after `polls` successful connection checks
    pub fn disconnect_after_polls(mut self, polls: u32) -> Self {
        self.disconnect_after = Some(polls);
        self
    }

    pub fn unsubscribed(&self) -> bool {
        self.unsubscribed
    }
}

impl<H: NotificationHandler> FakeSource<H> {
    /// Hand `payload` to the registered handler; false if none is registered
    pub fn deliver(&self, payload: &[u8]) -> bool {
        match &self.handler {
            Some(handler) => {
                handler.on_notification(payload);
                true
            }
            None => false,
        }
    }
}

impl<H: NotificationHandler> NotificationSource<H> for FakeSource<H> {
    type Error = Infallible;

    async fn subscribe(&mut self, handler: H) -> Result<(), Self::Error> {
        self.handler = Some(handler);
        self.unsubscribed = false;
        Ok(())
    }

    async fn unsubscribe(&mut self) -> Result<(), Self::Error> {
        self.handler = None;
        self.unsubscribed = true;
        Ok(())
    }

    async fn is_connected(&mut self) -> bool {
        self.polls += 1;
        match self.disconnect_after {
            Some(limit) => self.polls <= limit,
            None => true,
        }
    }
}
