//! Control-rate parameter hand-off between a UI thread and the audio thread.

/*
Parameter Hand-off
==================

The audio callback owns every unit outright. Other threads never touch a
unit's fields; they push parameter copies into a wait-free single-producer
single-consumer ring and the callback drains it at the start of each block:

  UI thread                         audio thread
  ---------                         ------------
  handle.push(params) ──→ [ring] ──→ receiver.apply_pending(&mut unit)
                                     unit.render(block)

Only the newest pending value is applied, so a UI that sends faster than
blocks are rendered never builds up a backlog of stale settings. A full
ring makes `push` return false; the audio side never waits.
*/

use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    error::ConfigError,
    graph::node::{Processor, Source},
    params::Configure,
};

pub const PARAM_QUEUE_SIZE: usize = 64;

/// Sending half, owned by the control thread.
pub struct ParamHandle<P> {
    tx: Producer<P>,
}

/// Receiving half, owned by the audio thread.
pub struct ParamReceiver<P> {
    rx: Consumer<P>,
}

pub fn param_channel<P>(capacity: usize) -> (ParamHandle<P>, ParamReceiver<P>) {
    let (tx, rx) = RingBuffer::<P>::new(capacity);
    (ParamHandle { tx }, ParamReceiver { rx })
}

impl<P> ParamHandle<P> {
    /// Queue `params` for the next block. Returns false if the queue is full.
    pub fn push(&mut self, params: P) -> bool {
        self.tx.push(params).is_ok()
    }

    pub fn is_abandoned(&self) -> bool {
        self.tx.is_abandoned()
    }
}

impl<P> ParamReceiver<P> {
    /// Drain the queue, keeping only the newest value.
    pub fn latest(&mut self) -> Option<P> {
        let mut latest = None;
        while let Ok(params) = self.rx.pop() {
            latest = Some(params);
        }
        latest
    }

    /// Apply the newest pending value to `unit`, if any. Returns whether a
    /// value was applied. A rejected value leaves the unit unchanged.
    pub fn apply_pending<U: Configure<P>>(
        &mut self,
        unit: &mut U,
        sample_rate: f32,
    ) -> Result<bool, ConfigError> {
        match self.latest() {
            Some(params) => unit.configure(&params, sample_rate).map(|()| true),
            None => Ok(false),
        }
    }
}

/// Call the unit's per-sample operation exactly `out.len()` times, in order.
pub fn render_block<S: Source + ?Sized>(unit: &mut S, out: &mut [f32]) {
    unit.render(out);
}

/// A unit paired with its parameter queue. Pending parameters are applied at
/// the start of every block, never in the middle of one.
pub struct Controlled<U, P> {
    unit: U,
    rx: ParamReceiver<P>,
    sample_rate: f32,
    last_error: Option<ConfigError>,
}

impl<U, P> Controlled<U, P>
where
    U: Configure<P>,
{
    pub fn new(unit: U, sample_rate: f32) -> (Self, ParamHandle<P>) {
        let (handle, rx) = param_channel(PARAM_QUEUE_SIZE);
        let node = Self {
            unit,
            rx,
            sample_rate,
            last_error: None,
        };
        (node, handle)
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    /// The most recent rejected update, cleared when read.
    pub fn take_error(&mut self) -> Option<ConfigError> {
        self.last_error.take()
    }

    fn update(&mut self) {
        if let Err(err) = self.rx.apply_pending(&mut self.unit, self.sample_rate) {
            self.last_error = Some(err);
        }
    }
}

impl<U, P> Source for Controlled<U, P>
where
    U: Source + Configure<P>,
    P: Send,
{
    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.unit.next_sample()
    }

    fn render(&mut self, out: &mut [f32]) {
        self.update();
        self.unit.render(out);
    }
}

impl<U, P> Processor for Controlled<U, P>
where
    U: Processor + Configure<P>,
    P: Send,
{
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.unit.process(input)
    }

    fn process_block(&mut self, buffer: &mut [f32]) {
        self.update();
        self.unit.process_block(buffer);
    }
}
