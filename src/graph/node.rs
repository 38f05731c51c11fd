use crate::dsp::{
    filter::{Average, Delta, History, OnePole, SlewRateLimit},
    noise::Noise,
    oscillator::{Cycle, Phasor, QuasiSaw},
    pluck::PluckedString,
    reverb::FdnReverb,
};

/// A unit that produces one sample per call and takes no input.
pub trait Source: Send {
    fn next_sample(&mut self) -> f32;

    /// Fill `out`, calling [`next_sample`](Source::next_sample) exactly once
    /// per frame in order.
    fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// A unit that maps one input sample to one output sample.
pub trait Processor: Send {
    fn process(&mut self, input: f32) -> f32;

    /// Process `buffer` in place, one call per frame in order.
    fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Allow boxed sources to be used as sources (for dynamic dispatch)
impl Source for Box<dyn Source> {
    fn next_sample(&mut self) -> f32 {
        (**self).next_sample()
    }

    fn render(&mut self, out: &mut [f32]) {
        (**self).render(out)
    }
}

impl Processor for Box<dyn Processor> {
    fn process(&mut self, input: f32) -> f32 {
        (**self).process(input)
    }

    fn process_block(&mut self, buffer: &mut [f32]) {
        (**self).process_block(buffer)
    }
}

impl Source for Phasor {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        Phasor::process(self)
    }
}

impl Source for Cycle {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        Cycle::process(self)
    }
}

impl Source for QuasiSaw {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        QuasiSaw::process(self)
    }
}

impl Source for Noise {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        Noise::next_sample(self)
    }
}

impl Source for PluckedString {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        PluckedString::process(self)
    }
}

impl Processor for History {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        History::process(self, input)
    }
}

impl Processor for Delta {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        Delta::process(self, input)
    }
}

impl Processor for Average {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        Average::process(self, input)
    }
}

impl Processor for OnePole {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        OnePole::process(self, input)
    }
}

impl Processor for SlewRateLimit {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        SlewRateLimit::process(self, input)
    }
}

impl<const N: usize> Processor for FdnReverb<N> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        FdnReverb::process(self, input)
    }
}
