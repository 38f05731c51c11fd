use crate::graph::node::{Processor, Source};

/*
Serial Signal Chain (Through)
=============================

Through connects two units in series: every sample the first one produces
(or transforms) is handed straight to the second.

  Source → Processor:     Through is itself a Source.
  Processor → Processor:  Through is itself a Processor.

Block rendering keeps the same order as calling each stage per sample,
because no stage looks at anything but its own input:

  render:   first.render(out)  →  second.process_block(out)

     let voice = Cycle::sine()
         .with_frequency(220.0, sr)?
         .through(OnePole::new(800.0, sr)?)
         .through(SlewRateLimit::new(0.0, 50.0, sr)?);

Through vs Amplify:
-------------------
  Through: [Source] ──→ [Processor] ──→ output

  Amplify: [Signal] ──┬──→ (×) ──→ output
           [Mod]    ──┘
*/

pub struct Through<A, B> {
    first: A,
    second: B,
}

impl<A, B> Through<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<S: Source, P: Processor> Source for Through<S, P> {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.second.process(self.first.next_sample())
    }

    fn render(&mut self, out: &mut [f32]) {
        self.first.render(out);
        self.second.process_block(out);
    }
}

impl<A: Processor, B: Processor> Processor for Through<A, B> {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.second.process(self.first.process(input))
    }

    fn process_block(&mut self, buffer: &mut [f32]) {
        self.first.process_block(buffer);
        self.second.process_block(buffer);
    }
}
