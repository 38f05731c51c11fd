use crate::{graph::node::Source, MAX_BLOCK_SIZE};

/// Multiply a signal by a modulator, sample by sample (amplitude or ring
/// modulation).
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: Source, M: Source> Source for Amplify<N, M> {
    #[inline]
    fn next_sample(&mut self) -> f32 {
        self.signal.next_sample() * self.modulator.next_sample()
    }

    fn render(&mut self, out: &mut [f32]) {
        // Hosts may hand over blocks longer than the scratch buffer
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.signal.render(chunk);

            let frames = &mut self.temp_buffer[..chunk.len()];
            self.modulator.render(frames);

            for (o, m) in chunk.iter_mut().zip(frames.iter()) {
                *o *= *m;
            }
        }
    }
}
