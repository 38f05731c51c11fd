//! Demo voices: one primitive per scene, each followed by the reverb.

use ky_dsp::{
    control::{Controlled, ParamHandle},
    dsp::{Cycle, FdnReverb, OnePole, PluckedString, QuasiSaw, Rng},
    graph::{Source, SourceExt},
    params::{Configure, CycleParams, PluckParams, QuasiSawParams, ReverbParams},
    ConfigError,
};

use crate::app::Scene;

/// Lowest note the plucked voice can play.
const LOWEST_PLUCK_HZ: f32 = 55.0;

/// Plucked string that re-excites itself whenever it is retuned.
pub struct PluckVoice {
    string: PluckedString,
    rng: Rng,
}

impl PluckVoice {
    fn new(sample_rate: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            string: PluckedString::new(LOWEST_PLUCK_HZ, sample_rate)?,
            rng: Rng::new_with_seed(0x6b79),
        })
    }
}

impl Source for PluckVoice {
    fn next_sample(&mut self) -> f32 {
        self.string.process()
    }
}

impl Configure<PluckParams> for PluckVoice {
    fn configure(&mut self, params: &PluckParams, sample_rate: f32) -> Result<(), ConfigError> {
        self.string.configure(params, sample_rate)?;
        self.string.pluck(0.8, &mut self.rng);
        Ok(())
    }
}

/// Control-side end of whichever voice is playing.
pub enum NoteHandle {
    Sine(ParamHandle<CycleParams>),
    Saw(ParamHandle<QuasiSawParams>),
    Pluck(ParamHandle<PluckParams>),
}

impl NoteHandle {
    /// Queue a new pitch. Returns false if the audio thread is behind.
    pub fn play(&mut self, frequency: f32) -> bool {
        match self {
            NoteHandle::Sine(tx) => tx.push(CycleParams { frequency }),
            NoteHandle::Saw(tx) => tx.push(QuasiSawParams {
                frequency,
                virtual_filter: 0.7,
            }),
            NoteHandle::Pluck(tx) => tx.push(PluckParams {
                frequency,
                decay_time: 1.5,
            }),
        }
    }
}

pub fn build(scene: Scene, sample_rate: f32) -> Result<(Box<dyn Source>, NoteHandle), ConfigError> {
    let reverb = FdnReverb::<5>::new(&ReverbParams::default(), sample_rate)?;

    let (voice, handle): (Box<dyn Source>, NoteHandle) = match scene {
        Scene::Sine => {
            let (voice, tx) = Controlled::new(Cycle::sine(), sample_rate);
            (Box::new(voice.through(reverb)), NoteHandle::Sine(tx))
        }
        Scene::Saw => {
            let (voice, tx) = Controlled::new(QuasiSaw::default(), sample_rate);
            let voice = voice
                .through(OnePole::new(2_500.0, sample_rate)?)
                .through(reverb);
            (Box::new(voice), NoteHandle::Saw(tx))
        }
        Scene::Pluck => {
            let (voice, tx) = Controlled::new(PluckVoice::new(sample_rate)?, sample_rate);
            (Box::new(voice.through(reverb)), NoteHandle::Pluck(tx))
        }
    };
    Ok((voice, handle))
}
