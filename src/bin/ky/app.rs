//! Demo builder and runner

use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use ky_dsp::{dsp::math::mtof, graph::Source, MAX_BLOCK_SIZE};

use crate::voice;

#[derive(Debug, Clone, Copy)]
pub enum Scene {
    Sine,
    Saw,
    Pluck,
}

pub struct Demo {
    scene: Scene,
    note_ms: u64,
    repeat: usize,
}

impl Demo {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            note_ms: 500,
            repeat: 1,
        }
    }

    /// Time between notes
    pub fn note_ms(mut self, ms: u64) -> Self {
        self.note_ms = ms;
        self
    }

    pub fn repeat(mut self, times: usize) -> Self {
        self.repeat = times.max(1);
        self
    }

    /// Play `melody` (MIDI notes) and return once it has finished.
    pub fn run(self, melody: &[f32]) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        println!("=== ky ===");
        println!("Scene: {:?}", self.scene);
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);

        let (mut source, mut notes) =
            voice::build(self.scene, sample_rate).wrap_err("failed to build voice")?;

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    source.render(block);

                    // Mono to all channels, with headroom for the reverb sum
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s * 0.2;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;
        println!("Playing... Press Ctrl+C to stop");

        for note in melody.iter().cycle().take(melody.len() * self.repeat) {
            if !notes.play(mtof(*note)) {
                log::warn!("parameter queue full, dropped note {note}");
            }
            std::thread::sleep(Duration::from_millis(self.note_ms));
        }

        // Let the tail ring out
        std::thread::sleep(Duration::from_secs(2));
        Ok(())
    }
}
