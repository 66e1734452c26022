use super::traits::MediaElement;
use anyhow::Result;

/// Silent element used when no audio output device is available.
///
/// Keeps the native state (source, paused, position, volume) so the rest of
/// the player behaves normally, but never produces sound or learns a duration.
pub struct NullMedia {
    source: Option<String>,
    paused: bool,
    position: f64,
    volume: f32,
}

impl Default for NullMedia {
    fn default() -> Self {
        Self {
            source: None,
            paused: true,
            position: 0.0,
            volume: 1.0,
        }
    }
}

impl MediaElement for NullMedia {
    fn set_source(&mut self, url: &str) -> Result<()> {
        self.source = Some(url.to_string());
        self.position = 0.0;
        self.paused = true;
        Ok(())
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            anyhow::bail!("no source loaded");
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.paused = true;
        Ok(())
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, secs: f64) -> Result<()> {
        self.position = secs.max(0.0);
        Ok(())
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn set_volume(&mut self, level: f32) {
        self.volume = level;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn take_ended(&mut self) -> bool {
        false
    }
}
