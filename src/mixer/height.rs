use rand::RngCore;
use tracing::{debug, trace};

use crate::{
    config::GradientRetention,
    error::{MixError, MixMode, MixResult},
    fixed::MixWidth,
    height::{GradientSettings, RandomSettings},
};

use super::Mixer;

impl<W: MixWidth, const N: usize, R: RngCore> Mixer<W, N, R> {
    /// Planner hook: the height of the block about to be planned.
    ///
    /// Ignored while paused or while the mixing switch is off. Returns true
    /// when the block color changed.
    pub fn update_for_height(&mut self, z: f32, force: bool) -> bool {
        if self.paused || !self.enabled {
            return false;
        }
        self.current_z = z;

        if self.gradient.is_enabled() {
            self.gradient_control(z, force)
        } else if self.random.is_enabled() {
            self.random_control(z, force)
        } else {
            false
        }
    }

    // ---- gradient ----

    /// Set up a gradient. Returns whether it is now live; settings that
    /// break the ordering rules are kept but leave it off.
    pub fn configure_gradient(&mut self, settings: GradientSettings) -> MixResult<bool> {
        self.require(MixMode::Gradient)?;
        self.tools.check(settings.start_tool)?;
        self.tools.check(settings.end_tool)?;
        if let Some(pin) = settings.pin {
            self.tools.check(pin)?;
        }

        if let Err(err) = settings.check() {
            debug!(%err, ?settings, "gradient stays off");
        }
        self.gradient.configure(settings);
        Ok(self.refresh_gradient())
    }

    pub fn clear_gradient(&mut self) -> MixResult<()> {
        self.require(MixMode::Gradient)?;
        self.gradient.clear();
        debug!("gradient cleared");
        Ok(())
    }

    /// Re-evaluate gradient enablement. A live gradient turns random mixing
    /// off and blends for the current height straight away; the next height
    /// update still recomputes.
    pub(super) fn refresh_gradient(&mut self) -> bool {
        if !self.config.gradient {
            return false;
        }
        let was = self.gradient.is_enabled();
        let live = self.gradient.refresh(&self.tools);
        if live {
            self.random.yield_to_gradient();
            if let Some(mix) = self.gradient.blend(self.current_z, true) {
                self.percent = mix;
                self.collector.load_percent(&mix);
            }
            self.gradient.rearm();
            debug!(
                start = %self.gradient.start_mix(),
                end = %self.gradient.end_mix(),
                z = self.current_z,
                "gradient live"
            );
        } else if was {
            debug!("gradient off");
        }
        live
    }

    fn gradient_control(&mut self, z: f32, force: bool) -> bool {
        if z >= self.gradient.end_z() {
            let end_tool = self.gradient.settings().end_tool;
            let retention = self.config.gradient_retention;
            // a kept gradient already parked on its end tool just holds the end mix
            if retention == GradientRetention::Clear || self.tools.selected() != end_tool {
                if let Err(err) = self.tools.select(end_tool) {
                    debug!(%err, "gradient end tool vanished");
                }
                self.refresh_percentages();
                match retention {
                    GradientRetention::Clear => self.gradient.clear(),
                    GradientRetention::Keep => {
                        self.refresh_gradient();
                    }
                }
                debug!(z, end_tool, ?retention, "gradient reached its end");
                return true;
            }
        }

        match self.gradient.blend(z, force) {
            Some(mix) => {
                self.percent = mix;
                self.collector.load_percent(&mix);
                trace!(z, %mix, "gradient blend");
                true
            }
            None => false,
        }
    }

    // ---- random ----

    /// Set up random mixing. Returns whether it is now live; a live random
    /// mix selects tool 0, turns the gradient off and rolls straight away.
    pub fn configure_random(&mut self, settings: RandomSettings) -> MixResult<bool> {
        self.require(MixMode::Random)?;
        if let Err(err) = settings.check() {
            debug!(%err, ?settings, "random mix stays off");
        }
        self.random.configure(settings);
        Ok(self.refresh_random())
    }

    pub fn clear_random(&mut self) -> MixResult<()> {
        self.require(MixMode::Random)?;
        self.random.clear();
        debug!("random mix cleared");
        Ok(())
    }

    fn refresh_random(&mut self) -> bool {
        let live = self.random.refresh();
        if !live {
            return false;
        }

        // tool 0 always exists: validation requires a user tool
        if let Err(err) = self.tools.select(0) {
            debug!(%err, "random mix could not select tool 0");
        }
        self.gradient.yield_to_random();
        self.refresh_percentages();
        debug!(settings = ?self.random.settings(), "random mix live");

        let z = self.current_z;
        self.random_control(z, true);
        true
    }

    fn random_control(&mut self, z: f32, force: bool) -> bool {
        if z > self.random.end_z() {
            self.random.clear();
            self.refresh_percentages();
            debug!(z, "random mix finished");
            return true;
        }

        match self.random.roll(z, force, &mut self.rng) {
            Some(mix) => {
                self.percent = mix;
                self.collector.load_percent(&mix);
                trace!(z, %mix, "random band");
                true
            }
            None => false,
        }
    }

    fn require(&self, mode: MixMode) -> MixResult<()> {
        let available = match mode {
            MixMode::Gradient => self.config.gradient,
            MixMode::Random => self.config.random,
        };
        if available {
            Ok(())
        } else {
            Err(MixError::ModeUnavailable(mode))
        }
    }
}
