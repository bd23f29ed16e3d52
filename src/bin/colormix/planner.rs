//! Planner - walks the print layer by layer
//!
//! The planner thread owns the `Mixer`. Each layer it reports the new height,
//! stamps that layer's segments with the current block color and pushes them
//! to the stepper thread. Control messages from the UI arrive through a ring
//! buffer and are applied between layers.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use colormix::{
    height::{GradientSettings, RandomSettings},
    MixResult, Mixer, Segment, Wide,
};
use rtrb::{Consumer, Producer, PushError};
use tracing::{debug, info, warn};

use crate::{
    settings::PrintSettings,
    ui::state::{ActiveMode, ControlMessage, PlannerUpdate},
    RunMode, STEPPERS,
};

/// Wall time spent per layer, so the print is watchable.
const LAYER_PACE: Duration = Duration::from_millis(40);
const IDLE_PACE: Duration = Duration::from_millis(10);

pub struct Planner {
    mixer: Mixer<Wide, STEPPERS>,
    print: PrintSettings,
    segments: Producer<Segment<Wide, STEPPERS>>,
    control: Consumer<ControlMessage>,
    updates: Producer<PlannerUpdate>,
    layer: u32,
    planned: u64,
}

impl Planner {
    pub fn new(
        mixer: Mixer<Wide, STEPPERS>,
        print: PrintSettings,
        segments: Producer<Segment<Wide, STEPPERS>>,
        control: Consumer<ControlMessage>,
        updates: Producer<PlannerUpdate>,
    ) -> Self {
        Self {
            mixer,
            print,
            segments,
            control,
            updates,
            layer: 0,
            planned: 0,
        }
    }

    /// Select the start tool and set up the requested height mode over the
    /// whole print.
    pub fn start(&mut self, mode: RunMode, tool: u8, start_tool: u8, end_tool: u8) -> MixResult<()> {
        self.mixer.select_tool(tool)?;
        match mode {
            RunMode::Tool => {}
            RunMode::Gradient => {
                let live = self.mixer.configure_gradient(GradientSettings {
                    start_z: 0.0,
                    end_z: self.print.height,
                    start_tool,
                    end_tool,
                    pin: None,
                })?;
                if !live {
                    warn!(start_tool, end_tool, "gradient did not start");
                }
            }
            RunMode::Random => {
                let band = self.mixer.config().random_band.max(self.print.layer_height);
                self.mixer.configure_random(RandomSettings {
                    start_z: 0.0,
                    end_z: self.print.height,
                    band,
                    extruders: STEPPERS as u8,
                })?;
            }
        }
        Ok(())
    }

    fn z(&self) -> f32 {
        self.layer as f32 * self.print.layer_height
    }

    pub fn snapshot(&self) -> PlannerUpdate {
        let mode = if self.mixer.gradient().is_enabled() {
            ActiveMode::Gradient
        } else if self.mixer.random().is_enabled() {
            ActiveMode::Random
        } else {
            ActiveMode::Tool
        };
        PlannerUpdate {
            z: self.z(),
            height: self.print.height,
            layer: self.layer,
            layers: self.print.layers(),
            tool: self.mixer.selected_tool(),
            mode,
            paused: self.mixer.is_paused(),
            finished: self.layer > self.print.layers(),
            requested: self.mixer.color_for_block().shares(),
            mix: *self.mixer.percentages(),
            planned: self.planned,
        }
    }

    fn publish(&mut self) {
        let update = self.snapshot();
        let _ = self.updates.push(update);
    }

    fn apply_control(&mut self) {
        while let Ok(message) = self.control.pop() {
            match message {
                ControlMessage::TogglePause => {
                    let paused = !self.mixer.is_paused();
                    self.mixer.set_paused(paused);
                    info!(paused, z = self.z(), "print pause toggled");
                }
                ControlMessage::ResetPalette => {
                    let rewritten = self.mixer.reset_tools(true);
                    info!(rewritten, "palette reset from the monitor");
                }
            }
        }
    }

    /// Plan the whole print, then idle until told to stop.
    pub fn run(mut self, stop: &AtomicBool) {
        let layers = self.print.layers();
        while !stop.load(Ordering::Relaxed) {
            self.apply_control();

            if self.mixer.is_paused() || self.layer > layers {
                self.publish();
                thread::sleep(IDLE_PACE);
                continue;
            }

            let z = self.z();
            if self.mixer.update_for_height(z, false) {
                debug!(z, mix = %self.mixer.percentages(), "block color changed");
            }
            for _ in 0..self.print.segments_per_layer {
                let segment = self.mixer.plan_segment(self.print.steps_per_segment);
                if !self.enqueue(segment, stop) {
                    return;
                }
            }

            self.publish();
            self.layer += 1;
            if self.layer > layers {
                info!(planned = self.planned, "print fully planned");
            }
            thread::sleep(LAYER_PACE);
        }
    }

    /// Push with back-pressure; false if stopped while waiting.
    fn enqueue(&mut self, mut segment: Segment<Wide, STEPPERS>, stop: &AtomicBool) -> bool {
        loop {
            match self.segments.push(segment) {
                Ok(()) => {
                    self.planned += 1;
                    return true;
                }
                Err(PushError::Full(back)) => {
                    if stop.load(Ordering::Relaxed) {
                        return false;
                    }
                    segment = back;
                    thread::sleep(Duration::from_millis(1));
                }
            }
        }
    }
}
