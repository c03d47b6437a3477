//! Frame scheduling for hosts without a render loop of their own.
//!
//! Runs the usermod hooks in host order around an effect and writes the
//! result to an [`OutputDriver`]. The caller is responsible for sleeping
//! between frames.

use embassy_time::{Duration, Instant};

use crate::color::Rgbw;
use crate::strip::MemoryStrip;
use crate::usermod::UsermodManager;
use crate::OutputDriver;

/// Default target frame rate (90 FPS).
pub const DEFAULT_FPS: u32 = 90;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Source of effect colors for a frame
pub trait FrameSource {
    /// Render a single frame
    fn render(&mut self, now: Instant, leds: &mut [Rgbw]);
}

impl<F: FnMut(Instant, &mut [Rgbw])> FrameSource for F {
    fn render(&mut self, now: Instant, leds: &mut [Rgbw]) {
        self(now, leds);
    }
}

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// Each tick:
/// 1. Ticks every usermod
/// 2. Renders the effect into the strip
/// 3. Lets every usermod draw its overlay
/// 4. Writes the strip to the output driver
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(strip, usermods, driver);
/// scheduler.setup(&settings);
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     let result = scheduler.tick(now, &mut effect);
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<O: OutputDriver> {
    strip: MemoryStrip,
    usermods: UsermodManager,
    output: O,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<O: OutputDriver> FrameScheduler<O> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (90 FPS) for frame timing.
    pub fn new(strip: MemoryStrip, usermods: UsermodManager, output: O) -> Self {
        Self::with_frame_duration(strip, usermods, output, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        strip: MemoryStrip,
        usermods: UsermodManager,
        output: O,
        frame_duration: Duration,
    ) -> Self {
        Self {
            strip,
            usermods,
            output,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Boot sequence: load settings, then set every usermod up.
    ///
    /// Returns `false` if settings were incomplete. The host should then save
    /// [`FrameScheduler::save_settings`] back so defaults become editable.
    pub fn setup(&mut self, settings: &serde_json::Value) -> bool {
        let complete = self.usermods.read_from_config(settings, &self.strip);
        self.usermods.setup();
        complete
    }

    /// Collect settings from every usermod
    pub fn save_settings(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        self.usermods.add_to_config(&mut root);
        serde_json::Value::Object(root)
    }

    /// Process one frame and return timing information.
    pub fn tick<E: FrameSource + ?Sized>(&mut self, now: Instant, effect: &mut E) -> FrameResult {
        // If we've fallen too far behind, skip the backlog
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        self.usermods.tick(now, &self.strip);

        effect.render(now, self.strip.pixels_mut());
        self.usermods.handle_overlay_draw(&mut self.strip);

        self.output.write(self.strip.pixels());

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn strip(&self) -> &MemoryStrip {
        &self.strip
    }

    pub fn usermods(&self) -> &UsermodManager {
        &self.usermods
    }

    pub fn usermods_mut(&mut self) -> &mut UsermodManager {
        &mut self.usermods
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
