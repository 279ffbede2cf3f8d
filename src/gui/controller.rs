use std::time::{Duration, Instant};

use kiss3d::event::{Action, Event, Key, WindowEvent};

use super::view::View;
use crate::{Error, Result};

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::G;
const KEY_SLOW_DOWN: Key = Key::H;
const KEY_TOGGLE_ANIMATION: Key = Key::Space;

pub struct Controller {
    clock: FrameClock,
    fps_counter: FpsCounter,
}

/// Wall-clock time between frames, scaled into simulated seconds.
pub struct FrameClock {
    last: Instant,
    total: f64,
    time_scale: f64,
}

impl FrameClock {
    /// `time_scale` is simulated seconds per wall-clock second. It has to be
    /// finite and non-negative, so every tick hands out a usable elapsed time.
    pub fn new(time_scale: f64) -> Result<Self> {
        if !(time_scale.is_finite() && time_scale >= 0.0) {
            return Err(Error::InvalidTimeParameter {
                name: "time scale",
                value: time_scale,
            });
        }
        Ok(FrameClock {
            last: Instant::now(),
            total: 0.0,
            time_scale,
        })
    }

    /// Seconds since the previous tick. Long gaps are passed through as-is.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f64() * self.time_scale;
        self.last = now;
        self.total += elapsed;
        elapsed
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Frames per second, averaged over fixed wall-clock windows. Between
/// windows it keeps reporting the last full window's rate.
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    rate: f64,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        FpsCounter {
            window,
            window_start: Instant::now(),
            frames: 0,
            rate: 0.0,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn frame_finished(&mut self) {
        self.frames += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed > self.window {
            self.rate = f64::from(self.frames) / elapsed.as_secs_f64();
            self.window_start = Instant::now();
            self.frames = 0;
        }
    }
}

impl Controller {
    pub fn new(clock: FrameClock) -> Self {
        Controller {
            clock,
            fps_counter: FpsCounter::new(Duration::from_secs(1)),
        }
    }

    pub fn process_event(&mut self, event: Event, view: &mut View) {
        match event.value {
            WindowEvent::Key(KEY_TOGGLE_ANIMATION, Action::Press, _) => {
                view.toggle_animation();
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                view.speed_up();
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                view.slow_down();
            }
            _ => {}
        }
    }

    pub fn tick(&mut self) -> f64 {
        self.clock.tick()
    }

    pub fn total_time(&self) -> f64 {
        self.clock.total()
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.rate()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.frame_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    #[test]
    fn test_clock_is_scaled_and_accumulates() {
        let mut clock = FrameClock::new(10.0).unwrap();
        thread::sleep(Duration::from_millis(20));
        let first = clock.tick();
        assert!(first >= 0.2, "{}", first);

        let second = clock.tick();
        assert!(second >= 0.0);
        assert_eq!(clock.total(), first + second);
    }

    #[test]
    fn test_clock_rejects_unusable_time_scale() {
        for &scale in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY].iter() {
            assert!(matches!(
                FrameClock::new(scale),
                Err(Error::InvalidTimeParameter {
                    name: "time scale",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_paused_clock_never_goes_backwards() {
        let mut clock = FrameClock::new(0.0).unwrap();
        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.total(), 0.0);
    }

    #[test]
    fn test_fps_rate_after_window() {
        let mut fps = FpsCounter::new(Duration::from_millis(10));
        assert_eq!(fps.rate(), 0.0);

        fps.frame_finished();
        thread::sleep(Duration::from_millis(20));
        fps.frame_finished();
        // Two frames in a little over 20 ms
        assert!(fps.rate() > 0.0 && fps.rate() <= 100.0, "{}", fps.rate());
    }
}
