use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Time-base settings. Elapsed simulated time is always measured in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Simulated days per wall-clock second at speed 1.0.
    pub days_per_second: f64,
    /// Speed multiplier at startup.
    pub initial_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Factor applied to the target speed by speed-up / speed-down.
    pub speed_step: f64,
    /// How fast the speed converges on its target (per second).
    pub easing_rate: f64,
    pub start_paused: bool,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            days_per_second: 1.0,
            initial_speed: 1.0,
            min_speed: 0.01,
            max_speed: 100.0,
            speed_step: 1.5,
            easing_rate: 5.0,
            start_paused: false,
        }
    }
}

impl TimeConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = |what: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { what, value })
            }
        };
        positive("days_per_second", self.days_per_second)?;
        positive("speed_step", self.speed_step)?;
        positive("easing_rate", self.easing_rate)?;
        if !(self.min_speed.is_finite()
            && self.max_speed.is_finite()
            && self.min_speed > 0.0
            && self.min_speed <= self.max_speed)
        {
            return Err(ConfigError::InvalidSpeedRange { min: self.min_speed, max: self.max_speed });
        }
        positive("initial_speed", self.initial_speed)
    }
}

/// Simulated-time accumulator.
///
/// Turns wall-clock frame deltas into elapsed simulated days. The speed
/// multiplier eases toward its target instead of jumping, and both stay inside
/// `[min_speed, max_speed]`. Elapsed time never decreases.
#[derive(Debug, Clone)]
pub struct TimeBase {
    elapsed: f64,
    speed: f64,
    target_speed: f64,
    paused: bool,
    config: TimeConfig,
}

impl TimeBase {
    /// Validate `config` and start at elapsed time zero.
    pub fn new(config: TimeConfig) -> ConfigResult<Self> {
        config.validate()?;
        let speed = config.initial_speed.clamp(config.min_speed, config.max_speed);
        Ok(Self {
            elapsed: 0.0,
            speed,
            target_speed: speed,
            paused: config.start_paused,
            config,
        })
    }

    /// Advance by one frame of `frame_dt` wall-clock seconds.
    /// Returns the simulated days added this frame.
    pub fn advance(&mut self, frame_dt: f32) -> f64 {
        let dt = if frame_dt.is_finite() && frame_dt >= 0.0 {
            frame_dt as f64
        } else {
            log::warn!("ignoring invalid frame delta {frame_dt}");
            0.0
        };

        // Easing keeps running while paused so resuming picks up the new speed.
        let blend = (dt * self.config.easing_rate).min(1.0);
        self.speed += (self.target_speed - self.speed) * blend;
        self.speed = self.speed.clamp(self.config.min_speed, self.config.max_speed);

        if self.paused {
            return 0.0;
        }

        let step = dt * self.config.days_per_second * self.speed;
        self.elapsed += step;
        step
    }

    /// Elapsed simulated time in days.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Current (eased) speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn target_speed(&self) -> f64 {
        self.target_speed
    }

    pub fn set_target_speed(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        self.target_speed = target.clamp(self.config.min_speed, self.config.max_speed);
        log::debug!("target speed {:.3}x", self.target_speed);
    }

    pub fn speed_up(&mut self) {
        self.set_target_speed(self.target_speed * self.config.speed_step);
    }

    pub fn speed_down(&mut self) {
        self.set_target_speed(self.target_speed / self.config.speed_step);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("paused: {}", self.paused);
    }

    pub fn config(&self) -> &TimeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_config() -> TimeConfig {
        // Large easing rate: speed reaches its target within one frame.
        TimeConfig { easing_rate: 1000.0, ..TimeConfig::default() }
    }

    #[test]
    fn advances_by_scaled_delta() {
        let mut time = TimeBase::new(TimeConfig { days_per_second: 60.0, ..TimeConfig::default() }).unwrap();
        let step = time.advance(0.5);
        assert!((step - 30.0).abs() < 1e-9);
        assert!((time.elapsed() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn pause_stalls_elapsed() {
        let mut time = TimeBase::new(TimeConfig::default()).unwrap();
        time.advance(1.0);
        time.toggle_pause();
        let before = time.elapsed();
        assert_eq!(time.advance(1.0), 0.0);
        assert_eq!(time.elapsed(), before);
        time.toggle_pause();
        time.advance(1.0);
        assert!(time.elapsed() > before);
    }

    #[test]
    fn invalid_deltas_never_rewind() {
        let mut time = TimeBase::new(TimeConfig::default()).unwrap();
        time.advance(1.0);
        let before = time.elapsed();
        time.advance(-5.0);
        time.advance(f32::NAN);
        time.advance(f32::INFINITY);
        assert_eq!(time.elapsed(), before);
    }

    #[test]
    fn speed_eases_toward_target() {
        let mut time = TimeBase::new(TimeConfig::default()).unwrap();
        time.speed_up();
        assert!((time.target_speed() - 1.5).abs() < 1e-12);
        let dt = 0.05f32;
        time.advance(dt);
        // Partway: blend = dt * 5.0, about 0.25
        let expected = 1.0 + 0.5 * (dt as f64 * 5.0);
        assert!((time.speed() - expected).abs() < 1e-12, "speed was {}", time.speed());
        for _ in 0..200 {
            time.advance(0.05);
        }
        assert!((time.speed() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn speed_is_clamped() {
        let mut time = TimeBase::new(instant_config()).unwrap();
        for _ in 0..100 {
            time.speed_up();
        }
        time.advance(0.1);
        assert_eq!(time.target_speed(), 100.0);
        assert_eq!(time.speed(), 100.0);

        for _ in 0..100 {
            time.speed_down();
        }
        time.advance(0.1);
        assert_eq!(time.target_speed(), 0.01);
        assert!((time.speed() - 0.01).abs() < 1e-12);
        assert!(time.speed() >= 0.01);
    }

    #[test]
    fn easing_continues_while_paused() {
        let mut time = TimeBase::new(instant_config()).unwrap();
        time.set_paused(true);
        time.speed_up();
        time.advance(0.1);
        assert_eq!(time.elapsed(), 0.0);
        assert!((time.speed() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let inverted = TimeConfig { min_speed: 2.0, max_speed: 1.0, ..TimeConfig::default() };
        assert!(matches!(TimeBase::new(inverted), Err(ConfigError::InvalidSpeedRange { .. })));
        let nan = TimeConfig { max_speed: f64::NAN, ..TimeConfig::default() };
        assert!(TimeBase::new(nan).is_err());
    }

    #[test]
    fn validate_rejects_bad_ranges() {
        let bad = TimeConfig { min_speed: 2.0, max_speed: 1.0, ..TimeConfig::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidSpeedRange { .. })));

        let bad = TimeConfig { days_per_second: 0.0, ..TimeConfig::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::NonPositive { what: "days_per_second", .. })));

        assert!(TimeConfig::default().validate().is_ok());
    }
}
