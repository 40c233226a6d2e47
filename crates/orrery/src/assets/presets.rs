//! Built-in systems.

use glam::Vec2;

use crate::api::types::Rgb;
use crate::assets::config::SystemConfig;
use crate::core::bodies::BodyDesc;
use crate::core::time::TimeConfig;
use crate::renderer::camera::CameraConfig;

/// Planet row: name, radius, orbit radius, period in years, color, initial phase, ring.
type PlanetRow = (&'static str, f32, f32, f64, Rgb, f64, bool);
/// Moon row: name, radius, orbit radius, period in days, color, initial phase.
type MoonRow = (&'static str, f32, f32, f64, Rgb, f64);

/// Sun with nine planets, their major moons, and ringed giants.
/// Planet periods are in years, moon periods in days. Speed keys step by 1.2x.
pub fn solar_system() -> SystemConfig {
    let planets: [(PlanetRow, &[MoonRow]); 9] = [
        (("Mercury", 6.0, 60.0, 0.24, Rgb::new(200, 200, 200), 0.1, false), &[]),
        (("Venus", 9.0, 90.0, 0.62, Rgb::new(255, 165, 0), 0.5, false), &[]),
        (
            ("Earth", 10.0, 130.0, 1.0, Rgb::BLUE, 1.0, false),
            &[("Moon", 3.0, 20.0, 27.3, Rgb::new(150, 150, 150), 0.0)],
        ),
        (
            ("Mars", 8.0, 170.0, 1.88, Rgb::new(255, 80, 80), 1.8, false),
            &[
                ("Phobos", 2.0, 15.0, 0.319, Rgb::new(160, 160, 160), 0.3),
                ("Deimos", 2.0, 22.0, 1.263, Rgb::new(180, 180, 180), 0.6),
            ],
        ),
        (
            ("Jupiter", 25.0, 220.0, 11.86, Rgb::new(255, 200, 150), 3.0, true),
            &[
                ("Io", 4.0, 30.0, 1.77, Rgb::new(255, 200, 100), 0.1),
                ("Europa", 4.0, 38.0, 3.55, Rgb::new(180, 180, 220), 0.3),
                ("Ganymede", 5.0, 46.0, 7.15, Rgb::new(150, 150, 200), 0.5),
                ("Callisto", 5.0, 54.0, 16.7, Rgb::new(140, 140, 160), 0.7),
            ],
        ),
        (
            ("Saturn", 22.0, 280.0, 29.45, Rgb::new(255, 230, 150), 5.0, true),
            &[
                ("Titan", 5.0, 30.0, 15.95, Rgb::new(230, 200, 150), 0.2),
                ("Rhea", 4.0, 40.0, 4.52, Rgb::new(220, 210, 200), 0.5),
                ("Iapetus", 4.0, 48.0, 79.3, Rgb::new(200, 190, 180), 0.7),
            ],
        ),
        (
            ("Uranus", 18.0, 340.0, 84.02, Rgb::new(150, 255, 255), 7.0, true),
            &[
                ("Ariel", 3.0, 22.0, 1.41, Rgb::new(180, 200, 200), 0.3),
                ("Umbriel", 4.0, 30.0, 2.52, Rgb::new(160, 190, 190), 0.6),
                ("Titania", 4.0, 38.0, 4.14, Rgb::new(140, 170, 170), 0.9),
            ],
        ),
        (
            ("Neptune", 17.0, 390.0, 164.8, Rgb::new(100, 150, 255), 8.0, true),
            &[("Triton", 5.0, 28.0, 5.88, Rgb::new(120, 170, 210), 0.4)],
        ),
        (
            ("Pluto", 5.0, 430.0, 248.0, Rgb::new(180, 180, 200), 9.0, false),
            &[("Charon", 3.0, 20.0, 6.39, Rgb::new(160, 160, 180), 0.1)],
        ),
    ];

    let mut bodies = vec![BodyDesc::root("Sun", 30.0, Rgb::YELLOW)];
    for ((name, radius, orbit, years, color, phase, ring), moons) in planets {
        let mut planet = BodyDesc::orbiting(name, 0, radius, orbit, years, color)
            .in_years()
            .with_phase(phase);
        if ring {
            planet = planet.with_ring();
        }
        let planet_index = bodies.len();
        bodies.push(planet);
        for &(name, radius, orbit, days, color, phase) in moons {
            bodies.push(BodyDesc::orbiting(name, planet_index, radius, orbit, days, color).with_phase(phase));
        }
    }

    SystemConfig {
        time: TimeConfig { speed_step: 1.2, ..TimeConfig::default() },
        camera: CameraConfig { pan: Vec2::new(700.0, 500.0), ..CameraConfig::default() },
        bodies,
        ..SystemConfig::default()
    }
}

/// Sun, Earth and Moon at a scale where eclipses are visible.
/// Runs at 60 simulated days per second.
pub fn sun_earth_moon() -> SystemConfig {
    SystemConfig {
        time: TimeConfig { days_per_second: 60.0, ..TimeConfig::default() },
        camera: CameraConfig { pan: Vec2::new(450.0, 300.0), ..CameraConfig::default() },
        bodies: vec![
            BodyDesc::root("Sun", 50.0, Rgb::new(255, 255, 100)),
            BodyDesc::orbiting("Earth", 0, 20.0, 220.0, 365.25, Rgb::new(100, 150, 255)),
            BodyDesc::orbiting("Moon", 1, 8.0, 50.0, 29.53, Rgb::new(200, 200, 200)),
        ],
        ..SystemConfig::default()
    }
}

/// Look a preset up by name.
pub fn by_name(name: &str) -> Option<SystemConfig> {
    match name {
        "solar-system" | "solar_system" => Some(solar_system()),
        "sun-earth-moon" | "sun_earth_moon" => Some(sun_earth_moon()),
        _ => None,
    }
}
