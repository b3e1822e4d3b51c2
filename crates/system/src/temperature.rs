use pulse_core::Temperature;
use sysinfo::Components;

/// Sensor family reported by Intel's core temperature driver.
const PREFERRED_SENSOR: &str = "coretemp";

/// Best-effort CPU temperature from the platform's sensors.
pub fn read() -> Temperature {
    let components = Components::new_with_refreshed_list();
    pick(components.iter().map(|c| (c.label(), c.temperature())))
}

/// Choose a reading from `(label, celsius)` pairs.
///
/// A `coretemp` sensor wins; otherwise the first sensor with a reading.
pub fn pick<'a, I>(readings: I) -> Temperature
where
    I: IntoIterator<Item = (&'a str, Option<f32>)>,
{
    let mut first = None;
    for (label, value) in readings {
        let Some(celsius) = value.filter(|c| c.is_finite()) else {
            continue;
        };
        if label.to_ascii_lowercase().starts_with(PREFERRED_SENSOR) {
            return Temperature::Celsius(celsius);
        }
        first.get_or_insert(celsius);
    }
    first.map_or(Temperature::Unavailable, Temperature::Celsius)
}
