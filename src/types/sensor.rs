/// Returns the category of a sensor identifier: the part before the first
/// `_`. Sensors like `"sds011_43258"` and `"sds011_43295"` share the
/// category `"sds011"`. An identifier without an underscore is its own
/// category.
pub fn category(sensor: &str) -> &str {
    match sensor.split_once('_') {
        Some((prefix, _)) => prefix,
        None => sensor,
    }
}
