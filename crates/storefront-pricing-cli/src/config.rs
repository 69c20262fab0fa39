use std::fs;
use std::path::Path;

use storefront_pricing_core::pricing::HouseDefaults;

/// Resolve the house defaults: the given file if any, else built-ins.
///
/// `.json` files are parsed as JSON; anything else as YAML.
pub fn load_house_defaults(path: Option<&str>) -> Result<HouseDefaults, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::debug!("no config file, using built-in house defaults");
        return Ok(HouseDefaults::default());
    };

    let p = Path::new(path);
    let contents = fs::read_to_string(p)
        .map_err(|e| format!("Failed to read config '{}': {}", p.display(), e))?;

    let is_json = p
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let defaults = if is_json {
        HouseDefaults::from_json_str(&contents)?
    } else {
        HouseDefaults::from_yaml_str(&contents)?
    };

    tracing::debug!(
        path = %p.display(),
        margin = %defaults.margin_percent,
        "loaded house defaults"
    );
    Ok(defaults)
}
