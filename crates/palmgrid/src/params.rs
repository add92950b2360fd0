//! Named-parameter registry for external control surfaces.
//!
//! Control UIs bind tunables by stable string name. The registry holds no
//! pointers into [`TrackerConfig`]; lookup and assignment go through the
//! accessors here, so the config structs stay plain data.

use std::fmt;

use crate::config::{PointerConfig, TrackerConfig};

/// Display metadata for one tunable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable external name, camelCase by convention.
    pub name: &'static str,
    /// Decimal places a slider UI should render.
    pub precision: u32,
    /// Upper bound for the slider range; lower bound is always zero.
    pub max: f32,
}

/// Returned by [`set_param`] and [`get_param`] for an unrecognized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParam(pub String);

impl fmt::Display for UnknownParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tracker parameter `{}`", self.0)
    }
}

impl std::error::Error for UnknownParam {}

const SPECS: &[ParamSpec] = &[
    ParamSpec { name: "zLowThresh", precision: 3, max: 1.0 },
    ParamSpec { name: "zHighThresh", precision: 3, max: 2.0 },
    ParamSpec { name: "distanceClip", precision: 2, max: 4.0 },
    ParamSpec { name: "strengthClip", precision: 3, max: 1.0 },
    ParamSpec { name: "minContourArea", precision: 0, max: 10000.0 },
    ParamSpec { name: "minDefectDepth", precision: 0, max: 100.0 },
    ParamSpec { name: "maxTipAngle", precision: 0, max: 180.0 },
    ParamSpec { name: "tipSeparation", precision: 0, max: 100.0 },
    ParamSpec { name: "xMin", precision: 0, max: 320.0 },
    ParamSpec { name: "xMax", precision: 0, max: 320.0 },
    ParamSpec { name: "yMin", precision: 0, max: 240.0 },
    ParamSpec { name: "yMax", precision: 0, max: 240.0 },
    ParamSpec { name: "clickDebounce", precision: 0, max: 30.0 },
];

/// All registered tunables, in display order.
pub fn param_specs() -> &'static [ParamSpec] {
    SPECS
}

/// Current value of a tunable by external name.
pub fn get_param(config: &TrackerConfig, name: &str) -> Result<f32, UnknownParam> {
    let v = match name {
        "zLowThresh" => config.z_low_thresh,
        "zHighThresh" => config.z_high_thresh,
        "distanceClip" => config.distance_clip,
        "strengthClip" => config.strength_clip,
        "minContourArea" => config.min_contour_area as f32,
        "minDefectDepth" => config.min_defect_depth as f32,
        "maxTipAngle" => config.max_tip_angle_deg as f32,
        "tipSeparation" => config.tip_separation as f32,
        "xMin" => config.roi.x_min as f32,
        "xMax" => config.roi.x_max as f32,
        "yMin" => config.roi.y_min as f32,
        "yMax" => config.roi.y_max as f32,
        "clickDebounce" => config.click_debounce as f32,
        _ => return Err(UnknownParam(name.to_owned())),
    };
    Ok(v)
}

/// Assign a tunable by external name. Integral targets truncate.
pub fn set_param(config: &mut TrackerConfig, name: &str, value: f32) -> Result<(), UnknownParam> {
    match name {
        "zLowThresh" => config.z_low_thresh = value,
        "zHighThresh" => config.z_high_thresh = value,
        "distanceClip" => config.distance_clip = value,
        "strengthClip" => config.strength_clip = value,
        "minContourArea" => config.min_contour_area = value as f64,
        "minDefectDepth" => config.min_defect_depth = value as f64,
        "maxTipAngle" => config.max_tip_angle_deg = value as f64,
        "tipSeparation" => config.tip_separation = value as f64,
        "xMin" => config.roi.x_min = value.max(0.0) as u32,
        "xMax" => config.roi.x_max = value.max(0.0) as u32,
        "yMin" => config.roi.y_min = value.max(0.0) as u32,
        "yMax" => config.roi.y_max = value.max(0.0) as u32,
        "clickDebounce" => config.click_debounce = value.max(0.0) as u32,
        _ => return Err(UnknownParam(name.to_owned())),
    }
    Ok(())
}

const POINTER_SPECS: &[ParamSpec] = &[
    ParamSpec { name: "proximity", precision: 2, max: 4.0 },
    ParamSpec { name: "strengthMin", precision: 3, max: 1.0 },
    ParamSpec { name: "strengthGain", precision: 1, max: 100.0 },
    ParamSpec { name: "clickDebounce", precision: 0, max: 30.0 },
];

/// Pointer-side tunables, in display order.
pub fn pointer_param_specs() -> &'static [ParamSpec] {
    POINTER_SPECS
}

/// Current value of a pointer tunable by external name.
pub fn get_pointer_param(config: &PointerConfig, name: &str) -> Result<f32, UnknownParam> {
    let v = match name {
        "proximity" => config.proximity,
        "strengthMin" => config.strength_min,
        "strengthGain" => config.strength_gain,
        "clickDebounce" => config.click_debounce as f32,
        _ => return Err(UnknownParam(name.to_owned())),
    };
    Ok(v)
}

/// Assign a pointer tunable by external name.
pub fn set_pointer_param(
    config: &mut PointerConfig,
    name: &str,
    value: f32,
) -> Result<(), UnknownParam> {
    match name {
        "proximity" => config.proximity = value,
        "strengthMin" => config.strength_min = value,
        "strengthGain" => config.strength_gain = value,
        "clickDebounce" => config.click_debounce = value.max(0.0) as u32,
        _ => return Err(UnknownParam(name.to_owned())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_spec_round_trips() {
        let mut config = TrackerConfig::default();
        for spec in param_specs() {
            set_param(&mut config, spec.name, 1.0).unwrap();
            assert_eq!(get_param(&config, spec.name).unwrap(), 1.0, "{}", spec.name);
        }
    }

    #[test]
    fn test_set_updates_roi() {
        let mut config = TrackerConfig::default();
        set_param(&mut config, "xMax", 159.0).unwrap();
        assert_eq!(config.roi.x_max, 159);
    }

    #[test]
    fn test_pointer_specs_round_trip() {
        let mut config = PointerConfig::default();
        for spec in pointer_param_specs() {
            set_pointer_param(&mut config, spec.name, 2.0).unwrap();
            assert_eq!(
                get_pointer_param(&config, spec.name).unwrap(),
                2.0,
                "{}",
                spec.name
            );
        }
        assert!(get_pointer_param(&config, "zLowThresh").is_err());
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let mut config = TrackerConfig::default();
        assert!(get_param(&config, "bogus").is_err());
        let err = set_param(&mut config, "bogus", 1.0).unwrap_err();
        assert_eq!(err.to_string(), "unknown tracker parameter `bogus`");
    }
}
