use flora_core::config::DurationClassConfig;

/// Clamp a raw duration into `[0, max_days]`.
///
/// NaN and negative durations become 0, anything above the class maximum
/// (including +inf) becomes the maximum. Never fails.
pub fn clamp_duration(days: f64, class: &DurationClassConfig) -> f64 {
    if days.is_nan() {
        return 0.0;
    }
    // f64::max maps a NaN max_days to 0.0, keeping clamp's min <= max.
    days.clamp(0.0, class.max_days.max(0.0))
}

/// Fraction of the full tabulated effect reached after `days`.
///
/// `clamp(days / full_effect_days, 0, 1)` on the clamped duration.
/// Range: 0.0 – 1.0.
pub fn duration_scale(days: f64, class: &DurationClassConfig) -> f64 {
    let days = clamp_duration(days, class);
    if class.full_effect_days <= 0.0 {
        return if days > 0.0 { 1.0 } else { 0.0 };
    }
    (days / class.full_effect_days).clamp(0.0, 1.0)
}

/// Linear interpolation between no effect (scale 0) and the tabulated
/// multiplier (scale 1): `1 + (tabulated - 1) * scale`.
///
/// The endpoints are returned exactly.
pub fn interpolate(tabulated: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        1.0
    } else if scale >= 1.0 {
        tabulated
    } else {
        1.0 + (tabulated - 1.0) * scale
    }
}
