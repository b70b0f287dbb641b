//! Palette role assignment

use crate::cluster::WeightedValue;
use crate::normalize::{relative_luminance, round_to, saturation};
use crate::style_spec::{Palette, PaletteColor, PaletteRoles};

/// Luminance a border color is expected to sit near.
const BORDER_LUMINANCE_TARGET: f64 = 0.7;

/// Assign semantic roles to a clustered palette (heaviest first).
///
/// Darkest two become text colors, lightest two background and surface.
/// The most saturated colors that are not background or primary text
/// become primary, secondary and accent. All sorts are stable, so ties go
/// to the heavier color.
pub fn pick_palette_roles(colors: &[WeightedValue<String>]) -> PaletteRoles {
    if colors.is_empty() {
        return PaletteRoles::default();
    }

    let mut by_luminance: Vec<&str> = colors.iter().map(|c| c.value.as_str()).collect();
    by_luminance.sort_by(|a, b| relative_luminance(a).total_cmp(&relative_luminance(b)));

    let text_primary = by_luminance.first().copied();
    let text_secondary = by_luminance.get(1).copied();
    let background = by_luminance.last().copied();
    let surface = by_luminance
        .len()
        .checked_sub(2)
        .and_then(|idx| by_luminance.get(idx))
        .copied();

    let mut by_saturation: Vec<&str> = colors.iter().map(|c| c.value.as_str()).collect();
    by_saturation.sort_by(|a, b| saturation(b).total_cmp(&saturation(a)));
    let saturated: Vec<&str> = by_saturation
        .into_iter()
        .filter(|hex| Some(*hex) != background && Some(*hex) != text_primary)
        .collect();

    let primary = saturated
        .first()
        .copied()
        .or_else(|| colors.first().map(|c| c.value.as_str()));

    let mut border: Option<&str> = None;
    let mut best_distance = f64::INFINITY;
    for color in colors {
        let distance = (relative_luminance(&color.value) - BORDER_LUMINANCE_TARGET).abs();
        if distance < best_distance {
            best_distance = distance;
            border = Some(&color.value);
        }
    }

    let owned = |value: Option<&str>| value.map(str::to_string);
    PaletteRoles {
        primary: owned(primary),
        secondary: owned(saturated.get(1).copied()),
        background: owned(background),
        surface: owned(surface),
        text_primary: owned(text_primary),
        text_secondary: owned(text_secondary),
        border: owned(border),
        accent: owned(saturated.get(2).copied()),
    }
}

/// Role names for a color, or a luminance bucket when it has none.
pub fn usage_hint(hex: &str, roles: &PaletteRoles) -> String {
    let names = roles.roles_for(hex);
    if !names.is_empty() {
        return names.join(", ");
    }

    let luminance = relative_luminance(hex);
    if luminance > 0.9 {
        "background".to_string()
    } else if luminance < 0.15 {
        "text".to_string()
    } else {
        "accent".to_string()
    }
}

pub fn build_palette(clustered: &[WeightedValue<String>]) -> Palette {
    let roles = pick_palette_roles(clustered);
    let colors = clustered
        .iter()
        .map(|color| PaletteColor {
            hex: color.value.clone(),
            usage_hint: usage_hint(&color.value, &roles),
            weight: round_to(color.weight, 2),
        })
        .collect();

    Palette { colors, roles }
}
