//! The terminal's preferred color scheme, standing in for `prefers-color-scheme`.

use crate::model::UiConfig;

/// Whether the user's environment prefers a dark scheme.
///
/// An explicit `ui.prefers_dark` wins. Otherwise `COLORFGBG` (set by
/// rxvt, Konsole, iTerm2 and others as `fg;bg`) decides; no signal means light.
pub fn system_prefers_dark(ui: &UiConfig) -> bool {
    if let Some(pref) = ui.prefers_dark {
        return pref;
    }
    let colorfgbg = std::env::var("COLORFGBG").ok();
    colorfgbg_is_dark(colorfgbg.as_deref()).unwrap_or(false)
}

/// Interpret a `COLORFGBG` value. The last `;`-separated field is the
/// background ANSI index: 0-6 and 8 are dark, 7 and 9-15 are light.
pub fn colorfgbg_is_dark(value: Option<&str>) -> Option<bool> {
    let bg = value?.rsplit(';').next()?.trim();
    if bg == "default" {
        return None;
    }
    let idx: u8 = bg.parse().ok()?;
    match idx {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}
