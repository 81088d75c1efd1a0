// src/cli/color.rs — Color inspection

use crate::color::{ColorInfo, ColorMode};

/// Print every representation of a hex color.
pub fn show_color(hex: &str) -> anyhow::Result<()> {
    let info = ColorInfo::from_hex(hex)
        .ok_or_else(|| anyhow::anyhow!("'{hex}' is not a #RRGGBB color"))?;
    print!("{}", format_color(&info));
    Ok(())
}

pub(crate) fn format_color(info: &ColorInfo) -> String {
    let mode = match info.mode {
        ColorMode::Dark => "dark (use light text)",
        ColorMode::Light => "light (use dark text)",
    };
    format!(
        "  Hex:   {}\n  RGB:   {}\n  HSL:   {}\n  Mode:  {}\n",
        info.hex, info.rgb, info.hsl, mode
    )
}
