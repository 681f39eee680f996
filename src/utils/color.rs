use nalgebra::Vector3;

/// Splits a `0xRRGGBB` value into its sRGB channels in the range `0.0..=1.0`.
pub fn hex_to_rgb(hex: u32) -> Vector3<f32> {
    let r = (hex >> 16) & 0xFF;
    let g = (hex >> 8) & 0xFF;
    let b = hex & 0xFF;
    Vector3::new(r as f32, g as f32, b as f32) / 255.0
}

pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Colors are authored in sRGB, the renderer shades in linear space.
pub fn srgb_to_linear(color: &Vector3<f32>) -> Vector3<f32> {
    color.map(srgb_channel_to_linear)
}
