//! Colour literal recognition.
//!
//! Colours are packed as `0xAARRGGBB`.

/// Parse `rgba(...)` or `rgb(...)` into a packed ARGB integer.
pub(crate) fn parse_color(token: &str) -> Option<i64> {
    if let Some(body) = call_body(token, "rgba") {
        return parse_rgba(body);
    }
    call_body(token, "rgb").and_then(parse_rgb)
}

fn call_body<'a>(token: &'a str, name: &str) -> Option<&'a str> {
    token
        .trim()
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
        .map(str::trim)
}

fn parse_rgba(body: &str) -> Option<i64> {
    if body.contains(',') {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let [r, g, b, a] = parts.as_slice() else {
            return None;
        };
        return Some(pack(parse_alpha(a)?, r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    if body.len() != 8 {
        return None;
    }
    let rgba = u32::from_str_radix(body, 16).ok()?;
    Some(i64::from(rgba.rotate_right(8)))
}

fn parse_rgb(body: &str) -> Option<i64> {
    if body.contains(',') {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let [r, g, b] = parts.as_slice() else {
            return None;
        };
        return Some(pack(u8::MAX, r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    if body.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(body, 16).ok()?;
    Some(i64::from(0xFF00_0000 | rgb))
}

/// Alpha is either an integer in `0..=255` or a fraction in `0.0..=1.0`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the fraction is range-checked before scaling into a byte"
)]
fn parse_alpha(text: &str) -> Option<u8> {
    if !text.contains('.') {
        return text.parse().ok();
    }
    let fraction: f64 = text.parse().ok()?;
    if !(0.0..=1.0).contains(&fraction) {
        return None;
    }
    Some((fraction * 255.0).round() as u8)
}

fn pack(a: u8, r: u8, g: u8, b: u8) -> i64 {
    i64::from((u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
}
