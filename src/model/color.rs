use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;

impl Rgba8 {
    /// Parse `#RRGGBB` or `#RRGGBBAA`. The `#` is optional and digits are case-insensitive.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid color \"{s}\": expected #RRGGBB or #RRGGBBAA"));
        }

        let mut channels = [255u8; 4];
        for (i, slot) in channels.iter_mut().enumerate().take(digits.len() / 2) {
            let pair = &digits[2 * i..2 * i + 2];
            *slot = u8::from_str_radix(pair, 16).map_err(|e| format!("\"{pair}\": {e}"))?;
        }
        let [r, g, b, a] = channels;
        Ok(Self::new(r, g, b, a))
    }

    /// Channels in `0..=1`; out-of-range values are clamped.
    fn from_unit([r, g, b, a]: [f64; 4]) -> Self {
        let byte = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(byte(r), byte(g), byte(b), byte(a))
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorInput {
            Hex(String),
            Channels(UnitChannels),
            List(Vec<f64>),
        }

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct UnitChannels {
            r: f64,
            g: f64,
            b: f64,
            #[serde(default = "opaque_alpha")]
            a: f64,
        }

        fn opaque_alpha() -> f64 {
            1.0
        }

        match ColorInput::deserialize(deserializer)? {
            ColorInput::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            ColorInput::Channels(UnitChannels { r, g, b, a }) => Ok(Self::from_unit([r, g, b, a])),
            ColorInput::List(v) => match *v.as_slice() {
                [r, g, b] => Ok(Self::from_unit([r, g, b, 1.0])),
                [r, g, b, a] => Ok(Self::from_unit([r, g, b, a])),
                _ => Err(serde::de::Error::custom(format!(
                    "color list needs 3 or 4 channels, got {}",
                    v.len()
                ))),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/color.rs"]
mod tests;
