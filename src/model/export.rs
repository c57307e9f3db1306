use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{KnobError, KnobResult};
use crate::sheet::naming::NamingPattern;

/// What sits behind the knob in every rendered pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Background {
    #[default]
    Transparent,
    /// Opaque fill; alpha is always 255.
    Solid(Rgba8),
}

impl Background {
    pub fn solid(color: Rgba8) -> Self {
        Self::Solid(Rgba8 { a: 255, ..color })
    }

    pub fn color(self) -> Rgba8 {
        match self {
            Self::Transparent => Rgba8::TRANSPARENT,
            Self::Solid(c) => c,
        }
    }
}

impl FromStr for Background {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        Rgba8::parse_hex(s).map(Self::solid)
    }
}

impl Serialize for Background {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Transparent => serializer.serialize_str("transparent"),
            Self::Solid(c) => c.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Color(Rgba8),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Color(c) => Ok(Self::solid(c)),
        }
    }
}

/// Pixel dimensions (square by convention) and background for one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub background: Background,
}

impl RenderTarget {
    pub fn square(size: u32, background: Background) -> Self {
        Self {
            width: size,
            height: size,
            background,
        }
    }
}

/// How rendered frames land on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Layout {
    /// One file per frame, named with its index.
    Individual,
    /// One row-major grid image per size.
    Sheet { columns: u32 },
}

impl Default for Layout {
    fn default() -> Self {
        Self::Sheet { columns: 1 }
    }
}

/// Raw export configuration as supplied by a caller (JSON or CLI flags).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfigDef {
    pub sizes: Vec<u32>,
    pub layout: Layout,
    pub output_dir: PathBuf,
    pub base_name: String,
    /// File stem template with `{name}`, `{size}` and `{frame}` placeholders.
    pub naming: Option<String>,
    pub background: Background,
    /// Write a JSON sidecar describing frame angles and cells next to each output.
    pub manifest: bool,
}

impl Default for ExportConfigDef {
    fn default() -> Self {
        Self {
            sizes: vec![128],
            layout: Layout::default(),
            output_dir: PathBuf::from("."),
            base_name: "knob".to_string(),
            naming: None,
            background: Background::Transparent,
            manifest: false,
        }
    }
}

/// Validated export configuration for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportConfig {
    sizes: Vec<u32>,
    layout: Layout,
    output_dir: PathBuf,
    base_name: String,
    naming: NamingPattern,
    background: Background,
    manifest: bool,
}

impl ExportConfig {
    pub fn from_def(def: &ExportConfigDef) -> KnobResult<Self> {
        if def.sizes.is_empty() {
            return Err(KnobError::validation("sizes", "at least one output size is required"));
        }
        for (i, &size) in def.sizes.iter().enumerate() {
            if size == 0 {
                return Err(KnobError::validation(format!("sizes[{i}]"), "must be > 0"));
            }
            if def.sizes[..i].contains(&size) {
                return Err(KnobError::validation(
                    format!("sizes[{i}]"),
                    format!("duplicate size {size} would collide with an earlier output"),
                ));
            }
        }
        if let Layout::Sheet { columns } = def.layout
            && columns == 0
        {
            return Err(KnobError::validation("layout.columns", "must be >= 1"));
        }

        let name = def.base_name.trim();
        if name.is_empty() {
            return Err(KnobError::validation("base_name", "must not be empty"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(KnobError::validation(
                "base_name",
                "must be a plain file name without path separators",
            ));
        }
        if def.output_dir.as_os_str().is_empty() {
            return Err(KnobError::validation("output_dir", "must not be empty"));
        }

        let naming = match &def.naming {
            Some(t) => NamingPattern::parse(t, def.layout)?,
            None => NamingPattern::default_for(def.layout),
        };

        Ok(Self {
            sizes: def.sizes.clone(),
            layout: def.layout,
            output_dir: def.output_dir.clone(),
            base_name: name.to_string(),
            naming,
            background: def.background,
            manifest: def.manifest,
        })
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn naming(&self) -> &NamingPattern {
        &self.naming
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn manifest(&self) -> bool {
        self.manifest
    }

    /// Square render targets in configured order.
    pub fn targets(&self) -> impl Iterator<Item = RenderTarget> + '_ {
        self.sizes
            .iter()
            .map(|&s| RenderTarget::square(s, self.background))
    }
}

impl TryFrom<&ExportConfigDef> for ExportConfig {
    type Error = KnobError;

    fn try_from(def: &ExportConfigDef) -> KnobResult<Self> {
        Self::from_def(def)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/export.rs"]
mod tests;
