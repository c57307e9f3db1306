use crate::foundation::error::{KnobError, KnobResult};
use crate::model::export::Layout;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Lit(String),
    Name,
    Size,
    Frame,
}

/// Output file stem template.
///
/// Placeholders: `{name}` (base name), `{size}` (pixel size), `{frame}` (zero-padded frame index).
/// `{size}` is mandatory so outputs of different sizes never collide; `{frame}` is mandatory in
/// individual-file mode and rejected in sheet mode. Extensions are appended by the caller-facing
/// helpers (`.sheet.png`, `.png`, `.manifest.json`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingPattern {
    template: String,
    segments: Vec<Segment>,
}

impl NamingPattern {
    pub const DEFAULT_SHEET: &'static str = "{name}_{size}px";
    pub const DEFAULT_FRAMES: &'static str = "{name}_{size}px_{frame}";

    pub fn parse(template: &str, layout: Layout) -> KnobResult<Self> {
        let segments = parse_segments(template)?;
        if template.contains(['/', '\\']) {
            return Err(KnobError::validation("naming", "must not contain path separators"));
        }
        if !segments.contains(&Segment::Size) {
            return Err(KnobError::validation(
                "naming",
                "must contain {size} so different sizes never share a file name",
            ));
        }
        let has_frame = segments.contains(&Segment::Frame);
        match layout {
            Layout::Individual if !has_frame => Err(KnobError::validation(
                "naming",
                "individual-file layout requires {frame}",
            )),
            Layout::Sheet { .. } if has_frame => Err(KnobError::validation(
                "naming",
                "{frame} is not available in sheet layout",
            )),
            _ => Ok(Self {
                template: template.to_string(),
                segments,
            }),
        }
    }

    pub fn default_for(layout: Layout) -> Self {
        let template = match layout {
            Layout::Individual => Self::DEFAULT_FRAMES,
            Layout::Sheet { .. } => Self::DEFAULT_SHEET,
        };
        Self {
            template: template.to_string(),
            segments: parse_segments(template).unwrap_or_default(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// `<stem>.sheet.png`
    pub fn sheet_file_name(&self, name: &str, size: u32) -> String {
        format!("{}.sheet.png", self.stem(name, size, None))
    }

    /// `<stem>.png` with the frame index padded to the width of `frame_count - 1`.
    pub fn frame_file_name(&self, name: &str, size: u32, index: u32, frame_count: u32) -> String {
        format!("{}.png", self.stem(name, size, Some((index, frame_count))))
    }

    /// `<stem without frame>.manifest.json`
    pub fn manifest_file_name(&self, name: &str, size: u32) -> String {
        let stem = self.stem(name, size, None);
        let stem = stem.trim_end_matches(['_', '-', '.', ' ']);
        format!("{stem}.manifest.json")
    }

    fn stem(&self, name: &str, size: u32, frame: Option<(u32, u32)>) -> String {
        let mut out = String::with_capacity(self.template.len() + name.len() + 8);
        for seg in &self.segments {
            match seg {
                Segment::Lit(s) => out.push_str(s),
                Segment::Name => out.push_str(name),
                Segment::Size => out.push_str(&size.to_string()),
                Segment::Frame => {
                    if let Some((index, count)) = frame {
                        let width = count.saturating_sub(1).max(1).to_string().len();
                        out.push_str(&format!("{index:0width$}"));
                    }
                }
            }
        }
        out
    }
}

fn parse_segments(template: &str) -> KnobResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut lit = String::new();
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(KnobError::validation("naming", "unmatched '}'"));
        }
        lit.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after
            .find('}')
            .ok_or_else(|| KnobError::validation("naming", "unmatched '{'"))?;
        let seg = match &after[..close] {
            "name" => Segment::Name,
            "size" => Segment::Size,
            "frame" => Segment::Frame,
            other => {
                return Err(KnobError::validation(
                    "naming",
                    format!("unknown placeholder {{{other}}}"),
                ));
            }
        };
        if !lit.is_empty() {
            segments.push(Segment::Lit(std::mem::take(&mut lit)));
        }
        segments.push(seg);
        rest = &after[close + 1..];
    }
    lit.push_str(rest);
    if !lit.is_empty() {
        segments.push(Segment::Lit(lit));
    }
    Ok(segments)
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/naming.rs"]
mod tests;
