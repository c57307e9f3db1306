use serde::{Deserialize, Serialize};

use crate::model::export::Layout;
use crate::model::knob::KnobSpec;
use crate::sequence::frames::FrameSequence;
use crate::sheet::compose::{cell_origin, grid_dims};
use crate::sheet::naming::NamingPattern;

/// Pixel rectangle of one sheet cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestFrame {
    pub index: u32,
    /// Rotation in degrees, 0 at 12 o'clock, clockwise positive.
    pub angle: f64,
    /// File holding this frame (individual layout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Cell holding this frame (sheet layout).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellRect>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetInfo {
    pub file: String,
    pub columns: u32,
    pub rows: u32,
    pub width: u32,
    pub height: u32,
}

/// JSON sidecar describing where each frame of one size ended up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub size: u32,
    pub frame_count: u32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub layout: Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<SheetInfo>,
    pub frames: Vec<ManifestFrame>,
}

impl Manifest {
    /// Describe the outputs for one square `size`, mirroring the sheet composer's layout.
    pub fn build(
        spec: &KnobSpec,
        layout: Layout,
        naming: &NamingPattern,
        name: &str,
        size: u32,
    ) -> Self {
        let seq = FrameSequence::new(spec);
        let count = seq.len();
        let sheet = match layout {
            Layout::Sheet { columns } => {
                let (columns, rows) = grid_dims(count, columns);
                Some(SheetInfo {
                    file: naming.sheet_file_name(name, size),
                    columns,
                    rows,
                    width: columns.saturating_mul(size),
                    height: rows.saturating_mul(size),
                })
            }
            Layout::Individual => None,
        };
        let frames = seq
            .frames()
            .map(|f| {
                let (file, cell) = match &sheet {
                    Some(s) => {
                        let (x, y) = cell_origin(f.index, s.columns, size, size);
                        (
                            None,
                            Some(CellRect {
                                x,
                                y,
                                width: size,
                                height: size,
                            }),
                        )
                    }
                    None => (
                        Some(naming.frame_file_name(name, size, f.index, count)),
                        None,
                    ),
                };
                ManifestFrame {
                    index: f.index,
                    angle: f.angle,
                    file,
                    cell,
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            size,
            frame_count: count,
            start_angle: spec.start_angle(),
            end_angle: spec.end_angle(),
            layout,
            sheet,
            frames,
        }
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/manifest.rs"]
mod tests;
