use crate::foundation::error::{KnobError, KnobResult};
use crate::model::export::{Background, Layout};
use crate::render::buffer::RasterBuffer;
use crate::sheet::naming::NamingPattern;

/// One image ready to be written, with its file name (no directory).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputImage {
    pub file_name: String,
    pub buffer: RasterBuffer,
}

/// Top-left pixel of cell `index` in a row-major grid of `columns` cells per row.
pub fn cell_origin(index: u32, columns: u32, cell_width: u32, cell_height: u32) -> (u32, u32) {
    let columns = columns.max(1);
    let (col, row) = (index % columns, index / columns);
    (col * cell_width, row * cell_height)
}

/// Grid size in cells for `frames` frames: `(columns, rows)`.
pub fn grid_dims(frames: u32, columns: u32) -> (u32, u32) {
    let columns = columns.max(1);
    (columns, frames.div_ceil(columns))
}

/// Lay `frames` out row-major, left to right then top to bottom, without gaps.
///
/// The sheet is `columns * fw` by `ceil(n / columns) * fh`; cells past the last frame hold
/// `background`.
pub fn compose_sheet(
    frames: &[RasterBuffer],
    columns: u32,
    background: Background,
) -> KnobResult<RasterBuffer> {
    let Some(first) = frames.first() else {
        return Err(KnobError::render("cannot compose a sheet from zero frames"));
    };
    if columns == 0 {
        return Err(KnobError::validation("layout.columns", "must be >= 1"));
    }
    let (fw, fh) = (first.width(), first.height());
    if let Some((i, f)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.width() != fw || f.height() != fh)
    {
        return Err(KnobError::render(format!(
            "frame {i} is {}x{}, expected {fw}x{fh}",
            f.width(),
            f.height()
        )));
    }

    let count = u32::try_from(frames.len())
        .map_err(|_| KnobError::render("too many frames for one sheet"))?;
    let (cols, rows) = grid_dims(count, columns);
    let width = cols
        .checked_mul(fw)
        .ok_or_else(|| KnobError::render("sheet width overflows"))?;
    let height = rows
        .checked_mul(fh)
        .ok_or_else(|| KnobError::render("sheet height overflows"))?;

    let mut sheet = RasterBuffer::new_filled(width, height, background.color().to_premul())?;
    for (i, frame) in (0..count).zip(frames) {
        let (x, y) = cell_origin(i, cols, fw, fh);
        sheet.blit(frame, x, y);
    }
    Ok(sheet)
}

/// Turn one size's rendered frames into the images to write.
///
/// Sheet layout yields a single `.sheet.png` image. Individual layout passes the buffers through
/// unchanged, one per frame, with the frame index in the name.
pub fn arrange(
    frames: Vec<RasterBuffer>,
    layout: Layout,
    background: Background,
    naming: &NamingPattern,
    name: &str,
    size: u32,
) -> KnobResult<Vec<OutputImage>> {
    match layout {
        Layout::Sheet { columns } => {
            let buffer = compose_sheet(&frames, columns, background)?;
            Ok(vec![OutputImage {
                file_name: naming.sheet_file_name(name, size),
                buffer,
            }])
        }
        Layout::Individual => {
            let count = u32::try_from(frames.len())
                .map_err(|_| KnobError::render("too many frames"))?;
            Ok((0..count)
                .zip(frames)
                .map(|(i, buffer)| OutputImage {
                    file_name: naming.frame_file_name(name, size, i, count),
                    buffer,
                })
                .collect())
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/compose.rs"]
mod tests;
