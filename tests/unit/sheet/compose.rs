use super::*;
use crate::foundation::core::{Rgba8, Rgba8Premul};

fn frame(shade: u8) -> RasterBuffer {
    RasterBuffer::new_filled(4, 3, Rgba8::opaque(shade, 0, 0).to_premul()).unwrap()
}

fn frames(n: u8) -> Vec<RasterBuffer> {
    (0..n).map(|i| frame(10 * (i + 1))).collect()
}

#[test]
fn five_frames_three_columns() {
    let green = Rgba8::opaque(0, 200, 0);
    let sheet = compose_sheet(&frames(5), 3, Background::solid(green)).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (12, 6));

    for i in 0..5u32 {
        let (x, y) = cell_origin(i, 3, 4, 3);
        let expected = Rgba8::opaque(10 * (i as u8 + 1), 0, 0).to_premul();
        assert_eq!(sheet.pixel(x, y), Some(expected), "cell {i} origin");
        assert_eq!(sheet.pixel(x + 3, y + 2), Some(expected), "cell {i} corner");
    }
    // Sixth cell is background.
    assert_eq!(sheet.pixel(8, 3), Some(green.to_premul()));
    assert_eq!(sheet.pixel(11, 5), Some(green.to_premul()));
}

#[test]
fn transparent_background_fills_unused_cells_with_clear() {
    let sheet = compose_sheet(&frames(2), 3, Background::Transparent).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (12, 3));
    assert_eq!(sheet.pixel(9, 1), Some(Rgba8Premul::transparent()));
}

#[test]
fn single_column_stacks_vertically() {
    let sheet = compose_sheet(&frames(3), 1, Background::Transparent).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (4, 9));
    assert_eq!(cell_origin(2, 1, 4, 3), (0, 6));
}

#[test]
fn rejects_bad_input() {
    assert!(matches!(
        compose_sheet(&[], 2, Background::Transparent),
        Err(KnobError::Render(_))
    ));
    let err = compose_sheet(&frames(2), 0, Background::Transparent).unwrap_err();
    assert_eq!(err.field(), Some("layout.columns"));

    let mut mixed = frames(2);
    mixed.push(RasterBuffer::new_filled(5, 3, Rgba8Premul::transparent()).unwrap());
    assert!(matches!(
        compose_sheet(&mixed, 2, Background::Transparent),
        Err(KnobError::Render(_))
    ));
}

#[test]
fn arrange_names_outputs() {
    let sheet_naming = NamingPattern::default_for(Layout::Sheet { columns: 2 });
    let out = arrange(
        frames(3),
        Layout::Sheet { columns: 2 },
        Background::Transparent,
        &sheet_naming,
        "knob",
        64,
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].file_name, "knob_64px.sheet.png");
    assert_eq!((out[0].buffer.width(), out[0].buffer.height()), (8, 6));

    let naming = NamingPattern::default_for(Layout::Individual);
    let input = frames(12);
    let out = arrange(
        input.clone(),
        Layout::Individual,
        Background::Transparent,
        &naming,
        "knob",
        64,
    )
    .unwrap();
    assert_eq!(out.len(), 12);
    assert_eq!(out[0].file_name, "knob_64px_00.png");
    assert_eq!(out[11].file_name, "knob_64px_11.png");
    assert_eq!(out[7].buffer, input[7]);
}

#[test]
fn grid_rounds_rows_up() {
    assert_eq!(grid_dims(8, 4), (4, 2));
    assert_eq!(grid_dims(9, 4), (4, 3));
    assert_eq!(grid_dims(1, 4), (4, 1));
}
