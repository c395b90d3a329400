//! Decode assertions against fixture streams.

use opjread_core::{ColumnType, Project, Variant};
use opjread_opj::records::MISSING_VALUE;
use opjread_opj::{OpjError, OpjReader};
use pretty_assertions::assert_eq;

use crate::{DatasetSpec, LayerSpec, ProjectFixture};

fn decode(fixture: &ProjectFixture) -> Project {
    OpjReader::new()
        .read_bytes(&fixture.build_opj())
        .expect("fixture should decode")
}

#[test]
fn test_spreadsheet_with_leading_missing_rows() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1@Sheet1_A", &[1.0, 2.0, 3.0]))
        .dataset(DatasetSpec::doubles("Book1@Sheet2_A", &[7.0, 8.0, 9.0]).with_rows(3, 6))
        .end_datasets()
        .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 0);
    assert_eq!(project.excels.len(), 1);

    let excel = &project.excels[0];
    assert_eq!(excel.name, "Book1");
    let sheet2 = excel.sheet_by_name("Sheet2").unwrap();
    let a = &sheet2.columns[0];
    assert_eq!(a.begin_row, 3);
    assert_eq!(a.end_row, 6);
    assert!(a.value_at(0).is_none());
    assert!(a.value_at(2).is_none());
    assert_eq!(a.value_at(3), Some(&Variant::Double(7.0)));
    assert_eq!(a.value_at(5), Some(&Variant::Double(9.0)));
    assert!(a.value_at(6).is_none());
    assert_eq!(sheet2.max_rows(), 6);
}

#[test]
fn test_mixed_type_worksheet() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::text_numeric(
        "Mixed_A",
        &[Err("Text"), Ok(1.5)],
        12,
    ))
    .dataset(DatasetSpec::doubles("Mixed_B", &[1.5, 2.5]))
    .dataset(DatasetSpec::floats("Mixed_C", &[3.5, -3.5]))
    .dataset(DatasetSpec::integers(
        "Mixed_D",
        0x01,
        2,
        (-100i16)
            .to_le_bytes()
            .iter()
            .chain(100i16.to_le_bytes().iter())
            .copied()
            .collect(),
    ))
    .dataset(DatasetSpec::integers(
        "Mixed_E",
        0x01,
        4,
        (-100000i32)
            .to_le_bytes()
            .iter()
            .chain(100000i32.to_le_bytes().iter())
            .copied()
            .collect(),
    ))
    .dataset(DatasetSpec::integers("Mixed_F", 0x01, 1, vec![0xFF, 0x7F]))
    .dataset(DatasetSpec::integers("Mixed_G", 0x02, 1, vec![255, 0]))
    .dataset(DatasetSpec::integers(
        "Mixed_H",
        0x02,
        2,
        65535u16
            .to_le_bytes()
            .iter()
            .chain(0u16.to_le_bytes().iter())
            .copied()
            .collect(),
    ))
    .dataset(DatasetSpec::integers(
        "Mixed_I",
        0x02,
        4,
        4294967295u32
            .to_le_bytes()
            .iter()
            .chain(0u32.to_le_bytes().iter())
            .copied()
            .collect(),
    ))
    .dataset(DatasetSpec::complex("Mixed_J", &[(1.5, 0.5), (-1.5, 3.5)]))
    .end_datasets()
    .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 0);
    let sheet = project.spread_sheet_by_name("Mixed").unwrap();
    assert_eq!(sheet.column_count(), 10);
    assert_eq!(sheet.max_rows(), 2);

    let a = sheet.column_by_name("A").unwrap();
    assert_eq!(a.column_type, ColumnType::TextNumeric);
    assert_eq!(a.value_at(0), Some(&Variant::String("Text".into())));
    assert_eq!(a.value_at(1), Some(&Variant::Double(1.5)));

    assert_eq!(
        sheet.column_by_name("B").unwrap().column_type,
        ColumnType::Double
    );
    assert_eq!(
        sheet.column_by_name("C").unwrap().value_at(0),
        Some(&Variant::Double(3.5))
    );
    assert_eq!(
        sheet.column_by_name("D").unwrap().value_at(0),
        Some(&Variant::Double(-100.0))
    );

    assert_eq!(
        sheet.column_by_name("E").unwrap().value_at(0),
        Some(&Variant::Double(-100000.0))
    );
    assert_eq!(
        sheet.column_by_name("F").unwrap().value_at(0),
        Some(&Variant::Double(-1.0))
    );

    // unsigned cells widen without sign extension
    let g = sheet.column_by_name("G").unwrap();
    assert_eq!(g.column_type, ColumnType::Byte);
    assert_eq!(g.value_at(0), Some(&Variant::Double(255.0)));
    assert_eq!(
        sheet.column_by_name("H").unwrap().value_at(0),
        Some(&Variant::Double(65535.0))
    );
    assert_eq!(
        sheet.column_by_name("I").unwrap().value_at(0),
        Some(&Variant::Double(4294967295.0))
    );

    let j = sheet.column_by_name("J").unwrap();
    assert_eq!(j.column_type, ColumnType::Complex);
    assert_eq!(j.value_at(0), Some(&Variant::Double(1.5)));
    assert_eq!(j.imaginary_at(0), Some(0.5));
    assert_eq!(j.value_at(1), Some(&Variant::Double(-1.5)));
    assert_eq!(j.imaginary_at(1), Some(3.5));

    assert_eq!(project.datasets.len(), 10);
    assert_eq!(
        project.datasets[0].column_type,
        Some(ColumnType::TextNumeric)
    );
}

#[test]
fn test_missing_value_sentinel_decodes_as_nan() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0, MISSING_VALUE, 3.0]))
        .end_datasets()
        .end_windows();

    let project = decode(&fx);
    let a = &project.spread_sheets[0].columns[0];
    assert_eq!(a.value_at(0), Some(&Variant::Double(1.0)));
    match a.value_at(1) {
        Some(Variant::Double(v)) => assert!(v.is_nan(), "sentinel should decode as NaN, got {v}"),
        other => panic!("unexpected cell {other:?}"),
    }
}

#[test]
fn test_matrix_dimensions_and_coordinates() {
    let columns = 71usize;
    let rows = 29usize;
    let mut cells = Vec::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            cells.push((9 * r + c + 1) as f64);
        }
    }

    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("MBook", &cells))
        .end_datasets()
        .window(
            "MBook",
            0,
            "",
            &[LayerSpec::grid(71, 29).with_bounds(5329.0, 9999.0, 731.0, 999.0)],
        )
        .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 0);
    let matrix = project.matrix_by_name("MBook").unwrap();
    assert_eq!(matrix.sheets.len(), 1);

    let sheet = &matrix.sheets[0];
    assert_eq!(sheet.column_count, 71);
    assert_eq!(sheet.row_count, 29);
    assert_eq!(sheet.value(0, 0), Some(1.0));
    assert_eq!(sheet.value(0, 1), Some(2.0));
    assert_eq!(sheet.value(1, 0), Some(10.0));
    assert_eq!(sheet.value(28, 70), Some((9 * 28 + 71) as f64));
    assert!(sheet.value(29, 0).is_none());
    assert_eq!(sheet.x1, 5329.0);
    assert_eq!(sheet.x2, 9999.0);
    assert_eq!(sheet.y1, 731.0);
    assert_eq!(sheet.y2, 999.0);
}

#[test]
fn test_complex_matrix_with_second_sheet() {
    let cells = [
        (11.0, 0.11),
        (12.0, 0.12),
        (21.0, 0.21),
        (22.0, 0.22),
        (31.0, 0.31),
        (32.0, 0.32),
    ];
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::complex("MComplex", &cells))
        .dataset(DatasetSpec::doubles("MComplex@2", &[5.0, 6.0]))
        .end_datasets()
        .window(
            "MComplex",
            0,
            "",
            &[LayerSpec::grid(2, 3), LayerSpec::grid(2, 1)],
        )
        .end_windows();

    let project = decode(&fx);
    let matrix = project.matrix_by_name("MComplex").unwrap();
    assert_eq!(matrix.sheets.len(), 2);

    let first = &matrix.sheets[0];
    assert!(first.is_complex());
    assert_eq!(first.value(0, 0), Some(11.0));
    assert_eq!(first.imaginary_part(0, 0), Some(0.11));
    assert_eq!(first.value(2, 1), Some(32.0));
    assert_eq!(first.imaginary_part(2, 1), Some(0.32));

    let second = &matrix.sheets[1];
    assert_eq!(second.name, "MComplex@2");
    assert!(!second.is_complex());
    assert_eq!(second.value(0, 1), Some(6.0));
}

#[test]
fn test_function_dataset() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::function("F1", "sin(x)", 100))
        .end_datasets()
        .end_windows();

    let project = decode(&fx);
    assert!(project.matrixes.is_empty());
    assert_eq!(project.functions.len(), 1);
    assert_eq!(project.functions[0].name, "F1");
    assert_eq!(project.functions[0].formula, "sin(x)");
    assert_eq!(project.functions[0].point_count, 100);
    assert_eq!(project.datasets[0].column_type, None);
}

#[test]
fn test_window_labels_notes_and_graphs() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0]))
        .end_datasets()
        .window("Book1", 0, "My Data", &[])
        .window(
            "Graph1",
            1,
            "Fit",
            &[LayerSpec::grid(0, 0).with_bounds(10.0, 90.0, -1.0, 1.0)],
        )
        .note_window("Notes1", "", "remember to recalibrate")
        .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 0);
    assert_eq!(project.spread_sheets[0].label, "My Data");

    assert_eq!(project.graphs.len(), 1);
    let graph = &project.graphs[0];
    assert_eq!(graph.name, "Graph1");
    assert_eq!(graph.label, "Fit");
    assert_eq!(graph.layers[0].x1, 10.0);
    assert_eq!(graph.layers[0].y2, 1.0);

    assert_eq!(project.notes.len(), 1);
    assert_eq!(project.notes[0].name, "Notes1");
    assert_eq!(project.notes[0].text, "remember to recalibrate");
}

#[test]
fn test_parameters_section() {
    let mut fx = ProjectFixture::new(9.0);
    fx.end_datasets()
        .end_windows()
        .parameter("FontSize", 12.0)
        .parameter("Margin", 0.5)
        .end_parameters();

    let project = decode(&fx);
    assert_eq!(
        project.parameters,
        vec![("FontSize".to_string(), 12.0), ("Margin".to_string(), 0.5)]
    );
}

#[test]
fn test_opju_container() {
    let mut fx = ProjectFixture::new(9.8);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0, 2.0]))
        .end_datasets()
        .end_windows();

    let project = OpjReader::new().read_bytes(&fx.build_opju()).unwrap();
    assert_eq!(project.version, 980);
    assert_eq!(project.build_version, 985);
    assert_eq!(project.spread_sheets[0].columns[0].row_count(), 2);
}

#[test]
fn test_decode_is_deterministic() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0, f64::NAN]))
        .dataset(DatasetSpec::text("Book1_B", &["ab", "cd"], 8))
        .end_datasets()
        .window("Book1", 0, "L", &[])
        .end_windows();
    let bytes = fx.build_opj();

    let reader = OpjReader::new();
    let first = reader.read_bytes(&bytes).unwrap();
    let second = reader.read_bytes(&bytes).unwrap();
    // NaN cells break f64 equality, so compare the non-data shape and
    // the rendered values
    assert_eq!(first.datasets, second.datasets);
    assert_eq!(first.spread_sheets[0].name, second.spread_sheets[0].name);
    assert_eq!(
        format!("{:?}", first.spread_sheets),
        format!("{:?}", second.spread_sheets)
    );
}

#[test]
fn test_codepage_selects_text_decoding() {
    // 0xE6 is ae-ligature in 1252 and c-acute in 1250
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0]).with_long_name(&[b'x', 0xE6]))
        .end_datasets()
        .end_windows();
    let bytes = fx.build_opj();

    let western = OpjReader::new().read_bytes(&bytes).unwrap();
    assert_eq!(western.spread_sheets[0].columns[0].long_name, "xæ");

    let central = OpjReader::with_codepage(1250).read_bytes(&bytes).unwrap();
    assert_eq!(central.spread_sheets[0].columns[0].long_name, "xć");
}

#[test]
fn test_unknown_cell_type_is_skipped_with_status() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::integers("Book1_X", 0x07, 3, vec![0; 6]))
        .dataset(DatasetSpec::doubles("Book1_A", &[1.0]))
        .end_datasets()
        .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 5);
    // the bad record is skipped, the rest still decodes
    assert_eq!(project.spread_sheets[0].columns.len(), 1);
    assert_eq!(project.datasets[0].column_type, None);
}

#[test]
fn test_text_numeric_with_undersized_cells_is_skipped() {
    // declared text-and-numeric but each cell is a single byte, too
    // narrow for even the flag field
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::raw_cells("Book1_A", 0x6881, 0x00, 1, vec![0x00]))
        .dataset(DatasetSpec::doubles("Book1_B", &[2.0]))
        .end_datasets()
        .end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 5);
    assert_eq!(project.spread_sheets[0].columns.len(), 1);
    assert_eq!(project.spread_sheets[0].columns[0].name, "B");
}

#[test]
fn test_extent_mismatch_is_clamped_with_status() {
    let mut fx = ProjectFixture::new(9.0);
    let mut spec = DatasetSpec::doubles("Book1_A", &[1.0, 2.0, 3.0]);
    spec.last_row = 5;
    fx.dataset(spec).end_datasets().end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 6);
    let a = &project.spread_sheets[0].columns[0];
    assert_eq!(a.end_row, 3);
    assert_eq!(a.row_count(), 3);
}

#[test]
fn test_end_mark_mismatch_sets_status() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("Book1_A", &[1.0]))
        .end_datasets();
    fx.window_bad_end_mark("Book1", 0).end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 3);
}

#[test]
fn test_unknown_window_kind_sets_status() {
    let mut fx = ProjectFixture::new(9.0);
    fx.end_datasets().window("W9", 9, "", &[]).end_windows();

    let project = decode(&fx);
    assert_eq!(project.parse_error, 7);
    assert_eq!(project.graphs[0].name, "W9");
}

#[test]
fn test_matrix_grid_mismatch_is_corrupted() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("MBook", &[1.0, 2.0, 3.0]))
        .end_datasets()
        .window("MBook", 0, "", &[LayerSpec::grid(2, 2)])
        .end_windows();

    let err = OpjReader::new().read_bytes(&fx.build_opj()).unwrap_err();
    assert!(matches!(err, OpjError::Corrupted(_)), "got {err:?}");
}

#[test]
fn test_orphan_column_is_structural() {
    let mut fx = ProjectFixture::new(9.0);
    fx.dataset(DatasetSpec::doubles("_A", &[1.0]))
        .end_datasets()
        .end_windows();

    let err = OpjReader::new().read_bytes(&fx.build_opj()).unwrap_err();
    assert!(matches!(err, OpjError::Structural(_)), "got {err:?}");
}

#[test]
fn test_truncated_stream_is_corrupted() {
    let mut bytes = b"CPYA 9.0 B292 #\n".to_vec();
    bytes.extend_from_slice(&0x23u32.to_le_bytes());
    bytes.push(b'\n');
    bytes.extend_from_slice(&[0x00, 0x00]);

    let err = OpjReader::new().read_bytes(&bytes).unwrap_err();
    assert!(matches!(err, OpjError::Corrupted(_)), "got {err:?}");
}

#[test]
fn test_old_version_is_refused() {
    let err = OpjReader::new()
        .read_bytes(b"CPYA 3.5 B200 #\n")
        .unwrap_err();
    assert!(
        matches!(err, OpjError::UnsupportedVersion(350)),
        "got {err:?}"
    );
}

#[test]
fn test_unrecognized_magic_is_structural() {
    let err = OpjReader::new()
        .read_bytes(b"PK\x03\x04 not a project\n")
        .unwrap_err();
    assert!(matches!(err, OpjError::Structural(_)), "got {err:?}");
}
