use align_core::{AlignConfig, Declarations, RopeBuffer, TextBuffer, align_indentation};
use pretty_assertions::assert_eq;

fn spaces(tab_size: usize) -> AlignConfig {
    AlignConfig {
        tab_size,
        translate_tabs_to_spaces: true,
        ..AlignConfig::default()
    }
}

fn all_rows(buffer: &RopeBuffer) -> Vec<usize> {
    (0..buffer.line_count()).collect()
}

#[test]
fn test_pads_to_deepest_edge() {
    let mut buffer = RopeBuffer::from_text("a\n  b\n    c");
    let rows = all_rows(&buffer);
    let config = spaces(4);

    let result = align_indentation(&mut buffer, &rows, &config, &Declarations::default()).unwrap();

    assert_eq!(buffer.text(), "    a\n    b\n    c");
    assert_eq!(result.target_col, 4);
    assert!(!result.already_aligned);

    // A second run finds nothing to do.
    let again = align_indentation(&mut buffer, &rows, &config, &Declarations::default()).unwrap();
    assert!(again.already_aligned);
    assert_eq!(again.edits, 0);
    assert_eq!(buffer.text(), "    a\n    b\n    c");
}

#[test]
fn test_reencodes_leading_whitespace_as_tabs() {
    let mut buffer = RopeBuffer::from_text("\tx\n        y\nz");
    let rows = all_rows(&buffer);

    let result = align_indentation(
        &mut buffer,
        &rows,
        &AlignConfig::default(),
        &Declarations::default(),
    )
    .unwrap();

    assert_eq!(buffer.text(), "\tx\n\ty\n\tz");
    assert_eq!(result.target_col, 8);
    assert_eq!(result.edits, 2);
}

#[test]
fn test_mixed_indentation_compares_visual_columns() {
    // Two spaces sit left of a tab stop at 8; the shallower row is padded, not the tab row.
    let mut buffer = RopeBuffer::from_text("  a\n\tb");
    let rows = all_rows(&buffer);
    let config = AlignConfig::default();

    let result = align_indentation(&mut buffer, &rows, &config, &Declarations::default()).unwrap();

    assert_eq!(buffer.text(), "\ta\n\tb");
    assert_eq!(result.target_col, 8);

    let again = align_indentation(&mut buffer, &rows, &config, &Declarations::default()).unwrap();
    assert!(again.already_aligned);
    assert_eq!(again.edits, 0);
}

#[test]
fn test_tab_padding_off_a_tab_stop() {
    let mut buffer = RopeBuffer::from_text("\t  a\nb");
    let rows = all_rows(&buffer);

    let result = align_indentation(
        &mut buffer,
        &rows,
        &AlignConfig::default(),
        &Declarations::default(),
    )
    .unwrap();

    assert_eq!(buffer.text(), "\t  a\n\t  b");
    assert_eq!(result.target_col, 10);
}

#[test]
fn test_reencodes_leading_tabs_as_spaces() {
    let mut buffer = RopeBuffer::from_text("\tx\n    y");
    let rows = all_rows(&buffer);

    align_indentation(&mut buffer, &rows, &spaces(4), &Declarations::default()).unwrap();

    assert_eq!(buffer.text(), "    x\n    y");
}

#[test]
fn test_declaration_keyword_sets_the_edge() {
    let mut buffer = RopeBuffer::from_text("var   x = 1\n  foo = 2");
    let rows = all_rows(&buffer);
    let declarations = Declarations::compile(&["var", "let"]).unwrap();

    let result = align_indentation(&mut buffer, &rows, &spaces(4), &declarations).unwrap();

    assert_eq!(buffer.text(), "var x = 1\n    foo = 2");
    assert_eq!(result.target_col, 4);
}

#[test]
fn test_declaration_edge_padded_with_spaces_in_tab_style() {
    let mut buffer = RopeBuffer::from_text("var x = 1\ny = 2");
    let rows = all_rows(&buffer);
    let declarations = Declarations::compile(&["var"]).unwrap();

    let result =
        align_indentation(&mut buffer, &rows, &AlignConfig::default(), &declarations).unwrap();

    assert_eq!(buffer.text(), "var x = 1\n    y = 2");
    assert_eq!(result.target_col, 4);
}

#[test]
fn test_tab_indented_declaration() {
    let mut buffer = RopeBuffer::from_text("\tvar x\n\ty");
    let rows = all_rows(&buffer);
    let declarations = Declarations::compile(&["var"]).unwrap();

    let result =
        align_indentation(&mut buffer, &rows, &AlignConfig::default(), &declarations).unwrap();

    assert_eq!(buffer.text(), "\tvar x\n\t    y");
    assert_eq!(result.target_col, 12);
}

#[test]
fn test_blank_rows_skipped_when_trimming() {
    let config = AlignConfig {
        trim_trailing_white_space_on_save: true,
        ..spaces(4)
    };
    let mut buffer = RopeBuffer::from_text("  a\n\nb");
    let rows = all_rows(&buffer);
    let result = align_indentation(&mut buffer, &rows, &config, &Declarations::default()).unwrap();

    assert_eq!(buffer.text(), "  a\n\n  b");
    assert_eq!(result.rows, 2);

    let mut buffer = RopeBuffer::from_text("  a\n\nb");
    align_indentation(&mut buffer, &rows, &spaces(4), &Declarations::default()).unwrap();
    assert_eq!(buffer.text(), "  a\n  \n  b");
}

#[test]
fn test_no_rows() {
    let mut buffer = RopeBuffer::from_text("  a");
    let result =
        align_indentation(&mut buffer, &[], &spaces(4), &Declarations::default()).unwrap();
    assert!(result.already_aligned);
    assert_eq!(buffer.text(), "  a");
}
