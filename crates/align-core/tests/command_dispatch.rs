use align_core::{
    AlignConfig, AlignError, AlignMode, AlignmentCommand, RopeBuffer, Selection, align,
};
use pretty_assertions::assert_eq;

#[test]
fn test_no_selection_is_noop() {
    let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2");
    let outcome = align(&mut buffer, &[], &AlignConfig::default()).unwrap();

    assert_eq!(outcome.mode, AlignMode::Noop);
    assert_eq!(buffer.text(), "a = 1\nbb = 2");
}

#[test]
fn test_single_line_selection_is_noop_by_default() {
    let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2");

    let outcome = align(&mut buffer, &[Selection::caret(0)], &AlignConfig::default()).unwrap();
    assert_eq!(outcome.mode, AlignMode::Noop);

    let outcome = align(&mut buffer, &[Selection::new(0, 4)], &AlignConfig::default()).unwrap();
    assert_eq!(outcome.mode, AlignMode::Noop);
    assert_eq!(buffer.text(), "a = 1\nbb = 2");
}

#[test]
fn test_multi_row_selection() {
    let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2\nccc = 3");

    let outcome = align(&mut buffer, &[Selection::new(0, 19)], &AlignConfig::default()).unwrap();

    assert_eq!(outcome.mode, AlignMode::Selection);
    assert_eq!(outcome.blocks, 1);
    assert_eq!(buffer.text(), "a   = 1\nbb  = 2\nccc = 3");
}

#[test]
fn test_reversed_selection() {
    let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2\nccc = 3");
    align(&mut buffer, &[Selection::new(19, 0)], &AlignConfig::default()).unwrap();
    assert_eq!(buffer.text(), "a   = 1\nbb  = 2\nccc = 3");
}

#[test]
fn test_selection_ending_at_column_zero_excludes_that_row() {
    let mut buffer = RopeBuffer::from_text("a = 1\nbb = 2\nccc = 3\n");

    align(&mut buffer, &[Selection::new(0, 13)], &AlignConfig::default()).unwrap();

    assert_eq!(buffer.text(), "a  = 1\nbb = 2\nccc = 3\n");
}

#[test]
fn test_several_selections_align_carets() {
    let mut buffer = RopeBuffer::from_text("a=1\nbbb=2");

    let outcome = align(
        &mut buffer,
        &[Selection::caret(1), Selection::caret(7)],
        &AlignConfig::default(),
    )
    .unwrap();

    assert_eq!(outcome.mode, AlignMode::MultiCursor);
    assert_eq!(buffer.text(), "a  =1\nbbb=2");
}

#[test]
fn test_whole_buffer_mode_aligns_each_block() {
    let config = AlignConfig {
        whole_file_one_line: true,
        ..AlignConfig::default()
    };
    let mut buffer =
        RopeBuffer::from_text("a = 1\nbb = 2\n\nfn x {\n  ccc = 3\n  d = 4\n}\n");

    let outcome = align(&mut buffer, &[Selection::caret(0)], &config).unwrap();

    assert_eq!(outcome.mode, AlignMode::WholeBuffer);
    assert_eq!(outcome.blocks, 2);
    assert_eq!(
        buffer.text(),
        "a  = 1\nbb = 2\n\nfn x {\n  ccc = 3\n  d   = 4\n}\n"
    );
}

#[test]
fn test_indentation_can_be_disabled() {
    let config = AlignConfig {
        align_indent: false,
        ..AlignConfig::default()
    };
    let mut buffer = RopeBuffer::from_text("  a = 1\nbb = 2");

    align(&mut buffer, &[Selection::new(0, 14)], &config).unwrap();

    assert_eq!(buffer.text(), "  a = 1\nbb  = 2");
}

#[test]
fn test_indentation_runs_before_separators() {
    let config = AlignConfig {
        translate_tabs_to_spaces: true,
        ..AlignConfig::default()
    };
    let mut buffer = RopeBuffer::from_text("  a = 1\nbb = 2");

    align(&mut buffer, &[Selection::new(0, 14)], &config).unwrap();

    assert_eq!(buffer.text(), "  a  = 1\n  bb = 2");
}

#[test]
fn test_invalid_declaration_is_reported() {
    let config = AlignConfig {
        declarations: vec!["(var".to_string()],
        ..AlignConfig::default()
    };
    assert!(matches!(
        AlignmentCommand::new(&config),
        Err(AlignError::InvalidPattern { .. })
    ));

    let mut buffer = RopeBuffer::from_text("a = 1\nb = 2");
    assert!(align(&mut buffer, &[Selection::new(0, 11)], &config).is_err());
    assert_eq!(buffer.text(), "a = 1\nb = 2");
}

#[test]
fn test_command_is_reusable() {
    let command = AlignmentCommand::new(&AlignConfig::default()).unwrap();

    let mut first = RopeBuffer::from_text("a = 1\nbb = 2");
    let mut second = RopeBuffer::from_text("xxx = 1\ny = 2");
    command.run(&mut first, &[Selection::new(0, 12)]).unwrap();
    command.run(&mut second, &[Selection::new(0, 13)]).unwrap();

    assert_eq!(first.text(), "a  = 1\nbb = 2");
    assert_eq!(second.text(), "xxx = 1\ny   = 2");
}
