use align_core::{
    AlignConfig, Declarations, EditPlanner, EditPoint, RopeBuffer, Separators, TextBuffer,
    align_indentation, align_separators, unit_visual_col, visual_width,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_word(rng: &mut StdRng, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
        .collect()
}

fn random_lines(rng: &mut StdRng, count: usize) -> Vec<String> {
    (0..count).map(|_| random_word(rng, 0, 12)).collect()
}

/// Apply points bottom-up with their raw anchors; no adjustment is needed in that order.
fn apply_reversed(buffer: &mut RopeBuffer, points: &[EditPoint]) {
    for point in points.iter().rev() {
        if point.length > 0 {
            buffer
                .insert(point.anchor, &" ".repeat(point.length as usize))
                .unwrap();
        } else if point.length < 0 {
            let count = point.length.unsigned_abs();
            buffer.erase(point.anchor - count..point.anchor).unwrap();
        }
    }
}

#[test]
fn test_running_adjustment_matches_bottom_up_application() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let count = rng.gen_range(1..8);
        let lines = random_lines(&mut rng, count);
        let text = lines.join("\n");

        let mut points = Vec::new();
        let mut line_start = 0usize;
        for line in &lines {
            let len = line.chars().count();
            let col = rng.gen_range(0..=len);
            let length = rng.gen_range(-(col as isize)..=6);
            points.push(EditPoint::new(line_start + col, length));
            line_start += len + 1;
        }

        let mut planned = RopeBuffer::from_text(&text);
        let mut planner = EditPlanner::new();
        for point in &points {
            planner.push(*point).unwrap();
        }
        planner.apply(&mut planned).unwrap();

        let mut reference = RopeBuffer::from_text(&text);
        apply_reversed(&mut reference, &points);

        assert_eq!(planned.text(), reference.text());
        assert_eq!(
            planner.adjustment(),
            points.iter().map(|p| p.length).sum::<isize>()
        );
    }
}

fn random_assignment(rng: &mut StdRng) -> String {
    let indent = " ".repeat(rng.gen_range(0..3));
    let key = random_word(rng, 1, 10);
    let gap: String = (0..rng.gen_range(0..4))
        .map(|_| if rng.gen_bool(0.25) { '\t' } else { ' ' })
        .collect();
    let op = if rng.gen_bool(0.2) { "+=" } else { "=" };
    let value = random_word(rng, 1, 6);
    format!("{indent}{key}{gap}{op} {value}")
}

#[test]
fn test_separator_units_share_one_visual_column() {
    let mut rng = StdRng::seed_from_u64(42);

    for tab_size in [2usize, 4, 8] {
        let config = AlignConfig {
            tab_size,
            ..AlignConfig::default()
        };
        let separators = Separators::compile(&config.alignment_chars).unwrap();

        for _ in 0..100 {
            let count = rng.gen_range(2..10);
            let lines: Vec<String> = (0..count).map(|_| random_assignment(&mut rng)).collect();
            let mut buffer = RopeBuffer::from_text(&lines.join("\n"));
            let rows: Vec<usize> = (0..count).collect();

            let result = align_separators(&mut buffer, &rows, &config, &separators).unwrap();
            let target = result.target_col.unwrap();

            for row in rows {
                let col = unit_visual_col(&buffer, row, &config, &separators);
                assert_eq!(col, Some(target), "row {row} of {:?}", buffer.text());
            }
            assert_eq!(buffer.line_count(), count);
        }
    }
}

fn random_indented_line(rng: &mut StdRng) -> String {
    let indent: String = (0..rng.gen_range(0..6))
        .map(|_| if rng.gen_bool(0.3) { '\t' } else { ' ' })
        .collect();
    format!("{indent}{}", random_word(rng, 1, 6))
}

#[test]
fn test_indentation_edges_share_one_visual_column() {
    let mut rng = StdRng::seed_from_u64(7);

    for tab_size in [2usize, 4, 8] {
        for translate_tabs_to_spaces in [false, true] {
            let config = AlignConfig {
                tab_size,
                translate_tabs_to_spaces,
                ..AlignConfig::default()
            };

            for _ in 0..50 {
                let count = rng.gen_range(2..8);
                let lines: Vec<String> =
                    (0..count).map(|_| random_indented_line(&mut rng)).collect();
                let mut buffer = RopeBuffer::from_text(&lines.join("\n"));
                let rows: Vec<usize> = (0..count).collect();

                let result =
                    align_indentation(&mut buffer, &rows, &config, &Declarations::default())
                        .unwrap();

                for row in 0..count {
                    let line = buffer.line_text(row);
                    let leading: String = line
                        .chars()
                        .take_while(|&c| c == ' ' || c == '\t')
                        .collect();
                    assert_eq!(
                        visual_width(&leading, 0, tab_size),
                        result.target_col,
                        "row {row} of {:?}",
                        buffer.text()
                    );
                    if translate_tabs_to_spaces {
                        assert!(!leading.contains('\t'), "{leading:?}");
                    } else {
                        assert!(!leading.contains(" \t"), "{leading:?}");
                    }
                }

                let again =
                    align_indentation(&mut buffer, &rows, &config, &Declarations::default())
                        .unwrap();
                assert_eq!(again.edits, 0, "{:?}", buffer.text());
            }
        }
    }
}
