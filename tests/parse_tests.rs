use std::collections::BTreeSet;

use gcode_command::{Command, CommandError, LineParser, Metadata, Value, parse_line, parse_line_with};

/// Fields that must survive a canonical round trip
fn shape(cmd: &Command) -> (String, Option<u32>, Option<i64>, Option<i64>, Vec<(char, Value)>, Option<String>) {
    (
        cmd.code().to_string(),
        cmd.subcode(),
        cmd.tool(),
        cmd.feedrate(),
        cmd.parameters().iter().map(|(k, v)| (*k, *v)).collect(),
        cmd.trailing_text().map(str::to_string),
    )
}

#[test]
fn test_documented_examples() {
    let cmd = parse_line("G1 X10 Y-5.5 F1500").unwrap();
    assert_eq!(cmd.code(), "G1");
    assert_eq!(
        cmd.parameters().iter().collect::<Vec<_>>(),
        vec![(&'x', &Value::Int(10)), (&'y', &Value::Float(-5.5))]
    );
    assert_eq!(cmd.feedrate(), Some(1500));

    let cmd = parse_line("M117 Print complete").unwrap();
    assert_eq!(cmd.code(), "M117");
    assert_eq!(cmd.trailing_text(), Some("Print complete"));
    assert!(cmd.parameters().is_empty());

    let cmd = parse_line("G28.2").unwrap();
    assert_eq!((cmd.code(), cmd.subcode()), ("G28", Some(2)));

    let cmd = parse_line("T3").unwrap();
    assert_eq!((cmd.code(), cmd.tool()), ("T", Some(3)));

    let cmd = parse_line("F2000").unwrap();
    assert_eq!((cmd.code(), cmd.feedrate()), ("F", Some(2000)));

    assert!(matches!(
        parse_line("not a line"),
        Err(CommandError::NotACommand { .. })
    ));
}

#[test]
fn test_original_text_round_trip() {
    let lines = [
        "G1 X10 Y-5.5 F1500",
        "  M104 S200 T0  ",
        "G28 X Y",
        "M23 file.gco",
        "g0 x1.5 y-2",
        "T1",
    ];

    for line in lines {
        let cmd = parse_line(line).unwrap();
        assert_eq!(cmd.original_text(), Some(line.trim()));
        assert_eq!(cmd.to_string(), line.trim());
    }
}

#[test]
fn test_canonical_sorts_parameters() {
    let cmd = parse_line("G1 Z0.3 Y20 X10 E1.5").unwrap();
    assert_eq!(cmd.canonical_line(), "G1 E1.5 X10 Y20 Z0.3");
}

#[test]
fn test_case_insensitivity() {
    let lower = parse_line("g1 x10").unwrap();
    let upper = parse_line("G1 X10").unwrap();

    assert_eq!(shape(&lower), shape(&upper));
    assert_ne!(lower.original_text(), upper.original_text());
}

#[test]
fn test_built_commands_reparse_identically() {
    let built = [
        Command::builder("G1")
            .param('x', 10)
            .param('y', -5.5)
            .feedrate(1500)
            .build()
            .unwrap(),
        Command::builder("G28").subcode(2).flag('x').flag('z').build().unwrap(),
        Command::builder("M104").param('s', 210).tool(1).build().unwrap(),
        Command::builder("M117").trailing_text("printing done").build().unwrap(),
        Command::builder("G1").param('e', 2.0).param('f', 1500.5).build().unwrap(),
        Command::builder("T").tool(4).build().unwrap(),
        Command::builder("F").feedrate(3000).build().unwrap(),
    ];

    for cmd in built {
        let text = cmd.to_string();
        let reparsed = parse_line(&text).unwrap();
        assert_eq!(shape(&reparsed), shape(&cmd), "round trip of {:?}", text);
    }
}

#[test]
fn test_parameter_typing() {
    let cmd = parse_line("G1 X10 Y10.0 Z-.5 E+2 A").unwrap();

    assert_eq!(cmd.get('x'), Some(&Value::Int(10)));
    assert_eq!(cmd.get('y'), Some(&Value::Float(10.0)));
    assert_eq!(cmd.get('z'), Some(&Value::Float(-0.5)));
    assert_eq!(cmd.get('e'), Some(&Value::Int(2)));
    assert_eq!(cmd.get('a'), Some(&Value::Flag));
    assert_eq!(cmd.get('b'), None);
}

#[test]
fn test_compact_parameters() {
    let cmd = parse_line("G1X10Y20F300").unwrap();

    assert_eq!(cmd.get('x'), Some(&Value::Int(10)));
    assert_eq!(cmd.get('y'), Some(&Value::Int(20)));
    assert_eq!(cmd.feedrate(), Some(300));
    assert_eq!(cmd.trailing_text(), None);
}

#[test]
fn test_float_feedrate_stays_parameter() {
    let cmd = parse_line("G1 X1 F1500.5").unwrap();

    assert_eq!(cmd.feedrate(), None);
    assert_eq!(cmd.get('f'), Some(&Value::Float(1500.5)));
}

#[test]
fn test_s_is_an_ordinary_parameter() {
    let cmd = parse_line("M106 S255").unwrap();

    assert_eq!(cmd.subcode(), None);
    assert_eq!(cmd.get('s'), Some(&Value::Int(255)));
}

#[test]
fn test_trailing_comment_is_kept() {
    let cmd = parse_line("G1 X10 ; move to X10").unwrap();

    assert_eq!(cmd.get('x'), Some(&Value::Int(10)));
    assert_eq!(cmd.trailing_text(), Some("; move to"));
}

#[test]
fn test_later_duplicate_wins() {
    let cmd = parse_line("G1 X1 X2").unwrap();
    assert_eq!(cmd.get('x'), Some(&Value::Int(2)));
}

#[test]
fn test_metadata_pass_through() {
    let tags: BTreeSet<String> = ["source:file".to_string(), "job:42".to_string()].into();
    let cmd = parse_line_with("M105", Metadata::new(Some("temperature".into()), tags.clone())).unwrap();

    assert_eq!(cmd.classification(), Some("temperature"));
    assert_eq!(cmd.provenance(), &tags);

    let plain = parse_line("M105").unwrap();
    assert_eq!(plain.classification(), None);
    assert!(plain.provenance().is_empty());
}

#[test]
fn test_commands_are_shareable_across_threads() {
    let parser = LineParser::new().with_tag("worker");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || parser.parse(format!("G1 X{}", i).as_str()).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let cmd = handle.join().unwrap();
        assert_eq!(cmd.get('x'), Some(&Value::Int(i as i64)));
    }
}

#[test]
fn test_filenames_and_words_stay_trailing_text() {
    let cmd = parse_line("M23 /sd/part2.gco").unwrap();
    assert_eq!(cmd.tool(), None);
    assert!(cmd.parameters().is_empty());
    assert_eq!(cmd.trailing_text(), Some("/sd/part2.gco"));

    let cmd = parse_line("M117 layer2 done").unwrap();
    assert!(cmd.parameters().is_empty());
    assert_eq!(cmd.trailing_text(), Some("layer2 done"));
}

#[test]
fn test_out_of_range_number_is_kept_verbatim() {
    let line = format!("G1 X{}", "9".repeat(400));
    let cmd = parse_line(&line).unwrap();

    assert_eq!(cmd.get('x'), None);
    assert_eq!(cmd.canonical_line(), line);

    let reparsed = parse_line(&cmd.canonical_line()).unwrap();
    assert_eq!(shape(&reparsed), shape(&cmd));
}

#[test]
fn test_builder_refuses_text_that_would_reparse_as_parameters() {
    let err = Command::builder("M117").trailing_text("go x10").build().unwrap_err();
    assert!(matches!(err, CommandError::ParameterInTrailingText(_)));

    let cmd = Command::builder("M23").trailing_text("/sd/part2.gco").build().unwrap();
    let reparsed = parse_line(&cmd.to_string()).unwrap();
    assert_eq!(shape(&reparsed), shape(&cmd));
}
