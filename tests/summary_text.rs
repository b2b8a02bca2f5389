use tendon_biomech::io::error_log::format_error_log;
use tendon_biomech::io::summary::{ascii_table, fmt_value};
use tendon_biomech::pipeline::outcome::ErrorLog;

#[test]
fn ascii_table_layout() {
    let table = ascii_table(&[
        ("Summary".to_string(), String::new()),
        ("Max modulus".to_string(), "12.5".to_string()),
    ]);
    let expected = "\
+-------------+------+
| Summary     |      |
+-------------+------+
| Max modulus | 12.5 |
+-------------+------+
";
    assert_eq!(table, expected);
}

#[test]
fn whole_values_keep_a_decimal() {
    assert_eq!(fmt_value(10.0), "10.0");
    assert_eq!(fmt_value(-0.25), "-0.25");
    assert_eq!(fmt_value(f64::INFINITY), "inf");
}

#[test]
fn error_log_has_both_sections() {
    let log = ErrorLog {
        no_metadata_match: vec!["210409 MRC Sample B9Data.csv".to_string()],
        processing_failed: Vec::new(),
    };
    let text = format_error_log(&log);
    assert!(text.starts_with("Error log file:\n"));
    assert!(text.contains("most likely the replicate number"));
    assert!(text.contains(" - 210409 MRC Sample B9Data.csv\n"));
    assert!(text.contains("'210409 MRC Sample B1Data'"));
    assert!(text.contains("missing failure data"));
    assert!(text.trim_end().ends_with("(none)"));
}
