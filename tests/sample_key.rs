use tendon_biomech::analysis::SampleKey;

#[test]
fn key_from_standard_file_name() {
    let key = SampleKey::parse("210409 MRC Sample B1Data").unwrap();
    assert_eq!(key.date_id, "210409");
    assert_eq!(key.sample_id, "B");
    assert_eq!(key.replicate, "1");
    assert_eq!(key.to_string(), "210409/B/1");
}

#[test]
fn multi_digit_replicate_and_trailing_digits() {
    let key = SampleKey::parse("210409 MRC Sample C12Data v2").unwrap();
    assert_eq!(key.sample_id, "C");
    assert_eq!(key.replicate, "12");
}

#[test]
fn names_without_two_digit_runs_are_rejected() {
    assert!(SampleKey::parse("MRC Sample BData").is_err());
    assert!(SampleKey::parse("210409 MRC Sample BData").is_err());
}

#[test]
fn sample_letter_must_precede_replicate() {
    assert!(SampleKey::parse("210409 MRC Sample 1Data").is_err());
}
