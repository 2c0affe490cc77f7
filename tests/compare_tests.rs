use verdict::compare::{compare, Mismatch};

const TOL: f64 = 1e-4;

#[test]
fn identical_text_is_equal_for_any_tolerance() {
    let text = "3 1 4\nhello world\n-2.5e3\n";
    for tol in [0.0, 1e-9, TOL, 1.0] {
        let result = compare(text, text, tol);
        assert!(result.is_equal());
        assert_eq!(result.reason(), "OK");
    }
}

#[test]
fn trailing_blank_lines_are_ignored() {
    assert!(compare("1 2\n", "1 2\n\n\n", TOL).is_equal());
    assert!(compare("1 2\n \n\t\n", "1 2", TOL).is_equal());
}

#[test]
fn whitespace_runs_collapse() {
    assert!(compare("1 2 3", "  1\t2    3  ", TOL).is_equal());
}

#[test]
fn numeric_tokens_use_tolerance() {
    assert!(compare("3.14159", "3.14160", TOL).is_equal());

    let result = compare("3.14159", "3.20000", TOL);
    assert!(!result.is_equal());
    assert_eq!(
        result.mismatch(),
        Some(&Mismatch::Numeric {
            line: 1,
            token: 1,
            expected: "3.14159".to_string(),
            actual: "3.20000".to_string(),
            tolerance: TOL,
        })
    );
    assert_eq!(
        result.reason(),
        "Numeric mismatch at line 1, token 1: expected 3.14159, got 3.20000 (tol=0.0001)"
    );
}

#[test]
fn numbers_in_different_spellings_are_equal() {
    assert!(compare("42", "42.000", TOL).is_equal());
    assert!(compare("1e3", "1000", TOL).is_equal());
    assert!(compare("+5", "5", TOL).is_equal());
}

#[test]
fn integer_mismatch_reports_both_values() {
    let result = compare("43\n", "42\n", TOL);
    assert_eq!(
        result.reason(),
        "Numeric mismatch at line 1, token 1: expected 43, got 42 (tol=0.0001)"
    );
}

#[test]
fn numeric_reason_stays_short_for_extreme_values() {
    let result = compare("1e300", "2e300", TOL);
    assert_eq!(
        result.reason(),
        "Numeric mismatch at line 1, token 1: expected 1e300, got 2e300 (tol=0.0001)"
    );

    let result = compare("1.0", "1.1", 1e-15);
    assert_eq!(
        result.reason(),
        "Numeric mismatch at line 1, token 1: expected 1.0, got 1.1 (tol=1e-15)"
    );
}

#[test]
fn text_tokens_compare_exactly() {
    let result = compare("abc", "abd", TOL);
    assert_eq!(
        result.reason(),
        "String mismatch at line 1, token 1: expected 'abc', got 'abd'"
    );
    assert!(!compare("Yes", "yes", 1.0).is_equal());
}

#[test]
fn mixed_numeric_and_text_fall_back_to_string_comparison() {
    let result = compare("1e10", "abc", TOL);
    assert!(matches!(result.mismatch(), Some(Mismatch::Text { .. })));
    assert_eq!(
        result.reason(),
        "String mismatch at line 1, token 1: expected '1e10', got 'abc'"
    );
}

#[test]
fn special_values_are_text() {
    assert!(compare("inf", "inf", TOL).is_equal());
    assert!(compare("nan", "nan", TOL).is_equal());
    assert!(matches!(
        compare("nan", "NaN", TOL).mismatch(),
        Some(Mismatch::Text { .. })
    ));
}

#[test]
fn line_count_is_checked_before_tokens() {
    let result = compare("a\nb", "a", TOL);
    assert_eq!(
        result.mismatch(),
        Some(&Mismatch::LineCount {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(result.reason(), "Line count differs: expected 2, got 1");

    // A differing first token does not win over the line count.
    assert!(matches!(
        compare("x\ny", "z", TOL).mismatch(),
        Some(Mismatch::LineCount { .. })
    ));
}

#[test]
fn token_count_names_the_line() {
    let result = compare("1 2\n3 4\n", "1 2\n3\n", TOL);
    assert_eq!(result.reason(), "Token count differs on line 2: expected 2, got 1");
}

#[test]
fn first_mismatch_wins() {
    let result = compare("1 2 3\n4 5 6", "1 9 8\n4 5 0", TOL);
    assert!(matches!(
        result.mismatch(),
        Some(Mismatch::Numeric { line: 1, token: 2, .. })
    ));
}

#[test]
fn leading_blank_lines_matter() {
    assert!(matches!(
        compare("\n1", "1", TOL).mismatch(),
        Some(Mismatch::LineCount { .. })
    ));
}

#[test]
fn empty_outputs_are_equal() {
    assert!(compare("", "", TOL).is_equal());
    assert!(compare("", "\n\n", TOL).is_equal());
}

#[test]
fn crlf_line_endings_match_lf() {
    assert!(compare("1\r\n2\r\n", "1\n2\n", TOL).is_equal());
}

#[test]
fn zero_tolerance_requires_exact_numbers() {
    assert!(compare("0.1", "0.10", 0.0).is_equal());
    assert!(!compare("0.1", "0.1000001", 0.0).is_equal());
}
