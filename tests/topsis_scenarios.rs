// tests/topsis_scenarios.rs
//
// End-to-end engine scenarios through the public API: golden ranking,
// every validation failure kind, and the numeric degeneracies.

use topsis_mailer::topsis::ErrorKind;
use topsis_mailer::{evaluate, evaluate_csv, DecisionTable, TopsisError};

const PHONES: &str = "\
Model,Price,Storage,Camera
A1,7,9,6
A2,8,7,7
A3,9,6,3
";

#[test]
fn golden_scores_and_ranks() {
    let out = evaluate_csv(PHONES.as_bytes(), "1,1,1", "+,+,-").expect("valid input");

    let got: Vec<(&str, f64, usize)> = out
        .rows
        .iter()
        .map(|r| (r.alternative(), r.rounded_score(), r.rank))
        .collect();
    assert_eq!(got, vec![("A1", 0.43, 2), ("A2", 0.19, 3), ("A3", 0.65, 1)]);

    let best = out.by_rank()[0];
    assert_eq!(best.alternative(), "A3");
}

#[test]
fn golden_csv_output() {
    let out = evaluate_csv(PHONES.as_bytes(), "1,1,1", "+,+,-").unwrap();
    let csv = String::from_utf8(out.to_csv_bytes().unwrap()).unwrap();
    assert_eq!(
        csv,
        "Model,Price,Storage,Camera,Topsis Score,Rank\n\
         A1,7,9,6,0.43,2\n\
         A2,8,7,7,0.19,3\n\
         A3,9,6,3,0.65,1\n"
    );
}

#[test]
fn weights_shift_the_ranking() {
    // Storage weighted heavily: A1 has the most storage.
    let out = evaluate_csv(PHONES.as_bytes(), "0.1,5,0.1", "+,+,-").unwrap();
    assert_eq!(out.by_rank()[0].alternative(), "A1");
}

#[test]
fn weight_count_mismatch_names_both_counts() {
    let err = evaluate_csv(PHONES.as_bytes(), "1,1", "+,+,-").unwrap_err();
    assert_eq!(
        err,
        TopsisError::WeightCountMismatch {
            weights: 2,
            criteria: 3
        }
    );
    let msg = err.to_string();
    assert!(msg.contains('2') && msg.contains('3'), "{msg}");
}

#[test]
fn impact_symbol_error_names_token() {
    let err = evaluate_csv(PHONES.as_bytes(), "1,1,1", "+,*,-").unwrap_err();
    assert_eq!(err, TopsisError::ImpactSymbol { token: "*".into() });
    assert!(err.to_string().contains('*'));
}

#[test]
fn impact_count_mismatch() {
    let err = evaluate_csv(PHONES.as_bytes(), "1,1,1", "+,+").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ImpactCountMismatch);
}

#[test]
fn weight_format_error() {
    let err = evaluate_csv(PHONES.as_bytes(), "1;1;1", "+,+,-").unwrap_err();
    assert_eq!(
        err,
        TopsisError::WeightFormat {
            token: "1;1;1".into()
        }
    );
}

#[test]
fn two_columns_is_too_few() {
    let err = evaluate_csv(b"Model,Price\nA1,7\nA2,8\n", "1", "+").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn non_numeric_column_is_named() {
    let csv = "Model,Price,Colour\nA1,7,red\nA2,8,blue\n";
    let err = evaluate_csv(csv.as_bytes(), "1,1", "+,+").unwrap_err();
    match err {
        TopsisError::ColumnType { column, .. } => assert_eq!(column, "Colour"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn zero_column_is_a_data_error() {
    let csv = "Model,Price,Defects\nA1,7,0\nA2,8,0\n";
    let err = evaluate_csv(csv.as_bytes(), "1,1", "+,-").unwrap_err();
    assert!(err.is_data_error());
    assert!(err.to_string().contains("Defects"));
}

#[test]
fn identical_alternatives_are_degenerate() {
    // Every criterion collapses: each row sits on both ideal points.
    let csv = "Model,a,b\nA1,5,5\nA2,5,5\n";
    let err = evaluate_csv(csv.as_bytes(), "1,1", "+,-").unwrap_err();
    assert_eq!(
        err,
        TopsisError::DegenerateAlternative {
            alternative: "A1".into()
        }
    );
}

#[test]
fn header_text_does_not_matter() {
    let renamed = PHONES.replacen("Model,Price,Storage,Camera", "x,y,z,w", 1);
    let a = evaluate_csv(PHONES.as_bytes(), "1,1,1", "+,+,-").unwrap();
    let b = evaluate_csv(renamed.as_bytes(), "1,1,1", "+,+,-").unwrap();
    let ranks = |t: &topsis_mailer::RankedTable| t.rows.iter().map(|r| r.rank).collect::<Vec<_>>();
    assert_eq!(ranks(&a), ranks(&b));
}

#[test]
fn tokens_and_cells_tolerate_whitespace() {
    let table = DecisionTable::from_csv_bytes(b"Id,a,b\nx, 1 ,2\ny,3, 4\n").unwrap();
    let out = evaluate(&table, " 1 , 2 ", " + , - ").unwrap();
    assert_eq!(out.len(), 2);
    // Input cell text is kept as-is in the output.
    assert_eq!(out.rows[0].cells[1], " 1 ");
}

/// Either every score is a finite value in [0,1], or the run fails as a data error.
fn assert_scored_or_data_error(csv: &str, weights: &str, impacts: &str) {
    match evaluate_csv(csv.as_bytes(), weights, impacts) {
        Ok(out) => {
            for r in &out.rows {
                assert!(
                    r.score.is_finite() && (0.0..=1.0).contains(&r.score),
                    "{csv} / {weights}: score {}",
                    r.score
                );
            }
            let written = String::from_utf8(out.to_csv_bytes().unwrap()).unwrap();
            assert!(!written.contains("NaN") && !written.contains("inf"), "{written}");
        }
        Err(e) => assert!(e.is_data_error(), "{csv} / {weights}: {e}"),
    }
}

#[test]
fn huge_weights_still_score() {
    let csv = "Id,a,b\nx,1,2\ny,2,1\n";
    let out = evaluate_csv(csv.as_bytes(), "1e200,1e200", "+,+").unwrap();
    let plain = evaluate_csv(csv.as_bytes(), "1,1", "+,+").unwrap();
    for (big, small) in out.rows.iter().zip(&plain.rows) {
        assert!((big.score - small.score).abs() < 1e-12, "{}", big.score);
        assert_eq!(big.rank, small.rank);
    }
}

#[test]
fn tiny_values_are_ranked_not_rejected() {
    let csv = "Id,a,b\nx,1e-200,2\ny,3e-200,1\n";
    let out = evaluate_csv(csv.as_bytes(), "1,1", "+,+").unwrap();
    assert!(out.rows.iter().all(|r| (0.0..=1.0).contains(&r.score)));
}

#[test]
fn extreme_magnitudes_never_leak_undefined_scores() {
    let cases = [
        ("Id,a,b\nx,1,2\ny,2,1\n", "1e308,1e308", "+,+"),
        ("Id,a,b,c\nx,-1,1,-1\ny,1,-1,1\n", "1e308,1e308,1e308", "+,-,+"),
        ("Id,a,b,c\nx,-1,1,-1\ny,1,-1,1\n", "-1.7e308,1.7e308,1.7e308", "+,+,+"),
        ("Id,a,b\nx,1e308,1e-308\ny,-1e308,5e-324\n", "1,1", "+,-"),
        ("Id,a,b\nx,1.7e308,1.7e308\ny,1.6e308,1.7e308\nz,0,0\n", "1,1", "-,+"),
        ("Id,a,b\nx,5e-324,1\ny,0,2\n", "1e-300,1e300", "+,-"),
    ];
    for (csv, weights, impacts) in cases {
        assert_scored_or_data_error(csv, weights, impacts);
    }
}
