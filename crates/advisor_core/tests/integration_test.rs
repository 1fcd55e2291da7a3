//! Integration tests for codification, ID3 learning and inference
//!
//! Trains on a small intake table and checks predictions, per-record
//! failures and cross-run determinism.

use advisor_core::{
    Advisor, AdvisorError, Codebook, Column, Dataset, DecisionVariable, Id3Learning, Node,
    PredictorSpec, Record,
};
use anyhow::Result;

/// Intake interviews: advice follows attendance, then motivation
fn intake_table() -> Result<Dataset> {
    Ok(Dataset::new(vec![
        Column::new("studentnummer", ["s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8"]),
        Column::new(
            "was_aanwezig",
            ["ja", "ja", "ja", "ja", "nee", "nee", "nee", "ja"],
        ),
        Column::new(
            "intr_motivatie",
            ["hoog", "laag", "hoog", "laag", "hoog", "laag", "hoog", "hoog"],
        ),
        Column::new(
            "advies",
            [
                "positief", "twijfel", "positief", "twijfel", "negatief", "negatief", "negatief",
                "positief",
            ],
        ),
    ])?)
}

fn predictors() -> Vec<PredictorSpec> {
    vec![
        PredictorSpec::declared("was_aanwezig", 2),
        PredictorSpec::observed("intr_motivatie"),
    ]
}

#[test]
fn test_training_set_is_reproduced() -> Result<()> {
    let data = intake_table()?;
    let advisor = Advisor::train(&data, &predictors(), "advies")?;

    for record in data.records() {
        let expected = record.get("advies").unwrap_or_default().to_string();
        assert_eq!(advisor.advise(&record)?, expected);
    }

    let tree = advisor.tree();
    match tree.root() {
        Node::Split { attribute, .. } => assert_eq!(*attribute, 0, "attendance splits first"),
        other => panic!("expected split, got {other:?}"),
    }
    assert_eq!(tree.depth(), 2);

    Ok(())
}

#[test]
fn test_test_records_are_processed_independently() -> Result<()> {
    let advisor = Advisor::train(&intake_table()?, &predictors(), "advies")?;

    let test_records = vec![
        Record::new()
            .with("studentnummer", "t1")
            .with("was_aanwezig", "ja")
            .with("intr_motivatie", "laag"),
        Record::new()
            .with("studentnummer", "t2")
            .with("was_aanwezig", "misschien")
            .with("intr_motivatie", "hoog"),
        Record::new()
            .with("studentnummer", "t3")
            .with("was_aanwezig", "nee")
            .with("intr_motivatie", "laag"),
    ];

    let predictions = advisor.advise_all(&test_records, Some("studentnummer"))?;
    assert_eq!(predictions.len(), 3);
    assert_eq!(predictions[0].label(), Some("twijfel"));
    assert!(matches!(
        predictions[1].result,
        Err(AdvisorError::UnknownCategory { ref value, .. }) if value == "misschien"
    ));
    assert_eq!(predictions[2].key, "t3");
    assert_eq!(predictions[2].label(), Some("negatief"));

    Ok(())
}

#[test]
fn test_cross_run_determinism() -> Result<()> {
    let data = intake_table()?;

    let mut fingerprints = Vec::new();
    for _ in 0..3 {
        let advisor = Advisor::train(&data, &predictors(), "advies")?;
        fingerprints.push((
            advisor.tree().fingerprint()?,
            advisor.codebook().fingerprint()?,
        ));
    }

    for i in 1..fingerprints.len() {
        assert_eq!(
            fingerprints[0], fingerprints[i],
            "run {} should match run 0",
            i
        );
    }

    Ok(())
}

#[test]
fn test_declared_arity_exceeds_observed() -> Result<()> {
    // Flag declared binary although the sample only holds "nee"
    let data = Dataset::new(vec![
        Column::new("deficient", ["nee", "nee", "nee"]),
        Column::new("level", ["a", "b", "a"]),
        Column::new("advies", ["x", "y", "x"]),
    ])?;

    let book = Codebook::fit_all(&data)?;
    let inputs = book.encode_dataset(&data, &["deficient", "level"])?;
    let outputs = book.encode_column(&data, "advies")?;

    let learner = Id3Learning::new(
        vec![
            DecisionVariable::new("deficient", 2),
            DecisionVariable::from_codebook(&book, "level")?,
        ],
        book.symbol_count("advies")?,
    )?;
    let tree = learner.learn(&inputs, &outputs)?;

    assert_eq!(tree.training_error(&inputs, &outputs)?, 0.0);
    // a constant column carries no information, so only "level" splits
    match tree.root() {
        Node::Split { attribute, .. } => assert_eq!(*attribute, 1),
        other => panic!("expected split, got {other:?}"),
    }
    assert_eq!(tree.decide(&[1, 1])?, 1);

    Ok(())
}

#[test]
fn test_missing_predictor_column_fails_fast() -> Result<()> {
    let data = intake_table()?;
    let err = Advisor::train(&data, &[PredictorSpec::observed("capaciteiten")], "advies")
        .expect_err("absent column must be rejected");
    assert!(matches!(err, AdvisorError::InvalidConfiguration(_)));
    Ok(())
}
