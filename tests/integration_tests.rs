//! Integration tests across the fact store and the derivation engine
//!
//! These tests verify end-to-end behaviour:
//! - Builder → FactBase → Kinship queries
//! - Built-in fact bases → expectation suites
//! - Shared fact bases queried from several threads
//!
//! Run with: cargo test --test integration_tests

use kindred_engine::{suite, Kinship, KinExpr, KinshipError, Relation};
use kindred_facts::{FactBase, FactBaseName, FactError, FactIssue, Gender, ParentRole};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Custom fact bases
// ============================================================================

fn small_family() -> Result<FactBase, FactError> {
    let mut b = FactBase::builder();
    b.person("Ada", Gender::Female)?
        .person("Ben", Gender::Male)?
        .person("Cal", Gender::Male)?
        .person("Dot", Gender::Female)?
        .person("Eli", Gender::Male)?;
    b.father("Cal", "Ben")?.mother("Cal", "Ada")?;
    b.father("Dot", "Ben")?.mother("Dot", "Ada")?;
    b.father("Eli", "Cal")?;
    b.marry("Ada", "Ben")?;
    b.build()
}

#[test]
fn test_custom_family_end_to_end() -> anyhow::Result<()> {
    let kin = Kinship::new(small_family()?);

    assert_eq!(kin.relatives(Relation::Sister, "Cal")?, names(&["Dot"]));
    assert_eq!(kin.relatives(Relation::Aunt, "Eli")?, names(&["Dot"]));
    assert_eq!(kin.relatives(Relation::GrandMother, "Eli")?, names(&["Ada"]));
    assert_eq!(kin.relatives(Relation::Husband, "Ada")?, names(&["Ben"]));
    assert_eq!(kin.relatives(Relation::GrandSon, "Ben")?, names(&["Eli"]));
    Ok(())
}

#[test]
fn test_builder_rejects_cycles_and_conflicts() {
    let mut b = FactBase::builder();
    b.person("A", Gender::Male).unwrap();
    b.person("B", Gender::Male).unwrap();
    b.father("A", "B").unwrap();
    assert!(matches!(
        b.father("A", "A"),
        Err(FactError::SelfParent { .. })
    ));
    assert!(matches!(
        b.father("A", "C"),
        Err(FactError::ConflictingParent { .. })
    ));
    b.father("B", "A").unwrap();
    assert!(matches!(b.build(), Err(FactError::AncestryCycle { .. })));
}

#[test]
fn test_ungendered_parent_is_flagged_and_dropped() -> anyhow::Result<()> {
    let mut b = FactBase::builder();
    b.person("Kid", Gender::Female)?;
    b.father("Kid", "Ghost")?;
    let facts = b.build()?;

    assert!(facts.issues().iter().any(|issue| matches!(
        issue,
        FactIssue::MissingGender { person, .. } if person == "Ghost"
    )));

    let kin = Kinship::new(facts);
    assert!(kin.relatives(Relation::Father, "Kid")?.is_empty());
    assert_eq!(
        kin.relatives(Relation::Father, "Ghost"),
        Err(KinshipError::UnknownPerson {
            name: "Ghost".to_string()
        })
    );
    Ok(())
}

// ============================================================================
// Built-in fact bases
// ============================================================================

#[test]
fn test_builtin_suites_pass() -> anyhow::Result<()> {
    for name in FactBaseName::ALL {
        let kin = Kinship::new(name.load()?);
        let report = suite::run(&kin, suite::expectations_for(name));
        assert!(report.is_success(), "{name}: {:?}", report.failures().collect::<Vec<_>>());
    }
    Ok(())
}

#[test]
fn test_suite_report_serializes() -> anyhow::Result<()> {
    let kin = Kinship::new(FactBaseName::Classic.load()?);
    let report = suite::run(&kin, suite::CLASSIC);
    let json = serde_json::to_value(&report)?;

    let cases = json["cases"].as_array().expect("cases array");
    assert_eq!(cases.len(), suite::CLASSIC.len());
    assert_eq!(cases[0]["query"]["type"], "relation");
    assert_eq!(cases[0]["query"]["relation"], "parent");
    Ok(())
}

#[test]
fn test_custom_expression_matches_named_relation() -> anyhow::Result<()> {
    let kin = Kinship::new(FactBaseName::Extended.load()?);
    let cousins = KinExpr::input().parent().siblings().children(None);
    for person in ["Jean", "Cindy", "Pete"] {
        assert_eq!(
            kin.evaluate(&cousins, person)?,
            kin.relatives(Relation::Cousin, person)?
        );
    }
    Ok(())
}

#[test]
fn test_great_grandfather_by_level() -> anyhow::Result<()> {
    let kin = Kinship::new(FactBaseName::Classic.load()?);
    assert_eq!(
        kin.ancestors_at_level("Pete", ParentRole::Father, 3)?,
        names(&["George"])
    );
    Ok(())
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_fact_base_across_threads() -> anyhow::Result<()> {
    let facts = Arc::new(FactBaseName::Extended.load()?);
    let handles: Vec<_> = Relation::ALL
        .into_iter()
        .map(|relation| {
            let kin = Kinship::from_shared(Arc::clone(&facts));
            thread::spawn(move || {
                let local = kin.relatives(relation, "Alice");
                (relation, local)
            })
        })
        .collect();

    let serial = Kinship::from_shared(facts);
    for handle in handles {
        let (relation, threaded) = handle.join().expect("query thread panicked");
        assert_eq!(threaded, serial.relatives(relation, "Alice"));
    }
    Ok(())
}
