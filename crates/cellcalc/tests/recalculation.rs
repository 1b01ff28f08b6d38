//! End-to-end recalculation tests through the public API

use cellcalc::prelude::*;
use cellcalc::{parse, BinaryOperator};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

fn id(address: &str) -> CellId {
    address.parse().unwrap()
}

fn cells(addresses: &[&str]) -> BTreeSet<CellId> {
    addresses.iter().map(|a| id(a)).collect()
}

fn text(sheet: &Sheet, address: &str) -> Option<String> {
    sheet.value(address).unwrap().map(|v| v.to_string())
}

/// Test that a reference picks up the referenced value
#[test]
fn test_simple_reference() {
    let mut evaluator = Evaluator::new();
    evaluator.update(id("A3"), Node::WholeNumber(17));

    let result = evaluator.update(id("B7"), Node::Reference(id("A3")));

    assert_eq!(result, EvaluatorResult::Success(cells(&["B7"])));
    assert_eq!(evaluator.lookup(&id("B7")), Some(CalculatedResult::from(17)));
}

/// Test propagation along a chain of references
#[test]
fn test_transitive_chain() {
    let mut evaluator = Evaluator::new();
    evaluator.update(id("A3"), Node::WholeNumber(17));
    evaluator.update(id("B7"), Node::Reference(id("A3")));
    evaluator.update(id("C1"), Node::Reference(id("B7")));

    let result = evaluator.update(id("A3"), Node::WholeNumber(10));

    assert_eq!(result, EvaluatorResult::Success(cells(&["A3", "B7", "C1"])));
    for address in ["A3", "B7", "C1"] {
        assert_eq!(evaluator.lookup(&id(address)), Some(CalculatedResult::from(10)));
    }
}

#[test]
fn test_two_cell_cycle() {
    let mut evaluator = Evaluator::new();
    assert!(evaluator
        .update(id("A3"), Node::Reference(id("B7")))
        .is_success());

    let result = evaluator.update(id("B7"), Node::Reference(id("A3")));

    assert_eq!(result, EvaluatorResult::Failure("Cycle detected".into()));
}

#[test]
fn test_three_cell_cycle() {
    let mut sheet = Sheet::new();
    sheet.set("A3", "=B7").unwrap();
    sheet.set("B7", "=C1").unwrap();

    let err = sheet.set("C1", "=A3").unwrap_err();

    assert_eq!(err.message(), "Cycle detected");
    // Value computed before the cycle was found stays visible
    assert_eq!(text(&sheet, "C1").as_deref(), Some("0"));
}

/// Test that a diamond settles on values computed from the new input
#[test]
fn test_diamond_dependency() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "1").unwrap();
    sheet.set("B1", "=A1 + 1").unwrap();
    sheet.set("C1", "=A1 * 10").unwrap();
    sheet.set("D1", "=B1 + C1").unwrap();
    assert_eq!(text(&sheet, "D1").as_deref(), Some("12"));

    let updated = sheet.set("A1", "5").unwrap();

    assert_eq!(updated, cells(&["A1", "B1", "C1", "D1"]));
    assert_eq!(text(&sheet, "B1").as_deref(), Some("6"));
    assert_eq!(text(&sheet, "C1").as_deref(), Some("50"));
    assert_eq!(text(&sheet, "D1").as_deref(), Some("56"));
}

/// Test that clearing a cell removes it from every store
#[test]
fn test_clear_cell_removes_edges() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "1").unwrap();
    sheet.set("A2", "2").unwrap();
    sheet.set("B1", "=A1 + A2").unwrap();

    let updated = sheet.set("B1", "").unwrap();

    assert_eq!(updated, cells(&["B1"]));
    let evaluator = sheet.evaluator();
    assert!(evaluator.node(&id("B1")).is_none());
    assert!(evaluator.lookup(&id("B1")).is_none());
    assert_eq!(evaluator.observers(id("A1")).count(), 0);
    assert_eq!(evaluator.observers(id("A2")).count(), 0);
    assert!(evaluator.dependencies().is_empty());
}

/// Test that a cleared referenced cell reads as zero downstream
#[test]
fn test_reference_to_cleared_cell() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "7").unwrap();
    sheet.set("B1", "=A1 + 1").unwrap();

    sheet.set("A1", "").unwrap();
    sheet.set("B1", "=A1 + 1").unwrap();

    assert_eq!(text(&sheet, "B1").as_deref(), Some("1"));
}

#[test]
fn test_unary_minus_chains() {
    assert_eq!(
        parse("=---17"),
        ParseResult::Success(Node::negate(Node::negate(Node::negate(
            Node::WholeNumber(17)
        ))))
    );
    assert_eq!(parse("--17"), ParseResult::Success(Node::Text("--17".into())));

    let mut sheet = Sheet::new();
    sheet.set("A1", "=---17").unwrap();
    sheet.set("A2", "--17").unwrap();

    assert_eq!(text(&sheet, "A1").as_deref(), Some("-17"));
    assert_eq!(text(&sheet, "A2"), None);
}

#[test]
fn test_malformed_address_in_expression() {
    assert_eq!(parse("=3A"), ParseResult::Failure("Wrong Cell Ids: 3A".into()));

    let mut sheet = Sheet::new();
    let err = sheet.set("A1", "=3A").unwrap_err();
    assert_eq!(err.to_string(), "Wrong Cell Ids: 3A");
}

/// Test strict left-to-right application of operators
#[test]
fn test_left_to_right_evaluation() {
    assert_eq!(
        parse("=17 + A3 * 5"),
        ParseResult::Success(Node::binary(
            BinaryOperator::Multiply,
            Node::binary(
                BinaryOperator::Add,
                Node::WholeNumber(17),
                Node::Reference(id("A3"))
            ),
            Node::WholeNumber(5),
        ))
    );

    let mut sheet = Sheet::new();
    sheet.set("A3", "3").unwrap();
    sheet.set("B1", "=17 + A3 * 5").unwrap();
    assert_eq!(text(&sheet, "B1").as_deref(), Some("100"));
}

/// Test that a failing update keeps the cell's earlier state
#[test]
fn test_division_by_zero_rolls_back() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "=2 + 2").unwrap();
    sheet.set("B1", "=A1").unwrap();

    let err = sheet.set("A1", "=A1 / 0").unwrap_err();

    assert!(matches!(err, Error::Rejected { .. }));
    assert_eq!(err.message(), "Division by zero");
    assert_eq!(text(&sheet, "A1").as_deref(), Some("4"));
    assert_eq!(text(&sheet, "B1").as_deref(), Some("4"));
    assert_eq!(sheet.evaluator().observers(id("A1")).collect::<Vec<_>>(), vec![id("B1")]);
}

#[test]
fn test_power_and_decimals() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "1.5").unwrap();
    sheet.set("A2", "=pow(A1, 2)").unwrap();
    sheet.set("A3", "=A2 / 3").unwrap();

    assert_eq!(text(&sheet, "A2").as_deref(), Some("2.25"));
    assert_eq!(text(&sheet, "A3").as_deref(), Some("0.75"));

    let err = sheet.set("A4", "=pow(2, 0.5)").unwrap_err();
    assert_eq!(err.message(), "Invalid exponent: 0.5 is not an integer");
}

#[test]
fn test_negative_exponents_with_options() {
    let mut strict = Sheet::new();
    assert!(strict.set("A1", "=pow(2, -2)").is_err());

    let mut relaxed = Sheet::with_options(CalculationOptions {
        allow_negative_exponents: true,
        ..Default::default()
    });
    relaxed.set("A1", "=pow(2, -2)").unwrap();
    assert_eq!(text(&relaxed, "A1").as_deref(), Some("0.25"));
}

/// Test that a dependent failing during propagation loses its value
#[test]
fn test_dependent_failure_during_propagation() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "4").unwrap();
    sheet.set("B1", "=8 / A1").unwrap();
    sheet.set("C1", "=B1 + 1").unwrap();

    let updated = sheet.set("A1", "0").unwrap();

    assert_eq!(updated, cells(&["A1", "B1", "C1"]));
    assert_eq!(text(&sheet, "B1"), None);
    assert_eq!(text(&sheet, "C1").as_deref(), Some("1"));
}

/// Test that a long running-total column recalculates end to end
#[test]
fn test_long_chain() {
    let mut sheet = Sheet::new();
    sheet.set("A1", "1").unwrap();
    for row in 2..=10_000 {
        sheet
            .set(&format!("A{}", row), &format!("=A{} + 1", row - 1))
            .unwrap();
    }

    let updated = sheet.set("A1", "2").unwrap();

    assert_eq!(updated.len(), 10_000);
    assert_eq!(text(&sheet, "A10000").as_deref(), Some("10001"));
}

/// Test that a cycle stored by an earlier rejected update stops upstream edits
#[test]
fn test_stored_cycle_downstream_of_edit() {
    let mut sheet = Sheet::new();
    sheet.set("X1", "5").unwrap();
    sheet.set("A1", "=B1 + X1").unwrap();
    assert_eq!(sheet.set("B1", "=A1").unwrap_err().message(), "Cycle detected");

    let err = sheet.set("X1", "6").unwrap_err();

    assert_eq!(err.message(), "Cycle detected");
    assert_eq!(text(&sheet, "X1").as_deref(), Some("6"));
}

#[test]
fn test_deeply_nested_formula_is_rejected() {
    let mut sheet = Sheet::new();
    let formula = format!("={}1", "-".repeat(2_000));

    let err = sheet.set("A1", &formula).unwrap_err();

    assert_eq!(
        err.message(),
        "Can't parse because the expression is too deeply nested"
    );
    assert_eq!(text(&sheet, "A1"), None);
}
