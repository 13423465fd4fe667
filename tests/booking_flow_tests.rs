mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn book(catalog: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo_bin!("trustbnb"));
    cmd.arg("book")
        .arg("--catalog")
        .arg(catalog)
        .args(["--delay-ms", "10"]);
    cmd
}

#[test]
fn test_booking_completes() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-04",
        "--guests",
        "4",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "reference,property,check_in,check_out,guests,payment_method,nights,subtotal,cleaning_fee,service_fee,taxes,total",
        ))
        .stdout(predicate::str::contains(
            "TBNB-000001,ksamil-1,2024-08-01,2024-08-04,4,card,3,300,45,36,24,405",
        ));
}

#[test]
fn test_declined_payment_is_retried() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-02",
        "--payment",
        "paypal",
        "--decline-attempts",
        "1",
    ]);

    // 100 + 45 + 12 + 8 = 165
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Payment attempt 1 failed"))
        .stdout(predicate::str::contains(",paypal,1,100,45,12,8,165"));
}

#[test]
fn test_booking_fails_after_max_attempts() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-02",
        "--decline-attempts",
        "5",
        "--max-attempts",
        "2",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Payment attempt 2 failed"))
        .stderr(predicate::str::contains("booking not completed after 2 attempts"));
}

#[test]
fn test_unknown_property() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "durres-9",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-02",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Not found: property 'durres-9'"));
}

#[test]
fn test_missing_check_out_blocks_the_wizard() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation error on check_out"));
}

#[test]
fn test_strict_booking_rejects_same_day_stay() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-01",
        "--strict",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("check-out must be after check-in"));
}

#[test]
fn test_properties_listing() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = Command::new(cargo_bin!("trustbnb"));
    cmd.arg("properties").arg("--catalog").arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("id,name,location,price_per_night,amenities"))
        .stdout(predicate::str::contains("ksamil-1,Ksamil Beach House,Ksamil,100,wifi;pool"))
        .stdout(predicate::str::contains("tirana-2,Blloku Studio,Tirana,55.5,wifi"));
}

#[test]
fn test_booking_confirmation_as_json() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-04",
        "--format",
        "json",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["reference"], "TBNB-000001");
    assert_eq!(value["property_name"], "Ksamil Beach House");
    assert_eq!(value["pricing"]["total"], "405");
}

#[test]
fn test_booking_rejects_negative_cleaning_fee() {
    let catalog = common::catalog_file().unwrap();

    let mut cmd = book(catalog.path());
    cmd.args([
        "--property",
        "ksamil-1",
        "--check-in",
        "2024-08-01",
        "--check-out",
        "2024-08-04",
        "--cleaning-fee=-45",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Validation error on cleaning_fee"))
        .stdout(predicate::str::contains("TBNB-").not());
}
