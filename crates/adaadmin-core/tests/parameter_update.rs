use std::fs;

use adaadmin_core::fdt::compact_fdt;
use adaadmin_core::{FlagDomain, ParameterError, ParameterMode, ParameterUpdate};
use anyhow::Result;

#[test]
fn update_serializes_only_assigned_fields() -> Result<()> {
    let update = ParameterUpdate::parse("type=dynamic,NT=12,PLOG=off,OPTIONS=(XA,TRUNCATION)")?;
    let value = serde_json::to_value(&update)?;

    assert_eq!(
        value,
        serde_json::json!({
            "type": "dynamic",
            "OPTIONS": "XA,TRUNCATION",
            "NT": 12,
            "PLOG": false
        })
    );
    Ok(())
}

#[test]
fn decoded_options_feed_back_into_an_update() -> Result<()> {
    let online = FlagDomain::DatabaseOptions.decode("129");
    assert_eq!(online, "TRUNCATION,XA");

    let update = ParameterUpdate::parse(&format!("OPTIONS=({online})"))?;
    assert_eq!(update.options.as_deref(), Some("TRUNCATION,XA"));
    assert_eq!(update.mode, ParameterMode::Static);
    Ok(())
}

#[test]
fn errors_render_operator_friendly_messages() {
    let malformed = ParameterUpdate::parse("NT").err().map(|err| err.to_string());
    assert_eq!(
        malformed.as_deref(),
        Some("parameter 'NT' is not valid, expected name=value (e.g. NT=5,ADATCP=ON,OPTIONS=(A,B))")
    );

    let invalid = ParameterUpdate::parse("LBP=lots").err();
    assert!(matches!(
        invalid,
        Some(ParameterError::InvalidValue { ref field, ref raw }) if field == "LBP" && raw == "lots"
    ));
}

#[test]
fn fdt_files_compact_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("emp.fdt");
    fs::write(&path, "1,AA,8,A,UQ,DE ; personnel id\n1,AB\n2,AC,20,A,NU\n")?;

    let source = fs::read_to_string(&path)?;
    assert_eq!(compact_fdt(&source), "1,AA,8,A,UQ,DE%1,AB%2,AC,20,A,NU");
    Ok(())
}
