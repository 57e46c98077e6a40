use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MontageError::track_conflict("x")
            .to_string()
            .contains("track conflict:")
    );
    assert!(MontageError::EmptyInput.to_string().contains("empty input:"));
    assert!(
        MontageError::unsupported_mode("x")
            .to_string()
            .contains("unsupported mode:")
    );
    assert!(
        MontageError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MontageError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn inspection_keeps_source_and_cause_chain() {
    let cause = anyhow::anyhow!("no such file").context("open clip");
    let err = MontageError::inspection("clips/a.mov", &cause);
    let msg = err.to_string();
    assert!(msg.contains("clips/a.mov"));
    assert!(msg.contains("open clip"));
    assert!(msg.contains("no such file"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MontageError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
