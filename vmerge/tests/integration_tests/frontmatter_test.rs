// tests/integration_tests/frontmatter_test.rs
use super::common::{MockLogger, config, create_test_file, setup_test_vault};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use vmerge::core::coordinator::run;
use vmerge::{Feed, FrontmatterParser, Header, NoProgress, RunOptions, validate_frontmatter};

#[test]
fn test_invalid_frontmatter_is_warned_and_kept() -> Result<()> {
    let vault = setup_test_vault()?;
    let invalid_file = create_test_file(
        vault.path(),
        "folder1/invalid.md",
        "---\ntitle: Invalid\ndate: not-a-date\n---\n\nInvalid frontmatter test",
    )?;
    let out = TempDir::new()?;
    let config = config(vault.path(), &["folder1"], out.path())?;
    let logger = MockLogger::default();

    let stats = run(&config, &RunOptions::default(), &logger, &mut NoProgress);

    let expected = format!("Invalid frontmatter in {}", invalid_file.display());
    let warnings = logger.warn.borrow();
    assert_eq!(warnings.iter().filter(|w| w.contains(&expected)).count(), 1);
    assert_eq!(stats.processed_files, 3);
    assert_eq!(stats.frontmatter_warnings, 1);

    let output = fs::read_to_string(out.path().join("folder1.md"))?;
    assert!(output.contains(
        "\n# invalid.md\n\n---\ntitle: Invalid\ndate: not-a-date\n---\n\nInvalid frontmatter test\n\n"
    ));
    Ok(())
}

#[test]
fn test_malformed_yaml_falls_back_to_raw_text() -> Result<()> {
    let vault = TempDir::new()?;
    let content = "---\ntitle: [broken\n  : nope\n---\nBody survives\n";
    create_test_file(vault.path(), "notes/bad.md", content)?;
    let out = TempDir::new()?;
    let config = config(vault.path(), &["notes"], out.path())?;
    let logger = MockLogger::default();

    run(&config, &RunOptions::default(), &logger, &mut NoProgress);

    let output = fs::read_to_string(out.path().join("notes.md"))?;
    assert_eq!(output, format!("\n# bad.md\n\n{content}\n\n"));
    assert_eq!(logger.warn.borrow().len(), 1);
    assert!(logger.error.borrow().is_empty());
    Ok(())
}

#[test]
fn test_single_byte_chunks_match_whole_document() {
    let content = b"---\ntitle: Chunked\ndate: 2024-05-05\n---\nline one\n---\nline two";

    let mut whole = FrontmatterParser::new();
    let Feed::Resolved(expected) = whole.feed(content) else {
        panic!("a complete document must resolve");
    };

    let mut parser = FrontmatterParser::new();
    let mut resolved = None;
    let mut tail = Vec::new();
    for byte in content {
        match parser.feed(std::slice::from_ref(byte)) {
            Feed::NeedMore => {}
            Feed::Resolved(r) => resolved = Some(r),
            Feed::Passthrough => tail.push(*byte),
        }
    }
    assert!(parser.finish().is_none());

    let mut resolved = resolved.expect("document never resolved");
    resolved.body.extend_from_slice(&tail);
    assert_eq!(resolved, expected);

    let Header::Frontmatter(raw) = &resolved.header else {
        panic!("expected frontmatter");
    };
    assert!(validate_frontmatter(raw).is_ok());
}
