// tests/integration_tests/aggregation_test.rs
use super::common::{MockLogger, config, create_test_file, setup_test_vault, write_config};
use anyhow::Result;
use std::fs;
use tempfile::TempDir;
use vmerge::core::coordinator::run;
use vmerge::{NoProgress, RunOptions, process_vault};

#[test]
fn test_process_vault_with_valid_config() -> Result<()> {
    let vault = setup_test_vault()?;
    let out = TempDir::new()?;
    let config_path = write_config(vault.path(), vault.path(), &["folder1", "folder2"], out.path())?;
    let logger = MockLogger::default();

    let stats = process_vault(&config_path, &RunOptions::default(), &logger, &mut NoProgress)?;

    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.processed_files, 3);
    assert_eq!(stats.subtrees_processed, 2);

    let folder1 = fs::read_to_string(out.path().join("folder1.md"))?;
    assert!(folder1.contains("title: Test Document 1"));
    assert!(folder1.contains("title: Test Document 2"));
    assert!(folder1.contains("This is a test document in folder1"));
    assert!(folder1.contains("This is a test document in a subfolder"));
    assert!(!folder1.contains("binary-ish"));

    let folder2 = fs::read_to_string(out.path().join("folder2.md"))?;
    assert_eq!(
        folder2,
        "\n# doc3.md\n\n---\ntitle: Test Document 3\n---\n\nThis is a test document in folder2\n\n\n"
    );

    let info = logger.info.borrow();
    assert!(info.iter().any(|m| m.contains("Processing complete")));
    assert!(info.iter().any(|m| m.contains("Total folders processed: 2")));
    assert!(info.iter().any(|m| m.contains("Total files processed: 3/3")));
    assert!(!out.path().join("unlisted.md").exists());
    Ok(())
}

#[test]
fn test_multi_segment_folder() -> Result<()> {
    let vault = TempDir::new()?;
    create_test_file(vault.path(), "PARA/2 Areas/test.md", "Content in areas")?;
    let out = TempDir::new()?;
    let config = config(vault.path(), &["PARA/2 Areas"], out.path())?;

    let stats = run(&config, &RunOptions::default(), &MockLogger::default(), &mut NoProgress);

    assert_eq!(stats.processed_files, 1);
    let output = fs::read_to_string(out.path().join("2 Areas.md"))?;
    assert!(output.contains("# test.md\n\nContent in areas"));
    Ok(())
}

#[test]
fn test_block_reproduces_frontmatter_and_body() -> Result<()> {
    let vault = TempDir::new()?;
    let frontmatter = "title: Reading list\naliases:\n  - books\ndate: 2023-11-02T08:15:00Z";
    let body = "# Books\n\n- [ ] Dune\n---\n- [x] Emma\n";
    create_test_file(
        vault.path(),
        "library/2023/list.md",
        &format!("---\n{frontmatter}\n---\n{body}"),
    )?;
    let out = TempDir::new()?;
    let config = config(vault.path(), &["library"], out.path())?;
    let logger = MockLogger::default();

    run(&config, &RunOptions { chunk_size: 5 }, &logger, &mut NoProgress);

    let output = fs::read_to_string(out.path().join("library.md"))?;
    assert_eq!(
        output,
        format!("\n# 2023/list.md\n\n---\n{frontmatter}\n---\n{body}\n\n")
    );
    assert_eq!(output.matches("# 2023/list.md").count(), 1);
    assert!(logger.warn.borrow().is_empty());
    Ok(())
}

#[test]
fn test_missing_folder_does_not_block_others() -> Result<()> {
    let vault = setup_test_vault()?;
    let out = TempDir::new()?;
    let config = config(vault.path(), &["folder1", "does-not-exist", "folder2"], out.path())?;
    let logger = MockLogger::default();

    let stats = run(&config, &RunOptions::default(), &logger, &mut NoProgress);

    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.processed_files, 3);
    assert_eq!(stats.subtrees_processed, 3);
    assert_eq!(stats.outputs_written, 2);
    assert!(out.path().join("folder1.md").exists());
    assert!(out.path().join("folder2.md").exists());
    assert!(!out.path().join("does-not-exist.md").exists());

    let warnings = logger.warn.borrow();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("does-not-exist"));
    Ok(())
}
