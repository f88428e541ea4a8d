/*!
 * Tests for the output writer
 */

use anyhow::Result;
use std::fs;

use pdftranx::output::OutputWriter;
use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_writePage_withSeveralPages_shouldWriteOneLineEach() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("out.txt");

    let mut writer = OutputWriter::create(&path)?;
    writer.write_page("first")?;
    writer.write_page("second")?;

    assert_eq!(writer.lines_written(), 2);
    assert_eq!(fs::read_to_string(&path)?, "first\nsecond\n");
    Ok(())
}

#[test]
fn test_create_withExistingFile_shouldTruncate() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "out.txt", "stale content\n")?;

    let writer = OutputWriter::create(&path)?;

    assert_eq!(writer.path(), path.as_path());
    assert_eq!(fs::read_to_string(&path)?, "");
    Ok(())
}

#[test]
fn test_writePage_beforeDrop_shouldAlreadyBeOnDisk() -> Result<()> {
    let dir = create_temp_dir()?;
    let path = dir.path().join("out.txt");

    let mut writer = OutputWriter::create(&path)?;
    writer.write_page("flushed")?;

    // Writer still open; the line must be visible
    assert_eq!(fs::read_to_string(&path)?, "flushed\n");
    drop(writer);
    Ok(())
}

#[test]
fn test_create_inMissingDirectory_shouldFail() -> Result<()> {
    let dir = create_temp_dir()?;
    let result = OutputWriter::create(dir.path().join("missing").join("out.txt"));
    assert!(result.is_err());
    Ok(())
}
