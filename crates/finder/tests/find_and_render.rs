use codeclip_finder::{format_files, read_files, FileFinder};
use std::fs;
use tempfile::TempDir;

#[test]
fn glob_then_render() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub fn answer() -> u8 { 42 }").unwrap();
    fs::write(dir.path().join("src/notes.txt"), "ignored").unwrap();

    let finder = FileFinder::new(dir.path());
    let paths = finder.find("src/*.rs").unwrap();
    assert_eq!(paths.len(), 1);

    let rendered = format_files(&read_files(&paths).unwrap());
    assert!(rendered.starts_with("```rust filename="));
    assert!(rendered.contains("src"));
    assert!(rendered.ends_with("pub fn answer() -> u8 { 42 }\n```\n\n"));
}
