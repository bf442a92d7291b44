use codeclip_scanner::Language;
use codeclip_search::{format_search_results, search, SearchError, SearchOptions};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn three_line_file_with_context_one() {
    let dir = TempDir::new().unwrap();
    let path = fixture(&dir, "notes.txt", "foo\nbar baz\nqux\n");

    let result = search(&[&path], "baz", &SearchOptions::default().with_context_lines(1)).unwrap();
    assert_eq!(result.files.len(), 1);

    let file = &result.files[0];
    assert_eq!(file.language, Language::Plaintext);
    assert_eq!(file.snippets.len(), 1);
    assert_eq!((file.snippets[0].start_line, file.snippets[0].end_line), (1, 3));
    assert_eq!(file.snippets[0].content, "foo\nbar baz\nqux");
    assert_eq!(file.snippets[0].match_info, "Match at line 2");
}

#[test]
fn nearby_matches_merge_with_exact_content() {
    let dir = TempDir::new().unwrap();
    let content: String = (1..=20).map(|n| format!("line {n}\n")).collect();
    let path = fixture(&dir, "lines.txt", &content);

    // Matches on lines 2 and 7 with one line of context: windows 1-3 and 6-8
    // are within the adjacency buffer, so they merge across the gap.
    let result = search(
        &[&path],
        r"^line (2|7)$",
        &SearchOptions::default().with_context_lines(1),
    )
    .unwrap();
    let snippets = &result.files[0].snippets;
    assert_eq!(snippets.len(), 1);
    assert_eq!((snippets[0].start_line, snippets[0].end_line), (1, 8));
    assert_eq!(
        snippets[0].content,
        (1..=8).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n")
    );
    assert_eq!(snippets[0].match_info, "Multiple matches between lines 1-8");
}

#[test]
fn files_without_matches_are_omitted() {
    let dir = TempDir::new().unwrap();
    let hit = fixture(&dir, "hit.go", "func main() {\n\tpanic(\"boom\")\n}\n");
    let miss = fixture(&dir, "miss.go", "func main() {}\n");

    let result = search(&[&miss, &hit], "panic", &SearchOptions::default()).unwrap();
    assert_eq!(result.files.len(), 1);
    assert!(result.get(&hit).is_some());
    assert!(result.get(&miss).is_none());
}

#[test]
fn whole_function_and_fuzzy() {
    let dir = TempDir::new().unwrap();
    let path = fixture(
        &dir,
        "server.go",
        "package main\n\nfunc HandleRequest(w Writer) {\n\tlog(\"start\")\n\tw.Write(nil)\n}\n\nfunc other() {\n}\n",
    );

    let options = SearchOptions::default()
        .with_fuzzy(true)
        .with_whole_function(true);
    let result = search(&[&path], "WrNil", &options).unwrap();
    let snippet = &result.files[0].snippets[0];
    assert_eq!((snippet.start_line, snippet.end_line), (3, 6));
    assert_eq!(snippet.match_info, "Function containing match at line 5");

    let rendered = format_search_results(&result);
    assert!(rendered.starts_with(&format!(
        "```go filename={} (lines 3-6)\nfunc HandleRequest",
        path.display()
    )));
}

#[test]
fn invalid_pattern_fails_before_reading() {
    let err = search(
        &["/definitely/not/here.go"],
        "([",
        &SearchOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::Pattern { .. }));
}

#[test]
fn unreadable_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.rs");
    let err = search(&[&missing], "x", &SearchOptions::default()).unwrap_err();
    assert!(matches!(err, SearchError::Io { .. }));
}
