//! Integration tests for the cantiga CLI
//!
//! The converter is replaced by a reader serving canned JSON per file or
//! by stub shell scripts, so none of these tests need pandoc installed.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cantiga_ast::Document;
use cantiga_cli::settings::{ConverterSettings, RenderSettings};
use cantiga_cli::{build_book, markdown_files, Converter, DocumentReader, Settings};
use cantiga_core::Book;
use tempfile::TempDir;

struct Canned(HashMap<String, &'static str>);

impl DocumentReader for Canned {
    fn read(&self, path: &Path) -> Result<Document> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("fixture path has no stem")?;
        let json = self.0.get(stem).context("no fixture for file")?;
        Ok(Document::from_slice(json.as_bytes())?)
    }
}

fn canned() -> Canned {
    let mut fixtures = HashMap::new();
    fixtures.insert(
        "a_roda".to_string(),
        r#"[{"unMeta":{}},[{"t":"Header","c":[1,["roda",["regional"],[]],[{"t":"Str","c":"Roda"}]]}]]"#,
    );
    fixtures.insert(
        "b_secret".to_string(),
        r#"[{"unMeta":{}},[{"t":"Header","c":[1,["secret",["angola","hidden"],[]],[{"t":"Str","c":"Secret"}]]}]]"#,
    );
    fixtures.insert(
        "c_ladainha".to_string(),
        r#"[{"unMeta":{}},[{"t":"Header","c":[1,["lad",["ladainha"],[]],[{"t":"Str","c":"Iê"}]]},{"t":"Para","c":[{"t":"Str","c":"verse"}]}]]"#,
    );
    Canned(fixtures)
}

fn song_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("a_roda.md"), "# Roda {.regional}\n").unwrap();
    fs::write(dir.path().join("nested/c_ladainha.md"), "# Iê {.ladainha}\n").unwrap();
    fs::write(dir.path().join("b_secret.md"), "# Secret {.hidden}\n").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a song").unwrap();
    dir
}

#[test]
fn test_markdown_files_recursive_and_sorted() {
    let dir = song_dir();
    let files = markdown_files(dir.path()).unwrap();
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().display().to_string())
        .collect();
    assert_eq!(names, vec!["a_roda.md", "b_secret.md", "nested/c_ladainha.md"]);
}

#[test]
fn test_markdown_files_single_file() {
    let dir = song_dir();
    let file = dir.path().join("a_roda.md");
    assert_eq!(markdown_files(&file).unwrap(), vec![file]);
}

#[test]
fn test_build_book_from_directory() {
    let dir = song_dir();
    let book = build_book(dir.path(), "json", &canned()).unwrap();
    assert_eq!(book.songs(), 2);
    assert_eq!(book.hidden(), 1);
    assert_eq!(book.tags().len(), 2);

    let text = String::from_utf8(book.write(Vec::new()).unwrap()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let body = parsed[1].as_array().unwrap();
    // Ladainha section precedes Regional, both before the songs.
    let ids: Vec<&str> = body
        .iter()
        .filter(|b| b["t"] == "Header")
        .map(|b| b["c"][1][0].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["Ladainha", "Regional", "roda", "lad"]);
    assert!(!text.contains("Secret"));
}

#[test]
fn test_build_book_reports_missing_fixture() {
    let dir = song_dir();
    fs::write(dir.path().join("zz_unknown.md"), "# ?\n").unwrap();
    assert!(build_book(dir.path(), "json", &canned()).is_err());
}

#[test]
fn test_settings_discovered_in_input_dir() {
    let dir = song_dir();
    fs::write(
        dir.path().join("cantiga.toml"),
        "[render]\ntemplate = \"book.latex\"\n",
    )
    .unwrap();
    let settings = Settings::discover(dir.path(), None).unwrap();
    assert_eq!(settings.render.template, "book.latex");
    assert_eq!(settings.converter.program, "pandoc");
}

#[test]
fn test_explicit_settings_must_exist() {
    let dir = song_dir();
    let missing = dir.path().join("missing.toml");
    assert!(Settings::discover(dir.path(), Some(&missing)).is_err());
    assert_eq!(
        Settings::discover(dir.path(), None).unwrap(),
        Settings::default()
    );
}

#[test]
fn test_render_args_match_stock_layout() {
    let settings = Settings::default();
    let converter = Converter::new(settings.converter.clone());
    let args: Vec<String> = converter
        .render_args(&settings.render, Some(Path::new("book.pdf")))
        .into_iter()
        .map(|a| a.into_string().unwrap())
        .collect();
    let expected = [
        "-s",
        "--template",
        "template.latex",
        "-f",
        "json",
        "-t",
        "latex",
        "-V",
        "documentclass=extarticle",
        "-V",
        "fontsize:12pt",
        "-V",
        "linkcolor:black",
        "-V",
        "geometry:a5paper",
        "-V",
        "geometry:landscape",
        "-V",
        "geometry:headheight=0cm",
        "-V",
        "geometry:footskip=1.1cm",
        "-V",
        "geometry:lmargin=1cm",
        "-V",
        "geometry:rmargin=1cm",
        "-V",
        "geometry:tmargin=2.5cm",
        "-V",
        "geometry:bmargin=1.2cm",
        "-o",
        "book.pdf",
    ];
    assert_eq!(args, expected);
}

/// Write an executable shell script standing in for the converter
#[cfg(unix)]
fn stub_converter(dir: &Path, name: &str, body: &str) -> Converter {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    Converter::new(ConverterSettings {
        program: path.display().to_string(),
        ..ConverterSettings::default()
    })
}

// All stubs are written before any is spawned, so no script is still
// open for writing when another one is executed.
#[cfg(unix)]
#[test]
fn test_converter_failures() {
    let bin = TempDir::new().unwrap();
    let failing = stub_converter(bin.path(), "failing", "exit 1");
    let garbled = stub_converter(bin.path(), "garbled", "echo 'not json'");
    let renderer = stub_converter(bin.path(), "renderer", "exit 3");

    let songs = song_dir();
    let sheet = songs.path().join("a_roda.md");

    let err = failing.read(&sheet).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("a_roda.md"), "{}", message);
    assert!(message.contains("failed on"), "{}", message);

    let err = garbled.read(&sheet).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("a_roda.md"), "{}", message);
    assert!(message.contains("Failed to parse converter output"), "{}", message);

    let err = build_book(songs.path(), "json", &failing).unwrap_err();
    assert!(format!("{:#}", err).contains("a_roda.md"));

    // The renderer dies without reading its input; its exit status is
    // reported whether or not sending the book hit a closed pipe.
    let mut book = Book::new("latex");
    for song in 0..200 {
        let json = format!(
            r#"[{{"unMeta":{{}}}},[{{"t":"Header","c":[1,["s{0}",["angola"],[]],[{{"t":"Str","c":"Song {0}"}}]]}}]]"#,
            song
        );
        book.add("song.md", Document::from_slice(json.as_bytes()).unwrap())
            .unwrap();
    }
    let err = renderer
        .render(&book, &RenderSettings::default(), None)
        .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("exited with"), "{}", message);
}
