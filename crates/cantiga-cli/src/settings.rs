//! Settings file
//!
//! An optional `cantiga.toml` overrides how the converter is invoked.
//! Every field has a default, so an empty file (or no file) reproduces
//! the stock A5 landscape songbook.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings file looked up in the input directory
pub const SETTINGS_FILE: &str = "cantiga.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// How source files are read
    pub converter: ConverterSettings,
    /// How the final document is rendered
    pub render: RenderSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Settings for a run: the explicit file if given, else
    /// `cantiga.toml` in the input directory if present, else defaults.
    pub fn discover(input: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = input.join(SETTINGS_FILE);
        if input.is_dir() && candidate.is_file() {
            debug!(path = %candidate.display(), "using settings file");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}

/// Converter invocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterSettings {
    /// Converter executable
    pub program: String,
    /// Reader format for lyric sheets
    pub reader: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            reader: "markdown+hard_line_breaks+header_attributes".to_string(),
        }
    }
}

/// Final rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Template passed with `--template`
    pub template: String,
    /// Writer format
    pub writer: String,
    pub documentclass: String,
    pub fontsize: String,
    pub linkcolor: String,
    /// Page geometry options, one `geometry:` variable each
    pub geometry: Vec<String>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            template: "template.latex".to_string(),
            writer: "latex".to_string(),
            documentclass: "extarticle".to_string(),
            fontsize: "12pt".to_string(),
            linkcolor: "black".to_string(),
            geometry: [
                "a5paper",
                "landscape",
                "headheight=0cm",
                "footskip=1.1cm",
                "lmargin=1cm",
                "rmargin=1cm",
                "tmargin=2.5cm",
                "bmargin=1.2cm",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl RenderSettings {
    /// Template variables, in the order they are passed with `-V`
    pub fn variables(&self) -> Vec<String> {
        let mut vars = vec![
            format!("documentclass={}", self.documentclass),
            format!("fontsize:{}", self.fontsize),
            format!("linkcolor:{}", self.linkcolor),
        ];
        vars.extend(self.geometry.iter().map(|g| format!("geometry:{}", g)));
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.converter.program, "pandoc");
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_toml_str(
            r#"
[converter]
program = "/opt/pandoc/bin/pandoc"

[render]
fontsize = "10pt"
geometry = ["a4paper"]
"#,
        )
        .unwrap();
        assert_eq!(settings.converter.program, "/opt/pandoc/bin/pandoc");
        assert_eq!(
            settings.converter.reader,
            "markdown+hard_line_breaks+header_attributes"
        );
        assert_eq!(settings.render.template, "template.latex");
        assert_eq!(
            settings.render.variables(),
            vec![
                "documentclass=extarticle",
                "fontsize:10pt",
                "linkcolor:black",
                "geometry:a4paper"
            ]
        );
    }

    #[test]
    fn test_default_variables() {
        let vars = RenderSettings::default().variables();
        assert_eq!(vars.len(), 11);
        assert_eq!(vars[0], "documentclass=extarticle");
        assert_eq!(vars[3], "geometry:a5paper");
        assert_eq!(vars[10], "geometry:bmargin=1.2cm");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Settings::from_toml_str("[render\nfontsize = 1").is_err());
    }
}
