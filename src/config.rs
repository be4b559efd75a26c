//! Topic-table configuration: which source files feed which documentation
//! topic, and how each topic renders in the declaration file.
//!
//! The table is ordinary data. A built-in table mirrors the binding layer's
//! current API surface; `--config` loads a JSON document of the same shape.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocConfig {
    /// Root namespace of the declaration file. A topic with the same name
    /// contributes free functions to the root block instead of a nested one.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    pub topics: Vec<TopicConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopicConfig {
    pub name: String,
    /// Ordered source files; entries may be glob patterns (matches are
    /// sorted for deterministic output).
    pub files: Vec<String>,
    /// Render as a namespace-like grouping of free functions and
    /// properties instead of a class.
    #[serde(default)]
    pub as_namespace: bool,
}

fn default_namespace() -> String {
    "UDB".to_string()
}

impl DocConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    /// The binding layer's current API surface.
    pub fn builtin() -> Self {
        fn t(name: &str, files: &[&str], as_namespace: bool) -> TopicConfig {
            TopicConfig {
                name: name.to_string(),
                files: files.iter().map(|f| f.to_string()).collect(),
                as_namespace,
            }
        }

        DocConfig {
            namespace: default_namespace(),
            topics: vec![
                t("GameConfiguration", &["API/GameConfigurationWrapper.cs"], true),
                t("Angle2D", &["API/Angle2DWrapper.cs"], true),
                t("BlockEntry", &["API/BlockEntryWrapper.cs"], false),
                t("BlockMapQueryResult", &["API/BlockMapQueryResult.cs"], false),
                t("BlockMap", &["API/BlockMapWrapper.cs"], false),
                t("Data", &["API/DataWrapper.cs"], true),
                t("ImageInfo", &["API/ImageInfo.cs"], false),
                t("Line2D", &["API/Line2DWrapper.cs"], false),
                t(
                    "Linedef",
                    &["API/LinedefWrapper.cs", "API/MapElementWrapper.cs"],
                    false,
                ),
                t("Map", &["API/MapWrapper.cs"], true),
                t("Plane", &["API/PlaneWrapper.cs"], false),
                t(
                    "Sector",
                    &["API/SectorWrapper.cs", "API/MapElementWrapper.cs"],
                    false,
                ),
                t(
                    "Sidedef",
                    &["API/SidedefWrapper.cs", "API/MapElementWrapper.cs"],
                    false,
                ),
                t(
                    "Thing",
                    &["API/ThingWrapper.cs", "API/MapElementWrapper.cs"],
                    false,
                ),
                t("UDB", &["API/UDBWrapper.cs"], false),
                t("Vector2D", &["API/Vector2DWrapper.cs"], false),
                t("Vector3D", &["API/Vector3DWrapper.cs"], false),
                t(
                    "Vertex",
                    &["API/VertexWrapper.cs", "API/MapElementWrapper.cs"],
                    false,
                ),
                t("VisualCamera", &["API/VisualCameraWrapper.cs"], false),
                t("QueryOptions", &["QueryOptions.cs"], false),
            ],
        }
    }
}

/// Resolve a topic's file entries against the source root, preserving the
/// declared order. Plain paths pass through (existence is checked when the
/// file is read); glob patterns expand to their sorted matches.
pub fn resolve_files(source_root: &Path, entries: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in entries {
        if !entry.contains(['*', '?', '[']) {
            files.push(source_root.join(entry));
            continue;
        }
        let pattern = source_root.join(entry);
        let pattern = pattern.to_string_lossy();
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("invalid glob pattern: {}", entry))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", entry);
        }
        matches.sort();
        files.extend(matches);
    }
    Ok(files)
}
