#![deny(missing_docs)]

//! # Collection Writer
//!
//! Persists a collection document as a Bruno directory:
//!
//! ```text
//! <output>/
//!   bruno.json
//!   collection.bru
//!   environments/Default.bru
//!   wp-v2/
//!     folder.bru
//!     posts/
//!       folder.bru
//!       List posts.bru
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use wpc_core::collection::bru::{
    render_bruno_json, render_collection_root, render_environment, render_folder, render_request,
};
use wpc_core::{AppError, AppResult, CollectionDocument, CollectionItem};

/// File extension of request, folder and environment files.
pub const BRU_EXTENSION: &str = "bru";

const ENVIRONMENTS_DIR: &str = "environments";
const FOLDER_FILE: &str = "folder.bru";
const ROOT_ENTRIES: [&str; 3] = ["bruno.json", "collection.bru", ENVIRONMENTS_DIR];

/// Makes a display name safe to use as a file or directory name.
///
/// Path separators, reserved characters and control characters become `-`;
/// surrounding whitespace and trailing dots are trimmed.
pub fn sanitize_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim().trim_end_matches('.').trim_end();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Tracks the entries of one directory and suffixes collisions with ` (2)`,
/// ` (3)`, ...
#[derive(Debug, Default)]
struct DirectoryNames {
    used: HashSet<String>,
}

impl DirectoryNames {
    fn reserving(entries: &[&str]) -> Self {
        Self {
            used: entries.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// Claims a unique entry name for `name` with an optional extension.
    fn claim(&mut self, name: &str, extension: Option<&str>) -> String {
        let base = sanitize_name(name);
        let file_name = |stem: &str| match extension {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem.to_string(),
        };

        let mut candidate = file_name(&base);
        let mut counter = 2;
        // Case-insensitive filesystems treat `Posts` and `posts` as one entry
        while !self.used.insert(candidate.to_lowercase()) {
            candidate = file_name(&format!("{} ({})", base, counter));
            counter += 1;
        }
        candidate
    }
}

/// Writes the whole collection under `dir`.
pub fn write_collection(document: &CollectionDocument, dir: &Path) -> AppResult<()> {
    create_dir(dir)?;

    // 1. Collection settings
    write_file(&dir.join("bruno.json"), &render_bruno_json(&document.bruno_config)?)?;
    write_file(&dir.join("collection.bru"), &render_collection_root())?;

    // 2. Environments
    let env_dir = dir.join(ENVIRONMENTS_DIR);
    create_dir(&env_dir)?;
    let mut env_names = DirectoryNames::default();
    for environment in &document.environments {
        let file = env_names.claim(&environment.name, Some(BRU_EXTENSION));
        write_file(&env_dir.join(file), &render_environment(environment))?;
    }

    // 3. Items
    let mut names = DirectoryNames::reserving(&ROOT_ENTRIES);
    write_items(&document.items, dir, &mut names)?;

    tracing::info!(path = ?dir, "wrote Bruno collection");
    Ok(())
}

fn write_items(items: &[CollectionItem], dir: &Path, names: &mut DirectoryNames) -> AppResult<()> {
    for (index, item) in items.iter().enumerate() {
        match item {
            CollectionItem::Folder(folder) => {
                let folder_dir = dir.join(names.claim(&folder.name, None));
                create_dir(&folder_dir)?;
                write_file(
                    &folder_dir.join(FOLDER_FILE),
                    &render_folder(folder, (index + 1) as u32),
                )?;

                let mut children = DirectoryNames::reserving(&[FOLDER_FILE]);
                write_items(&folder.items, &folder_dir, &mut children)?;
            }
            CollectionItem::Request(request) => {
                let file = names.claim(&request.name, Some(BRU_EXTENSION));
                tracing::debug!(file = %file, "writing request");
                write_file(&dir.join(file), &render_request(request))?;
            }
        }
    }
    Ok(())
}

fn create_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::General(format!("Failed to create directory {:?}: {}", dir, e)))
}

fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", path, e)))
}
