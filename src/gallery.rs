//! Recommendation gallery: a full-replace projection of the latest
//! recommendation set onto the terminal.

use colored::*;

/// One displayed recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Bare file name as sent by the backend.
    pub file_name: String,
    /// Server path the image resolves to, by the `/images/<name>` convention.
    pub image_path: String,
    /// Caption paired positionally with the file name; empty when the
    /// caption list is missing or shorter than the file list.
    pub caption: String,
}

/// Holds the recommendation set currently on display.
///
/// Every `render` replaces the previous set wholesale: no merge, no diff,
/// no history.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    pub fn new() -> Self {
        Gallery { entries: Vec::new() }
    }

    /// Replace the display with one entry per file name. Passing an empty
    /// file list clears the gallery.
    pub fn render(&mut self, files: &[String], items: &[String]) {
        self.entries = files
            .iter()
            .enumerate()
            .map(|(i, name)| GalleryEntry {
                file_name: name.clone(),
                image_path: format!("/images/{}", name),
                caption: items.get(i).cloned().unwrap_or_default(),
            })
            .collect();
        self.print();
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn print(&self) {
        if self.entries.is_empty() {
            return;
        }
        println!("{}", "── recommendations ──".bright_magenta().bold());
        for (i, entry) in self.entries.iter().enumerate() {
            let index = format!("[{}]", i + 1);
            if entry.caption.is_empty() {
                println!("  {} {}", index.bright_magenta(), entry.image_path);
            } else {
                println!(
                    "  {} {}  {}",
                    index.bright_magenta(),
                    entry.image_path,
                    entry.caption.italic()
                );
            }
        }
    }
}
