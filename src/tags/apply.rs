//! tags/apply.rs
//! The per-file transformation: overrides, encoding repair, audiobook
//! marker, optional sequential numbering.

use std::path::Path;

use crate::config::{RunConfig, TagField};
use crate::encoding;
use crate::error::FileError;

use super::handle::TagHandle;

/// Genre and media-type marker set on every processed file.
pub const AUDIOBOOK_MARKER: &str = "Audiobook";

/// Fields that get the encoding fix when not explicitly overridden.
const ENCODING_FIXED_FIELDS: [TagField; 4] = [
    TagField::Artist,
    TagField::Title,
    TagField::Album,
    TagField::AlbumArtist,
];

/// Transform one file's tag in memory.
///
/// `position` is the 1-based slot the file occupies if it succeeds; the
/// caller advances it only after a successful return. The handle comes
/// back mutated but unsaved; persistence is the pipeline's call.
pub fn apply(path: &Path, position: u32, config: &RunConfig) -> Result<TagHandle, FileError> {
    let mut handle = TagHandle::open(path)?;

    for (field, value) in &config.overrides {
        handle.set(*field, value);
    }

    for field in ENCODING_FIXED_FIELDS {
        if config.overrides.contains_key(&field) {
            // Explicit overrides are taken as already-correct literals.
            continue;
        }
        if let Some(current) = handle.get(field) {
            if !current.is_empty() {
                let fixed = encoding::fix(&current, &config.encoding)?;
                handle.set(field, &fixed);
            }
        }
    }

    handle.set(TagField::Genre, AUDIOBOOK_MARKER);
    handle.set_media_type(AUDIOBOOK_MARKER);

    if config.numbering() {
        handle.set_track(position);
        handle.set_part(&format!("{position:04}"));
        handle.set_chapter(position);

        let current_title = handle.get(TagField::Title).unwrap_or_default();
        let title = format!(
            "{}{current_title}",
            expand_prefix(&config.title_prefix, position)
        );
        handle.set(TagField::Title, &title);
    }

    Ok(handle)
}

/// Substitute the track placeholder with the zero-padded position.
/// Both the bare and the width-annotated spellings are accepted.
fn expand_prefix(template: &str, position: u32) -> String {
    let padded = format!("{position:04}");
    template
        .replace("{track:04}", &padded)
        .replace("{track}", &padded)
}
