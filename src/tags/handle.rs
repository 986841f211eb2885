//! tags/handle.rs
//! Owned wrapper over one file's ID3 tag.

use std::path::{Path, PathBuf};

use id3::frame::{Chapter, Content};
use id3::{Tag, TagLike, Version};

use crate::config::TagField;
use crate::error::FileError;

const MEDIA_TYPE_FRAME: &str = "TMED";
const PART_FRAME: &str = "TPOS";
const CHAPTER_FRAME: &str = "CHAP";

/// One file's mutable tag record.
///
/// Opened per file, mutated in place, saved or dropped.
/// Never shared across files or retained past a run.
#[derive(Debug)]
pub struct TagHandle {
    path: PathBuf,
    tag: Tag,
}

impl TagHandle {
    /// Open the tag for `path`. Fails if the file cannot be read or
    /// carries no tag container.
    pub fn open(path: &Path) -> Result<Self, FileError> {
        let tag = Tag::read_from_path(path).map_err(|source| FileError::Load { source })?;
        Ok(Self {
            path: path.to_path_buf(),
            tag,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, field: TagField) -> Option<String> {
        text_frame(&self.tag, field.frame_id())
    }

    pub fn set(&mut self, field: TagField, value: &str) {
        self.tag.set_text(field.frame_id(), value);
    }

    pub fn track(&self) -> Option<u32> {
        self.tag.track()
    }

    pub fn set_track(&mut self, n: u32) {
        self.tag.set_track(n);
    }

    /// Part-of-set marker, stored as the literal (zero-padded) string.
    pub fn set_part(&mut self, part: &str) {
        self.tag.set_text(PART_FRAME, part);
    }

    pub fn part(&self) -> Option<String> {
        text_frame(&self.tag, PART_FRAME)
    }

    pub fn set_media_type(&mut self, value: &str) {
        self.tag.set_text(MEDIA_TYPE_FRAME, value);
    }

    pub fn media_type(&self) -> Option<String> {
        text_frame(&self.tag, MEDIA_TYPE_FRAME)
    }

    /// Replace any chapter frame with one carrying `position` in its
    /// element id. Timing fields are zeroed; chapter ordering is all the
    /// target players read.
    pub fn set_chapter(&mut self, position: u32) {
        let _ = self.tag.remove(CHAPTER_FRAME);
        let _ = self.tag.add_frame(Chapter {
            element_id: format!("chp{position:04}"),
            start_time: 0,
            end_time: 0,
            start_offset: 0,
            end_offset: 0,
            frames: Vec::new(),
        });
    }

    pub fn chapter(&self) -> Option<String> {
        self.tag.frames().find_map(|frame| match frame.content() {
            Content::Chapter(chapter) => Some(chapter.element_id.clone()),
            _ => None,
        })
    }

    /// Write the tag back to the file (ID3v2.4, UTF-8 text).
    pub fn save(&self) -> Result<(), FileError> {
        self.tag
            .write_to_path(&self.path, Version::Id3v24)
            .map_err(|source| FileError::Save { source })
    }
}

/// Best-effort string from a frame id.
/// Intentionally defensive: some frames that are text-ish may not be `Content::Text`.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        Content::Link(s) => Some(s.clone()),
        _ => None,
    }
}
