//! config.rs
//! Immutable per-invocation configuration.
//!
//! Built once from CLI input and passed by reference through every call.
//! Nothing here reads global state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Sentinel encoding name meaning "leave tag text alone".
pub const NO_ENCODING_FIX: &str = "none";
/// Legacy single-byte Cyrillic encoding most garbled rips were written in.
pub const DEFAULT_ENCODING: &str = "cp1251";
pub const DEFAULT_SUFFIX: &str = "mp3";
/// Title prefix used when numbering is on and the user gave none.
pub const DEFAULT_TITLE_PREFIX: &str = "{track:04} - ";

const ORDER_BY_FILE_NAMES: &str = "name";
const ORDER_BY_TAG_PREFIX: &str = "tag-";

/// The editable tag fields, each backed by one ID3 text frame.
///
/// A closed set: override names and `tag-<FIELD>` ordering are checked
/// against it at configuration time, so a typo never reaches a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagField {
    Artist,
    Title,
    Album,
    AlbumArtist,
    Genre,
    Composer,
}

impl TagField {
    /// Accepts `album-artist` and `album_artist` spellings, case-insensitive.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "artist" => Ok(Self::Artist),
            "title" => Ok(Self::Title),
            "album" => Ok(Self::Album),
            "album-artist" => Ok(Self::AlbumArtist),
            "genre" => Ok(Self::Genre),
            "composer" => Ok(Self::Composer),
            _ => Err(ConfigError::UnknownTagField(name.trim().to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Artist => "artist",
            Self::Title => "title",
            Self::Album => "album",
            Self::AlbumArtist => "album-artist",
            Self::Genre => "genre",
            Self::Composer => "composer",
        }
    }

    /// ID3v2 text frame backing this field.
    pub(crate) fn frame_id(self) -> &'static str {
        match self {
            Self::Artist => "TPE1",
            Self::Title => "TIT2",
            Self::Album => "TALB",
            Self::AlbumArtist => "TPE2",
            Self::Genre => "TCON",
            Self::Composer => "TCOM",
        }
    }
}

/// Controls both the processing order and whether sequential numbering runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirective {
    /// Raw directory-walk order, no numbering.
    None,
    /// Ascending lexicographic order on the full path.
    ByFileName,
    /// Ascending stable order on the field's text value.
    ByTag(TagField),
}

impl OrderDirective {
    /// Empty means no renumbering; `name` sorts by file name;
    /// `tag-<FIELD>` sorts by that field's value.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::None);
        }
        if raw == ORDER_BY_FILE_NAMES {
            return Ok(Self::ByFileName);
        }
        if let Some(field) = raw.strip_prefix(ORDER_BY_TAG_PREFIX) {
            return TagField::parse(field)
                .map(Self::ByTag)
                .map_err(|_| ConfigError::UnknownOrderDirective(raw.to_string()));
        }
        Err(ConfigError::UnknownOrderDirective(raw.to_string()))
    }
}

/// Everything one run needs to know. Read-only after construction.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root: PathBuf,
    pub suffix: String,
    /// Target encoding name, or [`NO_ENCODING_FIX`].
    pub encoding: String,
    /// Literal field overrides, applied verbatim.
    pub overrides: BTreeMap<TagField, String>,
    pub order: OrderDirective,
    /// Template prepended to titles when numbering; `{track}` / `{track:04}`
    /// expands to the zero-padded position.
    pub title_prefix: String,
    pub dry_run: bool,
}

impl RunConfig {
    pub fn numbering(&self) -> bool {
        self.order != OrderDirective::None
    }
}

/// Parse repeated `name/value` override specs.
pub fn parse_overrides(specs: &[String]) -> Result<BTreeMap<TagField, String>, ConfigError> {
    let mut overrides = BTreeMap::new();
    for (index, spec) in specs.iter().enumerate() {
        let Some((name, value)) = spec.split_once('/') else {
            return Err(ConfigError::MalformedTagOverride {
                index,
                value: spec.clone(),
            });
        };
        overrides.insert(TagField::parse(name)?, value.to_string());
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn tag_field_accepts_both_spellings() {
        assert_eq!(TagField::parse("album-artist").unwrap(), TagField::AlbumArtist);
        assert_eq!(TagField::parse("album_artist").unwrap(), TagField::AlbumArtist);
        assert_eq!(TagField::parse("Artist").unwrap(), TagField::Artist);
    }

    #[test]
    fn tag_field_rejects_unknown_names() {
        assert!(matches!(
            TagField::parse("bogus"),
            Err(ConfigError::UnknownTagField(name)) if name == "bogus"
        ));
    }

    #[test]
    fn order_directive_parses() {
        assert_eq!(OrderDirective::parse("").unwrap(), OrderDirective::None);
        assert_eq!(OrderDirective::parse("name").unwrap(), OrderDirective::ByFileName);
        assert_eq!(
            OrderDirective::parse("tag-title").unwrap(),
            OrderDirective::ByTag(TagField::Title)
        );
    }

    #[test]
    fn order_directive_rejects_unknown_strings() {
        assert!(matches!(
            OrderDirective::parse("bogus"),
            Err(ConfigError::UnknownOrderDirective(raw)) if raw == "bogus"
        ));
        assert!(matches!(
            OrderDirective::parse("tag-bogus"),
            Err(ConfigError::UnknownOrderDirective(raw)) if raw == "tag-bogus"
        ));
    }

    #[test]
    fn overrides_parse_name_slash_value() {
        let specs = vec!["artist/Dostoevsky".to_string(), "title/Chapter 1".to_string()];
        let overrides = parse_overrides(&specs).unwrap();
        assert_eq!(overrides[&TagField::Artist], "Dostoevsky");
        assert_eq!(overrides[&TagField::Title], "Chapter 1");
    }

    #[test]
    fn overrides_keep_slashes_inside_values() {
        let specs = vec!["album/part 1/2".to_string()];
        let overrides = parse_overrides(&specs).unwrap();
        assert_eq!(overrides[&TagField::Album], "part 1/2");
    }

    #[test]
    fn malformed_override_reports_its_position() {
        let specs = vec!["artist/ok".to_string(), "no-slash-here".to_string()];
        assert!(matches!(
            parse_overrides(&specs),
            Err(ConfigError::MalformedTagOverride { index: 1, .. })
        ));
    }
}
