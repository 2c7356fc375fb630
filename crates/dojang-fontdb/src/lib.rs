//! Where fonts come from: discovery and family resolution for Dojang
//!
//! Seals and specimens name a [`FontFamily`]; this crate finds a file for
//! each one. Discovery walks a directory, matches file stems and embedded
//! family names against [`FontFamily::candidate_names`], and keeps the
//! best match per family.
//!
//! Loading is slow enough to run off the render path, so
//! [`FontLibrary::load_in_background`] hands back a [`FontGate`] that
//! opens once the library is ready.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use parking_lot::RwLock;
use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{string::StringId, MetadataProvider};
use walkdir::WalkDir;

use dojang_core::{
    error::{DojangError, FontLoadError, Result},
    gate::{font_gate, FontGate},
    traits::{FontRef, FontResolver},
    types::FontFamily,
};

/// File extensions discovery considers
pub const FONT_EXTENSIONS: [&str; 3] = ["ttf", "otf", "ttc"];

/// A font that's been brought into memory
///
/// Stores the raw font data and re-parses on demand, so one `Font` can be
/// shared across threads without borrowing from itself.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    ascent: f32,
    descent: f32,
    family_name: Option<String>,
}

impl Font {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        Self::from_data(data)
    }

    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Parse one face of a font file (non-zero only for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);
        let (ascent, descent) = font
            .hhea()
            .map(|hhea| {
                (
                    hhea.ascender().to_i16() as f32,
                    hhea.descender().to_i16() as f32,
                )
            })
            .unwrap_or((units_per_em as f32 * 0.8, units_per_em as f32 * -0.2));
        let family_name = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|name| name.to_string());

        Ok(Self {
            data,
            face_index,
            units_per_em,
            ascent,
            descent,
            family_name,
        })
    }

    /// The family name from the `name` table, if the font carries one
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                hmtx.advance(read_fonts::types::GlyphId::new(glyph_id))
            })
            .map(f32::from)
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }

    fn ascent(&self) -> f32 {
        self.ascent
    }

    fn descent(&self) -> f32 {
        self.descent
    }
}

/// How well `names` identify `family`: the index of the first candidate
/// name that matches, lower is better
pub fn match_rank<'a>(
    family: FontFamily,
    names: impl IntoIterator<Item = &'a str> + Clone,
) -> Option<usize> {
    family.candidate_names().iter().position(|candidate| {
        names
            .clone()
            .into_iter()
            .any(|name| name.trim().eq_ignore_ascii_case(candidate))
    })
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Every family the renderers can ask for, mapped onto loaded faces
#[derive(Default)]
pub struct FontLibrary {
    faces: RwLock<HashMap<FontFamily, Arc<dyn FontRef>>>,
    fallback: RwLock<Option<Arc<dyn FontRef>>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `font` for `family`; the first font registered also becomes the
    /// fallback for families with no face of their own
    pub fn register(&self, family: FontFamily, font: Arc<dyn FontRef>) {
        {
            let mut fallback = self.fallback.write();
            if fallback.is_none() {
                *fallback = Some(Arc::clone(&font));
            }
        }
        self.faces.write().insert(family, font);
    }

    pub fn load_file(&self, family: FontFamily, path: impl AsRef<Path>) -> Result<()> {
        let font = Font::from_file(path)?;
        self.register(family, Arc::new(font));
        Ok(())
    }

    /// The family-specific face, without falling back
    pub fn get(&self, family: FontFamily) -> Option<Arc<dyn FontRef>> {
        self.faces.read().get(&family).cloned()
    }

    /// Families with a face of their own, in declaration order
    pub fn families(&self) -> Vec<FontFamily> {
        let faces = self.faces.read();
        FontFamily::ALL
            .into_iter()
            .filter(|family| faces.contains_key(family))
            .collect()
    }

    /// Walk `dir` and register the best match for every family
    ///
    /// Returns how many families found a face. Unreadable or invalid font
    /// files are skipped with a warning.
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(FontLoadError::FileNotFound(dir.display().to_string()).into());
        }

        let mut best: HashMap<FontFamily, (usize, PathBuf, Arc<Font>)> = HashMap::new();
        let mut first_font: Option<Arc<Font>> = None;

        for entry in WalkDir::new(dir).follow_links(true).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_font_file(path) {
                continue;
            }
            let font = match Font::from_file(path) {
                Ok(font) => Arc::new(font),
                Err(err) => {
                    log::warn!("fontdb: skipping {}: {err}", path.display());
                    continue;
                },
            };
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            let names = [Some(stem), font.family_name()];
            let names = names.iter().flatten().copied();

            for family in FontFamily::ALL {
                let Some(rank) = match_rank(family, names.clone()) else {
                    continue;
                };
                if best.get(&family).map_or(true, |(current, ..)| rank < *current) {
                    best.insert(family, (rank, path.to_path_buf(), Arc::clone(&font)));
                }
            }
            first_font.get_or_insert(font);
        }

        // Matched faces take precedence as the fallback
        for family in FontFamily::ALL {
            if let Some((_, path, font)) = best.remove(&family) {
                log::info!("fontdb: {} -> {}", family.as_str(), path.display());
                self.register(family, font);
            }
        }
        if let Some(font) = first_font {
            self.fallback.write().get_or_insert(font);
        }

        let found = self.faces.read().len();
        if found < FontFamily::ALL.len() {
            log::warn!(
                "fontdb: {found} of {} families found under {}",
                FontFamily::ALL.len(),
                dir.display()
            );
        }
        Ok(found)
    }

    /// Discover fonts under `dir` on a worker thread
    ///
    /// The gate opens with the finished library, or with the discovery
    /// error. If the thread cannot be started the gate reports
    /// [`DojangError::FontMeasurementUnavailable`].
    pub fn load_in_background(dir: impl Into<PathBuf>) -> FontGate<FontLibrary> {
        let dir = dir.into();
        let (signal, gate) = font_gate();
        let spawned = thread::Builder::new()
            .name("dojang-fonts".into())
            .spawn(move || {
                let library = FontLibrary::new();
                match library.discover(&dir) {
                    Ok(_) => signal.resolve(library),
                    Err(err) => signal.fail(err),
                }
            });
        if let Err(err) = spawned {
            log::error!("fontdb: could not start the font loader: {err}");
        }
        gate
    }
}

impl FontResolver for FontLibrary {
    fn resolve(&self, family: FontFamily) -> Result<Arc<dyn FontRef>> {
        if let Some(font) = self.get(family) {
            return Ok(font);
        }
        match self.fallback.read().as_ref() {
            Some(font) => {
                log::warn!("fontdb: no face for {}, using fallback", family.as_str());
                Ok(Arc::clone(font))
            },
            None => Err(DojangError::FontLoad(FontLoadError::FamilyNotRegistered(
                family.as_str().to_string(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubFont(u16);

    impl FontRef for StubFont {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            self.0
        }

        fn glyph_id(&self, _ch: char) -> Option<u32> {
            Some(1)
        }

        fn advance_width(&self, _glyph_id: u32) -> f32 {
            self.0 as f32
        }
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            Font::from_data(vec![0; 100]),
            Err(DojangError::FontLoad(FontLoadError::InvalidData))
        ));
    }

    #[test]
    fn ranks_prefer_specific_names() {
        assert_eq!(match_rank(FontFamily::MalgunGothic, ["malgun"]), Some(0));
        assert_eq!(match_rank(FontFamily::MalgunGothic, ["MALGUN GOTHIC"]), Some(1));
        assert_eq!(match_rank(FontFamily::Batang, ["Arial", "바탕"]), Some(2));
        assert_eq!(match_rank(FontFamily::Dotum, ["Batang"]), None);
    }

    #[test]
    fn font_files_by_extension() {
        assert!(is_font_file(Path::new("a/malgun.TTF")));
        assert!(is_font_file(Path::new("b.otf")));
        assert!(!is_font_file(Path::new("readme.txt")));
        assert!(!is_font_file(Path::new("noext")));
    }

    #[test]
    fn resolve_falls_back_to_first_registered() {
        let library = FontLibrary::new();
        library.register(FontFamily::Dotum, Arc::new(StubFont(1000)));
        library.register(FontFamily::Batang, Arc::new(StubFont(2048)));

        assert_eq!(library.resolve(FontFamily::Batang).unwrap().units_per_em(), 2048);
        assert_eq!(library.resolve(FontFamily::Gungseo).unwrap().units_per_em(), 1000);
        assert_eq!(library.families(), vec![FontFamily::Batang, FontFamily::Dotum]);
    }

    #[test]
    fn empty_library_cannot_resolve() {
        let err = FontLibrary::new().resolve(FontFamily::Gungseo).err();
        assert!(matches!(
            err,
            Some(DojangError::FontLoad(FontLoadError::FamilyNotRegistered(_)))
        ));
    }
}
