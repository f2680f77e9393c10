//! Font lookup shared by option validation and text layout.

use std::fmt;
use std::sync::Arc;

use resvg::usvg::fontdb::{self, Family};

/// Installed families tried, in order, for each generic family before
/// falling back to an arbitrary installed face.
const SANS_SERIF: [&str; 5] = ["DejaVu Sans", "Liberation Sans", "Noto Sans", "Arial", "Helvetica"];
const SERIF: [&str; 4] = ["DejaVu Serif", "Liberation Serif", "Noto Serif", "Times New Roman"];
const MONOSPACE: [&str; 4] = ["DejaVu Sans Mono", "Liberation Mono", "Noto Sans Mono", "Courier New"];

/// A shared, read-only font database.
///
/// Each CSS generic family (`serif`, `sans-serif`, `monospace`, `cursive`,
/// `fantasy`) is pointed at an installed family when the catalog is created.
/// A catalog without faces therefore resolves no family at all.
///
/// Cloning is cheap: clones share the same underlying database.
#[derive(Clone)]
pub struct FontCatalog {
    db: Arc<fontdb::Database>,
}

impl FontCatalog {
    /// Loads every font installed on the host.
    pub fn system() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self::from_database(db)
    }

    /// Wraps an already populated database.
    ///
    /// Generic families that already map to an installed family keep their
    /// mapping; the others are reassigned.
    pub fn from_database(mut db: fontdb::Database) -> Self {
        map_generic_families(&mut db);
        Self { db: Arc::new(db) }
    }

    /// A catalog with no faces.
    pub fn empty() -> Self {
        Self::from_database(fontdb::Database::new())
    }

    /// Returns true if text in family `name` can be drawn with this catalog.
    pub fn has_family(&self, name: &str) -> bool {
        self.resolve_family(name).is_some()
    }

    /// The spelling to render `name` with, or `None` if no installed face
    /// backs it.
    ///
    /// Generic families come back lowercase. Named families match
    /// case-insensitively and come back as installed, since layout looks
    /// families up by exact name.
    pub fn resolve_family(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if let Some(generic) = generic_family(name) {
            let mapped = self.db.family_name(&generic);
            return contains_family(&self.db, mapped).then(|| name.to_ascii_lowercase());
        }
        self.db
            .faces()
            .flat_map(|face| face.families.iter())
            .find(|(family, _)| family.eq_ignore_ascii_case(name))
            .map(|(family, _)| family.clone())
    }

    /// Number of loaded faces.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    pub(crate) fn database(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.db)
    }
}

impl fmt::Debug for FontCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCatalog")
            .field("faces", &self.db.len())
            .finish()
    }
}

/// Returns true for the CSS generic family names, in any case.
pub(crate) fn is_generic_family(name: &str) -> bool {
    generic_family(name.trim()).is_some()
}

fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Some(Family::Serif),
        "sans-serif" => Some(Family::SansSerif),
        "monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}

fn contains_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(family, _)| family == name))
}

fn primary_family(face: &fontdb::FaceInfo) -> Option<String> {
    face.families.first().map(|(family, _)| family.clone())
}

/// Points every generic family whose target is not installed at one that is.
fn map_generic_families(db: &mut fontdb::Database) {
    let Some(any) = db.faces().find_map(primary_family) else {
        return;
    };

    let sans_serif = pick_family(db, Family::SansSerif, &SANS_SERIF, &any);
    let serif = pick_family(db, Family::Serif, &SERIF, &sans_serif);
    let any_monospaced = db
        .faces()
        .filter(|face| face.monospaced)
        .find_map(primary_family)
        .unwrap_or_else(|| sans_serif.clone());
    let monospace = pick_family(db, Family::Monospace, &MONOSPACE, &any_monospaced);
    let cursive = pick_family(db, Family::Cursive, &[], &sans_serif);
    let fantasy = pick_family(db, Family::Fantasy, &[], &sans_serif);

    tracing::debug!(%sans_serif, %serif, %monospace, "mapped generic font families");
    db.set_sans_serif_family(sans_serif);
    db.set_serif_family(serif);
    db.set_monospace_family(monospace);
    db.set_cursive_family(cursive);
    db.set_fantasy_family(fantasy);
}

fn pick_family(db: &fontdb::Database, generic: Family<'_>, preferred: &[&str], fallback: &str) -> String {
    let current = db.family_name(&generic);
    std::iter::once(current)
        .chain(preferred.iter().copied())
        .find(|name| contains_family(db, name))
        .unwrap_or(fallback)
        .to_string()
}

/// System fonts loaded once per test binary, or `None` on a host without
/// any installed face.
#[cfg(test)]
pub(crate) fn installed_fonts() -> Option<FontCatalog> {
    use std::sync::OnceLock;

    static FONTS: OnceLock<FontCatalog> = OnceLock::new();
    let fonts = FONTS.get_or_init(FontCatalog::system);
    if fonts.is_empty() {
        eprintln!("no system fonts installed, skipping");
        return None;
    }
    Some(fonts.clone())
}
