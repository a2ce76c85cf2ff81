use crate::error::Error;
use crate::quirks::{Platform, QuirkProfile};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// What the catalog knows about a ROM
#[derive(Debug, Clone, PartialEq)]
pub struct RomInfo {
    pub title: String,
    pub authors: Vec<String>,
    pub release: Option<String>,
    pub platform: Platform,
    pub profile: QuirkProfile,
}

impl RomInfo {
    /// a ROM we know nothing about beyond its platform
    pub fn untitled(platform: Platform) -> Self {
        RomInfo {
            title: String::new(),
            authors: Vec::new(),
            release: None,
            platform,
            profile: QuirkProfile::for_platform(platform),
        }
    }
}

/// Finds ROM bytes and the quirk profile they need
pub trait RomCatalog {
    fn resolve(&self, identifier: &str) -> Result<RomInfo, Error>;

    fn read(&self, identifier: &str) -> Result<Vec<u8>, Error>;
}

/// ROMs on the local filesystem, identified by path.
///
/// Metadata is read from the file name, e.g. `Pong [Paul Vervalin, 1990].ch8`,
/// and the extension picks the platform. Entries registered explicitly win.
#[derive(Default)]
pub struct FileCatalog {
    entries: HashMap<String, RomInfo>,
}

impl FileCatalog {
    pub fn new() -> Self {
        FileCatalog::default()
    }

    /// remember metadata for a ROM, replacing whatever was inferred
    pub fn register(&mut self, identifier: impl Into<String>, info: RomInfo) {
        self.entries.insert(identifier.into(), info);
    }

    fn infer(identifier: &str) -> RomInfo {
        let path = Path::new(identifier);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let platform = Platform::from_extension(&ext);
        let (title, authors, release) = parse_name(&stem);
        RomInfo {
            title,
            authors,
            release,
            ..RomInfo::untitled(platform)
        }
    }
}

impl RomCatalog for FileCatalog {
    fn resolve(&self, identifier: &str) -> Result<RomInfo, Error> {
        Ok(match self.entries.get(identifier) {
            Some(info) => info.clone(),
            None => FileCatalog::infer(identifier),
        })
    }

    fn read(&self, identifier: &str) -> Result<Vec<u8>, Error> {
        fs::read(identifier).map_err(|source| Error::RomNotFound {
            identifier: identifier.to_string(),
            source,
        })
    }
}

/// split `Title [Author, Release]` into its parts
fn parse_name(stem: &str) -> (String, Vec<String>, Option<String>) {
    let bracket = stem
        .find('[')
        .and_then(|open| stem[open..].find(']').map(|close| (open, open + close)));

    match bracket {
        Some((open, close)) => {
            let mut fields = stem[open + 1..close].split(',').map(str::trim);
            let authors = fields
                .next()
                .filter(|a| !a.is_empty())
                .map(|a| vec![a.to_string()])
                .unwrap_or_default();
            let release = fields.next().filter(|r| !r.is_empty()).map(String::from);
            let title = format!("{}{}", &stem[..open], &stem[close + 1..]);
            (title.trim().to_string(), authors, release)
        }
        None => (stem.trim().to_string(), Vec::new(), None),
    }
}
