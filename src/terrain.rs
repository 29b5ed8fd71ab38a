//! Terrain kinds and the catalog of their traversal properties.
use crate::error::CatalogError;
use crate::{D, MAX_STEP_COST};

/// The closed set of terrain kinds a tile can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TerrainKind {
    Grass,
    Sand,
    Water,
}

impl TerrainKind {
    pub const COUNT: usize = 3;
    pub const ALL: [TerrainKind; TerrainKind::COUNT] =
        [TerrainKind::Grass, TerrainKind::Sand, TerrainKind::Water];

    /// Position of this kind in [TerrainKind::ALL], used to index catalog tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol used in the ASCII map format.
    pub const fn symbol(self) -> char {
        match self {
            TerrainKind::Grass => '.',
            TerrainKind::Sand => 's',
            TerrainKind::Water => '~',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<TerrainKind> {
        TerrainKind::ALL.into_iter().find(|k| k.symbol() == symbol)
    }

    /// Lowercase name, used as the table name in catalog files.
    pub const fn name(self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Sand => "sand",
            TerrainKind::Water => "water",
        }
    }

    pub fn from_name(name: &str) -> Option<TerrainKind> {
        TerrainKind::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// Traversal properties shared by every tile of one [TerrainKind].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct TerrainProperties {
    /// Divides the base step cost when entering a tile; values below 1.0 make a tile slower.
    pub move_speed_modifier: f32,
    pub passable: bool,
    /// Texture slot used by renderers. Ignored by the search.
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture_id: u32,
}

impl TerrainProperties {
    pub const fn new(move_speed_modifier: f32, passable: bool, texture_id: u32) -> Self {
        TerrainProperties {
            move_speed_modifier,
            passable,
            texture_id,
        }
    }
}

/// Static table from [TerrainKind] to [TerrainProperties]. Every kind has exactly one entry with a
/// positive, finite speed modifier small enough that a diagonal step costs at most
/// [MAX_STEP_COST]; this is checked when the catalog is built, so
/// [properties](Self::properties) can never fail.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainCatalog {
    table: [TerrainProperties; TerrainKind::COUNT],
}

impl Default for TerrainCatalog {
    fn default() -> TerrainCatalog {
        TerrainCatalog {
            table: [
                TerrainProperties::new(1.0, true, 2),
                TerrainProperties::new(0.5, true, 1),
                TerrainProperties::new(0.25, false, 0),
            ],
        }
    }
}

impl TerrainCatalog {
    /// Builds a catalog from one entry per terrain kind.
    pub fn new<I>(entries: I) -> Result<TerrainCatalog, CatalogError>
    where
        I: IntoIterator<Item = (TerrainKind, TerrainProperties)>,
    {
        let mut slots: [Option<TerrainProperties>; TerrainKind::COUNT] = [None; TerrainKind::COUNT];
        for (kind, properties) in entries {
            let modifier = properties.move_speed_modifier;
            if !modifier.is_finite() || modifier <= 0.0 || D as f32 / modifier > MAX_STEP_COST as f32
            {
                return Err(CatalogError::InvalidSpeedModifier { kind, modifier });
            }
            let slot = &mut slots[kind.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateTerrain(kind));
            }
            *slot = Some(properties);
        }
        let mut table = [TerrainProperties::new(1.0, false, 0); TerrainKind::COUNT];
        for kind in TerrainKind::ALL {
            table[kind.index()] = slots[kind.index()].ok_or(CatalogError::MissingTerrain(kind))?;
        }
        Ok(TerrainCatalog { table })
    }

    pub fn properties(&self, kind: TerrainKind) -> TerrainProperties {
        self.table[kind.index()]
    }

    pub fn passable(&self, kind: TerrainKind) -> bool {
        self.table[kind.index()].passable
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerrainKind, TerrainProperties)> + '_ {
        TerrainKind::ALL.into_iter().map(|k| (k, self.properties(k)))
    }

    /// Parses a catalog from TOML with one table per terrain kind:
    ///
    /// ```toml
    /// [sand]
    /// move_speed_modifier = 0.5
    /// passable = true
    /// texture_id = 1
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<TerrainCatalog, CatalogError> {
        let tables: std::collections::BTreeMap<String, TerrainProperties> =
            toml::from_str(source)?;
        let entries = tables
            .into_iter()
            .map(|(name, properties)| {
                TerrainKind::from_name(&name)
                    .map(|kind| (kind, properties))
                    .ok_or(CatalogError::UnknownTerrain(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        TerrainCatalog::new(entries)
    }

    #[cfg(feature = "serde")]
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<TerrainCatalog, CatalogError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let catalog = TerrainCatalog::from_toml_str(&source)?;
        log::info!("Loaded terrain catalog from {}", path.display());
        Ok(catalog)
    }
}
