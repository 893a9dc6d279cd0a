#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use mortydex_catalog::{CatalogApiError, CatalogSource, CharacterPage, PageInfo, RawCharacter, RawPlace};
use mortydex_core::types::{CharacterId, LikedIds};
use mortydex_store::{FavoritesStore, MemoryStore};

pub fn raw(id: CharacterId, name: &str, species: &str) -> RawCharacter {
    RawCharacter {
        id,
        name: name.to_string(),
        status: "Alive".to_string(),
        species: species.to_string(),
        kind: None,
        gender: "Male".to_string(),
        origin: RawPlace::default(),
        location: RawPlace {
            name: "Citadel of Ricks".to_string(),
            url: String::new(),
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
    }
}

/// Catalog served from fixed pages.
pub struct StaticCatalog {
    pages: Vec<Vec<RawCharacter>>,
    fail: AtomicBool,
}

impl StaticCatalog {
    pub fn new(pages: Vec<Vec<RawCharacter>>) -> Self {
        Self {
            pages,
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogApiError::ApiError {
                status: 503,
                body: "portal gun recharging".to_string(),
            });
        }
        Ok(())
    }

    fn all(&self) -> impl Iterator<Item = &RawCharacter> {
        self.pages.iter().flatten()
    }
}

impl CatalogSource for StaticCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, CatalogApiError> {
        self.check()?;
        let index = (page as usize).saturating_sub(1);
        let next = (index + 1 < self.pages.len()).then(|| format!("?page={}", page + 1));
        Ok(CharacterPage {
            info: PageInfo {
                count: self.all().count() as u32,
                pages: self.pages.len() as u32,
                next,
                prev: None,
            },
            results: self.pages.get(index).cloned().unwrap_or_default(),
        })
    }

    async fn search_by_name(&self, name: &str) -> Result<CharacterPage, CatalogApiError> {
        self.check()?;
        let needle = name.to_lowercase();
        Ok(CharacterPage {
            info: PageInfo::default(),
            results: self
                .all()
                .filter(|r| r.name.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        })
    }

    async fn fetch_by_ids(&self, ids: &LikedIds) -> Result<Vec<RawCharacter>, CatalogApiError> {
        self.check()?;
        Ok(self.all().filter(|r| ids.contains(&r.id)).cloned().collect())
    }
}

pub fn catalog() -> Arc<StaticCatalog> {
    Arc::new(StaticCatalog::new(vec![
        vec![
            raw(1, "Rick Sanchez", "Human"),
            raw(2, "Morty Smith", "Human"),
            raw(3, "Summer Smith", "Human"),
        ],
        vec![raw(4, "Beth Smith", "Human"), raw(47, "Birdperson", "Alien")],
    ]))
}

pub fn store_with(stored: Option<&str>) -> Arc<FavoritesStore<MemoryStore>> {
    let backend = match stored {
        Some(raw) => MemoryStore::new().with_entry(mortydex_store::FAVORITES_KEY, raw),
        None => MemoryStore::new(),
    };
    Arc::new(FavoritesStore::new(backend))
}

pub fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
