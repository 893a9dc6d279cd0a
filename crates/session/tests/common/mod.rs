#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mortydex_catalog::{CatalogApiError, CatalogSource, CharacterPage, PageInfo, RawCharacter, RawPlace};
use mortydex_core::types::{CharacterId, LikedIds};
use mortydex_store::{FavoritesStore, MemoryStore};

/// Build a raw catalog record with plausible fields.
pub fn raw(id: CharacterId, name: &str) -> RawCharacter {
    RawCharacter {
        id,
        name: name.to_string(),
        status: "Alive".to_string(),
        species: "Human".to_string(),
        kind: None,
        gender: "Male".to_string(),
        origin: RawPlace {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        location: RawPlace {
            name: "Citadel of Ricks".to_string(),
            url: String::new(),
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
    }
}

/// In-memory catalog with call counters and a failure switch.
#[derive(Default)]
pub struct FakeCatalog {
    pages: Vec<Vec<RawCharacter>>,
    /// Records resolvable by id, in the order the batch lookup returns them.
    records: Mutex<Vec<RawCharacter>>,
    fail: AtomicBool,
    pub page_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
    pub batch_calls: AtomicUsize,
    pub batch_requests: Mutex<Vec<LikedIds>>,
}

impl FakeCatalog {
    /// A catalog whose listing is `pages`; every listed record is also
    /// resolvable by id.
    pub fn with_pages(pages: Vec<Vec<RawCharacter>>) -> Self {
        let records = pages.iter().flatten().cloned().collect();
        Self {
            pages,
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    /// Replace the record returned for `record.id` by batch lookups.
    pub fn update_record(&self, record: RawCharacter) {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogApiError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CatalogApiError::ApiError {
                status: 500,
                body: "fake outage".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogSource for FakeCatalog {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, CatalogApiError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let index = (page as usize).saturating_sub(1);
        let results = self.pages.get(index).cloned().unwrap_or_default();
        let next = (index + 1 < self.pages.len()).then(|| format!("?page={}", page + 1));
        Ok(CharacterPage {
            info: PageInfo {
                count: self.records.lock().unwrap().len() as u32,
                pages: self.pages.len() as u32,
                next,
                prev: None,
            },
            results,
        })
    }

    async fn search_by_name(&self, name: &str) -> Result<CharacterPage, CatalogApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let needle = name.to_lowercase();
        let results: Vec<RawCharacter> = self
            .pages
            .iter()
            .flatten()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(CharacterPage {
            info: PageInfo {
                count: results.len() as u32,
                pages: 1,
                next: None,
                prev: None,
            },
            results,
        })
    }

    async fn fetch_by_ids(&self, ids: &LikedIds) -> Result<Vec<RawCharacter>, CatalogApiError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.batch_requests.lock().unwrap().push(ids.clone());
        self.check()?;

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

/// Two listing pages: Rick, Morty, Summer / Beth, Jerry, Evil Rick.
pub fn two_page_catalog() -> FakeCatalog {
    FakeCatalog::with_pages(vec![
        vec![raw(1, "Rick Sanchez"), raw(2, "Morty Smith"), raw(3, "Summer Smith")],
        vec![raw(4, "Beth Smith"), raw(5, "Jerry Smith"), raw(118, "Evil Rick")],
    ])
}

/// A favorites store over a memory backend seeded with `raw_value`.
pub fn store_with(raw_value: Option<&str>) -> Arc<FavoritesStore<MemoryStore>> {
    let backend = match raw_value {
        Some(value) => MemoryStore::new().with_entry(mortydex_store::FAVORITES_KEY, value),
        None => MemoryStore::new(),
    };
    Arc::new(FavoritesStore::new(backend))
}
