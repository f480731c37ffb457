//! The hero catalog: item records and the provider that builds them.
//!
//! Items only carry opaque references. Turning a reference into text or an
//! image is the job of [`resources::ResourceResolver`].

pub mod resources;

use serde::Serialize;
use std::sync::Arc;

use resources::{ImageRef, TextRef};

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    pub name: TextRef,
    pub description: TextRef,
    pub image: ImageRef,
}

impl Item {
    pub const fn new(name: TextRef, description: TextRef, image: ImageRef) -> Self {
        Self {
            name,
            description,
            image,
        }
    }
}

/// Ordered, immutable list of items. Order is display order and duplicates
/// are allowed. Clones share the same storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Arc<[Item]>,
}

impl Catalog {
    pub fn new(items: impl Into<Arc<[Item]>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items().iter()
    }
}

/// Anything that can hand out the catalog to display
pub trait CatalogProvider {
    fn catalog(&self) -> &Catalog;
}

/// Heroes bundled with the binary
const HEROES: [Item; 6] = [
    Item::new(resources::HERO_1, resources::DESCRIPTION_1, resources::PORTRAIT_1),
    Item::new(resources::HERO_2, resources::DESCRIPTION_2, resources::PORTRAIT_2),
    Item::new(resources::HERO_3, resources::DESCRIPTION_3, resources::PORTRAIT_3),
    Item::new(resources::HERO_4, resources::DESCRIPTION_4, resources::PORTRAIT_4),
    Item::new(resources::HERO_5, resources::DESCRIPTION_5, resources::PORTRAIT_5),
    Item::new(resources::HERO_6, resources::DESCRIPTION_6, resources::PORTRAIT_6),
];

/// The built-in catalog: every hero listed twice, 12 entries in total.
pub struct BuiltinCatalog {
    catalog: Catalog,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self::repeated(1)
    }

    /// The built-in catalog concatenated `times` times (at least once).
    /// Handy for exercising very long lists.
    pub fn repeated(times: usize) -> Self {
        let times = times.max(1);
        let items: Vec<Item> = (0..times)
            .flat_map(|_| HEROES.iter().chain(HEROES.iter()))
            .copied()
            .collect();

        Self {
            catalog: Catalog::new(items),
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for BuiltinCatalog {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_lists_each_hero_twice() {
        let provider = BuiltinCatalog::new();
        let catalog = provider.catalog();

        assert_eq!(catalog.len(), 12);
        for i in 0..6 {
            assert_eq!(catalog.get(i), catalog.get(i + 6));
        }
        // First half is six distinct heroes
        for i in 0..6 {
            for j in (i + 1)..6 {
                assert_ne!(catalog.get(i), catalog.get(j));
            }
        }
    }

    #[test]
    fn test_repeated_catalog_keeps_order() {
        let single = BuiltinCatalog::new();
        let triple = BuiltinCatalog::repeated(3);

        assert_eq!(triple.catalog().len(), 36);
        for (i, item) in triple.catalog().iter().enumerate() {
            assert_eq!(Some(item), single.catalog().get(i % 12));
        }

        // Zero is treated as one
        assert_eq!(BuiltinCatalog::repeated(0).catalog().len(), 12);
    }

    #[test]
    fn test_clones_share_storage() {
        let catalog = BuiltinCatalog::new().catalog().clone();
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.items().as_ptr(), copy.items().as_ptr()));
        assert!(Catalog::new(Vec::<Item>::new()).is_empty());
    }
}
