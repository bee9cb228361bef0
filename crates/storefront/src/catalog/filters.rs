//! Product Filters

use std::{
    cmp::Reverse,
    collections::{BTreeSet, HashSet},
};

use rust_decimal::Decimal;

use super::{CatalogProduct, ProductColor, ProductTypeFilter, SortOrder};

/// Lowest selectable price.
pub const MIN_PRICE: Decimal = Decimal::ZERO;

/// Highest selectable price.
pub const MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Filter panel state for a product listing.
///
/// Selected sizes and colour slugs are kept sorted and unique, so toggling the
/// same value twice restores the previous state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilters {
    sizes: BTreeSet<String>,
    colors: BTreeSet<String>,
    price_range: (Decimal, Decimal),
    product_types: Vec<ProductTypeFilter>,
    sort: SortOrder,
}

impl ProductFilters {
    /// Creates filters over the given product types, all unchecked.
    pub fn new(product_types: Vec<ProductTypeFilter>) -> Self {
        let mut filters = Self {
            sizes: BTreeSet::new(),
            colors: BTreeSet::new(),
            price_range: (MIN_PRICE, MAX_PRICE),
            product_types,
            sort: SortOrder::default(),
        };

        filters.reset();

        filters
    }

    /// Selected sizes
    pub fn sizes(&self) -> impl Iterator<Item = &str> {
        self.sizes.iter().map(String::as_str)
    }

    /// Selected colour slugs
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    /// Inclusive price range
    pub fn price_range(&self) -> (Decimal, Decimal) {
        self.price_range
    }

    /// Product type checkboxes
    pub fn product_types(&self) -> &[ProductTypeFilter] {
        &self.product_types
    }

    /// Listing order
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Selects the size, or deselects it if already selected.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.sizes, size);
    }

    /// Selects the colour, or deselects it if already selected.
    pub fn toggle_color(&mut self, slug: &str) {
        toggle(&mut self.colors, slug);
    }

    /// Selects the size; selecting it again keeps it selected.
    pub fn select_size(&mut self, size: &str) {
        self.sizes.insert(size.to_string());
    }

    /// Selects the colour; selecting it again keeps it selected.
    pub fn select_color(&mut self, slug: &str) {
        self.colors.insert(slug.to_string());
    }

    /// Flips a product type checkbox. Returns `false` for an unknown id.
    pub fn toggle_product_type(&mut self, id: &str) -> bool {
        let Some(kind) = self.product_type_mut(id) else {
            return false;
        };

        kind.checked = !kind.checked;

        true
    }

    /// Checks a product type checkbox. Returns `false` for an unknown id.
    pub fn check_product_type(&mut self, id: &str) -> bool {
        let Some(kind) = self.product_type_mut(id) else {
            return false;
        };

        kind.checked = true;

        true
    }

    fn product_type_mut(&mut self, id: &str) -> Option<&mut ProductTypeFilter> {
        self.product_types.iter_mut().find(|kind| kind.id == id)
    }

    /// Sets the price range, clamped to [`MIN_PRICE`]..=[`MAX_PRICE`].
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) {
        let min = min.clamp(MIN_PRICE, MAX_PRICE);
        let max = max.clamp(MIN_PRICE, MAX_PRICE);

        self.price_range = if min <= max { (min, max) } else { (max, min) };
    }

    /// Sets the listing order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Clears every selection and restores the full price range.
    pub fn reset(&mut self) {
        self.sizes.clear();
        self.colors.clear();
        self.price_range = (MIN_PRICE, MAX_PRICE);
        self.sort = SortOrder::default();

        for kind in &mut self.product_types {
            kind.checked = false;
        }
    }

    /// Whether the product passes every active filter.
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        let (min, max) = self.price_range;

        let mut checked = self
            .product_types
            .iter()
            .filter(|kind| kind.checked)
            .peekable();

        let type_matches = checked.peek().is_none()
            || checked.any(|kind| product.product_type_ids.contains(&kind.id));

        let size_matches = self.sizes.is_empty()
            || product.sizes.iter().any(|size| self.sizes.contains(size));

        let color_matches = self.colors.is_empty()
            || product
                .colors
                .iter()
                .any(|color| self.colors.contains(&color.slug));

        type_matches && size_matches && color_matches && (min..=max).contains(&product.price)
    }

    /// Returns the matching products in listing order.
    pub fn apply<'a>(&self, products: &'a [CatalogProduct]) -> Vec<&'a CatalogProduct> {
        let mut matching: Vec<&CatalogProduct> = products
            .iter()
            .filter(|product| self.matches(product))
            .collect();

        // Stable sorts keep backend order among equal keys.
        match self.sort {
            SortOrder::Popular => {}
            SortOrder::PriceAscending => matching.sort_by_key(|product| product.price),
            SortOrder::PriceDescending => {
                matching.sort_by_key(|product| Reverse(product.price));
            }
            SortOrder::Newest => matching.sort_by_key(|product| Reverse(product.id)),
        }

        matching
    }
}

/// Every size offered by the products, sorted and unique.
pub fn available_sizes(products: &[CatalogProduct]) -> Vec<String> {
    products
        .iter()
        .flat_map(|product| product.sizes.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every colour offered by the products, unique by slug and sorted by name.
///
/// The first occurrence of a slug wins.
pub fn available_colors(products: &[CatalogProduct]) -> Vec<ProductColor> {
    let mut seen = HashSet::new();

    let mut colors: Vec<ProductColor> = products
        .iter()
        .flat_map(|product| product.colors.iter())
        .filter(|color| seen.insert(color.slug.as_str()))
        .cloned()
        .collect();

    colors.sort_by(|left, right| left.name.cmp(&right.name));

    colors
}

fn toggle(selected: &mut BTreeSet<String>, value: &str) {
    if !selected.remove(value) {
        selected.insert(value.to_string());
    }
}
