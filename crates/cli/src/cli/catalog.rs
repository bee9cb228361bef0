use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Deserialize;
use storefront::catalog::{
    CatalogProduct, MAX_PRICE, MIN_PRICE, ProductFilters, ProductTypeFilter, SortOrder,
    available_colors, available_sizes,
};
use tokio::fs;

#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// YAML or JSON listing with `productTypes` and `products`
    #[arg(long)]
    products: PathBuf,

    /// Size to include; repeatable
    #[arg(long = "size")]
    sizes: Vec<String>,

    /// Colour slug to include; repeatable
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Product type id to include; repeatable
    #[arg(long = "product-type")]
    product_types: Vec<String>,

    /// Lowest price
    #[arg(long, default_value_t = MIN_PRICE)]
    min_price: Decimal,

    /// Highest price
    #[arg(long, default_value_t = MAX_PRICE)]
    max_price: Decimal,

    /// Listing order
    #[arg(long, value_enum, default_value_t = Sort::Popular)]
    sort: Sort,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sort {
    Popular,
    PriceAscending,
    PriceDescending,
    Newest,
}

impl From<Sort> for SortOrder {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Popular => Self::Popular,
            Sort::PriceAscending => Self::PriceAscending,
            Sort::PriceDescending => Self::PriceDescending,
            Sort::Newest => Self::Newest,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    #[serde(default)]
    product_types: Vec<ProductTypeFilter>,
    products: Vec<CatalogProduct>,
}

pub(crate) async fn run(args: FilterArgs) -> Result<(), String> {
    let listing = read_listing(&args.products).await?;

    println!("{}", render(&listing, &args)?);

    Ok(())
}

async fn read_listing(path: &Path) -> Result<Listing, String> {
    let contents = fs::read_to_string(path)
        .await
        .map_err(|error| format!("failed to read listing {}: {error}", path.display()))?;

    serde_norway::from_str(&contents)
        .map_err(|error| format!("invalid listing {}: {error}", path.display()))
}

fn build_filters(listing: &Listing, args: &FilterArgs) -> Result<ProductFilters, String> {
    let mut filters = ProductFilters::new(listing.product_types.clone());

    for id in &args.product_types {
        if !filters.check_product_type(id) {
            return Err(format!("unknown product type: {id}"));
        }
    }

    for size in &args.sizes {
        filters.select_size(size);
    }

    for color in &args.colors {
        filters.select_color(color);
    }

    filters.set_price_range(args.min_price, args.max_price);
    filters.set_sort(args.sort.into());

    Ok(filters)
}

fn render(listing: &Listing, args: &FilterArgs) -> Result<String, String> {
    let filters = build_filters(listing, args)?;
    let matching = filters.apply(&listing.products);

    let colors: Vec<String> = available_colors(&listing.products)
        .into_iter()
        .map(|color| color.slug)
        .collect();

    let mut lines = vec![
        format!("sizes: {}", available_sizes(&listing.products).join(", ")),
        format!("colors: {}", colors.join(", ")),
    ];

    lines.extend(
        matching
            .iter()
            .map(|product| format!("{}  {}  {}", product.id, product.name, product.price)),
    );
    lines.push(format!("{} of {} products", matching.len(), listing.products.len()));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::{TestError, TestResult};

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: FilterArgs,
    }

    const LISTING: &str = r"
productTypes:
  - id: shirts
    name: Shirts
  - id: shoes
    name: Shoes
products:
  - id: 1
    name: Oxford Shirt
    price: '300.00'
    productTypeIds: [shirts]
    sizes: [M, L]
    colors:
      - { name: Blue, slug: blue }
  - id: 2
    name: Runner
    price: 100
    productTypeIds: [shoes]
    sizes: ['42']
    colors:
      - { name: Red, slug: red }
  - id: 3
    name: Linen Shirt
    price: 200
    productTypeIds: [shirts]
    sizes: [L]
    colors:
      - { name: Red, slug: red }
";

    fn args(flags: &[&str]) -> Result<FilterArgs, clap::Error> {
        let argv = ["filter", "--products", "listing.yml"]
            .into_iter()
            .chain(flags.iter().copied());

        Harness::try_parse_from(argv).map(|harness| harness.args)
    }

    #[test]
    fn filters_and_sorts_listing() -> TestResult {
        let listing: Listing = serde_norway::from_str(LISTING)?;

        let output = render(
            &listing,
            &args(&["--product-type", "shirts", "--size", "L", "--sort", "price-ascending"])?,
        )
        .map_err(TestError::from)?;

        assert_eq!(
            output,
            "sizes: 42, L, M\n\
             colors: blue, red\n\
             3  Linen Shirt  200\n\
             1  Oxford Shirt  300.00\n\
             2 of 3 products"
        );

        Ok(())
    }

    #[test]
    fn unknown_product_type_is_an_error() -> TestResult {
        let listing: Listing = serde_norway::from_str(LISTING)?;

        let result = render(&listing, &args(&["--product-type", "hats"])?);

        assert_eq!(result, Err("unknown product type: hats".to_string()));

        Ok(())
    }

    #[test]
    fn repeated_flags_keep_selection() -> TestResult {
        let listing: Listing = serde_norway::from_str(LISTING)?;

        let output = render(
            &listing,
            &args(&[
                "--product-type",
                "shirts",
                "--product-type",
                "shirts",
                "--size",
                "L",
                "--size",
                "L",
                "--color",
                "red",
                "--color",
                "red",
            ])?,
        )
        .map_err(TestError::from)?;

        assert_eq!(
            output,
            "sizes: 42, L, M\n\
             colors: blue, red\n\
             3  Linen Shirt  200\n\
             1 of 3 products"
        );

        Ok(())
    }
}
