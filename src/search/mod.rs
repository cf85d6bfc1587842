//! Listing search: text folding, filters, dropdown options and price masks.

pub mod currency;
pub mod filter;
pub mod normalize;
pub mod options;
pub mod query;

pub use currency::{currency_to_number, format_price, format_price_display, mask_currency_brl};
pub use filter::{
    featured_showcase, filter_by_category, filter_properties, Category, FilterState, RoomCount,
    SHOWCASE_LIMIT,
};
pub use normalize::{contains_normalized, normalize};
pub use options::{
    location_suggestions, unique_cities, unique_neighborhoods, LocationKind, LocationSuggestion,
};
pub use query::{FilterChip, FilterKey, SearchForm};
