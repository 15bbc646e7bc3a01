//! Food search: two upstream nutrition databases behind a common provider
//! interface, sequential fallback, and lexical ranking of the winning list.

pub mod aggregate;
pub mod fdc;
pub mod normalize;
pub mod openfoodfacts;
pub mod provider;
pub mod rank;
pub mod record;

pub use aggregate::{FoodSearch, SearchError, SearchHits};
pub use provider::{ProviderError, SearchProvider};
pub use record::{NutrientRecord, Source};
