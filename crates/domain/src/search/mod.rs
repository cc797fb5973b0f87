//! Repository search types

mod model;
mod query;

pub use model::{License, Owner, Repository, SearchResponse};
pub use query::{
    OrderKey, Qualifier, SEARCH_REPOSITORIES_PATH, SearchParams, SearchQuery, SortField, SortKey,
    SortOrder,
};
