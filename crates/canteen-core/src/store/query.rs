// Query-string building for list endpoints.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;

use super::resource::{PaginationPolicy, StoreConfig};
use crate::error::CoreError;

/// A typed filter record for one list endpoint.
///
/// Fields serialize to query pairs; `None`, empty and whitespace-only
/// values are dropped.
pub trait SearchFilter: Serialize + Clone + Default + Debug + PartialEq + Send + Sync + 'static {
    fn params(&self) -> Vec<(String, String)> {
        filter_params(self)
    }

    fn is_active(&self) -> bool {
        !self.params().is_empty()
    }

    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

fn filter_params<T: Serialize>(filter: &T) -> Vec<(String, String)> {
    let Ok(Value::Object(fields)) = serde_json::to_value(filter) else {
        return Vec::new();
    };
    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    trimmed.to_owned()
                }
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((key, value))
        })
        .collect()
}

/// Query pairs for one list page.
pub fn list_query<F: SearchFilter>(
    config: &StoreConfig,
    page: u32,
    page_size: u32,
    filter: &F,
) -> Vec<(String, String)> {
    let filters = filter.params();
    let paginate = match config.pagination {
        PaginationPolicy::Always => true,
        PaginationPolicy::OmitWhenFiltered => filters.is_empty(),
    };

    let mut params = Vec::with_capacity(filters.len() + 2);
    if paginate {
        params.push(("page".to_owned(), page.to_string()));
        params.push(("page_size".to_owned(), page_size.to_string()));
    }
    params.extend(filters);
    params
}

#[cfg(test)]
mod tests {
    use canteen_api::Backend;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{DishFilter, DocumentFilter};
    use crate::store::resource::{DeletePolicy, UpdateMethod};

    const CONFIG: StoreConfig = StoreConfig {
        store_id: "test",
        backend: Backend::Refs,
        endpoint: "/things/",
        item_key: "thing.item",
        item_list_key: "thing.itemList",
        page_size: 30,
        pagination: PaginationPolicy::OmitWhenFiltered,
        delete_policy: DeletePolicy::FilterLocal,
        update_method: UpdateMethod::Patch,
    };

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
    }

    #[test]
    fn empty_values_are_dropped() {
        let filter = DishFilter {
            name_kz: Some("  ".into()),
            name_ru: Some(String::new()),
            barcode: None,
            category: Some(4),
            id: None,
        };
        assert_eq!(filter.params(), pairs(&[("category", "4")]));
    }

    #[test]
    fn unfiltered_query_is_paginated() {
        let query = list_query(&CONFIG, 2, 30, &DishFilter::default());
        assert_eq!(query, pairs(&[("page", "2"), ("page_size", "30")]));
    }

    #[test]
    fn any_filter_drops_pagination_when_configured() {
        let filter = DishFilter {
            name_ru: Some("Плов".into()),
            ..DishFilter::default()
        };
        assert_eq!(list_query(&CONFIG, 3, 30, &filter), pairs(&[("name_ru", "Плов")]));
    }

    #[test]
    fn always_paginate_keeps_page_with_filters() {
        let config = StoreConfig {
            pagination: PaginationPolicy::Always,
            page_size: 20,
            ..CONFIG
        };
        let filter = DocumentFilter {
            accepted: Some(false),
            date_from: NaiveDate::from_ymd_opt(2024, 9, 1),
            ..DocumentFilter::default()
        };
        assert_eq!(
            list_query(&config, 1, 20, &filter),
            pairs(&[
                ("page", "1"),
                ("page_size", "20"),
                ("accepted", "false"),
                ("date_from", "2024-09-01"),
            ])
        );
    }
}
