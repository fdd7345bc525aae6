use crate::domain::model::{
    rarity_rank, Catalog, Item, Pagination, QueryParameters, ResultPage, SortKey,
    COLLECTION_TYPE_TAG, MATCH_ALL,
};

/// 對資料集做篩選、排序、分頁。只讀取 catalog，回傳的頁面持有選中道具的複本
pub fn query(catalog: &Catalog, params: &QueryParameters) -> ResultPage {
    let mut filtered: Vec<&Item> = catalog
        .items
        .iter()
        .filter(|item| matches(item, params))
        .collect();

    sort_items(&mut filtered, params.sort);

    let pagination = paginate(filtered.len(), params.page, params.per_page);
    let start = (pagination.page - 1)
        .saturating_mul(pagination.per_page)
        .min(filtered.len());
    let end = start.saturating_add(pagination.per_page).min(filtered.len());

    tracing::debug!(
        "Query matched {} of {} items, returning page {}/{} ({} items)",
        pagination.total_items,
        catalog.len(),
        pagination.page,
        pagination.total_pages,
        end - start
    );

    ResultPage {
        items: filtered[start..end].iter().map(|item| (*item).clone()).collect(),
        pagination,
        filters: QueryParameters {
            page: pagination.page,
            per_page: pagination.per_page,
            ..params.clone()
        },
    }
}

/// 所有篩選條件需同時成立
pub fn matches(item: &Item, params: &QueryParameters) -> bool {
    matches_search(item, &params.search)
        && matches_exact(item.rare.as_deref(), &params.rarity)
        && matches_exact(item.item_type.as_deref(), &params.item_type)
        && matches_collection(item, &params.collection)
}

fn matches_search(item: &Item, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();

    item.name_lower().contains(&needle)
        || item.icon_lower().contains(&needle)
        || item.id_string().to_lowercase().contains(&needle)
}

fn matches_exact(field: Option<&str>, wanted: &str) -> bool {
    wanted == MATCH_ALL || field == Some(wanted)
}

fn matches_collection(item: &Item, collection: &str) -> bool {
    if collection == MATCH_ALL {
        return true;
    }
    // 非 COLLECTION 類型一律排除，即使剛好帶有 collection_type
    item.item_type.as_deref() == Some(COLLECTION_TYPE_TAG)
        && item.collection_type.as_deref() == Some(collection)
}

/// 穩定排序，相同鍵值維持篩選後的原順序
pub fn sort_items(items: &mut [&Item], key: SortKey) {
    match key {
        SortKey::Name => items.sort_by_cached_key(|item| item.name_lower()),
        SortKey::Rarity => items.sort_by_key(|item| rarity_rank(item.rare.as_deref())),
        SortKey::Id => items.sort_by_key(|item| item.id_number()),
    }
}

pub fn paginate(total_items: usize, page: usize, per_page: usize) -> Pagination {
    let per_page = per_page.max(1);
    let total_pages = total_items.div_ceil(per_page).max(1);

    Pagination {
        page: page.clamp(1, total_pages),
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FilterQuery;
    use serde_json::json;

    fn sample_catalog() -> Catalog {
        Catalog::from_values(vec![
            json!({"id": 1, "name_text": "Desert Eagle", "rare": "Orange", "type": "WEAPON"}),
            json!({"id": 2, "name_text": "AWM", "rare": "Purple", "type": "WEAPON"}),
            json!({"id": 3, "name_text": "Dog Tag", "rare": "White", "type": "COLLECTION", "collection_type": "PET"}),
        ])
    }

    fn names(page: &ResultPage) -> Vec<&str> {
        page.items
            .iter()
            .map(|item| item.name_text.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_rarity_sort_with_pagination() {
        let params = QueryParameters {
            sort: SortKey::Rarity,
            per_page: 2,
            ..Default::default()
        };

        let page = query(&sample_catalog(), &params);

        assert_eq!(names(&page), vec!["Desert Eagle", "AWM"]);
        assert_eq!(
            page.pagination,
            Pagination {
                page: 1,
                per_page: 2,
                total_items: 3,
                total_pages: 2
            }
        );
    }

    #[test]
    fn test_default_parameters_return_everything() {
        let catalog = sample_catalog();
        let page = query(&catalog, &QueryParameters::default());

        assert_eq!(page.items.len(), catalog.len());
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_search_matches_name_icon_and_id() {
        let catalog = Catalog::from_values(vec![
            json!({"id": 101, "name_text": "Desert Eagle", "icon": "Icon_DE"}),
            json!({"id": 202, "name_text": "AWM", "icon": "icon_sniper"}),
            json!({"id": 303, "name_text": "Dog Tag"}),
        ]);

        let by_name = query(
            &catalog,
            &QueryParameters {
                search: "eagle".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(names(&by_name), vec!["Desert Eagle"]);

        let by_icon = query(
            &catalog,
            &QueryParameters {
                search: "sniper".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(names(&by_icon), vec!["AWM"]);

        let by_id = query(
            &catalog,
            &QueryParameters {
                search: "30".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(names(&by_id), vec!["Dog Tag"]);
    }

    #[test]
    fn test_exact_rarity_and_type_filters() {
        let catalog = Catalog::from_values(vec![
            json!({"id": 1, "rare": "Orange_Plus", "type": "WEAPON"}),
            json!({"id": 2, "rare": "Orange", "type": "WEAPON"}),
            json!({"id": 3, "rare": "Orange_Plus", "type": "SKIN"}),
        ]);

        let params = QueryParameters {
            rarity: "Orange_Plus".to_string(),
            item_type: "WEAPON".to_string(),
            ..Default::default()
        };
        let page = query(&catalog, &params);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id_number(), 1);

        let case_sensitive = QueryParameters {
            rarity: "orange".to_string(),
            ..Default::default()
        };
        assert!(query(&catalog, &case_sensitive).items.is_empty());
    }

    #[test]
    fn test_collection_filter_requires_collection_type() {
        let catalog = Catalog::from_values(vec![
            json!({"id": 1, "type": "COLLECTION", "collection_type": "PET"}),
            json!({"id": 2, "type": "WEAPON", "collection_type": "PET"}),
            json!({"id": 3, "type": "COLLECTION", "collection_type": "BANNER"}),
        ]);

        let params = QueryParameters {
            collection: "PET".to_string(),
            ..Default::default()
        };
        let page = query(&catalog, &params);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id_number(), 1);
    }

    #[test]
    fn test_id_sort_is_numeric() {
        let catalog = Catalog::from_values(vec![
            json!({"id": "100", "name_text": "c"}),
            json!({"id": 9, "name_text": "b"}),
            json!({"name_text": "missing id"}),
            json!({"id": "20", "name_text": "a"}),
        ]);

        let page = query(&catalog, &QueryParameters::default());
        let ids: Vec<i64> = page.items.iter().map(Item::id_number).collect();

        assert_eq!(ids, vec![0, 9, 20, 100]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive_and_missing_first() {
        let catalog = Catalog::from_values(vec![
            json!({"id": 1, "name_text": "bravo"}),
            json!({"id": 2}),
            json!({"id": 3, "name_text": "Alpha"}),
        ]);

        let params = QueryParameters {
            sort: SortKey::Name,
            ..Default::default()
        };
        let page = query(&catalog, &params);
        let ids: Vec<i64> = page.items.iter().map(Item::id_number).collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rarity_sort_is_stable_for_unknown_ranks() {
        let catalog = Catalog::from_values(vec![
            json!({"id": 1, "rare": "Mythic"}),
            json!({"id": 2, "rare": "White"}),
            json!({"id": 3}),
            json!({"id": 4, "rare": "Orange_Plus"}),
            json!({"id": 5, "rare": "Legendary"}),
        ]);

        let params = QueryParameters {
            sort: SortKey::Rarity,
            ..Default::default()
        };
        let page = query(&catalog, &params);
        let ids: Vec<i64> = page.items.iter().map(Item::id_number).collect();

        assert_eq!(ids, vec![4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last_page() {
        let params = QueryParameters {
            page: 40,
            per_page: 2,
            ..Default::default()
        };

        let page = query(&sample_catalog(), &params);

        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.filters.page, 2);
        assert_eq!(names(&page), vec!["Dog Tag"]);
    }

    #[test]
    fn test_paginate_total_pages() {
        assert_eq!(paginate(0, 1, 50).total_pages, 1);
        assert_eq!(paginate(0, 5, 50).page, 1);
        assert_eq!(paginate(50, 1, 50).total_pages, 1);
        assert_eq!(paginate(51, 1, 50).total_pages, 2);
        assert_eq!(paginate(7, 1, 1).total_pages, 7);
        assert_eq!(paginate(10, 0, 3).page, 1);
    }

    #[test]
    fn test_empty_filter_result_is_single_empty_page() {
        let params = QueryParameters {
            search: "does-not-exist".to_string(),
            page: 3,
            ..Default::default()
        };

        let page = query(&sample_catalog(), &params);

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 0);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.page, 1);
    }

    #[test]
    fn test_whitespace_filter_value_is_matched_literally() {
        let raw = FilterQuery::from_query_string(Some("rarity=%20&type="));
        let params = QueryParameters::from(raw);

        assert_eq!(params.rarity, " ");
        assert_eq!(params.item_type, "all");
        assert!(query(&sample_catalog(), &params).items.is_empty());

        let catalog = Catalog::from_values(vec![
            json!({"id": 1, "rare": " "}),
            json!({"id": 2, "rare": "White"}),
        ]);
        let page = query(&catalog, &params);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id_number(), 1);
    }
}
