//! Array helpers over slices and JSON rows

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use serde_json::Value;

/// Sort direction for [`sort_by_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// New vector with duplicates removed, first occurrence wins.
pub fn unique<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

/// Whether the value is an array with no elements. Non-arrays are `false`.
pub fn is_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

/// Loosely coerce each element to a number: numeric strings parse, booleans
/// become 0/1, null becomes 0, everything else becomes NaN.
pub fn to_numbers(items: &[Value]) -> Vec<f64> {
    items.iter().map(coerce_number).collect()
}

fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(*b as u8),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Element-wise equality, including length.
pub fn are_equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a == b
}

/// Stable sort of JSON rows by the value under `key`.
///
/// Rows missing the key, and values of mismatched types, compare equal and
/// keep their relative order.
pub fn sort_by_key(mut rows: Vec<Value>, key: &str, direction: SortDirection) -> Vec<Value> {
    if key.is_empty() {
        return rows;
    }
    rows.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Filter JSON rows to those whose named fields contain `query`,
/// case-insensitively. An empty query returns a copy of all rows.
pub fn search_by_fields(rows: &[Value], query: &str, fields: &[&str]) -> Vec<Value> {
    if query.is_empty() {
        return rows.to_vec();
    }
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            fields.iter().any(|field| {
                row.get(field)
                    .and_then(field_text)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One page of `items`, 1-based. Out-of-range pages are empty.
pub fn paginate<T: Clone>(items: &[T], per_page: usize, page: usize) -> Vec<T> {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() || per_page == 0 {
        return Vec::new();
    }
    let end = (start + per_page).min(items.len());
    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unique_preserves_first_occurrence_order() {
        assert_eq!(unique(&[1, 2, 3, 2, 4]), vec![1, 2, 3, 4]);
        assert_eq!(unique(&["a", "b", "a", "c"]), vec!["a", "b", "c"]);
        assert_eq!(unique::<i32>(&[]), Vec::<i32>::new());
    }

    #[test]
    fn empty_array_detection_rejects_non_arrays() {
        assert!(is_empty_array(&json!([])));
        assert!(!is_empty_array(&json!([1, 2, 3])));
        assert!(!is_empty_array(&json!(null)));
        assert!(!is_empty_array(&json!("string")));
    }

    #[test]
    fn to_numbers_coerces_loosely() {
        assert_eq!(to_numbers(&[json!("1"), json!("2"), json!("3")]), vec![1.0, 2.0, 3.0]);
        assert_eq!(to_numbers(&[json!(true), json!(null)]), vec![1.0, 0.0]);
        assert!(to_numbers(&[json!("junk")])[0].is_nan());
    }

    #[test]
    fn equality_checks_values_and_length() {
        assert!(are_equal(&[1, 2, 3], &[1, 2, 3]));
        assert!(!are_equal(&[1, 2, 3], &[1, 2, 4]));
        assert!(!are_equal(&[1, 2], &[1, 2, 3]));
    }

    #[test]
    fn sort_by_key_ascending_strings() {
        let rows = vec![
            json!({"name": "Charlie"}),
            json!({"name": "Alice"}),
            json!({"name": "Bob"}),
        ];
        let sorted = sort_by_key(rows, "name", SortDirection::Asc);
        assert_eq!(
            sorted,
            vec![
                json!({"name": "Alice"}),
                json!({"name": "Bob"}),
                json!({"name": "Charlie"}),
            ]
        );
    }

    #[test]
    fn sort_by_key_descending_numbers() {
        let rows = vec![json!({"age": 25}), json!({"age": 30}), json!({"age": 20})];
        let sorted = sort_by_key(rows, "age", SortDirection::Desc);
        assert_eq!(
            sorted,
            vec![json!({"age": 30}), json!({"age": 25}), json!({"age": 20})]
        );
    }

    #[test]
    fn sort_with_empty_key_is_a_no_op() {
        let rows = vec![json!({"name": "Charlie"}), json!({"name": "Alice"})];
        assert_eq!(sort_by_key(rows.clone(), "", SortDirection::Asc), rows);
    }

    fn produce() -> Vec<Value> {
        vec![
            json!({"name": "Apple", "category": "Fruit"}),
            json!({"name": "Banana", "category": "Fruit"}),
            json!({"name": "Carrot", "category": "Vegetable"}),
        ]
    }

    #[test]
    fn search_matches_named_fields_case_insensitively() {
        let rows = produce();
        assert_eq!(
            search_by_fields(&rows, "APPLE", &["name"]),
            vec![json!({"name": "Apple", "category": "Fruit"})]
        );
        assert_eq!(search_by_fields(&rows, "Fruit", &["name", "category"]).len(), 2);
        assert!(search_by_fields(&rows, "Orange", &["name"]).is_empty());
    }

    #[test]
    fn search_with_empty_query_copies_all_rows() {
        let rows = produce();
        assert_eq!(search_by_fields(&rows, "", &["name"]), rows);
    }

    #[test]
    fn search_tolerates_missing_fields_and_numbers() {
        let rows = vec![json!({"name": "Item", "price": 100}), json!({"title": "Book"})];
        assert_eq!(
            search_by_fields(&rows, "100", &["price"]),
            vec![json!({"name": "Item", "price": 100})]
        );
        assert_eq!(
            search_by_fields(&rows, "Item", &["name"]),
            vec![json!({"name": "Item", "price": 100})]
        );
    }

    #[test]
    fn paginate_slices_one_based_pages() {
        let items = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        assert_eq!(paginate(&items, 3, 1), vec![1, 2, 3]);
        assert_eq!(paginate(&items, 3, 2), vec![4, 5, 6]);
        assert_eq!(paginate(&items, 3, 4), vec![10]);
        assert!(paginate(&items, 3, 10).is_empty());
        assert_eq!(paginate(&items, 20, 1).len(), 10);
        assert!(paginate::<i32>(&[], 10, 1).is_empty());
    }
}
