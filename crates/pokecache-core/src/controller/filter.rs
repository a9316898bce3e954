use crate::models::Item;
use crate::utils::contains_ignore_case;

/// Items whose name contains `query`, ignoring case, in their original order.
/// An empty query keeps every item.
pub fn filter_items(items: &[Item], query: &str) -> Vec<Item> {
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| contains_ignore_case(&item.name, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<Item> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Item::new(*name, format!("https://host/api/v2/pokemon/{}/", i + 1)))
            .collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    fn is_subsequence(sub: &[Item], full: &[Item]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|s| it.any(|f| f.key == s.key))
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let all = items(&["bulbasaur", "ivysaur", "pikachu"]);
        assert_eq!(filter_items(&all, ""), all);
    }

    #[test]
    fn test_case_insensitive() {
        let all = items(&["Pikachu"]);
        assert_eq!(names(&filter_items(&all, "PIKA")), ["Pikachu"]);
    }

    #[test]
    fn test_order_preserved_subsequence() {
        let all = items(&["raichu", "pikachu", "bulbasaur", "pichu", "charmander"]);
        for query in ["chu", "a", "zzz", "CH", "r"] {
            let filtered = filter_items(&all, query);
            assert!(is_subsequence(&filtered, &all), "query {query:?}");
            assert!(filtered.iter().all(|i| i.name.to_lowercase().contains(&query.to_lowercase())));
        }
        assert_eq!(names(&filter_items(&all, "chu")), ["raichu", "pikachu", "pichu"]);
    }

    #[test]
    fn test_no_matches() {
        let all = items(&["bulbasaur"]);
        assert!(filter_items(&all, "mew").is_empty());
    }

    #[test]
    fn test_filtered_items_keep_their_keys() {
        let all = items(&["pikachu", "raichu"]);
        let filtered = filter_items(&all, "rai");
        assert_eq!(filtered[0].key, all[1].key);
    }
}
