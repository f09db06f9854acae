//! Read-only projections of a collection.
//!
//! Nothing here mutates or persists; every function is recomputed from the
//! collection on demand.

use std::collections::HashMap;

use crate::model::Item;

/// Items of one category, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a Item>,
}

/// Unbought items whose name contains `search_term`, ignoring case.
///
/// An empty term matches every unbought item.
pub fn filter_unbought<'a>(items: &'a [Item], search_term: &str) -> Vec<&'a Item> {
    let needle = search_term.to_lowercase();
    items
        .iter()
        .filter(|item| !item.bought() && item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Partitions all items by category, ordering buckets by first occurrence.
pub fn group_by_category(items: &[Item]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let slot = *index.entry(item.category()).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: item.category(),
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item);
    }

    groups
}

/// Sum of prices of the items not yet bought.
pub fn total_remaining(items: &[Item]) -> f64 {
    items
        .iter()
        .filter(|item| !item.bought())
        .map(Item::price)
        .fold(0.0, |acc, price| acc + price)
}

/// Formats a price the way every screen shows it.
pub fn format_price(price: f64) -> String {
    format!("฿{:.2}", price)
}

/// The summary line shown under the grouped list.
pub fn total_summary(total: f64) -> String {
    format!("รวมราคาสินค้า: {}", format_price(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemFields;

    fn item(name: &str, price: f64, category: &str, bought: bool) -> Item {
        let mut item = Item::new(ItemFields::validate(name, price, category).unwrap());
        if bought {
            item.toggle();
        }
        item
    }

    fn names<'a>(items: &[&'a Item]) -> Vec<&'a str> {
        items.iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_filter_unbought() {
        let items = vec![item("Milk", 45.5, "Dairy", false), item("Bread", 30.0, "Bakery", true)];

        assert_eq!(names(&filter_unbought(&items, "mi")), vec!["Milk"]);
        assert_eq!(names(&filter_unbought(&items, "")), vec!["Milk"]);
        assert!(filter_unbought(&items, "bread").is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let items = vec![
            item("Soy MILK", 60.0, "Dairy", false),
            item("Rice", 120.0, "", false),
            item("milk powder", 80.0, "Dairy", false),
        ];
        assert_eq!(names(&filter_unbought(&items, "Milk")), vec!["Soy MILK", "milk powder"]);
        assert!(filter_unbought(&items, "xyz").is_empty());
    }

    #[test]
    fn test_group_by_category_partitions_in_order() {
        let items = vec![
            item("Milk", 45.5, "Dairy", false),
            item("Rice", 120.0, "", false),
            item("Cheese", 99.0, "Dairy", true),
            item("Soap", 25.0, "Home", false),
            item("Noodles", 15.0, "", true),
        ];
        let groups = group_by_category(&items);

        let labels: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(labels, vec!["Dairy", crate::model::DEFAULT_CATEGORY, "Home"]);
        assert_eq!(names(&groups[0].items), vec!["Milk", "Cheese"]);
        assert_eq!(names(&groups[1].items), vec!["Rice", "Noodles"]);
        assert_eq!(names(&groups[2].items), vec!["Soap"]);

        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(total, items.len());
    }

    #[test]
    fn test_group_empty() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_total_remaining() {
        assert_eq!(total_remaining(&[]), 0.0);

        let items = vec![item("Milk", 45.5, "Dairy", false), item("Bread", 30.0, "Bakery", true)];
        assert_eq!(total_remaining(&items), 45.5);

        let all_bought = vec![item("Bread", 30.0, "Bakery", true)];
        assert_eq!(total_remaining(&all_bought), 0.0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_price(45.5), "฿45.50");
        assert_eq!(format_price(120.0), "฿120.00");
        assert_eq!(total_summary(165.5), "รวมราคาสินค้า: ฿165.50");
    }
}
