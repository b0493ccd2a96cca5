use std::collections::HashSet;

use fadila_ui::Record;
use fadila_ui::widgets::{
    Column, DataTable, DataTableConfig, MIN_COLUMN_WIDTH, ResizeSession, TableRow, move_column,
};
use proptest::prelude::*;

fn rows_from(names: &[String], hours: &[i64]) -> Vec<Record> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Record::new()
                .set("id", i as i64)
                .set("name", name.as_str())
                .set("hours", hours.get(i).copied().unwrap_or(0))
        })
        .collect()
}

fn defaults() -> Vec<Column> {
    vec![
        Column::new("id", "#"),
        Column::new("name", "Nom"),
        Column::new("hours", "Heures"),
    ]
}

fn pool() -> Vec<Column> {
    vec![
        Column::new("x", "X").category("misc"),
        Column::new("phone", "Tél").category("contact"),
    ]
}

fn table(rows: Vec<Record>) -> DataTable<Record> {
    DataTableConfig::new(rows)
        .default_columns(defaults())
        .extra_columns(pool())
        .build()
        .unwrap()
}

fn names(table: &DataTable<Record>) -> Vec<String> {
    table.rows().map(|r| r.field("name").to_string()).collect()
}

#[derive(Debug, Clone)]
enum ColumnOp {
    Toggle(usize),
    Move(usize, usize),
    Resize(usize, i32),
    Add(usize),
    Remove(usize),
}

fn column_op() -> impl Strategy<Value = ColumnOp> {
    prop_oneof![
        (0usize..8).prop_map(ColumnOp::Toggle),
        (0usize..8, 0usize..8).prop_map(|(a, b)| ColumnOp::Move(a, b)),
        (0usize..8, -400i32..400).prop_map(|(i, dx)| ColumnOp::Resize(i, dx)),
        (0usize..2).prop_map(ColumnOp::Add),
        (0usize..8).prop_map(ColumnOp::Remove),
    ]
}

fn key_at(table: &DataTable<Record>, index: usize) -> Option<String> {
    table.columns().get(index).map(|c| c.key.clone())
}

fn apply(table: &mut DataTable<Record>, op: &ColumnOp) {
    match *op {
        ColumnOp::Toggle(i) => {
            if let Some(key) = key_at(table, i) {
                table.toggle_column(&key).unwrap();
            }
        }
        ColumnOp::Move(from, to) => {
            if let (Some(key), true) = (key_at(table, from), to < table.columns().len()) {
                table.begin_column_drag(&key).unwrap();
                table.drag_over(to).unwrap();
                table.end_column_drag().unwrap();
            }
        }
        ColumnOp::Resize(i, dx) => {
            if let Some(key) = key_at(table, i) {
                table.begin_resize(&key, 500).unwrap();
                table.resize_move(500 + dx).unwrap();
                table.end_resize().unwrap();
            }
        }
        ColumnOp::Add(i) => {
            let key = pool()[i].key.clone();
            let _ = table.add_extra_column(&key);
        }
        ColumnOp::Remove(i) => {
            if let Some(key) = key_at(table, i)
                && table.is_removable(&key)
            {
                table.remove_column(&key).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn test_default_filter_keeps_only_matching_rows(
        names in prop::collection::vec("[a-zA-Z]{1,8}", 1..20),
        query in "[a-zA-Z]{1,3}",
    ) {
        let mut t = table(rows_from(&names, &[]));
        t.set_search(query.as_str());
        let needle = query.to_lowercase();
        for row in t.rows() {
            prop_assert!(row.values().iter().any(|v| v.to_string().to_lowercase().contains(&needle)));
        }
        let expected = names.iter().filter(|n| n.to_lowercase().contains(&needle)).count();
        prop_assert_eq!(t.shown_count(), expected);
    }

    #[test]
    fn test_sort_idempotent_and_reversible(
        unique in prop::collection::hash_set("[a-z]{1,8}", 1..20),
    ) {
        let input: Vec<String> = unique.into_iter().collect();
        let mut t = table(rows_from(&input, &[]));

        t.click_header("name");
        let ascending = names(&t);

        let sorted_rows: Vec<Record> = t.rows().cloned().collect();
        let mut again = table(sorted_rows);
        again.click_header("name");
        prop_assert_eq!(names(&again), ascending.clone());

        t.click_header("name");
        let mut descending = names(&t);
        descending.reverse();
        prop_assert_eq!(descending, ascending);
    }

    #[test]
    fn test_numeric_sort_is_ordered(hours in prop::collection::vec(-50i64..50, 1..20)) {
        let names: Vec<String> = (0..hours.len()).map(|i| format!("t{}", i)).collect();
        let mut t = table(rows_from(&names, &hours));
        t.click_header("hours");
        let sorted: Vec<i64> = t
            .rows()
            .map(|r| r.field("hours").as_f64().unwrap() as i64)
            .collect();
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_with_nan_keeps_numbers_ordered(
        hours in prop::collection::vec(prop::option::weighted(0.75, -1000i64..1000), 1..60),
    ) {
        let rows: Vec<Record> = hours
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let value = h.map_or(f64::NAN, |h| h as f64);
                Record::new().set("id", i as i64).set("name", format!("t{}", i)).set("hours", value)
            })
            .collect();
        let mut t = table(rows);
        t.click_header("hours");
        let sorted: Vec<f64> = t.rows().map(|r| r.field("hours").as_f64().unwrap()).collect();

        let numbers = sorted.iter().take_while(|v| !v.is_nan()).count();
        prop_assert_eq!(numbers, hours.iter().filter(|h| h.is_some()).count());
        prop_assert!(sorted[numbers..].iter().all(|v| v.is_nan()));
        prop_assert!(sorted[..numbers].windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_toggle_is_an_involution(index in 0usize..3) {
        let mut t = table(Vec::new());
        let key = defaults()[index].key.clone();
        let before = t.columns().to_vec();
        t.toggle_column(&key).unwrap();
        t.toggle_column(&key).unwrap();
        prop_assert_eq!(t.columns(), before.as_slice());
    }

    #[test]
    fn test_reset_restores_defaults(ops in prop::collection::vec(column_op(), 0..25)) {
        let mut t = table(rows_from(&["a".to_string()], &[1]));
        for op in &ops {
            apply(&mut t, op);
        }
        let keys: HashSet<_> = t.columns().iter().map(|c| c.key.clone()).collect();
        prop_assert_eq!(keys.len(), t.columns().len());
        prop_assert!(t.columns().iter().all(|c| c.width >= MIN_COLUMN_WIDTH));

        t.reset_columns().unwrap();
        let default_columns = defaults();
        prop_assert_eq!(t.columns(), default_columns.as_slice());
    }

    #[test]
    fn test_move_there_and_back(from in 0usize..5, to in 0usize..5) {
        let columns: Vec<Column> = (0..5).map(|i| Column::new(format!("c{}", i), "")).collect();
        let moved = move_column(&columns, from, to).unwrap();
        let back = move_column(&moved, to, from).unwrap();
        prop_assert_eq!(back, columns);
    }

    #[test]
    fn test_resize_never_below_minimum(
        start_width in 0u32..1000,
        start_x in -2000i32..2000,
        pointer_x in -5000i32..5000,
    ) {
        let session = ResizeSession::new("c", start_x, start_width);
        prop_assert!(session.width_at(pointer_x) >= MIN_COLUMN_WIDTH);
    }
}
