// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, table, Table};
use std::collections::{BTreeMap, HashMap};

pub trait Entity {
    type Id;

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut table = table![["id", self.get_id()]];

        // Sorted so the same movie always prints the same way
        let data: BTreeMap<_, _> = self.get_data().into_iter().collect();
        for (key, val) in data {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_map;

    struct Dummy;

    impl Entity for Dummy {
        type Id = usize;

        fn get_id(&self) -> usize {
            7
        }

        fn get_data(&self) -> HashMap<String, String> {
            hash_map! {
                "title".into() => "Alien".into(),
                "director".into() => "Ridley Scott".into(),
            }
        }
    }

    #[test]
    fn entity_table_has_id_and_sorted_fields() {
        let table = Dummy.to_table();
        assert_eq!(table.len(), 3);

        let rendered = table.to_string();
        let director = rendered.find("director").unwrap();
        let title = rendered.find("title").unwrap();
        assert!(rendered.contains("Alien"));
        assert!(director < title);
    }
}
