//! Static demo data.

use serde::Serialize;
use serde_json::Value;

/// A person shown on the homepage roster.
#[derive(Debug, Clone, Serialize)]
pub struct Person {
    pub given_name: &'static str,
    pub family_name: &'static str,
}

/// The hard-coded roster, in display order.
pub const PEOPLE: [Person; 3] = [
    Person {
        given_name: "Alan",
        family_name: "Hoffmeister",
    },
    Person {
        given_name: "John",
        family_name: "Levitt",
    },
    Person {
        given_name: "Lorem",
        family_name: "Ipsum",
    },
];

/// The roster as context records.
pub fn people_records() -> Vec<Value> {
    PEOPLE
        .iter()
        .map(|person| serde_json::to_value(person).expect("person serializes"))
        .collect()
}
