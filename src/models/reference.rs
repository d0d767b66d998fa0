use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

pub const DEFAULT_DEPARTMENTS: [&str; 5] = ["Assembly", "Fabrication", "Electrical", "Admin", "IT"];
pub const DEFAULT_LOCATIONS: [&str; 4] = ["Main Shop", "Shop 6", "Field Site", "Office"];
