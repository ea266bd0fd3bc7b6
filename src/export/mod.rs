pub mod csv_export;

pub use csv_export::export_groups_csv;
