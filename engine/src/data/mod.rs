pub mod csv_parser;
pub mod order_table;
