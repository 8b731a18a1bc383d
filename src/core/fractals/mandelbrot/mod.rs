pub mod colour_table_builder;
pub mod point_iterator;
pub mod spread;
pub mod view;
