pub mod catalog;
pub mod chart;
pub mod chart_set;
pub mod selection;
pub mod settings;
pub mod table;
