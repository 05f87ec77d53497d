pub mod binder;
pub mod chart_service;
pub mod range_filter;
