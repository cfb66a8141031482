pub mod use_lieu_search;
pub mod use_operation_form;
