pub mod adjustments_popup;
pub mod archive_search;
pub mod cachets_picker;
pub mod concert_payments;
pub mod concert_picker;
pub mod lieu_modal;
pub mod lieu_picker;
pub mod operation_form;
pub mod scan_modal;
