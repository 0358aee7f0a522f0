// Form Collector: editable draft, dotted-path binding, required-field
// validation, and the handlers for the form page.

pub mod draft;
pub mod fields;
pub mod handlers;
pub mod validation;
