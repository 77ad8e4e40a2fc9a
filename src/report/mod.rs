pub mod console;
pub mod digest;
pub mod format;
pub mod html;
pub mod report_model;
