pub mod html;

pub use html::{RecordSource, Templates};
