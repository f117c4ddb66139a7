pub mod unireg_client;

pub use unireg_client::{build_form_parts, UniRegClient};
