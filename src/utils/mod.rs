pub mod logging;

pub use logging::{mask_token, truncate_text};
