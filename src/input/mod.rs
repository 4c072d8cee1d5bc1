//! Input detection, reading and text decoding.

mod decoder;
mod detect;
mod read;

pub use decoder::{decode_base64, is_base64url};
pub use detect::{InputSource, TX_QUERY_PARAM, tx_param_from_url};
pub use read::read_input;
