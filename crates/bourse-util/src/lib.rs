pub mod client_ext;

pub use crate::client_ext::http::{build_client, ClientHttpExt as Http};
