mod extractor;
mod types;


pub use extractor::{
    extract_entity, extract_list, extract_payload, extract_session, MAX_ENVELOPE_DEPTH,
};
pub use types::ListKind;
