pub mod document_store;
pub mod identity;
pub mod role_lookup;
