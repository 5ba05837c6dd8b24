pub mod catalog_io;
pub mod recovery;
pub mod selection_store;
pub mod state;
