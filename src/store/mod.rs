pub mod keyed_store;
