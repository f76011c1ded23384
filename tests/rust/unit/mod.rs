//! Unit tests - Tests for individual components without file or process I/O
//!
//! These tests exercise the public API of the data model and Cypher generator.

mod test_cypher_generation;
mod test_data_model;
