//! End-to-end retrieval tests.

mod stubs;
