//! Concurrency tests
//!
//! Many clients adding circuits at once must still see unique names and a
//! gap-free sequence.

mod load;
