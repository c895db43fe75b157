//! Shared test utilities for momento-db tests.
