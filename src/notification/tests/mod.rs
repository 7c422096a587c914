//! Unit tests for notification fan-out and the in-memory inbox.
