//! Unit tests for supervisor allocation.
