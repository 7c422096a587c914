//! Unit tests for the phase workflow.
