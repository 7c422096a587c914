//! Unit tests for the project channel.
