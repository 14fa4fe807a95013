//! Unit tests for the sprint context.
