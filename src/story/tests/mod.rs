//! Unit tests for the story context.

mod support;
