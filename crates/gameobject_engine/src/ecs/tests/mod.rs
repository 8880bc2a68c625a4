//! Cross-module integration tests for the entity system

mod scene_graph_integration;
