/// Markdown reports and console text rendered from result trees
pub mod formatter;

/// GitHub GraphQL client, query builders and response types
pub mod github;

/// Enumeration flows, branch comparison, commit pagination and report persistence
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
