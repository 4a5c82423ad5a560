//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for gin-buffers
//! output, ensuring consistent colors, spacing, and message structure across
//! commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, white for messages
//! - **Standardized spacing**: Newline before and after all command outputs
//! - **Single-line errors**: Uncaught failures surface as one highlighted
//!   status line, never a stack trace (full detail goes to the debug log)

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}
