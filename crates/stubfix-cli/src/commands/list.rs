//! List command implementation.

use stubfix_transforms::all_transforms;

/// Runs the list command.
pub fn run() {
    println!("Available transforms:\n");
    println!("{:<8} {:<16} {:<9} Description", "Code", "Name", "Command");
    println!("{}", "-".repeat(80));

    for transform in all_transforms() {
        println!(
            "{:<8} {:<16} {:<9} {}",
            transform.code, transform.name, transform.command, transform.description
        );
    }

    println!("\nOther commands:");
    println!("  prune    - Delete non-stub files and remove emptied directories");
    println!("  init     - Write a default stubfix.toml");

    println!("\nExamples:");
    println!("  stubfix enums build/stubs");
    println!("  stubfix enums --check build/stubs");
    println!("  stubfix replace build/stubs pyqtSignal pyqtBoundSignal --ext .pyi");
}
