//! List checks command

use crate::CheckName;

/// Render every check in evaluation order.
pub fn run() -> String {
    let mut output = String::from("Available checks (in evaluation order):\n\n");

    for name in CheckName::ALL {
        output.push_str(&format!("  {:<28} {}\n", name.id(), name.title()));
        output.push_str(&format!("  {:<28} {}\n", "", name.description()));
    }

    output.push_str("\nconfig-correct and configs-consistent stop the run when they fail.\n");
    output.push_str("leaders-correct runs only with --check-leaders.");
    output
}
