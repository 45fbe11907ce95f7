pub mod check;
pub mod dump;
pub mod resolve;

use colored::Colorize;

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}
