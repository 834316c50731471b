use crate::cli::commands::{CommandDefinition, CommandRegistry};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::records::RecordKind;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.iter() {
        io::print_info(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandDefinition) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if entry.usage.contains("<kind>") {
        let kinds: Vec<&str> = RecordKind::ALL.iter().map(|kind| kind.slug()).collect();
        io::print_info(format!("  Kinds: {}", kinds.join(", ")));
    }
    if entry.usage.contains("<edits") {
        io::print_info("  Edits: key=value  key+=item  key+=a|b (object row)  key-=index");
        io::print_info("         key.sub=value then key+  key.link=url");
    }
}
