//! Basic usage example for precondition

use precondition::{GuardError, requires};

fn configure(name: Option<String>, workers: u8, ports: Vec<u16>) -> Result<(), GuardError> {
    let name = requires(name, "name").is_not_null()?.into_inner();
    requires(workers, "workers").is_in_range(1_u8, 64_u8)?;
    requires(ports, "ports")
        .is_not_empty()?
        .each()
        .is_greater_than(1023_u16)?;

    println!("✓ '{}' is valid", name.unwrap_or_default());
    Ok(())
}

fn main() {
    let attempts = [
        (Some("api".to_owned()), 4, vec![8080, 8443]),
        (None, 4, vec![8080]),
        (Some("api".to_owned()), 0, vec![8080]),
        (Some("api".to_owned()), 4, vec![8080, 80]),
    ];

    for (name, workers, ports) in attempts {
        if let Err(e) = configure(name, workers, ports) {
            println!("✗ {:?}: {}", e.kind(), e);
        }
    }
}
