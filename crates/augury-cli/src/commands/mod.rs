pub mod ask;
pub mod build;
pub mod parity;
pub mod smoke;
pub mod verify;

use serde::Serialize;

/// Pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("error: could not serialize output: {e}"),
    }
}
