use augury_core::AuguryConfig;
use augury_index::IntegrityVerifier;

use super::print_json;
use crate::outcome::Outcome;

pub fn run(config: AuguryConfig) -> anyhow::Result<Outcome> {
    let receipt = IntegrityVerifier::new(config).verify();
    print_json(&receipt);
    Ok(if receipt.is_done() {
        Outcome::Success
    } else {
        Outcome::Abstain
    })
}
