use augury_core::AuguryConfig;
use augury_index::IndexBuilder;

use super::print_json;
use crate::outcome::Outcome;

pub fn run(config: AuguryConfig) -> anyhow::Result<Outcome> {
    let report = IndexBuilder::new(config).build()?;
    print_json(&report);
    Ok(Outcome::Success)
}
