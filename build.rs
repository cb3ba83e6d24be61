use std::error::Error;

use vergen_gitcl::{CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
	let cargo = CargoBuilder::default().target_triple(true).build()?;
	// Falls back to placeholder values outside a git checkout.
	let gitcl = GitclBuilder::default().sha(true).build()?;

	Emitter::default().add_instructions(&cargo)?.add_instructions(&gitcl)?.emit()?;

	Ok(())
}
