//! Contact manager entry point.
//!
//! Reads `contactmgr.toml` from the working directory (defaults when absent),
//! saves one sample contact and prints every stored contact.

use anyhow::Context;
use contactmgr_core::{
    core_version, init_logging, load_config, ContactBuilder, ContactService, SessionFactory,
    SqliteContactRepository,
};
use log::info;

fn main() -> anyhow::Result<()> {
    let config = load_config(None).context("failed to load configuration")?;
    init_logging(&config.logging)
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;
    info!(
        "event=app_start module=cli status=ok version={}",
        core_version()
    );

    let factory =
        SessionFactory::build(&config.database).context("failed to build session factory")?;
    let service = ContactService::new(SqliteContactRepository::new(&factory));

    let mut contact = ContactBuilder::new("Moo", "Mee")
        .with_email("moo@something.com")
        .with_phone(888_776_543)
        .build();
    let id = service.save(&mut contact).context("failed to save contact")?;
    println!("Saved contact id={id}");

    for contact in service.fetch_all().context("failed to fetch contacts")? {
        println!("{contact}");
    }

    Ok(())
}
