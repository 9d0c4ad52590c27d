//! Registers a website description as a prototype and derives a customized website from it.

use std::ptr;

use prototype_registry::{Overrides, PrototypeRegistry, Website};

const IDENTIFIER: &str = "ka-cg-1";

fn main() -> Result<(), prototype_registry::Error> {
    tracing_subscriber::fmt().init();

    let site1 = Website::new(
        "ContentGardening",
        "contentgardening.com",
        "Automation and data-driven apps",
        "Kamon Ayeva",
    )
    .with_attribute("category", "Blog")
    .with_attribute("keywords", vec!["python", "data", "apis", "automation"]);

    let registry = PrototypeRegistry::new();
    registry.register(IDENTIFIER, site1);

    let site2 = registry.clone_entry(
        IDENTIFIER,
        Overrides::new()
            .set("name", "ContentGardeningPlayground")
            .set("domain", "play.contentgardening.com")
            .set(
                "description",
                "Experimentation for techniques featured on the blog",
            )
            .set("category", "Membership site")
            .set("creation_date", "2018-08-01"),
    )?;

    // Brand new objects do not need a prototype at all.
    let site3 = Website::new("name1", "www", "desc", "Joe");

    let site1_address = registry.inspect(IDENTIFIER, |site1| {
        println!("{:p}", ptr::from_ref(site1));
        println!("{site1}");
        ptr::from_ref(site1).addr()
    })?;

    for site in [&site2, &site3] {
        println!("{:p}", ptr::from_ref(site));
        println!("{site}");
    }

    println!(
        "address of site1: {site1_address:#x} != address of site2: {:p}",
        ptr::from_ref(&site2)
    );

    Ok(())
}
