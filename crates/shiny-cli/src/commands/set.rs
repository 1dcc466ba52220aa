use std::path::Path;

use crate::SetArgs;

pub fn run(dir: Option<&Path>, args: SetArgs) -> Result<(), String> {
    if args.title.is_none()
        && args.method.is_none()
        && args.charm.is_none()
        && args.sparkling.is_none()
        && args.defeated.is_none()
    {
        return Err(
            "nothing to change; pass --title, --method, --charm, --sparkling, or --defeated"
                .into(),
        );
    }

    let mut store = super::open_store(dir)?;
    if let Some(title) = args.title {
        store.set_title(title);
    }
    if let Some(method) = args.method {
        store.set_method(method);
    }
    if let Some(charm) = args.charm {
        store.set_shiny_charm(charm);
    }
    if let Some(sparkling) = args.sparkling {
        store.set_sparkling_power(sparkling);
    }
    if let Some(defeated) = args.defeated {
        store.set_outbreak_defeat_count(defeated);
    }

    let hunt = super::current(&store)?;
    println!("  {}: {}", hunt.title, super::describe_settings(&hunt.settings));
    Ok(())
}
