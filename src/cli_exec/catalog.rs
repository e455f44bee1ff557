use subtrack::view::{CatalogView, CategoryFilter};

use super::*;

pub(super) async fn handle_services_command(
    home: &ClientHome,
    search: Option<&str>,
    category: &str,
    refresh: bool,
    json: bool,
) -> Result<()> {
    let sync = home.coordinator()?;
    if refresh {
        sync.invalidate_catalog();
    }

    let mut view = CatalogView::default();
    view.begin_load();
    view.apply(sync.load_catalog().await);
    save_session(home, &sync)?;
    settled(view.state())?;

    view.set_search(search.unwrap_or_default());
    view.set_category(CategoryFilter::parse(category));

    if json {
        return print_json(view.filtered(), "services");
    }
    for service in view.filtered() {
        println!("{}\t{}", service.name, service.category);
    }
    Ok(())
}

pub(super) async fn handle_plans_command(
    home: &ClientHome,
    service: &str,
    json: bool,
) -> Result<()> {
    let sync = home.coordinator()?;
    let plans = sync
        .load_plans(service)
        .await
        .with_context(|| format!("load plans for {}", service))?;

    if json {
        return print_json(&plans, "plans");
    }
    for plan in plans {
        println!("{}\t{}", plan.name, money(plan.price));
    }
    Ok(())
}
