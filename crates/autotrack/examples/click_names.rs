//! Example: resolve what an auto-instrumentation layer would log for clicks

use autotrack::{
    ElementTextResolver, EventTracker, TreeAccess, UiEventHandlers, get_interactable,
};
use autotrack_dom::NodeId;

const PAGE: &str = r#"
<nav id="nav" data-autotrack-events="|click|">
  <a href="/pricing"><span id="pricing">Pricing</span></a>
  <div id="menu"><span class="caret" id="caret"></span> Account</div>
</nav>
<label for="q">Search docs</label><input id="q" type="search">
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut tree = autotrack_html::parse(PAGE)?;
    let resolver: ElementTextResolver<NodeId> = ElementTextResolver::new();

    let mut tracker: EventTracker<NodeId> = EventTracker::new();
    tracker.track(
        "click",
        UiEventHandlers::new().with_bubble(|event| println!("bubble: {:?} -> {:?}", event.target, event.interactable)),
    )?;

    let menu = tree.element_by_id("menu").ok_or_else(|| anyhow::anyhow!("missing #menu"))?;
    if tree.add_event_listener(menu, "click")? {
        tracker.listener_added(&mut tree, menu, "click")?;
    }

    for id in ["pricing", "caret", "q"] {
        let Some(node) = tree.element_by_id(id) else { continue };
        tracker.dispatch(&tree, node, "click");

        let target = get_interactable(&tree, node, "click", true);
        let event = resolver.get_element_text_event(&tree, target.or(Some(node)), "click", Some("click"));
        println!(
            "#{id}: target <{}> named {:?}",
            target.and_then(|t| tree.tag_name(t)).unwrap_or("none"),
            event.element_name.unwrap_or_default()
        );
    }

    Ok(())
}
