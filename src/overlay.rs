use web_sys as web;

const STATS_ID: &str = "stats-overlay";
const STATS_STYLE: &str = "position:fixed;top:8px;left:8px;z-index:10;color:#cfe7ff;font:12px ui-monospace,monospace;background:rgba(10,14,24,0.8);padding:6px 10px;border-radius:6px;border:1px solid rgba(80,110,150,0.35);pointer-events:none";

/// Find the stats panel, creating it on first use.
fn stats_element(document: &web::Document) -> Option<web::Element> {
    if let Some(el) = document.get_element_by_id(STATS_ID) {
        return Some(el);
    }
    let el = document.create_element("div").ok()?;
    el.set_id(STATS_ID);
    _ = el.class_list().add_1("hidden");
    _ = el.set_attribute("style", &format!("{STATS_STYLE};display:none"));
    document.body()?.append_child(&el).ok()?;
    Some(el)
}

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = stats_element(document) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", STATS_STYLE);
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = stats_element(document) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", &format!("{STATS_STYLE};display:none"));
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    match document.get_element_by_id(STATS_ID) {
        Some(el) => el.class_list().contains("hidden"),
        None => true,
    }
}

/// Flip the panel and report whether it is now visible.
#[inline]
pub fn toggle(document: &web::Document) -> bool {
    if is_hidden(document) {
        show(document);
        true
    } else {
        hide(document);
        false
    }
}

/// Rewrite the panel text with the latest frame stats.
pub fn update_stats(
    document: &web::Document,
    fps: f32,
    markers: usize,
    arcs: usize,
    routes_done: u64,
    paused: bool,
) {
    if let Some(el) = document.get_element_by_id(STATS_ID) {
        let state = if paused { " • paused" } else { "" };
        el.set_text_content(Some(&format!(
            "FPS: {fps:.0} • markers: {markers} • arcs: {arcs} • routes done: {routes_done}{state}"
        )));
    }
}
