use folio_core::dom::{Document, ElementId};

/// `.nav-link` and `.mobile-nav-item` entries; the clicked one is the only
/// active one.
#[derive(Debug, Clone, Default)]
pub struct NavHighlight {
    links: Vec<ElementId>,
}

impl NavHighlight {
    pub fn resolve(doc: &Document) -> Self {
        let mut links = doc.select_by_class("nav-link");
        for item in doc.select_by_class("mobile-nav-item") {
            if !links.contains(&item) {
                links.push(item);
            }
        }
        Self { links }
    }

    pub fn activate(&self, doc: &mut Document, link: ElementId) -> bool {
        if !self.links.contains(&link) {
            return false;
        }
        for &l in &self.links {
            doc.set_class(l, "active", l == link);
        }
        true
    }
}
