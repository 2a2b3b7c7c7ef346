//! DOM-backed view surface
//!
//! Elements are looked up once when the app mounts. Every text value is
//! written with `set_text_content`, so sentence text from the analyzed
//! document is never parsed as markup.

use clause_core::{ClauseGroup, Region, ResultBody, ViewSurface, VisualTree};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
};

/// Element ids the page is expected to provide
pub struct DomIds;

impl DomIds {
    pub const FORM: &'static str = "upload-form";
    pub const FILE_INPUT: &'static str = "file-input";
    pub const FILE_LABEL: &'static str = "file-name";
    pub const SUBMIT: &'static str = "submit-btn";
    pub const LOADING: &'static str = "loading";
    pub const ERROR: &'static str = "error";
    pub const RESULTS: &'static str = "results";
    pub const CLAUSE_LIST: &'static str = "clauses-list";
    pub const RESULT_FILENAME: &'static str = "result-filename";
    pub const RESULT_TOTAL: &'static str = "result-total";

    // Optional: the banner itself receives the text when there is no
    // dedicated message element.
    pub const ERROR_MESSAGE: &'static str = "error-message";
    pub const VALIDATION: &'static str = "validation-message";
    pub const IDLE: &'static str = "idle-hint";
}

pub(crate) fn required<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// [`ViewSurface`] over the upload page's elements
pub struct DomSurface {
    document: Document,
    file_label: HtmlElement,
    submit: HtmlButtonElement,
    loading: HtmlElement,
    error_banner: HtmlElement,
    error_text: HtmlElement,
    results: HtmlElement,
    clause_list: Element,
    result_filename: Element,
    result_total: Element,
    validation: Option<HtmlElement>,
    idle: Option<HtmlElement>,
}

impl DomSurface {
    /// Look up every element the surface drives
    ///
    /// # Errors
    /// Returns JsValue error naming the first required element that is missing
    pub fn lookup(document: &Document) -> Result<Self, JsValue> {
        let error_banner: HtmlElement = required(document, DomIds::ERROR)?;
        let error_text =
            optional(document, DomIds::ERROR_MESSAGE).unwrap_or_else(|| error_banner.clone());

        Ok(Self {
            document: document.clone(),
            file_label: required(document, DomIds::FILE_LABEL)?,
            submit: required(document, DomIds::SUBMIT)?,
            loading: required(document, DomIds::LOADING)?,
            error_banner,
            error_text,
            results: required(document, DomIds::RESULTS)?,
            clause_list: required(document, DomIds::CLAUSE_LIST)?,
            result_filename: required(document, DomIds::RESULT_FILENAME)?,
            result_total: required(document, DomIds::RESULT_TOTAL)?,
            validation: optional(document, DomIds::VALIDATION),
            idle: optional(document, DomIds::IDLE),
        })
    }

    fn region_element(&self, region: Region) -> Option<&HtmlElement> {
        match region {
            Region::Idle => self.idle.as_ref(),
            Region::Loading => Some(&self.loading),
            Region::Error => Some(&self.error_banner),
            Region::Results => Some(&self.results),
        }
    }

    fn build_body(&self, tree: &VisualTree) -> Result<(), JsValue> {
        match &tree.body {
            ResultBody::Placeholder { message } => {
                let placeholder = self.document.create_element("p")?;
                placeholder.set_class_name("no-clauses");
                placeholder.set_text_content(Some(message));
                self.clause_list.append_child(&placeholder)?;
            }
            ResultBody::Groups { groups } => {
                for group in groups {
                    let block = self.group_element(group)?;
                    self.clause_list.append_child(&block)?;
                }
            }
        }
        Ok(())
    }

    fn group_element(&self, group: &ClauseGroup) -> Result<Element, JsValue> {
        let block = self.document.create_element("div")?;
        block.set_class_name("clause-group");
        block.set_attribute("data-category", &group.category)?;

        let header = self.document.create_element("div")?;
        header.set_class_name("clause-header");

        let title = self.document.create_element("h3")?;
        title.set_class_name("clause-title");
        title.set_text_content(Some(&group.label));
        header.append_child(&title)?;

        let badge = self.document.create_element("span")?;
        badge.set_class_name("clause-count");
        badge.set_text_content(Some(&group.badge));
        header.append_child(&badge)?;

        block.append_child(&header)?;

        let items = self.document.create_element("ul")?;
        items.set_class_name("clause-items");
        for sentence in &group.items {
            let item = self.document.create_element("li")?;
            item.set_class_name("clause-item");
            item.set_text_content(Some(sentence));
            items.append_child(&item)?;
        }
        block.append_child(&items)?;

        Ok(block)
    }
}

impl ViewSurface for DomSurface {
    fn set_region_visible(&mut self, region: Region, visible: bool) {
        if let Some(element) = self.region_element(region) {
            element.set_hidden(!visible);
        }
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit.set_disabled(!enabled);
    }

    fn set_error_text(&mut self, message: &str) {
        self.error_text.set_text_content(Some(message));
    }

    fn set_validation_message(&mut self, message: Option<&str>) {
        match &self.validation {
            Some(element) => {
                element.set_text_content(message);
                element.set_hidden(message.is_none());
            }
            None => {
                if let Some(message) = message {
                    web_sys::console::warn_1(&message.into());
                }
            }
        }
    }

    fn set_file_label(&mut self, label: &str) {
        self.file_label.set_text_content(Some(label));
    }

    fn replace_results(&mut self, tree: &VisualTree) {
        self.result_filename.set_text_content(Some(&tree.filename));
        self.result_total.set_text_content(Some(&tree.total));

        // Drop previously rendered groups
        self.clause_list.set_text_content(None);

        if let Err(err) = self.build_body(tree) {
            web_sys::console::error_2(&"Failed to render clause groups".into(), &err);
        }
    }

    fn scroll_to_results(&mut self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        self.results
            .scroll_into_view_with_scroll_into_view_options(&options);
    }
}
