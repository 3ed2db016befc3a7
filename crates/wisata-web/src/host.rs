//! `web_sys` implementation of the host traits.

use std::fmt::Display;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, FormData, HtmlButtonElement,
    HtmlElement, HtmlFormElement, NodeList, ScrollBehavior, ScrollToOptions, Window,
};
use wisata_core::host::Handler;
use wisata_core::{EventKind, EventOutcome, Page, Scheduler, SiteError, Subscription, Target};

/// Log and drop a failed DOM call.
fn ok_or_warn<T>(context: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(context, error = ?err, "dom call failed");
            None
        }
    }
}

fn elements(list: Result<NodeList, JsValue>, selector: &impl Display) -> Vec<Element> {
    let Some(list) = ok_or_warn(&format!("querySelectorAll({selector})"), list) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The live page.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, SiteError> {
        let window = web_sys::window().ok_or_else(|| SiteError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SiteError::Dom("no document".into()))?;
        Ok(Self { window, document })
    }

    /// Still parsing markup (`DOMContentLoaded` not yet fired).
    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }
}

impl Page for WebHost {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        ok_or_warn(
            &format!("querySelector({selector})"),
            self.document.query_selector(selector),
        )
        .flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(self.document.query_selector_all(selector), &selector)
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Vec<Element> {
        elements(parent.query_selector_all(selector), &selector)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        ok_or_warn("createElement", self.document.create_element(tag))
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        ok_or_warn("appendChild", parent.append_child(child));
    }

    fn remove(&self, element: &Element) {
        element.remove();
    }

    fn add_class(&self, element: &Element, class: &str) {
        ok_or_warn("classList.add", element.class_list().add_1(class));
    }

    fn remove_class(&self, element: &Element, class: &str) {
        ok_or_warn("classList.remove", element.class_list().remove_1(class));
    }

    fn toggle_class(&self, element: &Element, class: &str) -> bool {
        ok_or_warn("classList.toggle", element.class_list().toggle(class)).unwrap_or(false)
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            ok_or_warn("style.setProperty", html.style().set_property(property, value));
        }
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            ok_or_warn("setAttribute", element.set_attribute("disabled", ""));
        } else {
            ok_or_warn("removeAttribute", element.remove_attribute("disabled"));
        }
    }

    fn form_value(&self, form: &Element, field: &str) -> Option<String> {
        let form = form.dyn_ref::<HtmlFormElement>()?;
        let data = ok_or_warn("new FormData", FormData::new_with_form(form))?;
        data.get(field).as_string()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn viewport_top(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().top()
    }

    fn offset_height(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_height()))
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        ok_or_warn("scrollY", self.window.scroll_y()).unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        ok_or_warn("innerHeight", self.window.inner_height())
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn document_complete(&self) -> bool {
        self.document.ready_state() == "complete"
    }

    fn listen(
        &self,
        target: Target<'_, Element>,
        event: EventKind,
        handler: Handler,
    ) -> Subscription {
        let target: EventTarget = match target {
            Target::Window => self.window.clone().into(),
            Target::Document => self.document.clone().into(),
            Target::Element(element) => element.clone().into(),
        };

        let closure = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            if handler() == EventOutcome::PreventDefault {
                event.prevent_default();
            }
        });
        // Ownership moves to JS; the function lives as long as the page.
        let function: js_sys::Function = closure.into_js_value().unchecked_into();

        if ok_or_warn(
            event.as_str(),
            target.add_event_listener_with_callback(event.as_str(), &function),
        )
        .is_none()
        {
            return Subscription::noop();
        }

        Subscription::new(move || {
            ok_or_warn(
                "removeEventListener",
                target.remove_event_listener_with_callback(event.as_str(), &function),
            );
        })
    }
}

impl Scheduler for WebHost {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Subscription {
        let function: js_sys::Function =
            Closure::once_into_js(move || callback()).unchecked_into();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);

        let Some(handle) = ok_or_warn(
            "setTimeout",
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&function, delay),
        ) else {
            return Subscription::noop();
        };

        let window = self.window.clone();
        Subscription::new(move || window.clear_timeout_with_handle(handle))
    }

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> Subscription {
        let closure = Closure::wrap(callback);
        let function: js_sys::Function = closure.into_js_value().unchecked_into();
        let period = i32::try_from(period_ms).unwrap_or(i32::MAX);

        let Some(handle) = ok_or_warn(
            "setInterval",
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(&function, period),
        ) else {
            return Subscription::noop();
        };

        let window = self.window.clone();
        Subscription::new(move || window.clear_interval_with_handle(handle))
    }
}
