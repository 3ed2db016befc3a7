//! Page fixtures shared by the integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use wisata_core::Page;
use wisata_harness::{ElementSpec, FakeHost, NodeId};

pub const SUBMIT_LABEL: &str = "Kirim Pesan";

/// Nodes of the full landing page fixture.
pub struct LandingPage {
    pub host: Rc<FakeHost>,
    pub header: NodeId,
    pub menu_button: NodeId,
    pub nav: NodeId,
    pub nav_link: NodeId,
    pub other_page_link: NodeId,
    pub back_to_top: NodeId,
    pub sections: Vec<NodeId>,
    pub cards: Vec<NodeId>,
    pub form: ContactForm,
    pub slides: Vec<NodeId>,
}

pub struct ContactForm {
    pub form: NodeId,
    pub name: NodeId,
    pub email: NodeId,
    pub message: NodeId,
    pub button: NodeId,
}

impl ContactForm {
    pub fn fill(&self, host: &FakeHost, name: &str, email: &str, message: &str) {
        host.set_value(self.name, name);
        host.set_value(self.email, email);
        host.set_value(self.message, message);
    }
}

pub fn contact_form(host: &FakeHost, parent: NodeId) -> ContactForm {
    let form = host.insert(parent, ElementSpec::new("form").id("contactForm"));
    ContactForm {
        form,
        name: host.insert(form, ElementSpec::new("input").attr("name", "name")),
        email: host.insert(form, ElementSpec::new("input").attr("name", "email")),
        message: host.insert(form, ElementSpec::new("textarea").attr("name", "message")),
        button: host.insert(
            form,
            ElementSpec::new("button")
                .attr("type", "submit")
                .html(SUBMIT_LABEL),
        ),
    }
}

pub fn slider(host: &FakeHost, parent: NodeId, images: usize) -> Vec<NodeId> {
    let container = host.insert(parent, ElementSpec::new("div").class("image-slider"));
    (0..images)
        .map(|_| host.insert(container, ElementSpec::new("img").class("image")))
        .collect()
}

pub fn landing_page() -> LandingPage {
    let host = FakeHost::new();

    let header =
        host.insert_into_body(ElementSpec::new("header").class("main-header").height(80.0));
    let menu_button = host.insert(
        header,
        ElementSpec::new("button")
            .class("mobile-menu-btn")
            .html("<i class=\"fas fa-bars\"></i>"),
    );
    let nav = host.insert(header, ElementSpec::new("nav").class("main-nav"));
    let nav_link = host.insert(nav, ElementSpec::new("a").attr("href", "#destinasi"));
    let other_page_link = host.insert(nav, ElementSpec::new("a").attr("href", "#bali.html"));

    let hero = host.insert_into_body(ElementSpec::new("section").id("beranda").top(80.0));
    let destinations =
        host.insert_into_body(ElementSpec::new("section").id("destinasi").top(1200.0));
    let cards = (0..4)
        .map(|i| {
            host.insert(
                destinations,
                ElementSpec::new("div")
                    .class("destination-card")
                    .class("fade-in")
                    .top(1300.0 + 350.0 * i as f64),
            )
        })
        .collect();
    let contact = host.insert_into_body(ElementSpec::new("section").id("kontak").top(3000.0));
    let form = contact_form(&host, contact);
    let slides = slider(&host, hero, 3);

    let back_to_top = host.insert_into_body(
        ElementSpec::new("a")
            .class("back-to-top")
            .attr("href", "#"),
    );

    LandingPage {
        header,
        menu_button,
        nav,
        nav_link,
        other_page_link,
        back_to_top,
        sections: vec![hero, destinations, contact],
        cards,
        form,
        slides,
        host,
    }
}

/// Banners currently attached with the given kind class.
pub fn alerts(host: &FakeHost, kind_class: &str) -> Vec<NodeId> {
    host.query_all(&format!(".alert.{kind_class}"))
}

/// Message text of a banner.
pub fn alert_text(host: &FakeHost, alert: NodeId) -> String {
    host.children(alert)
        .first()
        .map(|span| host.text(*span))
        .unwrap_or_default()
}
