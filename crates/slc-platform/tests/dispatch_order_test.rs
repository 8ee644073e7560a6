//! Click dispatch order: `onclick` first, then listeners in registration
//! order. Post-copy handlers depend on page listeners running before theirs.

use std::sync::{Arc, Mutex};

use slc_core::dom::{DomEvent, ListenerOptions};
use slc_core::ports::DomPort;
use slc_platform::adapters::InMemoryDom;

fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Arc<dyn Fn() + Send + Sync> {
    let log = log.clone();
    Arc::new(move || log.lock().unwrap().push(name))
}

#[test]
fn test_onclick_then_listeners_in_registration_order() {
    let dom = InMemoryDom::new();
    let handle = dom.insert_element("share-btn-outer");
    let log = Arc::new(Mutex::new(Vec::new()));

    dom.add_native_listener("share-btn-outer", DomEvent::Click, recorder(&log, "native"));
    dom.add_event_listener(
        &handle,
        DomEvent::Click,
        recorder(&log, "handler"),
        ListenerOptions { once: false },
    )
    .unwrap();
    dom.set_native_click_handler("share-btn-outer", recorder(&log, "onclick"));

    dom.click("share-btn-outer");

    assert_eq!(*log.lock().unwrap(), vec!["onclick", "native", "handler"]);
}

#[test]
fn test_replaced_onclick_receives_clicks() {
    let dom = InMemoryDom::new();
    let handle = dom.insert_element("copy-button");
    let log = Arc::new(Mutex::new(Vec::new()));
    dom.set_native_click_handler("copy-button", recorder(&log, "native"));

    let original = dom.click_handler(&handle).expect("native handler present");
    let wrapped: Arc<dyn Fn() + Send + Sync> = {
        let log = log.clone();
        Arc::new(move || {
            log.lock().unwrap().push("wrapper");
            original();
        })
    };
    dom.set_click_handler(&handle, wrapped).unwrap();

    dom.click("copy-button");

    assert_eq!(*log.lock().unwrap(), vec!["wrapper", "native"]);
}

#[test]
fn test_input_value_round_trip() {
    let dom = InMemoryDom::new();
    dom.insert_input("share-url", "https://youtu.be/dQw4w9WgXcQ?si=abc");

    dom.set_input_value(&"share-url".into(), "https://youtu.be/dQw4w9WgXcQ")
        .unwrap();

    assert_eq!(
        dom.value_of("share-url").as_deref(),
        Some("https://youtu.be/dQw4w9WgXcQ")
    );
    assert!(dom.set_input_value(&"missing".into(), "x").is_err());
}
